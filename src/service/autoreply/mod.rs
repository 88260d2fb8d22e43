use std::sync::Arc;

mod catalog;
mod clock;
mod error;
mod model;
mod policy;

pub use catalog::{Placeholder, ResponseCatalog, ResponseKind};
pub use clock::{parse_timezone, Clock, FixedClock, SystemClock};
pub use error::PolicyError;
pub use model::{AutoReplyMode, PolicyParameters, UserStatus, DEFAULT_TIMEZONE};
pub use policy::{AutoReplyPolicy, LUNCH_RETURN_TIME, SICK_UNTIL_FALLBACK, VACATION_END_FALLBACK};

use super::user::UserRecord;

/// Runs the auto-reply policy against a user's current record.
#[derive(Clone)]
pub struct AutoReplyService {
    policy: AutoReplyPolicy,
    clock: Arc<dyn Clock>,
}

impl AutoReplyService {
    pub fn new(policy: AutoReplyPolicy, clock: Arc<dyn Clock>) -> Self {
        Self { policy, clock }
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Returns the canned reply for `message`, or `None` when the user answers personally.
    pub fn check(&self, record: &UserRecord, message: &str) -> Result<Option<String>, PolicyError> {
        let params = record.policy_parameters()?;
        let now = self.clock.now();

        let reply = self
            .policy
            .evaluate(record.autoreply_mode.clone(), record.status.clone(), &params, message, now);

        debug!(
            "Auto-reply check (mode: {}, status: {}): {}",
            record.autoreply_mode,
            record.status,
            if reply.is_some() { "intercepted" } else { "passed through" }
        );

        Ok(reply)
    }

    /// Whether a message arriving right now would be intercepted.
    pub fn is_intercepting(&self, record: &UserRecord) -> Result<bool, PolicyError> {
        let params = record.policy_parameters()?;
        Ok(self
            .policy
            .should_intercept(record.autoreply_mode.clone(), record.status.clone(), &params, self.clock.now()))
    }
}
