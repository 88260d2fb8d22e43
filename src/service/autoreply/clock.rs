use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;

use super::PolicyError;

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    fn now_in(&self, tz: Tz) -> DateTime<Tz> {
        self.now().with_timezone(&tz)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    pub fn at<T: TimeZone>(local: DateTime<T>) -> Self {
        Self(local.with_timezone(&Utc))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

pub fn parse_timezone(id: &str) -> Result<Tz, PolicyError> {
    id.trim()
        .parse::<Tz>()
        .map_err(|_| PolicyError::InvalidTimezone(id.to_string()))
}
