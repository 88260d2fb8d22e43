mod model;

pub use model::{StatusChange, StatusChangeError, UserRecord, DEFAULT_CUSTOM_AUTOREPLY};

use chrono_tz::Tz;
use teloxide::types::UserId;

use crate::storage::{JsonStore, USERS};

use super::{
    autoreply::{parse_timezone, AutoReplyMode},
    ServiceError,
};

/// Owns the per-user preference records.
#[derive(Clone)]
pub struct UserService {
    store: JsonStore,
    default_timezone: String,
}

impl UserService {
    pub fn new(store: JsonStore, default_timezone: Tz) -> Self {
        info!("Initializing UserService (default timezone: {})", default_timezone);
        Self {
            store,
            default_timezone: default_timezone.name().to_string(),
        }
    }

    pub fn get(&self, user_id: UserId) -> Result<Option<UserRecord>, ServiceError> {
        Ok(self.store.get(USERS, &user_id.to_string())?)
    }

    /// Loads the record, creating it with defaults on first contact. The first name is stored
    /// once, when the record has none yet.
    pub async fn get_or_create(&self, user_id: UserId, first_name: Option<&str>) -> Result<UserRecord, ServiceError> {
        if let Some(record) = self.get(user_id)? {
            if !record.name.is_empty() || first_name.is_none() {
                return Ok(record);
            }
        }

        self.modify(user_id, |record| {
            if record.name.is_empty() {
                if let Some(name) = first_name {
                    record.name = name.to_string();
                }
            }
        })
        .await
    }

    /// Counts an inbound message and returns the record as it stands afterwards.
    pub async fn record_message(&self, user_id: UserId, first_name: Option<&str>) -> Result<UserRecord, ServiceError> {
        self.modify(user_id, |record| {
            record.message_count += 1;
            if record.name.is_empty() {
                if let Some(name) = first_name {
                    record.name = name.to_string();
                }
            }
        })
        .await
    }

    pub async fn set_mode(&self, user_id: UserId, mode: AutoReplyMode) -> Result<UserRecord, ServiceError> {
        info!("User {} switches auto-reply mode to {}", user_id, mode);
        self.modify(user_id, |record| record.autoreply_mode = mode).await
    }

    pub async fn apply_status(&self, user_id: UserId, change: &StatusChange) -> Result<UserRecord, ServiceError> {
        info!("User {} switches status to {}", user_id, change.status());
        self.modify(user_id, |record| record.apply(change)).await
    }

    /// Rejects identifiers that are not IANA timezones instead of storing them.
    pub async fn set_timezone(&self, user_id: UserId, timezone: &str) -> Result<Tz, ServiceError> {
        let tz = parse_timezone(timezone)?;
        self.modify(user_id, |record| record.timezone = tz.name().to_string())
            .await?;
        Ok(tz)
    }

    pub async fn set_custom_message(&self, user_id: UserId, text: &str) -> Result<UserRecord, ServiceError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ServiceError::Validation("Custom auto-reply text cannot be empty".into()));
        }
        self.modify(user_id, |record| record.custom_autoreply = Some(text.to_string()))
            .await
    }

    async fn modify<F>(&self, user_id: UserId, f: F) -> Result<UserRecord, ServiceError>
    where
        F: FnOnce(&mut UserRecord),
    {
        let default_timezone = self.default_timezone.as_str();
        let record = self
            .store
            .update::<Option<UserRecord>, _>(USERS, &user_id.to_string(), |slot| {
                f(slot.get_or_insert_with(|| UserRecord::new(default_timezone)));
            })
            .await?;

        record.ok_or_else(|| ServiceError::Other(format!("User {} vanished during update", user_id)))
    }
}
