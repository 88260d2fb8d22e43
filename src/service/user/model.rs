use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::service::autoreply::{parse_timezone, AutoReplyMode, PolicyError, PolicyParameters, UserStatus};

pub const DEFAULT_CUSTOM_AUTOREPLY: &str = "👩‍💼 Я сейчас занята. Отвечу вам в ближайшее время!";

/// Per-user preferences as persisted in the `users` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default)]
    pub autoreply_mode: AutoReplyMode,
    #[serde(default)]
    pub status: UserStatus,
    #[serde(default)]
    pub custom_autoreply: Option<String>,
    #[serde(default)]
    pub vacation_start: Option<String>,
    #[serde(default)]
    pub vacation_end: Option<String>,
    #[serde(default)]
    pub sick_until: Option<String>,
    #[serde(default)]
    pub message_count: u64,
    /// Keys written by older versions of the bot, carried through every rewrite untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_timezone() -> String {
    "Europe/Moscow".to_string()
}

impl UserRecord {
    pub fn new(timezone: &str) -> Self {
        Self {
            name: String::new(),
            timezone: timezone.to_string(),
            autoreply_mode: AutoReplyMode::WorkHours,
            status: UserStatus::Available,
            custom_autoreply: Some(DEFAULT_CUSTOM_AUTOREPLY.to_string()),
            vacation_start: None,
            vacation_end: None,
            sick_until: None,
            message_count: 0,
            extra: Map::new(),
        }
    }

    pub fn policy_parameters(&self) -> Result<PolicyParameters, PolicyError> {
        Ok(PolicyParameters {
            timezone: parse_timezone(&self.timezone)?,
            custom_message: self.custom_autoreply.clone(),
            vacation_end: self.vacation_end.clone(),
            sick_until: self.sick_until.clone(),
        })
    }

    pub fn apply(&mut self, change: &StatusChange) {
        self.status = change.status();
        self.autoreply_mode = change.mode();

        match change {
            StatusChange::Vacation { start, end } => {
                self.vacation_start = Some(start.clone());
                self.vacation_end = Some(end.clone());
            }
            StatusChange::Sick { until } => {
                self.sick_until = Some(until.clone());
            }
            _ => {}
        }
    }
}

/// A status switch requested by the user. Each one also selects the matching auto-reply mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusChange {
    Available,
    Busy,
    Meeting,
    Vacation { start: String, end: String },
    Sick { until: String },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StatusChangeError {
    #[error("No status given")]
    Missing,
    #[error("Unknown status: {0}")]
    Unknown(String),
    #[error("Vacation needs a start and an end date")]
    MissingVacationDates,
    #[error("Sick leave needs a return date")]
    MissingReturnDate,
}

impl StatusChange {
    pub fn status(&self) -> UserStatus {
        match self {
            StatusChange::Available => UserStatus::Available,
            StatusChange::Busy => UserStatus::Busy,
            StatusChange::Meeting => UserStatus::Meeting,
            StatusChange::Vacation { .. } => UserStatus::Vacation,
            StatusChange::Sick { .. } => UserStatus::Sick,
        }
    }

    pub fn mode(&self) -> AutoReplyMode {
        match self {
            StatusChange::Available => AutoReplyMode::WorkHours,
            StatusChange::Busy | StatusChange::Meeting => AutoReplyMode::Always,
            StatusChange::Vacation { .. } => AutoReplyMode::Vacation,
            StatusChange::Sick { .. } => AutoReplyMode::Sick,
        }
    }
}

impl FromStr for StatusChange {
    type Err = StatusChangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut args = s.split_whitespace();
        let status = args.next().ok_or(StatusChangeError::Missing)?.to_lowercase();

        match status.as_str() {
            "available" => Ok(StatusChange::Available),
            "busy" => Ok(StatusChange::Busy),
            "meeting" => Ok(StatusChange::Meeting),
            "vacation" => match (args.next(), args.next()) {
                (Some(start), Some(end)) => Ok(StatusChange::Vacation {
                    start: start.to_string(),
                    end: end.to_string(),
                }),
                _ => Err(StatusChangeError::MissingVacationDates),
            },
            "sick" => args
                .next()
                .map(|until| StatusChange::Sick {
                    until: until.to_string(),
                })
                .ok_or(StatusChangeError::MissingReturnDate),
            _ => Err(StatusChangeError::Unknown(status)),
        }
    }
}
