use std::fmt;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Europe::Moscow;

/// The user's auto-reply policy selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AutoReplyMode {
    Off,
    #[default]
    WorkHours,
    Always,
    Custom,
    Vacation,
    Sick,
    /// A persisted value this build does not recognize, kept verbatim.
    Unknown(String),
}

impl AutoReplyMode {
    pub fn as_str(&self) -> &str {
        match self {
            AutoReplyMode::Off => "off",
            AutoReplyMode::WorkHours => "work_hours",
            AutoReplyMode::Always => "always",
            AutoReplyMode::Custom => "custom",
            AutoReplyMode::Vacation => "vacation",
            AutoReplyMode::Sick => "sick",
            AutoReplyMode::Unknown(raw) => raw,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, AutoReplyMode::Unknown(_))
    }
}

impl From<String> for AutoReplyMode {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "off" => AutoReplyMode::Off,
            "work_hours" => AutoReplyMode::WorkHours,
            "always" => AutoReplyMode::Always,
            "custom" => AutoReplyMode::Custom,
            "vacation" => AutoReplyMode::Vacation,
            "sick" => AutoReplyMode::Sick,
            _ => AutoReplyMode::Unknown(raw),
        }
    }
}

impl From<AutoReplyMode> for String {
    fn from(mode: AutoReplyMode) -> Self {
        match mode {
            AutoReplyMode::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for AutoReplyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The user's current real-world availability. Independent of [`AutoReplyMode`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UserStatus {
    #[default]
    Available,
    Busy,
    Meeting,
    Vacation,
    Sick,
    Lunch,
    Unknown(String),
}

impl UserStatus {
    pub fn as_str(&self) -> &str {
        match self {
            UserStatus::Available => "available",
            UserStatus::Busy => "busy",
            UserStatus::Meeting => "meeting",
            UserStatus::Vacation => "vacation",
            UserStatus::Sick => "sick",
            UserStatus::Lunch => "lunch",
            UserStatus::Unknown(raw) => raw,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, UserStatus::Unknown(_))
    }

    /// Statuses that force an auto-reply whatever the mode, unless the mode is `Off`.
    pub fn overrides_mode(&self) -> bool {
        matches!(self, UserStatus::Vacation | UserStatus::Sick | UserStatus::Meeting)
    }
}

impl From<String> for UserStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "available" => UserStatus::Available,
            "busy" => UserStatus::Busy,
            "meeting" => UserStatus::Meeting,
            "vacation" => UserStatus::Vacation,
            "sick" => UserStatus::Sick,
            "lunch" => UserStatus::Lunch,
            _ => UserStatus::Unknown(raw),
        }
    }
}

impl From<UserStatus> for String {
    fn from(status: UserStatus) -> Self {
        match status {
            UserStatus::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inputs to a single policy evaluation, derived fresh from the user record each time.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyParameters {
    pub timezone: Tz,
    pub custom_message: Option<String>,
    pub vacation_end: Option<String>,
    pub sick_until: Option<String>,
}

impl Default for PolicyParameters {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE,
            custom_message: None,
            vacation_end: None,
            sick_until: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_serde_names() {
        assert_eq!(serde_json::to_string(&AutoReplyMode::WorkHours).unwrap(), "\"work_hours\"");
        assert_eq!(
            serde_json::from_str::<AutoReplyMode>("\"always\"").unwrap(),
            AutoReplyMode::Always
        );
    }

    #[test]
    fn test_unrecognized_values_keep_their_text() {
        let mode = serde_json::from_str::<AutoReplyMode>("\"holiday\"").unwrap();
        assert_eq!(mode, AutoReplyMode::Unknown("holiday".to_string()));
        assert!(mode.is_unknown());
        assert_eq!(serde_json::to_string(&mode).unwrap(), "\"holiday\"");

        let status = serde_json::from_str::<UserStatus>("\"asleep\"").unwrap();
        assert_eq!(status, UserStatus::Unknown("asleep".to_string()));
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"asleep\"");

        assert_eq!(serde_json::to_string(&UserStatus::Lunch).unwrap(), "\"lunch\"");
    }

    #[test]
    fn test_overriding_statuses() {
        assert!(UserStatus::Vacation.overrides_mode());
        assert!(UserStatus::Sick.overrides_mode());
        assert!(UserStatus::Meeting.overrides_mode());
        assert!(!UserStatus::Busy.overrides_mode());
        assert!(!UserStatus::Lunch.overrides_mode());
        assert!(!UserStatus::Available.overrides_mode());
    }
}
