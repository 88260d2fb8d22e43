use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderStatus {
    #[default]
    Active,
    Sent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: u32,
    pub text: String,
    pub time: DateTime<Utc>,
    pub created: DateTime<Utc>,
    #[serde(default)]
    pub status: ReminderStatus,
}

impl Reminder {
    pub fn is_active(&self) -> bool {
        self.status == ReminderStatus::Active
    }
}
