mod error;
mod json;

pub use error::StorageError;
pub use json::JsonStore;

pub const USERS: &str = "users";
pub const TASKS: &str = "tasks";
pub const APPOINTMENTS: &str = "appointments";
pub const REMINDERS: &str = "reminders";
pub const SETTINGS: &str = "settings";

pub const COLLECTIONS: [&str; 5] = [USERS, TASKS, APPOINTMENTS, REMINDERS, SETTINGS];
