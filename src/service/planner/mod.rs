mod model;

pub use model::{Appointment, Task};

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use teloxide::types::UserId;

use crate::{
    storage::{JsonStore, APPOINTMENTS, TASKS},
    utils::extract_time,
};

use super::ServiceError;

/// Tasks and appointments picked up from free text.
#[derive(Clone)]
pub struct PlannerService {
    store: JsonStore,
}

impl PlannerService {
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    pub async fn add_task(&self, user_id: UserId, text: &str, now: DateTime<Utc>) -> Result<Task, ServiceError> {
        let tasks = self
            .store
            .update::<Vec<Task>, _>(TASKS, &user_id.to_string(), |tasks| {
                let id = tasks.len() as u32 + 1;
                tasks.push(Task {
                    id,
                    text: text.to_string(),
                    created: now,
                    completed: false,
                });
            })
            .await?;

        info!("Added task for user {}", user_id);
        tasks
            .last()
            .cloned()
            .ok_or_else(|| ServiceError::Other("Task list empty after insert".into()))
    }

    pub async fn add_appointment(
        &self,
        user_id: UserId,
        text: &str,
        now: DateTime<Utc>,
    ) -> Result<Appointment, ServiceError> {
        let time = extract_time(text).map(|(hour, minute)| format!("{}:{:02}", hour, minute));

        let appointments = self
            .store
            .update::<Vec<Appointment>, _>(APPOINTMENTS, &user_id.to_string(), |appointments| {
                let id = appointments.len() as u32 + 1;
                appointments.push(Appointment {
                    id,
                    text: text.to_string(),
                    created: now,
                    time,
                });
            })
            .await?;

        info!("Added appointment for user {}", user_id);
        appointments
            .last()
            .cloned()
            .ok_or_else(|| ServiceError::Other("Appointment list empty after insert".into()))
    }

    pub fn tasks(&self, user_id: UserId) -> Result<Vec<Task>, ServiceError> {
        Ok(self.store.get(TASKS, &user_id.to_string())?.unwrap_or_default())
    }

    pub fn active_tasks(&self, user_id: UserId) -> Result<Vec<Task>, ServiceError> {
        Ok(self.tasks(user_id)?.into_iter().filter(|task| !task.completed).collect())
    }

    pub fn appointments(&self, user_id: UserId) -> Result<Vec<Appointment>, ServiceError> {
        Ok(self
            .store
            .get(APPOINTMENTS, &user_id.to_string())?
            .unwrap_or_default())
    }

    /// Appointments created on the current calendar day in `tz`.
    pub fn todays_appointments(
        &self,
        user_id: UserId,
        tz: Tz,
        now: DateTime<Utc>,
    ) -> Result<Vec<Appointment>, ServiceError> {
        let today = now.with_timezone(&tz).date_naive();
        Ok(self
            .appointments(user_id)?
            .into_iter()
            .filter(|appointment| appointment.created.with_timezone(&tz).date_naive() == today)
            .collect())
    }
}
