mod model;
mod parse;

pub use model::{Reminder, ReminderStatus};
pub use parse::parse_reminder_time;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use teloxide::{prelude::*, types::UserId};

use crate::storage::{JsonStore, REMINDERS};

use super::{autoreply::Clock, ServiceError};

/// Stores reminders and fires them through the bot when they are due.
#[derive(Clone)]
pub struct ReminderService {
    store: JsonStore,
    clock: Arc<dyn Clock>,
}

impl ReminderService {
    pub fn new(store: JsonStore, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub async fn add(&self, user_id: UserId, text: &str, time: DateTime<Utc>) -> Result<Reminder, ServiceError> {
        let created = self.clock.now();
        let reminders = self
            .store
            .update::<Vec<Reminder>, _>(REMINDERS, &user_id.to_string(), |reminders| {
                let id = reminders.len() as u32 + 1;
                reminders.push(Reminder {
                    id,
                    text: text.to_string(),
                    time,
                    created,
                    status: ReminderStatus::Active,
                });
            })
            .await?;

        let reminder = reminders
            .last()
            .cloned()
            .ok_or_else(|| ServiceError::Other("Reminder list empty after insert".into()))?;

        info!("Added reminder {} for user {} at {}", reminder.id, user_id, reminder.time);
        Ok(reminder)
    }

    pub fn list(&self, user_id: UserId) -> Result<Vec<Reminder>, ServiceError> {
        Ok(self
            .store
            .get(REMINDERS, &user_id.to_string())?
            .unwrap_or_default())
    }

    /// Returns whether a reminder with that id existed.
    pub async fn mark_sent(&self, user_id: UserId, reminder_id: u32) -> Result<bool, ServiceError> {
        let mut found = false;
        self.store
            .update::<Vec<Reminder>, _>(REMINDERS, &user_id.to_string(), |reminders| {
                if let Some(reminder) = reminders.iter_mut().find(|r| r.id == reminder_id) {
                    reminder.status = ReminderStatus::Sent;
                    found = true;
                }
            })
            .await?;
        Ok(found)
    }

    pub fn active(&self) -> Result<Vec<(UserId, Reminder)>, ServiceError> {
        let mut active = Vec::new();
        for key in self.store.keys(REMINDERS) {
            let Ok(id) = key.parse::<u64>() else {
                warn!("Skipping reminders under non-numeric key {}", key);
                continue;
            };
            let user_id = UserId(id);
            active.extend(
                self.list(user_id)?
                    .into_iter()
                    .filter(Reminder::is_active)
                    .map(|reminder| (user_id, reminder)),
            );
        }
        Ok(active)
    }

    /// Sleeps until the reminder is due (immediately when it is already past), sends it and
    /// marks it sent.
    pub fn schedule(&self, bot: Bot, user_id: UserId, reminder: Reminder) {
        let service = self.clone();
        tokio::spawn(async move {
            let delay = (reminder.time - service.clock.now()).to_std().unwrap_or_default();
            debug!(
                "Reminder {} for user {} fires in {}s",
                reminder.id,
                user_id,
                delay.as_secs()
            );
            tokio::time::sleep(delay).await;

            if let Err(e) = service.deliver(&bot, user_id, &reminder).await {
                error!("Failed to deliver reminder {} to user {}: {}", reminder.id, user_id, e);
            }
        });
    }

    pub fn reschedule_all(&self, bot: &Bot) -> Result<usize, ServiceError> {
        let active = self.active()?;
        let count = active.len();
        for (user_id, reminder) in active {
            self.schedule(bot.clone(), user_id, reminder);
        }
        info!("Rescheduled {} active reminders", count);
        Ok(count)
    }

    async fn deliver(&self, bot: &Bot, user_id: UserId, reminder: &Reminder) -> Result<(), ServiceError> {
        bot.send_message(
            ChatId::from(user_id),
            t!("reminders.notification", text = &reminder.text),
        )
        .await
        .map_err(|e| ServiceError::Other(format!("Telegram request failed: {}", e)))?;

        self.mark_sent(user_id, reminder.id).await?;
        info!("Reminder {} delivered to user {}", reminder.id, user_id);
        Ok(())
    }
}
