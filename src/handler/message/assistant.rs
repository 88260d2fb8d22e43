use chrono::Utc;
use chrono_tz::Tz;
use teloxide::{
    prelude::Requester,
    types::{Message, UserId},
    Bot,
};

use crate::{
    error::HandlerResult,
    handler::sender,
    service::{
        autoreply::PolicyError,
        intent::Intent,
        llm::build_messages,
        reminder::parse_reminder_time,
        ServiceError,
    },
    state::AppState,
};

/// Free text. A canned auto-reply ends the exchange; otherwise the language model answers and
/// the text is scanned for tasks, appointments and reminders.
pub(super) async fn handle_message_text(bot: Bot, msg: Message, state: AppState) -> HandlerResult<()> {
    let user = sender(&msg)?;
    let text = msg.text().unwrap_or_default();

    if text.starts_with('/') {
        bot.send_message(msg.chat.id, t!("commands.unknown_command")).await?;
        return Ok(());
    }

    let services = &state.services;
    let record = services
        .users
        .record_message(user.id, Some(user.first_name.as_str()))
        .await?;

    let tz = match services.autoreply.check(&record, text) {
        Ok(Some(reply)) => {
            info!("Auto-reply ({}) answered user {}", record.autoreply_mode, user.id);
            bot.send_message(msg.chat.id, reply).await?;
            return Ok(());
        }
        Ok(None) => record.policy_parameters()?.timezone,
        Err(PolicyError::InvalidTimezone(timezone)) => {
            warn!("User {} has an invalid timezone stored: {}", user.id, timezone);
            bot.send_message(msg.chat.id, t!("messages.invalid_timezone", timezone = timezone))
                .await?;
            return Ok(());
        }
    };

    let thinking = bot.send_message(msg.chat.id, t!("messages.thinking")).await?;

    let name = if record.name.is_empty() {
        user.first_name.as_str()
    } else {
        record.name.as_str()
    };
    let messages = build_messages(name, services.clock().now_in(tz), text);

    let reply = match services.llm.chat(messages, services.max_tokens).await {
        Ok(answer) => t!("messages.signed_answer", answer = answer),
        Err(e) => {
            error!("Language model request failed for user {}: {}", user.id, e);
            t!("messages.llm_unavailable")
        }
    };

    if let Err(e) = bot.delete_message(msg.chat.id, thinking.id).await {
        warn!("Failed to delete the thinking message: {}", e);
    }
    bot.send_message(msg.chat.id, reply).await?;

    if let Err(e) = process_intents(&bot, &state, user.id, text, tz).await {
        error!("Failed to save intents for user {}: {}", user.id, e);
        bot.send_message(msg.chat.id, t!("messages.error")).await?;
    }

    Ok(())
}

async fn process_intents(bot: &Bot, state: &AppState, user_id: UserId, text: &str, tz: Tz) -> Result<(), ServiceError> {
    let services = &state.services;
    let now = services.clock().now();

    for intent in services.classifier.classify(text) {
        match intent {
            Intent::Task => {
                services.planner.add_task(user_id, text, now).await?;
            }
            Intent::Appointment => {
                services.planner.add_appointment(user_id, text, now).await?;
            }
            Intent::Reminder => {
                let due = parse_reminder_time(text, now.with_timezone(&tz)).with_timezone(&Utc);
                let reminder = services.reminders.add(user_id, text, due).await?;
                services.reminders.schedule(bot.clone(), user_id, reminder);
            }
        }
    }

    Ok(())
}
