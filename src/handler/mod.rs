mod callback;
mod command;
mod keyboard;
mod message;
mod view;

use callback::get_callback_handler;

use command::get_command_handler;
use message::{get_message_handler, handle_message_unknown};
use teloxide::{
    dispatching::{
        dialogue::{self, ErasedStorage},
        UpdateFilterExt, UpdateHandler,
    },
    types::{Message, Update, User, UserId},
};

use crate::{
    error::BotError,
    service::{
        autoreply::{parse_timezone, AutoReplyMode},
        dialogue::DialogueState,
        user::UserRecord,
        ServiceError,
    },
    state::AppState,
};

pub fn get_handler() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    dialogue::enter::<Update, ErasedStorage<DialogueState>, DialogueState, _>()
        .branch(get_command_handler())
        .branch(get_message_handler())
        .branch(get_callback_handler())
        .branch(Update::filter_message().endpoint(handle_message_unknown))
}

fn sender(msg: &Message) -> Result<&User, BotError> {
    msg.from
        .as_ref()
        .ok_or_else(|| BotError::DialogueStateError("Message has no sender".into()))
}

/// Today's appointments and open tasks in the user's timezone, plus the auto-reply line when
/// it would currently answer for them.
fn today_view(state: &AppState, user_id: UserId, record: &UserRecord) -> Result<String, ServiceError> {
    let services = &state.services;
    let tz = parse_timezone(&record.timezone).unwrap_or(state.config.default_timezone);
    let now = services.clock().now();

    let appointments = services.planner.todays_appointments(user_id, tz, now)?;
    let active_tasks = services.planner.active_tasks(user_id)?;

    let autoreply = match &record.autoreply_mode {
        AutoReplyMode::Off => None,
        mode => services
            .autoreply
            .is_intercepting(record)
            .unwrap_or(false)
            .then(|| mode.clone()),
    };

    Ok(view::today_text(now.with_timezone(&tz), &appointments, &active_tasks, autoreply))
}
