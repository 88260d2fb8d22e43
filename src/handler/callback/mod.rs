mod autoreply;
mod navigation;

use teloxide::{
    dispatching::UpdateHandler,
    prelude::*,
    types::{CallbackQuery, InlineKeyboardMarkup, MaybeInaccessibleMessage},
    ApiError, RequestError,
};

use crate::{
    error::{BotError, HandlerResult},
    service::dialogue::{BotDialogue, DialogueState},
    state::AppState,
};

/// What a callback leaves behind in the message the button belonged to.
pub(super) struct Screen {
    text: String,
    keyboard: InlineKeyboardMarkup,
}

impl Screen {
    fn new(text: impl Into<String>, keyboard: InlineKeyboardMarkup) -> Self {
        Self {
            text: text.into(),
            keyboard,
        }
    }
}

async fn handle_callback(bot: Bot, dialogue: BotDialogue, q: CallbackQuery, state: AppState) -> HandlerResult<()> {
    let data = q
        .data
        .as_deref()
        .ok_or_else(|| BotError::DialogueStateError("No callback data".into()))?;

    let message = q
        .message
        .as_ref()
        .ok_or_else(|| BotError::DialogueStateError("No message".into()))?;

    debug!("Callback {} from user {}", data, q.from.id);

    // Any button other than `ar_custom` abandons a pending custom-text prompt.
    if data != "ar_custom" {
        dialogue
            .update(DialogueState::Start)
            .await
            .map_err(|e| BotError::DialogueStateError(e.to_string()))?;
    }

    let screen = match data {
        "autoreply_menu" => Some(navigation::autoreply_menu(&state, &q.from).await?),
        "today" => Some(navigation::today(&state, &q.from).await?),
        "tasks" => Some(navigation::tasks(&state, &q.from)?),
        "reminders" => Some(navigation::reminders(&state, &q.from).await?),
        "vacation" => Some(navigation::vacation()),
        "sick" => Some(navigation::sick()),
        "settings" => Some(navigation::settings(&state, &q.from).await?),
        "help" => Some(navigation::help()),
        "back_to_main" => Some(navigation::back_to_main(&q.from)),

        s if s.starts_with("ar_") => autoreply::set_mode(&state, &dialogue, &q.from, message, &s[3..]).await?,
        s if s.starts_with("status_") => autoreply::set_status(&state, &q.from, &s[7..]).await?,

        _ => None,
    };

    match screen {
        Some(screen) => {
            bot.answer_callback_query(q.id.clone()).await?;
            show(&bot, message, screen).await?;
        }
        None => {
            warn!("Unknown callback data: {}", data);
            bot.answer_callback_query(q.id.clone())
                .text(t!("callbacks.unknown"))
                .await?;
        }
    }

    Ok(())
}

async fn show(bot: &Bot, message: &MaybeInaccessibleMessage, screen: Screen) -> HandlerResult<()> {
    let result = bot
        .edit_message_text(message.chat().id, message.id(), screen.text)
        .reply_markup(screen.keyboard)
        .await;

    match result {
        Ok(_) | Err(RequestError::Api(ApiError::MessageNotModified)) => Ok(()),
        Err(e) => Err(e.into()),
    }
}

pub fn get_callback_handler() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync>> {
    Update::filter_callback_query().endpoint(handle_callback)
}
