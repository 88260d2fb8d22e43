use teloxide::types::{MaybeInaccessibleMessage, User};

use crate::{
    error::{BotError, BotResult},
    handler::{keyboard::get_autoreply_keyboard, view},
    service::{
        autoreply::AutoReplyMode,
        dialogue::{BotDialogue, DialogueState},
        user::{StatusChange, DEFAULT_CUSTOM_AUTOREPLY},
    },
    state::AppState,
};

use super::Screen;

/// `ar_<mode>` buttons. `ar_custom` also waits for the next text message as the reply text.
pub(super) async fn set_mode(
    state: &AppState,
    dialogue: &BotDialogue,
    user: &User,
    message: &MaybeInaccessibleMessage,
    mode: &str,
) -> BotResult<Option<Screen>> {
    let (mode, confirmation) = match mode {
        "work" => (AutoReplyMode::WorkHours, t!("autoreply.mode_set.work_hours")),
        "always" => (AutoReplyMode::Always, t!("autoreply.mode_set.always")),
        "custom" => (AutoReplyMode::Custom, t!("autoreply.mode_set.custom")),
        "off" => (AutoReplyMode::Off, t!("autoreply.mode_set.off")),
        _ => return Ok(None),
    };

    let record = state.services.users.set_mode(user.id, mode).await?;

    if record.autoreply_mode == AutoReplyMode::Custom {
        dialogue
            .update(DialogueState::AwaitingCustomText(message.id()))
            .await
            .map_err(|e| BotError::DialogueStateError(e.to_string()))?;

        let current = record.custom_autoreply.as_deref().unwrap_or(DEFAULT_CUSTOM_AUTOREPLY);
        let text = format!("{}\n\n{}", confirmation, t!("autoreply.custom_prompt", current = current));
        return Ok(Some(Screen::new(text, get_autoreply_keyboard())));
    }

    let text = format!("{}\n\n{}", confirmation, view::autoreply_menu_text(&record));
    Ok(Some(Screen::new(text, get_autoreply_keyboard())))
}

/// `status_<status>` buttons. Vacation and sick leave need dates, so those only explain the command.
pub(super) async fn set_status(state: &AppState, user: &User, status: &str) -> BotResult<Option<Screen>> {
    let (change, confirmation) = match status {
        "vacation" => {
            return Ok(Some(Screen::new(
                t!("autoreply.vacation_instructions"),
                get_autoreply_keyboard(),
            )))
        }
        "sick" => {
            return Ok(Some(Screen::new(
                t!("autoreply.sick_instructions"),
                get_autoreply_keyboard(),
            )))
        }
        "busy" => (StatusChange::Busy, t!("commands.status.busy")),
        "available" => (StatusChange::Available, t!("commands.status.available")),
        _ => return Ok(None),
    };

    let record = state.services.users.apply_status(user.id, &change).await?;

    let text = format!("{}\n\n{}", confirmation, view::autoreply_menu_text(&record));
    Ok(Some(Screen::new(text, get_autoreply_keyboard())))
}
