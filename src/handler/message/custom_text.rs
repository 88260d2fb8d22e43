use teloxide::{payloads::SendMessageSetters, prelude::Requester, types::{Message, MessageId}, Bot};

use crate::{
    error::{BotError, HandlerResult},
    handler::{keyboard::get_autoreply_keyboard, sender},
    service::{
        dialogue::{BotDialogue, DialogueState},
        ServiceError,
    },
    state::AppState,
};

pub(super) async fn handle_message_custom_text(
    bot: Bot,
    dialogue: BotDialogue,
    prompt_id: MessageId,
    msg: Message,
    state: AppState,
) -> HandlerResult<()> {
    let user = sender(&msg)?;
    let text = msg.text().unwrap_or_default();

    match state.services.users.set_custom_message(user.id, text).await {
        Ok(record) => {
            info!("User {} saved a custom auto-reply", user.id);

            if let Err(e) = bot.edit_message_reply_markup(msg.chat.id, prompt_id).await {
                warn!("Failed to clear the custom text prompt: {}", e);
            }

            let saved = record.custom_autoreply.unwrap_or_default();
            bot.send_message(msg.chat.id, t!("autoreply.custom_saved", text = saved))
                .reply_markup(get_autoreply_keyboard())
                .await?;

            dialogue
                .update(DialogueState::Start)
                .await
                .map_err(|e| BotError::DialogueStateError(e.to_string()))?;
        }
        Err(ServiceError::Validation(_)) => {
            bot.send_message(msg.chat.id, t!("autoreply.custom_empty")).await?;
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
