mod assistant;
mod custom_text;

use teloxide::{
    dispatching::{UpdateFilterExt, UpdateHandler},
    dptree,
    payloads::SendMessageSetters,
    prelude::Requester,
    types::{Message, Update},
    Bot,
};

use crate::{
    error::{BotError, HandlerResult},
    service::dialogue::{BotDialogue, DialogueState},
};

use super::keyboard::get_main_menu_keyboard;

pub fn get_message_handler() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync>> {
    Update::filter_message()
        .branch(
            dptree::case![DialogueState::AwaitingCustomText(prompt_id)]
                .endpoint(custom_text::handle_message_custom_text),
        )
        .branch(
            dptree::case![DialogueState::Start]
                .filter(|msg: Message| msg.text().is_some())
                .endpoint(assistant::handle_message_text),
        )
}

/// Anything that is neither a command nor text.
pub async fn handle_message_unknown(bot: Bot, message: Message, dialogue: BotDialogue) -> HandlerResult<()> {
    bot.send_message(message.chat.id, t!("messages.text_only"))
        .reply_markup(get_main_menu_keyboard())
        .await?;

    dialogue
        .update(DialogueState::Start)
        .await
        .map_err(|e| BotError::DialogueStateError(e.to_string()))?;
    Ok(())
}
