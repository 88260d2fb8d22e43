use teloxide::{macros::BotCommands, prelude::Requester, types::BotCommand, Bot};

use crate::error::HandlerResult;

#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase")]
pub enum Command {
    Start,
    Help,
    Autoreply,
    Status(String),
    Tasks,
    Today,
    Reminders,
    Timezone(String),
}

impl Command {
    pub fn user_commands() -> Vec<BotCommand> {
        vec![
            BotCommand::new("start", t!("commands.description.start")),
            BotCommand::new("help", t!("commands.description.help")),
            BotCommand::new("autoreply", t!("commands.description.autoreply")),
            BotCommand::new("status", t!("commands.description.status")),
            BotCommand::new("tasks", t!("commands.description.tasks")),
            BotCommand::new("today", t!("commands.description.today")),
            BotCommand::new("reminders", t!("commands.description.reminders")),
            BotCommand::new("timezone", t!("commands.description.timezone")),
        ]
    }
}

#[cfg(not(test))]
pub async fn setup_user_commands(bot: &Bot) -> HandlerResult<()> {
    bot.delete_my_commands().await?;
    bot.set_my_commands(Command::user_commands()).await?;
    Ok(())
}

#[cfg(test)]
pub async fn setup_user_commands(_bot: &Bot) -> HandlerResult<()> {
    Ok(())
}
