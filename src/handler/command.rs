use teloxide::dispatching::{HandlerExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::Message;

use crate::command::{self, Command};
use crate::error::{BotError, HandlerResult};
use crate::service::{
    autoreply::{parse_timezone, PolicyError},
    dialogue::{BotDialogue, DialogueState},
    user::{StatusChange, StatusChangeError},
    ServiceError,
};
use crate::state::AppState;

use super::{
    keyboard::{get_autoreply_keyboard, get_main_menu_keyboard},
    sender, today_view, view,
};

async fn handle_start(bot: Bot, msg: Message, state: AppState) -> HandlerResult<()> {
    let user = sender(&msg)?;

    let record = state
        .services
        .users
        .get_or_create(user.id, Some(user.first_name.as_str()))
        .await?;

    info!("User {} started the bot ({} messages so far)", user.id, record.message_count);

    bot.send_message(msg.chat.id, t!("commands.start", first_name = &user.first_name))
        .reply_markup(get_main_menu_keyboard())
        .await?;

    command::setup_user_commands(&bot).await?;

    Ok(())
}

async fn handle_help(bot: Bot, msg: Message) -> HandlerResult<()> {
    bot.send_message(msg.chat.id, t!("commands.help"))
        .reply_markup(get_main_menu_keyboard())
        .await?;

    Ok(())
}

async fn handle_autoreply(bot: Bot, msg: Message, state: AppState) -> HandlerResult<()> {
    let user = sender(&msg)?;
    let record = state.services.users.get_or_create(user.id, Some(user.first_name.as_str())).await?;

    bot.send_message(msg.chat.id, view::autoreply_menu_text(&record))
        .reply_markup(get_autoreply_keyboard())
        .await?;

    Ok(())
}

async fn handle_status(bot: Bot, msg: Message, state: AppState, args: String) -> HandlerResult<()> {
    let user_id = sender(&msg)?.id;

    let change = match args.parse::<StatusChange>() {
        Ok(change) => change,
        Err(e) => {
            debug!("Rejected /status {:?}: {}", args, e);
            let reply = match e {
                StatusChangeError::MissingVacationDates => t!("commands.status.missing_vacation_dates"),
                StatusChangeError::MissingReturnDate => t!("commands.status.missing_return_date"),
                StatusChangeError::Missing | StatusChangeError::Unknown(_) => t!("commands.status.usage"),
            };
            bot.send_message(msg.chat.id, reply).await?;
            return Ok(());
        }
    };

    state.services.users.apply_status(user_id, &change).await?;

    let reply = match &change {
        StatusChange::Available => t!("commands.status.available"),
        StatusChange::Busy => t!("commands.status.busy"),
        StatusChange::Meeting => t!("commands.status.meeting"),
        StatusChange::Vacation { start, end } => t!("commands.status.vacation", start = start, end = end),
        StatusChange::Sick { until } => t!("commands.status.sick", until = until),
    };
    bot.send_message(msg.chat.id, reply).await?;

    Ok(())
}

async fn handle_tasks(bot: Bot, msg: Message, state: AppState) -> HandlerResult<()> {
    let user_id = sender(&msg)?.id;
    let tasks = state.services.planner.tasks(user_id)?;

    bot.send_message(msg.chat.id, view::tasks_text(&tasks)).await?;

    Ok(())
}

async fn handle_today(bot: Bot, msg: Message, state: AppState) -> HandlerResult<()> {
    let user = sender(&msg)?;
    let record = state.services.users.get_or_create(user.id, Some(user.first_name.as_str())).await?;

    let text = today_view(&state, user.id, &record)?;
    bot.send_message(msg.chat.id, text).await?;

    Ok(())
}

async fn handle_reminders(bot: Bot, msg: Message, state: AppState) -> HandlerResult<()> {
    let user = sender(&msg)?;
    let record = state.services.users.get_or_create(user.id, Some(user.first_name.as_str())).await?;

    let tz = parse_timezone(&record.timezone).unwrap_or(state.config.default_timezone);
    let reminders = state.services.reminders.list(user.id)?;

    bot.send_message(msg.chat.id, view::reminders_text(&reminders, tz)).await?;

    Ok(())
}

async fn handle_timezone(bot: Bot, msg: Message, state: AppState, timezone: String) -> HandlerResult<()> {
    let user = sender(&msg)?;
    let timezone = timezone.trim();

    if timezone.is_empty() {
        let record = state.services.users.get_or_create(user.id, Some(user.first_name.as_str())).await?;
        bot.send_message(msg.chat.id, t!("commands.timezone.usage", timezone = &record.timezone))
            .await?;
        return Ok(());
    }

    match state.services.users.set_timezone(user.id, timezone).await {
        Ok(tz) => {
            info!("User {} switched timezone to {}", user.id, tz);
            bot.send_message(msg.chat.id, t!("commands.timezone.changed", timezone = tz.name()))
                .await?;
        }
        Err(ServiceError::Policy(PolicyError::InvalidTimezone(_))) => {
            bot.send_message(msg.chat.id, t!("commands.timezone.invalid", timezone = timezone))
                .await?;
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    dialogue: BotDialogue,
    state: AppState,
) -> HandlerResult<()> {
    // Any command abandons a pending custom-text prompt.
    dialogue
        .update(DialogueState::Start)
        .await
        .map_err(|e| BotError::DialogueStateError(e.to_string()))?;

    match cmd {
        Command::Start => handle_start(bot, msg, state).await?,
        Command::Help => handle_help(bot, msg).await?,
        Command::Autoreply => handle_autoreply(bot, msg, state).await?,
        Command::Status(args) => handle_status(bot, msg, state, args).await?,
        Command::Tasks => handle_tasks(bot, msg, state).await?,
        Command::Today => handle_today(bot, msg, state).await?,
        Command::Reminders => handle_reminders(bot, msg, state).await?,
        Command::Timezone(timezone) => handle_timezone(bot, msg, state, timezone).await?,
    }

    Ok(())
}

pub fn get_command_handler() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync>> {
    Update::filter_message()
        .filter_command::<Command>()
        .endpoint(handle_command)
}
