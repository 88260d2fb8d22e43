use teloxide::types::User;

use crate::{
    error::BotResult,
    handler::{
        keyboard::{get_autoreply_keyboard, get_back_to_main_menu_keyboard, get_main_menu_keyboard},
        today_view, view,
    },
    service::{autoreply::parse_timezone, user::UserRecord},
    state::AppState,
};

use super::Screen;

async fn record(state: &AppState, user: &User) -> BotResult<UserRecord> {
    Ok(state
        .services
        .users
        .get_or_create(user.id, Some(user.first_name.as_str()))
        .await?)
}

pub(super) async fn autoreply_menu(state: &AppState, user: &User) -> BotResult<Screen> {
    let record = record(state, user).await?;
    Ok(Screen::new(view::autoreply_menu_text(&record), get_autoreply_keyboard()))
}

pub(super) async fn today(state: &AppState, user: &User) -> BotResult<Screen> {
    let record = record(state, user).await?;
    let text = today_view(state, user.id, &record)?;
    Ok(Screen::new(text, get_back_to_main_menu_keyboard()))
}

pub(super) fn tasks(state: &AppState, user: &User) -> BotResult<Screen> {
    let tasks = state.services.planner.tasks(user.id)?;
    Ok(Screen::new(view::tasks_text(&tasks), get_back_to_main_menu_keyboard()))
}

pub(super) async fn reminders(state: &AppState, user: &User) -> BotResult<Screen> {
    let record = record(state, user).await?;
    let tz = parse_timezone(&record.timezone).unwrap_or(state.config.default_timezone);
    let reminders = state.services.reminders.list(user.id)?;
    Ok(Screen::new(
        view::reminders_text(&reminders, tz),
        get_back_to_main_menu_keyboard(),
    ))
}

pub(super) fn vacation() -> Screen {
    Screen::new(t!("views.vacation"), get_back_to_main_menu_keyboard())
}

pub(super) fn sick() -> Screen {
    Screen::new(t!("views.sick"), get_back_to_main_menu_keyboard())
}

pub(super) async fn settings(state: &AppState, user: &User) -> BotResult<Screen> {
    let record = record(state, user).await?;
    Ok(Screen::new(
        t!("views.settings", timezone = &record.timezone),
        get_back_to_main_menu_keyboard(),
    ))
}

pub(super) fn help() -> Screen {
    Screen::new(t!("views.help"), get_back_to_main_menu_keyboard())
}

pub(super) fn back_to_main(user: &User) -> Screen {
    Screen::new(
        t!("views.main_menu", first_name = &user.first_name),
        get_main_menu_keyboard(),
    )
}
