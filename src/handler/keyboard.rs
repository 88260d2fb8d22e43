use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

pub fn get_main_menu_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new([
        [
            InlineKeyboardButton::callback(t!("buttons.main_menu.autoreply"), "autoreply_menu"),
            InlineKeyboardButton::callback(t!("buttons.main_menu.today"), "today"),
        ],
        [
            InlineKeyboardButton::callback(t!("buttons.main_menu.tasks"), "tasks"),
            InlineKeyboardButton::callback(t!("buttons.main_menu.reminders"), "reminders"),
        ],
        [
            InlineKeyboardButton::callback(t!("buttons.main_menu.vacation"), "vacation"),
            InlineKeyboardButton::callback(t!("buttons.main_menu.sick"), "sick"),
        ],
        [
            InlineKeyboardButton::callback(t!("buttons.main_menu.settings"), "settings"),
            InlineKeyboardButton::callback(t!("buttons.main_menu.help"), "help"),
        ],
    ])
}

pub fn get_autoreply_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new([
        [
            InlineKeyboardButton::callback(t!("buttons.autoreply_menu.work_hours"), "ar_work"),
            InlineKeyboardButton::callback(t!("buttons.autoreply_menu.always"), "ar_always"),
        ],
        [
            InlineKeyboardButton::callback(t!("buttons.autoreply_menu.custom"), "ar_custom"),
            InlineKeyboardButton::callback(t!("buttons.autoreply_menu.off"), "ar_off"),
        ],
        [
            InlineKeyboardButton::callback(t!("buttons.autoreply_menu.vacation"), "status_vacation"),
            InlineKeyboardButton::callback(t!("buttons.autoreply_menu.sick"), "status_sick"),
        ],
        [
            InlineKeyboardButton::callback(t!("buttons.autoreply_menu.busy"), "status_busy"),
            InlineKeyboardButton::callback(t!("buttons.autoreply_menu.available"), "status_available"),
        ],
    ])
    .append_row([InlineKeyboardButton::callback(
        t!("buttons.back_to_main_menu"),
        "back_to_main",
    )])
}

pub fn get_back_to_main_menu_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new([[InlineKeyboardButton::callback(
        t!("buttons.back_to_main_menu"),
        "back_to_main",
    )]])
}
