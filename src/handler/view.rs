use chrono::DateTime;
use chrono_tz::Tz;

use crate::{
    service::{
        autoreply::{AutoReplyMode, UserStatus},
        planner::{Appointment, Task},
        reminder::Reminder,
        user::UserRecord,
    },
    utils::truncate,
};

const TASK_LIST_LIMIT: usize = 10;
const TASK_TEXT_LIMIT: usize = 50;
const TODAY_LIMIT: usize = 5;
const REMINDER_LIMIT: usize = 5;
const SHORT_TEXT_LIMIT: usize = 40;

pub fn mode_name(mode: &AutoReplyMode) -> String {
    let key = match mode {
        AutoReplyMode::Unknown(_) => "modes.unknown".to_string(),
        known => format!("modes.{}", known.as_str()),
    };
    t!(&key).to_string()
}

pub fn status_name(status: &UserStatus) -> String {
    let key = match status {
        UserStatus::Unknown(_) => "statuses.unknown".to_string(),
        known => format!("statuses.{}", known.as_str()),
    };
    t!(&key).to_string()
}

pub fn autoreply_menu_text(record: &UserRecord) -> String {
    t!(
        "autoreply.menu",
        mode = mode_name(&record.autoreply_mode),
        status = status_name(&record.status)
    )
    .to_string()
}

pub fn tasks_text(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return t!("views.tasks.empty").to_string();
    }

    let mut text = t!("views.tasks.title").to_string();
    for (i, task) in tasks.iter().take(TASK_LIST_LIMIT).enumerate() {
        let mark = if task.completed { "✅" } else { "⏳" };
        text.push_str(&format!("\n{}. {} {}", i + 1, mark, truncate(&task.text, TASK_TEXT_LIMIT)));
    }
    text
}

/// `autoreply` is the mode to announce when a message arriving now would be intercepted.
pub fn today_text(
    now: DateTime<Tz>,
    appointments: &[Appointment],
    active_tasks: &[Task],
    autoreply: Option<AutoReplyMode>,
) -> String {
    let mut text = t!("views.today.title", date = now.format("%d.%m.%Y").to_string()).to_string();

    if !appointments.is_empty() {
        text.push('\n');
        text.push_str(&t!("views.today.appointments"));
        for appointment in appointments.iter().take(TODAY_LIMIT) {
            let time = appointment
                .time
                .clone()
                .unwrap_or_else(|| t!("views.today.no_time").to_string());
            text.push_str(&format!(
                "\n• ⏰ {} - {}",
                time,
                truncate(&appointment.text, SHORT_TEXT_LIMIT)
            ));
        }
    }

    if !active_tasks.is_empty() {
        text.push_str("\n\n");
        text.push_str(&t!("views.today.tasks"));
        for task in active_tasks.iter().take(TODAY_LIMIT) {
            text.push_str(&format!("\n• ⏳ {}", truncate(&task.text, SHORT_TEXT_LIMIT)));
        }
    }

    if appointments.is_empty() && active_tasks.is_empty() {
        text.push('\n');
        text.push_str(&t!("views.today.free_day"));
    }

    if let Some(mode) = autoreply {
        text.push_str("\n\n");
        text.push_str(&t!("views.today.autoreply_on", mode = mode_name(&mode)));
    }

    text.push('\n');
    text.push_str(&t!("views.today.signature"));
    text
}

/// The most recent reminders, oldest first, with times shown in `tz`.
pub fn reminders_text(reminders: &[Reminder], tz: Tz) -> String {
    if reminders.is_empty() {
        return t!("views.reminders.empty").to_string();
    }

    let skip = reminders.len().saturating_sub(REMINDER_LIMIT);
    let mut text = t!("views.reminders.title").to_string();
    for (i, reminder) in reminders.iter().skip(skip).enumerate() {
        let mark = if reminder.is_active() { "⏰" } else { "✅" };
        text.push_str(&format!(
            "\n{}. {} {} — {}",
            i + 1,
            mark,
            reminder.time.with_timezone(&tz).format("%d.%m %H:%M"),
            truncate(&reminder.text, SHORT_TEXT_LIMIT)
        ));
    }
    text
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use chrono_tz::Europe::Moscow;

    use super::*;
    use crate::service::reminder::ReminderStatus;

    fn task(id: u32, text: &str, completed: bool) -> Task {
        Task {
            id,
            text: text.to_string(),
            created: Utc::now(),
            completed,
        }
    }

    #[test]
    fn test_tasks_text_numbers_and_truncates() {
        let long = "а".repeat(60);
        let tasks = vec![task(1, "Отчёт", false), task(2, &long, true)];

        let text = tasks_text(&tasks);
        assert!(text.contains("\n1. ⏳ Отчёт"));
        assert!(text.contains(&format!("\n2. ✅ {}...", "а".repeat(50))));
    }

    #[test]
    fn test_tasks_text_limits_to_ten() {
        let tasks: Vec<_> = (1..=12).map(|i| task(i, &format!("задача {}", i), false)).collect();
        let text = tasks_text(&tasks);
        assert!(text.contains("10. ⏳ задача 10"));
        assert!(!text.contains("задача 11"));
    }

    #[test]
    fn test_today_text() {
        let now = Moscow.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        let appointments = vec![Appointment {
            id: 1,
            text: "Встреча с клиентом в 14:00".to_string(),
            created: Utc::now(),
            time: Some("14:00".to_string()),
        }];
        let tasks = vec![task(1, "Подготовить отчёт", false)];

        let text = today_text(now, &appointments, &tasks, Some(AutoReplyMode::Always));
        assert!(text.contains("15.01.2024"));
        assert!(text.contains("• ⏰ 14:00 - Встреча с клиентом в 14:00"));
        assert!(text.contains("• ⏳ Подготовить отчёт"));
        assert!(text.contains(&mode_name(&AutoReplyMode::Always)));
        assert!(!text.contains(&*t!("views.today.free_day")));

        let free = today_text(now, &[], &[], None);
        assert!(free.contains(&*t!("views.today.free_day")));
    }

    #[test]
    fn test_unrecognized_values_have_a_display_name() {
        assert_eq!(mode_name(&AutoReplyMode::Unknown("holiday".to_string())), t!("modes.unknown"));
        assert_eq!(status_name(&UserStatus::Unknown("asleep".to_string())), t!("statuses.unknown"));
        assert_eq!(mode_name(&AutoReplyMode::Off), t!("modes.off"));
    }

    #[test]
    fn test_reminders_text_shows_last_five_in_user_timezone() {
        let reminders: Vec<_> = (1..=7)
            .map(|i| Reminder {
                id: i,
                text: format!("напоминание {}", i),
                time: Utc.with_ymd_and_hms(2024, 1, 15, 15, 30, 0).unwrap(),
                created: Utc::now(),
                status: if i == 7 {
                    ReminderStatus::Active
                } else {
                    ReminderStatus::Sent
                },
            })
            .collect();

        let text = reminders_text(&reminders, Moscow);
        assert!(!text.contains("напоминание 2"));
        assert!(text.contains("1. ✅ 15.01 18:30 — напоминание 3"));
        assert!(text.contains("5. ⏰ 15.01 18:30 — напоминание 7"));
    }
}
