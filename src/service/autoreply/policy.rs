use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};
use chrono_tz::Tz;

use super::{
    catalog::{Placeholder, ResponseCatalog, ResponseKind},
    model::{AutoReplyMode, PolicyParameters, UserStatus},
};

const WORKDAY_START_HOUR: u32 = 9;
const WORKDAY_END_HOUR: u32 = 18;
const NIGHT_START_HOUR: u32 = 22;
const LUNCH_START_HOUR: u32 = 13;
const LUNCH_END_HOUR: u32 = 14;

pub const LUNCH_RETURN_TIME: &str = "14:00";
pub const VACATION_END_FALLBACK: &str = "неизвестно когда";
pub const SICK_UNTIL_FALLBACK: &str = "скоро";

/// Decides whether an inbound message gets a canned reply instead of the AI round-trip.
///
/// Both decisions are pure functions of their arguments. `should_intercept` and
/// `compute_response` are evaluated independently because their precedence orders differ:
/// an overriding status forces a reply in any mode but `Off`, while the wording of that reply
/// still depends on the mode (a `Custom` text wins over every status).
#[derive(Debug, Clone, Default)]
pub struct AutoReplyPolicy {
    catalog: ResponseCatalog,
}

impl AutoReplyPolicy {
    pub fn new(catalog: ResponseCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &ResponseCatalog {
        &self.catalog
    }

    pub fn should_intercept(
        &self,
        mode: AutoReplyMode,
        status: UserStatus,
        params: &PolicyParameters,
        now: DateTime<Utc>,
    ) -> bool {
        if mode == AutoReplyMode::Off {
            return false;
        }
        if is_unrecognized(&mode, &status) {
            return false;
        }
        if status.overrides_mode() {
            return true;
        }

        match mode {
            AutoReplyMode::Always | AutoReplyMode::Custom => true,
            AutoReplyMode::WorkHours => {
                let local = now.with_timezone(&params.timezone);
                if is_weekend(&local) {
                    return true;
                }
                !is_working_hour(local.hour())
            }
            _ => false,
        }
    }

    pub fn compute_response(
        &self,
        mode: AutoReplyMode,
        status: UserStatus,
        params: &PolicyParameters,
        message: &str,
        now: DateTime<Utc>,
    ) -> Option<String> {
        if mode == AutoReplyMode::Off || is_unrecognized(&mode, &status) {
            return None;
        }

        trace!(
            "Computing auto-reply (mode: {}, status: {}) for a {}-char message",
            mode,
            status,
            message.chars().count()
        );

        if mode == AutoReplyMode::Custom {
            if let Some(custom) = &params.custom_message {
                return Some(custom.clone());
            }
        }

        match status {
            UserStatus::Vacation => {
                let date = params.vacation_end.as_deref().unwrap_or(VACATION_END_FALLBACK);
                return Some(self.catalog.render(ResponseKind::Vacation, &[(Placeholder::Date, date)]));
            }
            UserStatus::Sick => {
                let date = params.sick_until.as_deref().unwrap_or(SICK_UNTIL_FALLBACK);
                return Some(self.catalog.render(ResponseKind::Sick, &[(Placeholder::Date, date)]));
            }
            UserStatus::Busy => return Some(self.catalog.render(ResponseKind::Busy, &[])),
            UserStatus::Meeting => return Some(self.catalog.render(ResponseKind::Meeting, &[])),
            UserStatus::Lunch => return Some(self.lunch()),
            _ => {}
        }

        match mode {
            AutoReplyMode::WorkHours => self.work_hours_response(now.with_timezone(&params.timezone)),
            AutoReplyMode::Always => Some(self.catalog.render(ResponseKind::Default, &[])),
            _ => None,
        }
    }

    /// Both decisions combined: the canned text to send, or `None` to answer personally.
    pub fn evaluate(
        &self,
        mode: AutoReplyMode,
        status: UserStatus,
        params: &PolicyParameters,
        message: &str,
        now: DateTime<Utc>,
    ) -> Option<String> {
        if !self.should_intercept(mode.clone(), status.clone(), params, now) {
            return None;
        }
        self.compute_response(mode, status, params, message, now)
    }

    fn work_hours_response(&self, local: DateTime<Tz>) -> Option<String> {
        if is_weekend(&local) {
            return Some(self.catalog.render(ResponseKind::Weekend, &[]));
        }

        let hour = local.hour();
        if hour >= NIGHT_START_HOUR || hour < WORKDAY_START_HOUR {
            return Some(self.catalog.render(ResponseKind::Night, &[]));
        }
        if (LUNCH_START_HOUR..LUNCH_END_HOUR).contains(&hour) {
            return Some(self.lunch());
        }
        if is_working_hour(hour) {
            return None;
        }

        Some(self.catalog.render(ResponseKind::WorkHours, &[]))
    }

    fn lunch(&self) -> String {
        self.catalog
            .render(ResponseKind::Lunch, &[(Placeholder::Time, LUNCH_RETURN_TIME)])
    }
}

fn is_unrecognized(mode: &AutoReplyMode, status: &UserStatus) -> bool {
    mode.is_unknown() || status.is_unknown()
}

fn is_weekend(local: &DateTime<Tz>) -> bool {
    matches!(local.weekday(), Weekday::Sat | Weekday::Sun)
}

fn is_working_hour(hour: u32) -> bool {
    (WORKDAY_START_HOUR..WORKDAY_END_HOUR).contains(&hour)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono_tz::Europe::{London, Moscow};

    use super::*;

    const ALL_MODES: [AutoReplyMode; 6] = [
        AutoReplyMode::Off,
        AutoReplyMode::WorkHours,
        AutoReplyMode::Always,
        AutoReplyMode::Custom,
        AutoReplyMode::Vacation,
        AutoReplyMode::Sick,
    ];

    const ALL_STATUSES: [UserStatus; 6] = [
        UserStatus::Available,
        UserStatus::Busy,
        UserStatus::Meeting,
        UserStatus::Vacation,
        UserStatus::Sick,
        UserStatus::Lunch,
    ];

    /// 2024-01-15 is a Monday, 2024-01-20 a Saturday.
    fn moscow(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
        Moscow
            .with_ymd_and_hms(2024, 1, day, hour, minute, 0)
            .unwrap()
            .with_timezone(&Utc)
    }

    fn monday(hour: u32) -> DateTime<Utc> {
        moscow(15, hour, 0)
    }

    fn render(kind: ResponseKind) -> String {
        ResponseCatalog::default().render(kind, &[])
    }

    fn lunch_text() -> String {
        ResponseCatalog::default().render(ResponseKind::Lunch, &[(Placeholder::Time, "14:00")])
    }

    #[test]
    fn test_off_never_intercepts() {
        let policy = AutoReplyPolicy::default();
        let params = PolicyParameters::default();
        for status in ALL_STATUSES {
            for now in [monday(3), monday(11), monday(20), moscow(20, 12, 0)] {
                assert!(!policy.should_intercept(AutoReplyMode::Off, status.clone(), &params, now));
                assert_eq!(
                    policy.compute_response(AutoReplyMode::Off, status.clone(), &params, "hi", now),
                    None
                );
            }
        }
    }

    #[test]
    fn test_overriding_statuses_intercept_in_every_mode_but_off() {
        let policy = AutoReplyPolicy::default();
        let params = PolicyParameters::default();
        for mode in ALL_MODES.into_iter().filter(|m| *m != AutoReplyMode::Off) {
            for status in [UserStatus::Vacation, UserStatus::Sick, UserStatus::Meeting] {
                for now in [monday(3), monday(11), monday(20), moscow(20, 12, 0)] {
                    assert!(
                        policy.should_intercept(mode.clone(), status.clone(), &params, now),
                        "{mode} / {status} should intercept"
                    );
                }
            }
        }
    }

    #[test]
    fn test_work_hours_weekday_is_silent() {
        let policy = AutoReplyPolicy::default();
        let params = PolicyParameters::default();
        for hour in [9, 10, 12, 14, 17] {
            let now = monday(hour);
            assert!(!policy.should_intercept(AutoReplyMode::WorkHours, UserStatus::Available, &params, now));
            assert_eq!(
                policy.compute_response(AutoReplyMode::WorkHours, UserStatus::Available, &params, "", now),
                None
            );
        }
        assert!(!policy.should_intercept(AutoReplyMode::WorkHours, UserStatus::Available, &params, moscow(15, 17, 59)));
    }

    #[test]
    fn test_work_hours_weekend() {
        let policy = AutoReplyPolicy::default();
        let params = PolicyParameters::default();
        for (day, hour) in [(20, 11), (21, 15), (20, 23)] {
            let now = moscow(day, hour, 0);
            assert!(policy.should_intercept(AutoReplyMode::WorkHours, UserStatus::Available, &params, now));
            assert_eq!(
                policy.compute_response(AutoReplyMode::WorkHours, UserStatus::Available, &params, "", now),
                Some(render(ResponseKind::Weekend))
            );
        }
    }

    #[test]
    fn test_night_band() {
        let policy = AutoReplyPolicy::default();
        let params = PolicyParameters::default();
        for hour in [22, 23, 0, 3, 8] {
            assert!(policy.should_intercept(AutoReplyMode::WorkHours, UserStatus::Available, &params, monday(hour)));
            assert_eq!(
                policy.compute_response(AutoReplyMode::WorkHours, UserStatus::Available, &params, "", monday(hour)),
                Some(render(ResponseKind::Night))
            );
        }
    }

    #[test]
    fn test_lunch_band_falls_inside_working_hours() {
        let policy = AutoReplyPolicy::default();
        let params = PolicyParameters::default();
        let now = moscow(15, 13, 30);

        // The boolean gate only looks at [9, 18), so lunch wording is never reached on its own.
        assert!(!policy.should_intercept(AutoReplyMode::WorkHours, UserStatus::Available, &params, now));
        assert_eq!(
            policy.compute_response(AutoReplyMode::WorkHours, UserStatus::Available, &params, "", now),
            Some(lunch_text())
        );
        assert_eq!(
            policy.evaluate(AutoReplyMode::WorkHours, UserStatus::Available, &params, "", now),
            None
        );
    }

    #[test]
    fn test_evening_band() {
        let policy = AutoReplyPolicy::default();
        let params = PolicyParameters::default();
        for hour in [18, 19, 21] {
            assert_eq!(
                policy.compute_response(AutoReplyMode::WorkHours, UserStatus::Available, &params, "", monday(hour)),
                Some(render(ResponseKind::WorkHours))
            );
        }
    }

    #[test]
    fn test_monday_evening_scenario() {
        let policy = AutoReplyPolicy::default();
        let params = PolicyParameters {
            timezone: Moscow,
            ..Default::default()
        };
        let now = moscow(15, 20, 30);

        assert!(policy.should_intercept(AutoReplyMode::WorkHours, UserStatus::Available, &params, now));
        assert_eq!(
            policy.evaluate(AutoReplyMode::WorkHours, UserStatus::Available, &params, "hello", now),
            Some("👩‍💼 Рабочий день окончен. Отвечу завтра с 9:00.".to_string())
        );
    }

    #[test]
    fn test_always_uses_default_regardless_of_time() {
        let policy = AutoReplyPolicy::default();
        let params = PolicyParameters::default();
        for now in [monday(3), monday(11), monday(20), moscow(21, 12, 0)] {
            assert!(policy.should_intercept(AutoReplyMode::Always, UserStatus::Available, &params, now));
            assert_eq!(
                policy.evaluate(AutoReplyMode::Always, UserStatus::Available, &params, "", now),
                Some(render(ResponseKind::Default))
            );
        }
    }

    #[test]
    fn test_vacation_formatting() {
        let policy = AutoReplyPolicy::default();
        let mut params = PolicyParameters {
            vacation_end: Some("25.01".to_string()),
            ..Default::default()
        };

        let text = policy
            .compute_response(AutoReplyMode::Vacation, UserStatus::Vacation, &params, "", monday(11))
            .unwrap();
        assert!(text.contains("25.01"));

        params.vacation_end = None;
        let text = policy
            .compute_response(AutoReplyMode::Vacation, UserStatus::Vacation, &params, "", monday(11))
            .unwrap();
        assert!(text.contains(VACATION_END_FALLBACK));
        assert!(!text.contains("{date}"));
    }

    #[test]
    fn test_sick_formatting() {
        let policy = AutoReplyPolicy::default();
        let params = PolicyParameters {
            sick_until: Some("20.01".to_string()),
            ..Default::default()
        };
        let text = policy
            .evaluate(AutoReplyMode::Sick, UserStatus::Sick, &params, "", monday(11))
            .unwrap();
        assert_eq!(text, "👩‍💼 Я болею. Вернусь к работе 20.01. Спасибо за понимание.");

        let text = policy
            .evaluate(AutoReplyMode::Sick, UserStatus::Sick, &PolicyParameters::default(), "", monday(11))
            .unwrap();
        assert!(text.contains(SICK_UNTIL_FALLBACK));
    }

    #[test]
    fn test_custom_message_wins_over_statuses() {
        let policy = AutoReplyPolicy::default();
        let params = PolicyParameters {
            custom_message: Some("Back in 5".to_string()),
            vacation_end: Some("25.01".to_string()),
            ..Default::default()
        };
        for status in ALL_STATUSES {
            assert_eq!(
                policy.evaluate(AutoReplyMode::Custom, status, &params, "", monday(11)),
                Some("Back in 5".to_string())
            );
        }
    }

    #[test]
    fn test_custom_without_text_falls_back_to_status() {
        let policy = AutoReplyPolicy::default();
        let params = PolicyParameters::default();
        assert!(policy.should_intercept(AutoReplyMode::Custom, UserStatus::Available, &params, monday(11)));
        assert_eq!(
            policy.compute_response(AutoReplyMode::Custom, UserStatus::Available, &params, "", monday(11)),
            None
        );
        assert_eq!(
            policy.compute_response(AutoReplyMode::Custom, UserStatus::Busy, &params, "", monday(11)),
            Some(render(ResponseKind::Busy))
        );
    }

    #[test]
    fn test_status_wording_precedence() {
        let policy = AutoReplyPolicy::default();
        let params = PolicyParameters::default();
        let now = monday(11);

        assert_eq!(
            policy.compute_response(AutoReplyMode::Always, UserStatus::Busy, &params, "", now),
            Some(render(ResponseKind::Busy))
        );
        assert_eq!(
            policy.compute_response(AutoReplyMode::Always, UserStatus::Meeting, &params, "", now),
            Some(render(ResponseKind::Meeting))
        );
        assert_eq!(
            policy.compute_response(AutoReplyMode::WorkHours, UserStatus::Lunch, &params, "", now),
            Some(lunch_text())
        );
    }

    #[test]
    fn test_vacation_mode_without_status_stays_silent() {
        let policy = AutoReplyPolicy::default();
        let params = PolicyParameters::default();
        for mode in [AutoReplyMode::Vacation, AutoReplyMode::Sick] {
            assert!(!policy.should_intercept(mode.clone(), UserStatus::Available, &params, monday(20)));
            assert_eq!(policy.compute_response(mode, UserStatus::Available, &params, "", monday(20)), None);
        }
    }

    #[test]
    fn test_busy_in_work_hours_mode_depends_on_the_hour() {
        let policy = AutoReplyPolicy::default();
        let params = PolicyParameters::default();

        assert_eq!(
            policy.evaluate(AutoReplyMode::WorkHours, UserStatus::Busy, &params, "", monday(11)),
            None
        );
        assert_eq!(
            policy.evaluate(AutoReplyMode::WorkHours, UserStatus::Busy, &params, "", monday(20)),
            Some(render(ResponseKind::Busy))
        );
    }

    #[test]
    fn test_unrecognized_values_fall_through() {
        let policy = AutoReplyPolicy::default();
        let params = PolicyParameters::default();
        let now = monday(23);

        let holiday = AutoReplyMode::Unknown("holiday".to_string());
        let asleep = UserStatus::Unknown("asleep".to_string());

        assert!(!policy.should_intercept(holiday.clone(), UserStatus::Vacation, &params, now));
        assert!(!policy.should_intercept(AutoReplyMode::Always, asleep.clone(), &params, now));
        assert_eq!(
            policy.compute_response(AutoReplyMode::Always, asleep, &params, "", now),
            None
        );
        assert_eq!(
            policy.compute_response(holiday, UserStatus::Busy, &params, "", now),
            None
        );
    }

    #[test]
    fn test_hours_are_resolved_in_the_user_timezone() {
        let policy = AutoReplyPolicy::default();
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 6, 30, 0).unwrap();

        let in_moscow = PolicyParameters {
            timezone: Moscow,
            ..Default::default()
        };
        let in_london = PolicyParameters {
            timezone: London,
            ..Default::default()
        };

        assert!(!policy.should_intercept(AutoReplyMode::WorkHours, UserStatus::Available, &in_moscow, now));
        assert_eq!(
            policy.evaluate(AutoReplyMode::WorkHours, UserStatus::Available, &in_london, "", now),
            Some(render(ResponseKind::Night))
        );
    }

    #[test]
    fn test_compute_response_is_idempotent() {
        let policy = AutoReplyPolicy::default();
        let params = PolicyParameters {
            vacation_end: Some("25.01".to_string()),
            ..Default::default()
        };
        for mode in ALL_MODES {
            for status in ALL_STATUSES {
                let first = policy.compute_response(mode.clone(), status.clone(), &params, "ping", monday(19));
                let second = policy.compute_response(mode.clone(), status, &params, "ping", monday(19));
                assert_eq!(first, second);
            }
        }
    }

    #[test]
    fn test_intercepted_messages_usually_get_text() {
        let policy = AutoReplyPolicy::default();
        let params = PolicyParameters::default();
        for mode in [AutoReplyMode::WorkHours, AutoReplyMode::Always] {
            for status in ALL_STATUSES {
                for now in [monday(3), monday(20), moscow(20, 12, 0)] {
                    if policy.should_intercept(mode.clone(), status.clone(), &params, now) {
                        assert!(policy.compute_response(mode.clone(), status.clone(), &params, "", now).is_some());
                    }
                }
            }
        }
    }
}
