use chrono::{DateTime, Days, NaiveTime, TimeDelta, TimeZone};
use chrono_tz::Tz;

use crate::utils::{extract_relative_delay, extract_time, extract_tomorrow_time, DelayUnit};

/// Works out when a reminder written in free text should fire.
///
/// `завтра в H:MM` wins over a bare `H:MM`; a bare time that has already passed today rolls
/// over to tomorrow. `через N часов/минут` is relative to `now`. Anything else fires in an hour.
/// Out-of-range times fall through to the next rule.
pub fn parse_reminder_time(text: &str, now: DateTime<Tz>) -> DateTime<Tz> {
    let text = text.to_lowercase();

    if let Some(time) = extract_tomorrow_time(&text).and_then(|(hour, minute)| local_at(now, 1, hour, minute)) {
        return time;
    }

    if let Some((hour, minute)) = extract_time(&text) {
        if let Some(today) = local_at(now, 0, hour, minute) {
            if today > now {
                return today;
            }
            if let Some(tomorrow) = local_at(now, 1, hour, minute) {
                return tomorrow;
            }
        }
    }

    if let Some(time) = extract_relative_delay(&text).and_then(|(amount, unit)| {
        let delta = match unit {
            DelayUnit::Hours => TimeDelta::try_hours(amount),
            DelayUnit::Minutes => TimeDelta::try_minutes(amount),
        }?;
        now.checked_add_signed(delta)
    }) {
        return time;
    }

    now + TimeDelta::hours(1)
}

fn local_at(now: DateTime<Tz>, days_ahead: u64, hour: u32, minute: u32) -> Option<DateTime<Tz>> {
    let time = NaiveTime::from_hms_opt(hour, minute, 0)?;
    let date = now.date_naive().checked_add_days(Days::new(days_ahead))?;
    now.timezone().from_local_datetime(&date.and_time(time)).earliest()
}
