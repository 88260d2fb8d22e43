
use once_cell::sync::Lazy;
use regex::Regex;

static TIME_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d{1,2}):(\d{2})").unwrap());

static TOMORROW_AT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"завтра в (\d{1,2}):(\d{2})").unwrap());

static RELATIVE_DELAY_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"через (\d+) (час|часа|часов|минуту|минуты|минут)").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelayUnit {
    Hours,
    Minutes,
}

/// First `H:MM` or `HH:MM` in the text, unvalidated.
pub fn extract_time(text: &str) -> Option<(u32, u32)> {
    capture_time(&TIME_REGEX, text)
}

/// `завтра в H:MM`, unvalidated. Expects lowercased text.
pub fn extract_tomorrow_time(text: &str) -> Option<(u32, u32)> {
    capture_time(&TOMORROW_AT_REGEX, text)
}

/// `через N часов` / `через N минут`. Expects lowercased text.
pub fn extract_relative_delay(text: &str) -> Option<(i64, DelayUnit)> {
    let captures = RELATIVE_DELAY_REGEX.captures(text)?;
    let amount = captures.get(1)?.as_str().parse().ok()?;
    let unit = if captures.get(2)?.as_str().starts_with("час") {
        DelayUnit::Hours
    } else {
        DelayUnit::Minutes
    };
    Some((amount, unit))
}

fn capture_time(regex: &Regex, text: &str) -> Option<(u32, u32)> {
    let captures = regex.captures(text)?;
    let hour = captures.get(1)?.as_str().parse().ok()?;
    let minute = captures.get(2)?.as_str().parse().ok()?;
    Some((hour, minute))
}

/// Cuts `text` to `max_chars` characters and appends `...` when something was cut.
pub fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => format!("{}...", &text[..index]),
        None => text.to_string(),
    }
}
