// veche-client/src/utils/datetime.rs
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use std::fmt::Display;

pub const PLACEHOLDER: &str = "—";

// RFC 3339 instants, or a bare `YYYY-MM-DDTHH:MM` as typed into a date picker
fn parse_instant<Tz: TimeZone>(value: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(tz));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M")
        .ok()
        .and_then(|naive| tz.from_local_datetime(&naive).single())
}

/// Formats an instant as `dd/mm/yyyy hh:mm` in the given zone.
pub fn format_eu<Tz: TimeZone>(value: Option<&str>, tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .and_then(|v| parse_instant(v, tz))
        .map(|dt| dt.format("%d/%m/%Y %H:%M").to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

pub fn format_eu_instant<Tz: TimeZone>(value: Option<DateTime<Utc>>, tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    value
        .map(|dt| dt.with_timezone(tz).format("%d/%m/%Y %H:%M").to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// Countdown to `value` as `{d}d {hh}h {mm}m`.
pub fn time_left(value: Option<&str>, now: DateTime<Utc>) -> String {
    let target = match value.and_then(|v| parse_instant(v.trim(), &Utc)) {
        Some(target) => target,
        None => return PLACEHOLDER.to_string(),
    };

    let total_minutes = (target - now).num_minutes();
    if target <= now || total_minutes <= 0 {
        return "0d 00h 00m".to_string();
    }

    let days = total_minutes / (24 * 60);
    let hours = (total_minutes - days * 24 * 60) / 60;
    let minutes = total_minutes % 60;
    format!("{}d {:02}h {:02}m", days, hours, minutes)
}
