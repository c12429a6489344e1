//! Health indicator rendering.

use chrono::{DateTime, Local, TimeZone};

use crate::components::HealthState;

/// Format an RFC 3339 timestamp as a local time of day (e.g. `3:04:05 PM`).
///
/// Returns "Invalid Date" when the timestamp does not parse.
#[must_use]
pub fn format_time_of_day(timestamp: &str) -> String {
    format_time_of_day_in(timestamp, &Local)
}

/// [`format_time_of_day`] in an explicit time zone.
#[must_use]
pub fn format_time_of_day_in<Tz>(timestamp: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    DateTime::parse_from_rfc3339(timestamp.trim())
        .map(|dt| dt.with_timezone(tz).format("%-I:%M:%S %p").to_string())
        .unwrap_or_else(|_| "Invalid Date".to_string())
}

/// Render the health indicator.
#[must_use]
pub fn format_health_markdown(state: &HealthState) -> String {
    match state {
        HealthState::Loading => "Loading health status...\n".to_string(),
        HealthState::Error(message) => format!("**Error**\n{message}\n"),
        HealthState::NoData => "No health data available\n".to_string(),
        HealthState::Healthy(health) => {
            let mut output = format!("**System Status: {}**\n", health.status);
            output.push_str(&format!("Version: {}\n", health.version));
            output.push_str(&format!("API: {}\n", health.services.api));
            output.push_str(&format!("OpenAlex: {}\n", health.services.openalex));
            output.push_str(&format!("Last checked: {}\n", format_time_of_day(&health.timestamp)));
            output
        }
    }
}
