//! Reusable formatting utilities for CLI output
//!
//! Timestamps and durations shared by the status, message, and dashboard views.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Format a backend timestamp for display.
///
/// The backend sends local date-times without an offset
/// (`2025-01-15T12:00:00` or with fractional seconds); RFC 3339 is accepted
/// too. Returns "N/A" for empty input and the input itself when unparsable.
///
/// # Example output
/// `01/15/2025 12:00`
pub fn format_timestamp(timestamp: &str) -> String {
    let trimmed = timestamp.trim();
    if trimmed.is_empty() {
        return "N/A".to_string();
    }

    if let Ok(dt) = trimmed.parse::<DateTime<Utc>>() {
        return dt
            .with_timezone(&chrono::Local)
            .format("%m/%d/%Y %H:%M")
            .to_string();
    }

    match NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        Ok(dt) => dt.format("%m/%d/%Y %H:%M").to_string(),
        Err(_) => trimmed.to_string(),
    }
}

/// Format an optional timestamp, "--" when absent
pub fn format_optional_timestamp(timestamp: Option<&str>) -> String {
    timestamp
        .map(format_timestamp)
        .unwrap_or_else(|| "--".to_string())
}

/// Format a number of seconds as a human-readable duration.
///
/// Returns "expired" for zero or negative input.
///
/// # Example output
/// - `2h 15m` (hours, minutes)
/// - `5m 10s` (minutes, seconds)
/// - `45s` (seconds only)
pub fn format_remaining(seconds: i64) -> String {
    if seconds <= 0 {
        return "expired".to_string();
    }

    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3600;
    let mins = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if days > 0 {
        format!("{}d {}h", days, hours)
    } else if hours > 0 {
        format!("{}h {}m", hours, mins)
    } else if mins > 0 {
        format!("{}m {}s", mins, secs)
    } else {
        format!("{}s", secs)
    }
}

/// Truncate a string to `max_len` characters with an ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
