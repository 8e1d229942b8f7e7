//! Relative-time formatting for timestamps shown in the dashboard.

use crate::types::Timestamp;

/// Format a timestamp relative to `now`.
///
/// Buckets floor rather than round: 90 seconds is "1m ago", 25 hours is
/// "1d ago". Timestamps at or after `now` render "just now". Anything a
/// week or more old falls back to a calendar date.
pub fn format_relative(t: Timestamp, now: Timestamp) -> String {
    let elapsed = now - t;
    let minutes = elapsed.num_minutes();

    if minutes < 1 {
        return "just now".to_string();
    }
    if minutes < 60 {
        return format!("{minutes}m ago");
    }
    let hours = elapsed.num_hours();
    if hours < 24 {
        return format!("{hours}h ago");
    }
    let days = elapsed.num_days();
    if days < 7 {
        return format!("{days}d ago");
    }
    t.format("%Y-%m-%d").to_string()
}
