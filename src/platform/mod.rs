//! Platform helpers
//!
//! Wall-clock access lives here so the simulation itself never reads the
//! system clock.

use std::time::{SystemTime, UNIX_EPOCH};

/// Current Unix time in milliseconds
pub fn now_millis() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

/// Format `timestamp` relative to `now` (both Unix ms)
pub fn format_relative(timestamp: f64, now: f64) -> String {
    let diff_mins = (now - timestamp) / 60_000.0;
    let diff_hours = diff_mins / 60.0;
    let diff_days = diff_hours / 24.0;

    if diff_days >= 1.0 {
        let days = diff_days.floor() as i64;
        if days == 1 {
            "Yesterday".to_string()
        } else {
            format!("{} days ago", days)
        }
    } else if diff_hours >= 1.0 {
        let hours = diff_hours.floor() as i64;
        if hours == 1 {
            "1 hour ago".to_string()
        } else {
            format!("{} hours ago", hours)
        }
    } else if diff_mins >= 1.0 {
        let mins = diff_mins.floor() as i64;
        if mins == 1 {
            "1 min ago".to_string()
        } else {
            format!("{} mins ago", mins)
        }
    } else {
        "Just now".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_relative() {
        let now = 10.0 * 24.0 * 3_600_000.0;
        assert_eq!(format_relative(now - 5_000.0, now), "Just now");
        assert_eq!(format_relative(now - 90_000.0, now), "1 min ago");
        assert_eq!(format_relative(now - 3.0 * 3_600_000.0, now), "3 hours ago");
        assert_eq!(format_relative(now - 26.0 * 3_600_000.0, now), "Yesterday");
        assert_eq!(format_relative(now - 72.0 * 3_600_000.0, now), "3 days ago");
    }
}
