use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use super::quiz::parse_timestamp;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    #[serde(default)]
    pub notification_type: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub is_read: bool,
    pub created_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct UnreadCount {
    pub count: u32,
}

/// Badge text for the bell. Hidden at zero, capped at `9+`.
pub fn unread_badge(count: u32) -> Option<String> {
    match count {
        0 => None,
        1..=9 => Some(count.to_string()),
        _ => Some("9+".to_string()),
    }
}

pub fn notification_icon(kind: &str) -> &'static str {
    match kind {
        "assignment_created" => "📝",
        "quiz_created" => "🧠",
        "assignment_graded" => "✅",
        "quiz_graded" => "🎯",
        "announcement_posted" => "📢",
        "discussion_reply" => "💬",
        _ => "🔔",
    }
}

/// Coarse age of a timestamp. Older than a week shows the local date.
pub fn relative_time(created_at: &str, now: DateTime<Utc>) -> String {
    let Some(then) = parse_timestamp(created_at) else {
        return created_at.to_string();
    };
    let minutes = (now - then).num_minutes();
    let hours = minutes / 60;
    let days = hours / 24;
    if minutes < 1 {
        "Just now".to_string()
    } else if minutes < 60 {
        format!("{}m ago", minutes)
    } else if hours < 24 {
        format!("{}h ago", hours)
    } else if days < 7 {
        format!("{}d ago", days)
    } else {
        then.with_timezone(&Local).format("%b %-d, %Y").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_unread_badge() {
        assert_eq!(unread_badge(0), None);
        assert_eq!(unread_badge(3).as_deref(), Some("3"));
        assert_eq!(unread_badge(9).as_deref(), Some("9"));
        assert_eq!(unread_badge(10).as_deref(), Some("9+"));
    }

    #[test]
    fn test_icons() {
        assert_eq!(notification_icon("quiz_graded"), "🎯");
        assert_eq!(notification_icon("something_new"), "🔔");
    }

    #[test]
    fn test_relative_time() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        let fmt = |d: Duration| (now - d).format("%Y-%m-%dT%H:%M:%S").to_string();
        assert_eq!(relative_time(&fmt(Duration::seconds(20)), now), "Just now");
        assert_eq!(relative_time(&fmt(Duration::minutes(5)), now), "5m ago");
        assert_eq!(relative_time(&fmt(Duration::hours(3)), now), "3h ago");
        assert_eq!(relative_time(&fmt(Duration::days(2)), now), "2d ago");
        assert!(!relative_time(&fmt(Duration::days(30)), now).ends_with("ago"));
        assert_eq!(relative_time("garbage", now), "garbage");
    }
}
