//! Reminder-side data: the creation request handed to a sink and the stored reminder.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Request to create one reminder. Derived from a remote task; has no identity
/// of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderRequest {
    pub title: String,
    pub notes: Option<String>,
    /// ISO-8601 instant (`2024-03-01T10:00:00.000Z`) or date (`2024-03-01`).
    pub due_date: Option<String>,
}

/// Due date as understood by the reminder store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DueDate {
    /// A point in time; reminders with one get an alarm.
    At(DateTime<Utc>),
    /// A calendar day with no time of day.
    Day(NaiveDate),
}

impl DueDate {
    /// Parse the string form carried by [`ReminderRequest::due_date`].
    ///
    /// Strings containing `T` are read as RFC 3339 instants, anything else as
    /// `YYYY-MM-DD`. Returns `None` when neither parses.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.contains('T') {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| DueDate::At(dt.with_timezone(&Utc)))
        } else {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .map(DueDate::Day)
        }
    }

    pub fn alarm_at(&self) -> Option<DateTime<Utc>> {
        match self {
            DueDate::At(at) => Some(*at),
            DueDate::Day(_) => None,
        }
    }

    pub fn display_string(&self) -> String {
        match self {
            DueDate::At(at) => at.format("%Y-%m-%d %H:%M UTC").to_string(),
            DueDate::Day(day) => day.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Reminder priority levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    #[default]
    None,
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn display_string(&self) -> &'static str {
        match self {
            Priority::None => "",
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

/// A reminder held by the local store. The id is assigned by the store and
/// never read back by the sync engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: String,
    pub list: String,
    pub title: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub due: Option<DueDate>,
    #[serde(default)]
    pub alarm_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_instant_with_fraction() {
        let due = DueDate::parse("2024-03-01T10:00:00.000Z").unwrap();
        assert_eq!(
            due,
            DueDate::At(Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap())
        );
        assert!(due.alarm_at().is_some());
    }

    #[test]
    fn parses_instant_with_offset() {
        let due = DueDate::parse("2024-03-01T18:00:00+08:00").unwrap();
        assert_eq!(
            due,
            DueDate::At(Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap())
        );
    }

    #[test]
    fn parses_date_only() {
        let due = DueDate::parse("2024-03-01").unwrap();
        assert_eq!(due, DueDate::Day(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()));
        assert_eq!(due.alarm_at(), None);
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(DueDate::parse("next tuesday"), None);
        assert_eq!(DueDate::parse("2024-13-01T00:00:00Z"), None);
    }

    #[test]
    fn priority_display() {
        assert_eq!(Priority::Medium.display_string(), "medium");
        assert_eq!(Priority::None.display_string(), "");
    }
}
