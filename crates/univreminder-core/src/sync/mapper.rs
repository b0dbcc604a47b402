//! Remote task to reminder request mapping.

use chrono::SecondsFormat;

use crate::canvas::RemoteTask;
use crate::reminders::ReminderRequest;

/// Map one task to the request that creates its reminder.
///
/// Title and course name are copied verbatim; the due instant is rendered as
/// an RFC 3339 UTC string with millisecond precision.
pub fn to_reminder_request(task: &RemoteTask) -> ReminderRequest {
    ReminderRequest {
        title: task.title.clone(),
        notes: Some(task.context_label.clone()),
        due_date: task
            .due_at
            .map(|due| due.to_rfc3339_opts(SecondsFormat::Millis, true)),
    }
}
