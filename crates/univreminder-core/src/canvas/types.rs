//! Canvas planner item types.
//!
//! The wire shape (`PlannerItem`) is decoded straight from the planner API and
//! converted into the flat [`RemoteTask`] the rest of the pipeline works with.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FetchError;

/// Planner type string Canvas uses for assignments.
pub const ASSIGNMENT_TYPE: &str = "assignment";

/// Kind of plannable item. Only assignments are synced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    Assignment,
    Other,
}

impl TaskKind {
    fn from_plannable_type(raw: &str) -> Self {
        if raw == ASSIGNMENT_TYPE {
            TaskKind::Assignment
        } else {
            TaskKind::Other
        }
    }
}

/// Structured submission record Canvas returns once something was submitted
/// or graded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionDetail {
    #[serde(default)]
    pub submitted: bool,
    #[serde(default)]
    pub excused: bool,
    #[serde(default)]
    pub graded: bool,
    #[serde(default)]
    pub posted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub late: bool,
    #[serde(default)]
    pub missing: bool,
    #[serde(default)]
    pub needs_grading: bool,
    #[serde(default)]
    pub has_feedback: bool,
    #[serde(default)]
    pub redo_request: bool,
}

/// The `submissions` field: either a bare boolean or a detail record.
///
/// Decode order is boolean first, then record. A value matching neither
/// shape fails the decode of the whole response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SubmissionState {
    Flag(bool),
    Detail(SubmissionDetail),
}

impl SubmissionState {
    /// Only the boolean `false` marker counts as "not submitted". A detail
    /// record is the submitted variant even when every flag in it is false.
    pub fn is_not_submitted(&self) -> bool {
        matches!(self, SubmissionState::Flag(false))
    }
}

/// One task fetched from Canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteTask {
    pub id: i64,
    pub title: String,
    pub due_at: Option<DateTime<Utc>>,
    pub context_label: String,
    pub kind: TaskKind,
    pub submission: SubmissionState,
}

impl RemoteTask {
    /// Whether this task is an actionable, unsubmitted assignment.
    pub fn is_syncable(&self) -> bool {
        self.kind == TaskKind::Assignment && self.submission.is_not_submitted()
    }
}

#[derive(Debug, Deserialize)]
struct Plannable {
    id: i64,
    title: String,
    #[serde(default)]
    due_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct PlannerItem {
    plannable_type: String,
    submissions: SubmissionState,
    plannable: Plannable,
    #[serde(default)]
    context_name: Option<String>,
}

impl From<PlannerItem> for RemoteTask {
    fn from(item: PlannerItem) -> Self {
        Self {
            id: item.plannable.id,
            title: item.plannable.title,
            due_at: item.plannable.due_at,
            context_label: item.context_name.unwrap_or_default(),
            kind: TaskKind::from_plannable_type(&item.plannable_type),
            submission: item.submissions,
        }
    }
}

/// Decode a planner response body into tasks, in response order.
pub fn decode_planner_items(body: &[u8]) -> Result<Vec<RemoteTask>, FetchError> {
    let items: Vec<PlannerItem> = serde_json::from_slice(body)?;
    Ok(items.into_iter().map(RemoteTask::from).collect())
}

/// Keep only syncable tasks, preserving order.
pub fn filter_syncable(tasks: Vec<RemoteTask>) -> Vec<RemoteTask> {
    tasks.into_iter().filter(RemoteTask::is_syncable).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(id: i64, kind: &str, submissions: serde_json::Value) -> serde_json::Value {
        json!({
            "plannable_type": kind,
            "submissions": submissions,
            "plannable_date": "2024-03-01T10:00:00Z",
            "plannable": {
                "id": id,
                "title": format!("Task {id}"),
                "due_at": "2024-03-01T10:00:00Z"
            },
            "context_name": "CS2030S"
        })
    }

    fn decode(value: serde_json::Value) -> Result<Vec<RemoteTask>, FetchError> {
        decode_planner_items(value.to_string().as_bytes())
    }

    #[test]
    fn decodes_boolean_submission() {
        let tasks = decode(json!([item(1, "assignment", json!(false))])).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, 1);
        assert_eq!(tasks[0].title, "Task 1");
        assert_eq!(tasks[0].context_label, "CS2030S");
        assert_eq!(tasks[0].kind, TaskKind::Assignment);
        assert_eq!(tasks[0].submission, SubmissionState::Flag(false));
        assert!(tasks[0].is_syncable());
    }

    #[test]
    fn decodes_structured_submission() {
        let detail = json!({
            "submitted": true,
            "excused": false,
            "graded": false,
            "posted_at": null,
            "late": false,
            "missing": false,
            "needs_grading": true,
            "has_feedback": false,
            "redo_request": false
        });
        let tasks = decode(json!([item(2, "assignment", detail)])).unwrap();
        match &tasks[0].submission {
            SubmissionState::Detail(d) => {
                assert!(d.submitted);
                assert!(d.needs_grading);
            }
            other => panic!("expected detail, got {other:?}"),
        }
        assert!(!tasks[0].is_syncable());
    }

    #[test]
    fn all_false_detail_is_still_submitted_variant() {
        let tasks = decode(json!([item(3, "assignment", json!({}))])).unwrap();
        assert_eq!(
            tasks[0].submission,
            SubmissionState::Detail(SubmissionDetail::default())
        );
        assert!(!tasks[0].is_syncable());
    }

    #[test]
    fn unmatched_submission_shape_fails_decode() {
        let result = decode(json!([item(4, "assignment", json!("pending"))]));
        assert!(matches!(result, Err(FetchError::Decode(_))));
    }

    #[test]
    fn non_assignment_is_not_syncable() {
        let tasks = decode(json!([item(5, "quiz", json!(false))])).unwrap();
        assert_eq!(tasks[0].kind, TaskKind::Other);
        assert!(!tasks[0].is_syncable());
    }

    #[test]
    fn true_flag_is_not_syncable() {
        let tasks = decode(json!([item(6, "assignment", json!(true))])).unwrap();
        assert!(!tasks[0].is_syncable());
    }

    #[test]
    fn missing_due_date_and_context() {
        let body = json!([{
            "plannable_type": "assignment",
            "submissions": false,
            "plannable": { "id": 7, "title": "Reflection" },
            "context_name": null
        }]);
        let tasks = decode(body).unwrap();
        assert_eq!(tasks[0].due_at, None);
        assert_eq!(tasks[0].context_label, "");
    }

    #[test]
    fn filter_keeps_order() {
        let tasks = decode(json!([
            item(10, "assignment", json!(false)),
            item(11, "announcement", json!(false)),
            item(12, "assignment", json!({"submitted": false})),
            item(13, "assignment", json!(false)),
        ]))
        .unwrap();
        let ids: Vec<i64> = filter_syncable(tasks).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![10, 13]);
    }
}
