//! End-to-end sync against a mocked Canvas planner endpoint, using the real
//! HTTP client, local reminder store and known-id file.

use chrono::{TimeZone, Utc};
use mockito::Matcher;
use tempfile::TempDir;
use univreminder_core::{
    CanvasClient, DueDate, KnownIdStore, LocalReminderStore, SyncEngine, SyncError, SyncSettings,
};

const PLANNER_BODY: &str = r#"[
    {
        "plannable_type": "assignment",
        "submissions": false,
        "plannable_date": "2024-03-01T10:00:00Z",
        "plannable": {"id": 1, "title": "Assignment 1", "due_at": "2024-03-01T10:00:00Z"},
        "context_name": "CS3230 Design and Analysis of Algorithms"
    },
    {
        "plannable_type": "assignment",
        "submissions": {
            "submitted": true, "excused": false, "graded": false,
            "posted_at": "2024-02-10T09:00:00Z",
            "late": false, "missing": false, "needs_grading": true,
            "has_feedback": false, "redo_request": false
        },
        "plannable_date": "2024-02-28T10:00:00Z",
        "plannable": {"id": 2, "title": "Assignment 0", "due_at": "2024-02-28T10:00:00Z"},
        "context_name": "CS3230 Design and Analysis of Algorithms"
    }
]"#;

struct Fixture {
    _dir: TempDir,
    known_ids: std::path::PathBuf,
    reminders: std::path::PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        Self {
            known_ids: dir.path().join("known_todo_ids"),
            reminders: dir.path().join("reminders.json"),
            _dir: dir,
        }
    }

    fn engine(&self, base_url: &str) -> SyncEngine<CanvasClient, LocalReminderStore> {
        SyncEngine::new(
            CanvasClient::new(base_url, "token-123"),
            LocalReminderStore::new(&self.reminders, "UnivReminder"),
            KnownIdStore::new(&self.known_ids),
            SyncSettings::default(),
        )
    }
}

#[tokio::test]
async fn two_runs_create_one_reminder() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v1/planner/items")
        .match_query(Matcher::UrlEncoded("per_page".into(), "100".into()))
        .match_header("authorization", "Bearer token-123")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(PLANNER_BODY)
        .expect(2)
        .create_async()
        .await;

    let fx = Fixture::new();

    let report = fx.engine(&server.url()).run().await.unwrap();
    assert_eq!(report.synced, 1);

    let report = fx.engine(&server.url()).run().await.unwrap();
    assert_eq!(report.synced, 0);
    assert_eq!(report.already_known, 1);

    mock.assert_async().await;

    let store = LocalReminderStore::new(&fx.reminders, "UnivReminder");
    let reminders = store.list_all().unwrap();
    assert_eq!(reminders.len(), 1);
    assert_eq!(reminders[0].title, "Assignment 1");
    assert_eq!(
        reminders[0].notes.as_deref(),
        Some("CS3230 Design and Analysis of Algorithms")
    );
    let due = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
    assert_eq!(reminders[0].due, Some(DueDate::At(due)));
    assert_eq!(reminders[0].alarm_at, Some(due));

    assert_eq!(std::fs::read_to_string(&fx.known_ids).unwrap(), "1");
}

#[tokio::test]
async fn server_error_leaves_no_state() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/v1/planner/items")
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let fx = Fixture::new();
    let err = fx.engine(&server.url()).run().await.unwrap_err();

    assert!(matches!(err, SyncError::Fetch(_)));
    assert!(!fx.known_ids.exists());
    assert!(!fx.reminders.exists());
}
