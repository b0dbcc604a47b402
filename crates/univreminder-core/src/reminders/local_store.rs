//! File-backed reminder store.
//!
//! Reminders live in a single JSON file. Creations are staged in memory and
//! written in one atomic rewrite on commit, so a failed commit leaves the file
//! exactly as it was. A commit consumes the staged batch whether or not it
//! succeeds, and `request_access` starts from an empty batch, so leftovers of
//! an aborted run are never written by a later one.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SinkError;
use crate::reminders::traits::ReminderSink;
use crate::reminders::types::{DueDate, Priority, Reminder, ReminderRequest};
use crate::storage::write_atomic;

pub const DEFAULT_LIST_NAME: &str = "UnivReminder";

#[derive(Serialize, Deserialize, Default)]
struct RemindersFile {
    #[serde(default)]
    reminders: Vec<Reminder>,
}

pub struct LocalReminderStore {
    path: PathBuf,
    list_name: String,
    pending: Vec<Reminder>,
    access_granted: bool,
}

impl LocalReminderStore {
    pub fn new(path: impl Into<PathBuf>, list_name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            list_name: list_name.into(),
            pending: Vec::new(),
            access_granted: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of staged, uncommitted reminders.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    fn read_file(&self) -> Result<RemindersFile, SinkError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(RemindersFile::default()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(RemindersFile::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// All committed reminders, in creation order.
    pub fn list_all(&self) -> Result<Vec<Reminder>, SinkError> {
        Ok(self.read_file()?.reminders)
    }

    /// Committed reminders that are not completed.
    pub fn list_incomplete(&self) -> Result<Vec<Reminder>, SinkError> {
        Ok(self
            .list_all()?
            .into_iter()
            .filter(|r| !r.completed)
            .collect())
    }

    fn build(&self, request: &ReminderRequest) -> Reminder {
        let due = request.due_date.as_deref().and_then(|raw| {
            let parsed = DueDate::parse(raw);
            if parsed.is_none() {
                tracing::warn!(due_date = raw, title = %request.title, "ignoring unparseable due date");
            }
            parsed
        });

        Reminder {
            id: Uuid::new_v4().to_string(),
            list: self.list_name.clone(),
            title: request.title.clone(),
            notes: request.notes.clone(),
            alarm_at: due.and_then(|d| d.alarm_at()),
            due,
            priority: Priority::Medium,
            completed: false,
            created_at: Utc::now(),
        }
    }
}

#[async_trait]
impl ReminderSink for LocalReminderStore {
    async fn request_access(&mut self) -> Result<(), SinkError> {
        let parent = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        std::fs::create_dir_all(parent).map_err(|e| {
            SinkError::AccessDenied(format!("cannot create {}: {e}", parent.display()))
        })?;

        let meta = std::fs::metadata(parent).map_err(|e| {
            SinkError::AccessDenied(format!("cannot inspect {}: {e}", parent.display()))
        })?;
        if meta.permissions().readonly() {
            return Err(SinkError::AccessDenied(format!(
                "{} is read-only",
                parent.display()
            )));
        }

        if !self.pending.is_empty() {
            tracing::warn!(count = self.pending.len(), "discarding reminders staged by an aborted run");
            self.pending.clear();
        }
        self.access_granted = true;
        Ok(())
    }

    async fn create_reminder(
        &mut self,
        request: &ReminderRequest,
        commit_now: bool,
    ) -> Result<(), SinkError> {
        if !self.access_granted {
            return Err(SinkError::AccessDenied(
                "access to the reminder store was not requested".into(),
            ));
        }
        let reminder = self.build(request);
        tracing::debug!(id = %reminder.id, title = %reminder.title, "staged reminder");
        self.pending.push(reminder);

        if commit_now {
            self.commit().await?;
        }
        Ok(())
    }

    async fn commit(&mut self) -> Result<(), SinkError> {
        let batch = std::mem::take(&mut self.pending);
        if batch.is_empty() {
            return Ok(());
        }
        let count = batch.len();

        let mut file = self.read_file()?;
        file.reminders.extend(batch);
        let content = serde_json::to_vec_pretty(&file)?;
        write_atomic(&self.path, &content)
            .map_err(|e| SinkError::Commit(format!("{}: {e}", self.path.display())))?;

        tracing::info!(count, path = %self.path.display(), "committed reminders");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn request(title: &str, due: Option<&str>) -> ReminderRequest {
        ReminderRequest {
            title: title.to_string(),
            notes: Some("CS2030S".to_string()),
            due_date: due.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn deferred_creations_land_on_commit() {
        let dir = TempDir::new().unwrap();
        let mut store = LocalReminderStore::new(dir.path().join("reminders.json"), "Uni");
        store.request_access().await.unwrap();

        store
            .create_reminder(&request("Lab 1", Some("2024-03-01T10:00:00.000Z")), false)
            .await
            .unwrap();
        store
            .create_reminder(&request("Essay", Some("2024-03-05")), false)
            .await
            .unwrap();

        assert_eq!(store.pending_count(), 2);
        assert!(store.list_all().unwrap().is_empty());

        store.commit().await.unwrap();
        assert_eq!(store.pending_count(), 0);

        let saved = store.list_all().unwrap();
        assert_eq!(saved.len(), 2);
        assert_eq!(saved[0].title, "Lab 1");
        assert_eq!(saved[0].list, "Uni");
        assert_eq!(saved[0].priority, Priority::Medium);
        assert!(saved[0].alarm_at.is_some());
        assert!(matches!(saved[1].due, Some(DueDate::Day(_))));
        assert!(saved[1].alarm_at.is_none());
    }

    #[tokio::test]
    async fn commit_now_writes_immediately() {
        let dir = TempDir::new().unwrap();
        let mut store = LocalReminderStore::new(dir.path().join("reminders.json"), "Uni");
        store.request_access().await.unwrap();
        store.create_reminder(&request("Quiz", None), true).await.unwrap();

        let saved = store.list_all().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].due, None);
    }

    #[tokio::test]
    async fn commits_append_to_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("reminders.json");

        let mut first = LocalReminderStore::new(&path, "Uni");
        first.request_access().await.unwrap();
        first.create_reminder(&request("A", None), true).await.unwrap();

        let mut second = LocalReminderStore::new(&path, "Uni");
        second.request_access().await.unwrap();
        second.create_reminder(&request("B", None), false).await.unwrap();
        second.commit().await.unwrap();

        let titles: Vec<String> = second.list_all().unwrap().into_iter().map(|r| r.title).collect();
        assert_eq!(titles, vec!["A", "B"]);
    }

    #[tokio::test]
    async fn create_without_access_is_denied() {
        let dir = TempDir::new().unwrap();
        let mut store = LocalReminderStore::new(dir.path().join("reminders.json"), "Uni");
        let err = store.create_reminder(&request("A", None), false).await.unwrap_err();
        assert!(matches!(err, SinkError::AccessDenied(_)));
    }

    #[tokio::test]
    async fn request_access_creates_parent_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("nested/deeper/reminders.json");
        let mut store = LocalReminderStore::new(&nested, "Uni");
        store.request_access().await.unwrap();
        assert!(nested.parent().unwrap().exists());
    }

    #[tokio::test]
    async fn unparseable_due_date_is_dropped() {
        let dir = TempDir::new().unwrap();
        let mut store = LocalReminderStore::new(dir.path().join("reminders.json"), "Uni");
        store.request_access().await.unwrap();
        store
            .create_reminder(&request("Odd", Some("sometime")), true)
            .await
            .unwrap();
        assert_eq!(store.list_all().unwrap()[0].due, None);
    }

    #[tokio::test]
    async fn failed_commit_drops_the_batch() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("reminders.json");
        let blocker = dir.path().join("reminders.json.tmp");
        std::fs::create_dir(&blocker).unwrap();

        let mut store = LocalReminderStore::new(&path, "Uni");
        store.request_access().await.unwrap();
        store.create_reminder(&request("Lab 1", None), false).await.unwrap();
        let err = store.commit().await.unwrap_err();
        assert!(matches!(err, SinkError::Commit(_)));
        assert_eq!(store.pending_count(), 0);

        std::fs::remove_dir(&blocker).unwrap();
        store.request_access().await.unwrap();
        store.create_reminder(&request("Lab 1", None), false).await.unwrap();
        store.commit().await.unwrap();

        let saved = store.list_all().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].title, "Lab 1");
    }

    #[tokio::test]
    async fn request_access_discards_uncommitted_reminders() {
        let dir = TempDir::new().unwrap();
        let mut store = LocalReminderStore::new(dir.path().join("reminders.json"), "Uni");
        store.request_access().await.unwrap();
        store.create_reminder(&request("Lab 1", None), false).await.unwrap();
        store.create_reminder(&request("Lab 2", None), false).await.unwrap();

        store.request_access().await.unwrap();
        assert_eq!(store.pending_count(), 0);
        store.commit().await.unwrap();
        assert!(store.list_all().unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_title_is_stored_as_is() {
        let dir = TempDir::new().unwrap();
        let mut store = LocalReminderStore::new(dir.path().join("reminders.json"), "Uni");
        store.request_access().await.unwrap();
        store.create_reminder(&request("", None), true).await.unwrap();
        assert_eq!(store.list_all().unwrap()[0].title, "");
    }

    #[tokio::test]
    async fn list_incomplete_skips_completed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("reminders.json");
        let mut store = LocalReminderStore::new(&path, "Uni");
        store.request_access().await.unwrap();
        store.create_reminder(&request("Open", None), false).await.unwrap();
        store.create_reminder(&request("Done", None), false).await.unwrap();
        store.commit().await.unwrap();

        let mut all = store.list_all().unwrap();
        all[1].completed = true;
        let content = serde_json::to_vec(&RemindersFile { reminders: all }).unwrap();
        std::fs::write(&path, content).unwrap();

        let open = store.list_incomplete().unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].title, "Open");
    }
}
