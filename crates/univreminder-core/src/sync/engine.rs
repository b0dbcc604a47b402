//! Sync engine: Canvas tasks in, reminders out, at most once per task id.
//!
//! One run is a strictly sequential pipeline:
//!
//! ```text
//! Idle -> AccessRequested -> Fetching -> Deduplicating -> Mapping
//!      -> Creating(i)... -> Committing -> Persisting -> Done
//! ```
//!
//! Any failure moves the run to `Aborted`. Known ids are marked and written
//! only after the sink commit succeeded, so a known id always has a reminder.
//! A failure while writing the id file after a successful commit is reported
//! as [`SyncError::Persist`]; the next run will create those reminders again.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};

use crate::canvas::{RemoteTask, TaskSource};
use crate::error::{Result, SinkError, SyncError};
use crate::reminders::{ReminderRequest, ReminderSink};
use crate::storage::Config;
use crate::sync::known_ids::KnownIdStore;
use crate::sync::mapper::to_reminder_request;
use crate::sync::types::{SyncReport, SyncStage};

/// Query parameters for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncSettings {
    /// Tasks due on or after `now - window_days` are fetched.
    pub window_days: u32,
    /// Page size of the single planner request.
    pub per_page: u32,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            window_days: 30,
            per_page: 100,
        }
    }
}

impl From<&Config> for SyncSettings {
    fn from(config: &Config) -> Self {
        Self {
            window_days: config.canvas.window_days,
            per_page: config.canvas.per_page,
        }
    }
}

#[derive(Default)]
struct Deduplicated {
    fresh: Vec<RemoteTask>,
    already_known: usize,
    duplicates: usize,
}

pub struct SyncEngine<S, R> {
    source: S,
    sink: R,
    known_ids: KnownIdStore,
    settings: SyncSettings,
    stage: SyncStage,
}

impl<S, R> SyncEngine<S, R>
where
    S: TaskSource,
    R: ReminderSink,
{
    pub fn new(source: S, sink: R, known_ids: KnownIdStore, settings: SyncSettings) -> Self {
        Self {
            source,
            sink,
            known_ids,
            settings,
            stage: SyncStage::Idle,
        }
    }

    pub fn stage(&self) -> SyncStage {
        self.stage
    }

    pub fn known_ids(&self) -> &KnownIdStore {
        &self.known_ids
    }

    pub fn sink(&self) -> &R {
        &self.sink
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    fn enter(&mut self, stage: SyncStage) {
        tracing::debug!(from = ?self.stage, to = ?stage, "sync stage");
        self.stage = stage;
    }

    fn window_start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - Duration::days(i64::from(self.settings.window_days))
    }

    /// Run the full pipeline against the current time.
    pub async fn run(&mut self) -> Result<SyncReport> {
        self.run_at(Utc::now()).await
    }

    /// Run the full pipeline with `now` as the end of the fetch window.
    pub async fn run_at(&mut self, now: DateTime<Utc>) -> Result<SyncReport> {
        self.enter(SyncStage::Idle);
        match self.pipeline(now).await {
            Ok(report) => {
                self.enter(SyncStage::Done);
                tracing::info!(
                    fetched = report.fetched,
                    already_known = report.already_known,
                    duplicates = report.duplicates,
                    synced = report.synced,
                    "sync finished"
                );
                Ok(report)
            }
            Err(e) => {
                tracing::error!(stage = ?self.stage, error = %e, "sync aborted");
                self.enter(SyncStage::Aborted);
                Err(e)
            }
        }
    }

    async fn pipeline(&mut self, now: DateTime<Utc>) -> Result<SyncReport> {
        self.enter(SyncStage::AccessRequested);
        self.sink.request_access().await.map_err(|e| match e {
            SinkError::AccessDenied(msg) => SyncError::AccessDenied(msg),
            other => SyncError::AccessDenied(other.to_string()),
        })?;

        self.enter(SyncStage::Fetching);
        let tasks = self
            .source
            .fetch(self.window_start(now), self.settings.per_page)
            .await?;
        let fetched = tasks.len();
        if tasks.is_empty() {
            tracing::info!("no tasks to sync");
            return Ok(SyncReport::default());
        }

        self.enter(SyncStage::Deduplicating);
        let Deduplicated {
            fresh,
            already_known,
            duplicates,
        } = self.deduplicate(tasks)?;
        if fresh.is_empty() {
            tracing::info!(fetched, "all fetched tasks already have reminders");
            return Ok(SyncReport {
                fetched,
                already_known,
                duplicates,
                synced: 0,
            });
        }

        self.enter(SyncStage::Mapping);
        let requests: Vec<ReminderRequest> = fresh.iter().map(to_reminder_request).collect();

        for (i, request) in requests.iter().enumerate() {
            self.enter(SyncStage::Creating(i));
            self.sink.create_reminder(request, false).await?;
        }

        self.enter(SyncStage::Committing);
        self.sink.commit().await?;
        let created = requests.len();

        self.enter(SyncStage::Persisting);
        self.known_ids.mark_seen(fresh.iter().map(|t| t.id));
        self.known_ids
            .persist()
            .map_err(|source| SyncError::Persist { created, source })?;

        Ok(SyncReport {
            fetched,
            already_known,
            duplicates,
            synced: created,
        })
    }

    /// Drop tasks whose id is already known, and repeats of an id within the
    /// batch. Loads the known-id file on first use.
    fn deduplicate(&mut self, tasks: Vec<RemoteTask>) -> Result<Deduplicated> {
        self.known_ids.load()?;

        let mut out = Deduplicated::default();
        let mut seen_in_batch = HashSet::new();
        for task in tasks {
            if self.known_ids.contains(task.id) {
                out.already_known += 1;
            } else if !seen_in_batch.insert(task.id) {
                out.duplicates += 1;
            } else {
                out.fresh.push(task);
            }
        }
        Ok(out)
    }

    /// Fetch and deduplicate, returning the requests a run would create.
    /// Neither the sink nor the known-id file is touched.
    pub async fn preview(&mut self) -> Result<Vec<ReminderRequest>> {
        self.preview_at(Utc::now()).await
    }

    pub async fn preview_at(&mut self, now: DateTime<Utc>) -> Result<Vec<ReminderRequest>> {
        let tasks = self
            .source
            .fetch(self.window_start(now), self.settings.per_page)
            .await?;
        if tasks.is_empty() {
            return Ok(Vec::new());
        }
        let fresh = self.deduplicate(tasks)?.fresh;
        Ok(fresh.iter().map(to_reminder_request).collect())
    }
}
