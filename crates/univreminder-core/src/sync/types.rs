//! Core types for the Canvas to reminders sync run.

use serde::{Deserialize, Serialize};

/// Where a sync run currently is. Runs move strictly forward through these
/// stages and end in `Done` or `Aborted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncStage {
    Idle,
    AccessRequested,
    Fetching,
    Deduplicating,
    Mapping,
    /// Creating the reminder at this index of the batch.
    Creating(usize),
    Committing,
    Persisting,
    Done,
    Aborted,
}

impl SyncStage {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SyncStage::Done | SyncStage::Aborted)
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    /// Syncable tasks returned by the remote.
    pub fetched: usize,
    /// Tasks skipped because their id was recorded by an earlier run.
    pub already_known: usize,
    /// Repeats of an id earlier in the same response.
    #[serde(default)]
    pub duplicates: usize,
    /// Reminders created and committed in this run.
    pub synced: usize,
}
