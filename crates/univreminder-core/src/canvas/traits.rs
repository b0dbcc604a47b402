use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::canvas::types::RemoteTask;
use crate::error::FetchError;

/// Source of remote tasks for the sync engine.
///
/// One call issues one query for tasks due on or after `window_start`, at most
/// `per_page` of them. Implementations return only syncable tasks
/// (unsubmitted assignments), in the order the remote returned them.
#[async_trait]
pub trait TaskSource: Send + Sync {
    async fn fetch(
        &self,
        window_start: DateTime<Utc>,
        per_page: u32,
    ) -> Result<Vec<RemoteTask>, FetchError>;
}
