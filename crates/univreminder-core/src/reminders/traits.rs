use async_trait::async_trait;

use crate::error::SinkError;
use crate::reminders::types::ReminderRequest;

/// Capability the sync engine needs from a reminder store.
///
/// List selection, default-source fallback and permission prompts are the
/// store's own business.
#[async_trait]
pub trait ReminderSink: Send {
    /// Ask for write access. Fails with [`SinkError::AccessDenied`] when refused.
    async fn request_access(&mut self) -> Result<(), SinkError>;

    /// Create one reminder. With `commit_now == false` the creation is staged
    /// until [`ReminderSink::commit`].
    async fn create_reminder(
        &mut self,
        request: &ReminderRequest,
        commit_now: bool,
    ) -> Result<(), SinkError>;

    /// Durably store every staged creation in one transaction.
    async fn commit(&mut self) -> Result<(), SinkError>;
}
