//! Canvas to reminders synchronization.
//!
//! The engine fetches tasks, drops the ones whose id is already recorded,
//! creates reminders for the rest in one batch, and records their ids once the
//! batch is committed.

pub mod engine;
pub mod known_ids;
pub mod mapper;
pub mod types;

pub use engine::{SyncEngine, SyncSettings};
pub use known_ids::KnownIdStore;
pub use mapper::to_reminder_request;
pub use types::{SyncReport, SyncStage};
