//! # UnivReminder Core Library
//!
//! This library synchronizes Canvas LMS planner items into a local reminder
//! store, creating at most one reminder per Canvas task across repeated runs.
//! The `univcli` binary is a thin layer over it.
//!
//! ## Architecture
//!
//! - **Canvas**: planner API client and the tolerant decode of its task records
//! - **Reminders**: the sink capability trait and a file-backed reminder store
//! - **Sync**: known-id bookkeeping, task mapping, and the engine that orders
//!   fetch, create, commit and persist so that a failure never loses a task
//! - **Storage**: data directory and TOML configuration
//!
//! ## Key Components
//!
//! - [`SyncEngine`]: one sync run, stage by stage
//! - [`KnownIdStore`]: durable set of already-synced task ids
//! - [`CanvasClient`]: the remote task fetcher
//! - [`LocalReminderStore`]: the default reminder sink
//! - [`Config`]: application configuration

pub mod canvas;
pub mod error;
pub mod reminders;
pub mod storage;
pub mod sync;

pub use canvas::{CanvasClient, RemoteTask, SubmissionDetail, SubmissionState, TaskKind, TaskSource};
pub use error::{ConfigError, FetchError, KnownIdError, SinkError, SyncError};
pub use reminders::{DueDate, LocalReminderStore, Priority, Reminder, ReminderRequest, ReminderSink};
pub use storage::{data_dir, Config};
pub use sync::{KnownIdStore, SyncEngine, SyncReport, SyncSettings, SyncStage};
