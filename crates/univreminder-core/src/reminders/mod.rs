//! Local reminder side of the sync: request/reminder types, the sink
//! capability trait and a file-backed store.

pub mod local_store;
pub mod traits;
pub mod types;

pub use local_store::{LocalReminderStore, DEFAULT_LIST_NAME};
pub use traits::ReminderSink;
pub use types::{DueDate, Priority, Reminder, ReminderRequest};
