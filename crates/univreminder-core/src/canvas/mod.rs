//! Canvas LMS access: planner item decoding and the HTTP fetcher.

pub mod client;
pub mod traits;
pub mod types;

pub use client::{CanvasClient, DEFAULT_BASE_URL};
pub use traits::TaskSource;
pub use types::{RemoteTask, SubmissionDetail, SubmissionState, TaskKind};
