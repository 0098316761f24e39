//! Reconciliation engine for the Serendib vendor platform: edit
//! sessions over an abstract backend, plus the scheduled refresh task
//! that keeps them fresh.

pub mod backend;
pub mod engine;
pub mod refresh;

pub use backend::EditableBackend;
pub use engine::{EditSession, SubmissionResult};
pub use refresh::{run_refresh_loop, DEFAULT_REFRESH_INTERVAL};
