//! Application layer for JobTrack.
//!
//! This crate provides the task data-synchronization and mutation layer:
//! the live task subscription with its four mutation operations, the
//! company notes index projection, the note editor service, and the
//! per-sign-in session wiring.

pub mod company_index;
pub mod note_service;
pub mod report;
pub mod session;
pub mod task_service;

pub use company_index::CompanyIndex;
pub use note_service::NoteService;
pub use report::{ErrorSink, LogErrorSink};
pub use session::ClientSession;
pub use task_service::TaskService;
