//! Domain layer for JobTrack.
//!
//! This crate defines the task and company-note entities, the closed color
//! palette, the document-store boundary traits, and the shared error type.
//! It contains no storage implementation; see `jobtrack-infrastructure`.

pub mod error;
pub mod note;
pub mod session;
pub mod task;

// Re-export common error type
pub use error::JobTrackError;
pub use session::UserSession;
