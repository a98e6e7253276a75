//! Mutation failure reporting seam.
//!
//! The original design swallows write failures apart from developer-facing
//! logging, so the user never sees an acknowledgment. That behavior is kept
//! as the default, but routed through an explicit interface so a stricter
//! policy (e.g., a transient notification) can be substituted without
//! touching the mutation logic.

use jobtrack_core::JobTrackError;

/// Receives every failed store mutation, once, with no retry.
pub trait ErrorSink: Send + Sync {
    /// Called after a mutation was attempted and the store returned an error.
    fn mutation_failed(&self, operation: &str, error: &JobTrackError);
}

/// Default sink: developer-facing log only.
#[derive(Debug, Default)]
pub struct LogErrorSink;

impl ErrorSink for LogErrorSink {
    fn mutation_failed(&self, operation: &str, error: &JobTrackError) {
        tracing::error!("[TaskService] {} failed: {}", operation, error);
    }
}
