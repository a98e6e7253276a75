//! Company note store trait.
//!
//! Defines the interface for note persistence operations.

use super::model::CompanyNote;
use crate::error::Result;
use async_trait::async_trait;

/// An abstract per-user company-note collection in the document store.
///
/// Notes are keyed by company name. Saving uses upsert-with-merge
/// semantics: only `content` and `updatedAt` are written, anything else on
/// an existing document is preserved.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Reads the note for a company.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(note))`: Note found
    /// - `Ok(None)`: No note has been saved for this company
    /// - `Err(_)`: Error occurred during retrieval
    async fn get_note(&self, user_id: &str, company_name: &str) -> Result<Option<CompanyNote>>;

    /// Creates or updates the note for a company.
    ///
    /// The store refreshes `updatedAt` on every save.
    async fn upsert_note(&self, user_id: &str, company_name: &str, content: &str) -> Result<()>;
}
