//! Company note editing service.
//!
//! Thin and stateless between sessions: the editor reads one note on
//! mount, the save is an explicit user action performing an upsert. The
//! caller chains any follow-up (like navigating away) on the returned
//! future, so navigation only happens after the save resolved.

use std::sync::Arc;

use jobtrack_core::UserSession;
use jobtrack_core::error::Result;
use jobtrack_core::note::NoteStore;

use crate::report::{ErrorSink, LogErrorSink};

/// Loads and saves one user's per-company notes.
pub struct NoteService {
    store: Arc<dyn NoteStore>,
    session: UserSession,
    errors: Arc<dyn ErrorSink>,
}

impl NoteService {
    /// Creates a service for a signed-in user, logging save failures.
    pub fn new(store: Arc<dyn NoteStore>, session: UserSession) -> Self {
        Self::with_error_sink(store, session, Arc::new(LogErrorSink))
    }

    /// Creates a service with a custom failure sink.
    pub fn with_error_sink(
        store: Arc<dyn NoteStore>,
        session: UserSession,
        errors: Arc<dyn ErrorSink>,
    ) -> Self {
        Self {
            store,
            session,
            errors,
        }
    }

    /// The note content for a company, empty if none was ever saved.
    pub async fn load(&self, company_name: &str) -> Result<String> {
        let note = self
            .store
            .get_note(&self.session.user_id, company_name)
            .await?;
        Ok(note.map(|note| note.content).unwrap_or_default())
    }

    /// Creates or updates the note for a company.
    ///
    /// Upsert with merge semantics: only the content and the save timestamp
    /// are written, so the same (user, company) pair never yields a second
    /// document.
    pub async fn save(&self, company_name: &str, content: &str) -> Result<()> {
        let result = self
            .store
            .upsert_note(&self.session.user_id, company_name, content)
            .await;
        if let Err(error) = &result {
            self.errors.mutation_failed("save_note", error);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobtrack_infrastructure::MemoryStore;

    fn service() -> NoteService {
        NoteService::new(
            Arc::new(MemoryStore::new()),
            UserSession::new("user-1", "user@example.com"),
        )
    }

    #[tokio::test]
    async fn test_load_absent_note_is_empty() {
        let service = service();
        assert_eq!(service.load("Initech").await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_save_then_load_round_trips() {
        let service = service();
        service.save("Initech", "Asked about onboarding").await.unwrap();
        assert_eq!(service.load("Initech").await.unwrap(), "Asked about onboarding");

        service.save("Initech", "Second interview booked").await.unwrap();
        assert_eq!(service.load("Initech").await.unwrap(), "Second interview booked");
    }

    #[tokio::test]
    async fn test_notes_are_keyed_per_company() {
        let service = service();
        service.save("Initech", "A").await.unwrap();
        service.save("Globex", "B").await.unwrap();
        assert_eq!(service.load("Initech").await.unwrap(), "A");
        assert_eq!(service.load("Globex").await.unwrap(), "B");
    }
}
