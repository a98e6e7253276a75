//! Per-sign-in service wiring.
//!
//! The surrounding application watches the authentication provider and
//! drives an explicit lifecycle: `init` on sign-in detection, `teardown`
//! on sign-out. Everything in between receives the services by reference —
//! there is no ambient signed-in state.

use std::sync::Arc;

use jobtrack_core::UserSession;
use jobtrack_core::note::NoteStore;
use jobtrack_core::task::TaskStore;

use crate::note_service::NoteService;
use crate::task_service::TaskService;

/// The services live for one signed-in user.
pub struct ClientSession {
    session: UserSession,
    tasks: TaskService,
    notes: NoteService,
}

impl ClientSession {
    /// Wires the task and note services for a signed-in user against one
    /// document store.
    pub fn init<S>(session: UserSession, store: Arc<S>) -> Self
    where
        S: TaskStore + NoteStore + 'static,
    {
        tracing::debug!("[ClientSession] init for user {}", session.user_id);
        let task_store: Arc<dyn TaskStore> = Arc::clone(&store) as Arc<dyn TaskStore>;
        let note_store: Arc<dyn NoteStore> = store;
        Self {
            tasks: TaskService::new(task_store, session.clone()),
            notes: NoteService::new(note_store, session.clone()),
            session,
        }
    }

    /// The signed-in user these services operate for.
    pub fn user(&self) -> &UserSession {
        &self.session
    }

    /// Task synchronization and mutations.
    pub fn tasks(&self) -> &TaskService {
        &self.tasks
    }

    /// Company note loading and saving.
    pub fn notes(&self) -> &NoteService {
        &self.notes
    }

    /// Tears the session down on sign-out, releasing the live task
    /// listener.
    pub fn teardown(self) {
        tracing::debug!("[ClientSession] teardown for user {}", self.session.user_id);
        self.tasks.detach();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobtrack_core::task::SortOrder;
    use jobtrack_infrastructure::MemoryStore;

    #[tokio::test]
    async fn test_teardown_releases_live_listener() {
        let store = MemoryStore::new();
        let session = ClientSession::init(
            UserSession::new("user-1", "user@example.com"),
            Arc::new(store.clone()),
        );

        let _feed = session.tasks().subscribe(SortOrder::CreatedAtDesc);
        assert_eq!(store.subscriber_count("user-1"), 1);

        session.teardown();
        assert_eq!(store.subscriber_count("user-1"), 0);
    }

    #[tokio::test]
    async fn test_services_share_the_user_scope() {
        let store = MemoryStore::new();
        let session = ClientSession::init(
            UserSession::new("user-1", "user@example.com"),
            Arc::new(store.clone()),
        );
        assert_eq!(session.user().email, "user@example.com");

        session.notes().save("Initech", "note").await.unwrap();
        assert_eq!(session.notes().load("Initech").await.unwrap(), "note");
    }
}
