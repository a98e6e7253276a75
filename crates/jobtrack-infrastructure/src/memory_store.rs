//! In-memory document store.
//!
//! Implements the core store traits with the push semantics of a cloud
//! document database: every applied write re-emits the full, ordered result
//! set to each live subscriber of the affected user's collection. Snapshots
//! are pushed under the state lock, so delivery order equals apply order.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use tokio::sync::mpsc;
use uuid::Uuid;

use jobtrack_core::error::{JobTrackError, Result};
use jobtrack_core::note::{CompanyNote, NoteStore};
use jobtrack_core::task::{
    SortOrder, SubscriptionHandle, Task, TaskDocument, TaskFeed, TaskPatch, TaskSnapshot,
    TaskStore,
};

/// A per-user live-query listener.
struct Subscriber {
    id: u64,
    order: SortOrder,
    tx: mpsc::UnboundedSender<TaskSnapshot>,
}

/// One user's task collection, note collection, and listeners.
#[derive(Default)]
struct UserCollection {
    tasks: Vec<Task>,
    notes: HashMap<String, CompanyNote>,
    subscribers: Vec<Subscriber>,
}

#[derive(Default)]
struct StoreState {
    users: HashMap<String, UserCollection>,
    next_subscriber_id: u64,
    last_stamp: Option<DateTime<Utc>>,
}

/// An in-memory task and note store with live-query push.
///
/// Cloning is cheap and shares the same underlying collections, matching
/// the handle semantics of a remote database client.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<StoreState>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live listeners on a user's task collection.
    ///
    /// Exposed so tests can assert that cancelled subscriptions release
    /// their listener.
    pub fn subscriber_count(&self, user_id: &str) -> usize {
        let state = self.state.lock().expect("store lock poisoned");
        state
            .users
            .get(user_id)
            .map(|user| user.subscribers.len())
            .unwrap_or(0)
    }

    /// Issues a strictly monotonic server timestamp.
    ///
    /// Fixed-width microsecond encoding keeps string order equal to time
    /// order for store-assigned stamps.
    fn next_stamp(state: &mut StoreState) -> String {
        let mut now = Utc::now();
        if let Some(last) = state.last_stamp {
            if now <= last {
                now = last + Duration::microseconds(1);
            }
        }
        state.last_stamp = Some(now);
        now.to_rfc3339_opts(SecondsFormat::Micros, false)
    }

    /// Pushes the current result set to every live subscriber of a user.
    ///
    /// Listeners whose receiver is gone are pruned on the failed send.
    fn push_snapshots(user: &mut UserCollection) {
        let current = user.tasks.clone();
        user.subscribers.retain(|subscriber| {
            let mut tasks = current.clone();
            subscriber.order.sort(&mut tasks);
            subscriber
                .tx
                .send(TaskSnapshot {
                    order: subscriber.order,
                    tasks,
                })
                .is_ok()
        });
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn add_task(&self, user_id: &str, document: TaskDocument) -> Result<String> {
        let mut state = self.state.lock().expect("store lock poisoned");
        let created_at = Self::next_stamp(&mut state);
        let task_id = Uuid::new_v4().to_string();
        let user = state.users.entry(user_id.to_string()).or_default();
        user.tasks.push(Task {
            id: task_id.clone(),
            title: document.title,
            company_name: document.company_name,
            status: document.status,
            deadline: document.deadline,
            color: document.color,
            completed: document.completed,
            created_at,
        });
        tracing::debug!("[MemoryStore] added task {} for user {}", task_id, user_id);
        Self::push_snapshots(user);
        Ok(task_id)
    }

    async fn update_task(&self, user_id: &str, task_id: &str, patch: TaskPatch) -> Result<()> {
        let mut state = self.state.lock().expect("store lock poisoned");
        let user = state
            .users
            .get_mut(user_id)
            .ok_or_else(|| JobTrackError::not_found("task", task_id))?;
        let task = user
            .tasks
            .iter_mut()
            .find(|task| task.id == task_id)
            .ok_or_else(|| JobTrackError::not_found("task", task_id))?;

        if let Some(title) = patch.title {
            task.title = title;
        }
        if let Some(company_name) = patch.company_name {
            task.company_name = company_name;
        }
        if let Some(status) = patch.status {
            task.status = status;
        }
        if let Some(deadline) = patch.deadline {
            task.deadline = deadline.stored();
        }
        if let Some(color) = patch.color {
            task.color = color;
        }
        if let Some(completed) = patch.completed {
            task.completed = completed;
        }
        tracing::debug!("[MemoryStore] updated task {} for user {}", task_id, user_id);
        Self::push_snapshots(user);
        Ok(())
    }

    async fn delete_task(&self, user_id: &str, task_id: &str) -> Result<()> {
        let mut state = self.state.lock().expect("store lock poisoned");
        let Some(user) = state.users.get_mut(user_id) else {
            return Ok(());
        };
        let before = user.tasks.len();
        user.tasks.retain(|task| task.id != task_id);
        if user.tasks.len() == before {
            // Idempotent: deleting an id that is already gone is a no-op,
            // and nothing changed so nothing is pushed.
            return Ok(());
        }
        tracing::debug!("[MemoryStore] deleted task {} for user {}", task_id, user_id);
        Self::push_snapshots(user);
        Ok(())
    }

    async fn fetch_tasks(&self, user_id: &str, order: SortOrder) -> Result<Vec<Task>> {
        let state = self.state.lock().expect("store lock poisoned");
        let mut tasks = state
            .users
            .get(user_id)
            .map(|user| user.tasks.clone())
            .unwrap_or_default();
        order.sort(&mut tasks);
        Ok(tasks)
    }

    fn subscribe_tasks(&self, user_id: &str, order: SortOrder) -> (TaskFeed, SubscriptionHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let subscriber_id = {
            let mut state = self.state.lock().expect("store lock poisoned");
            state.next_subscriber_id += 1;
            let subscriber_id = state.next_subscriber_id;
            let user = state.users.entry(user_id.to_string()).or_default();
            // Live-query semantics: the current result set arrives
            // immediately, before any further change.
            let mut tasks = user.tasks.clone();
            order.sort(&mut tasks);
            let _ = tx.send(TaskSnapshot { order, tasks });
            user.subscribers.push(Subscriber {
                id: subscriber_id,
                order,
                tx,
            });
            subscriber_id
        };
        tracing::debug!(
            "[MemoryStore] opened subscription {} ({}) for user {}",
            subscriber_id,
            order.as_key(),
            user_id
        );

        let state = Arc::clone(&self.state);
        let user_key = user_id.to_string();
        let handle = SubscriptionHandle::new(move || {
            let mut state = state.lock().expect("store lock poisoned");
            if let Some(user) = state.users.get_mut(&user_key) {
                user.subscribers
                    .retain(|subscriber| subscriber.id != subscriber_id);
            }
            tracing::debug!(
                "[MemoryStore] closed subscription {} for user {}",
                subscriber_id,
                user_key
            );
        });
        (TaskFeed::new(rx), handle)
    }
}

#[async_trait]
impl NoteStore for MemoryStore {
    async fn get_note(&self, user_id: &str, company_name: &str) -> Result<Option<CompanyNote>> {
        let state = self.state.lock().expect("store lock poisoned");
        Ok(state
            .users
            .get(user_id)
            .and_then(|user| user.notes.get(company_name))
            .cloned())
    }

    async fn upsert_note(&self, user_id: &str, company_name: &str, content: &str) -> Result<()> {
        let mut state = self.state.lock().expect("store lock poisoned");
        let updated_at = Self::next_stamp(&mut state);
        let user = state.users.entry(user_id.to_string()).or_default();
        // Merge semantics: only content and updatedAt are written.
        match user.notes.get_mut(company_name) {
            Some(note) => {
                note.content = content.to_string();
                note.updated_at = updated_at;
            }
            None => {
                user.notes.insert(
                    company_name.to_string(),
                    CompanyNote {
                        company_name: company_name.to_string(),
                        content: content.to_string(),
                        updated_at,
                    },
                );
            }
        }
        tracing::debug!(
            "[MemoryStore] saved note for company '{}' of user {}",
            company_name,
            user_id
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobtrack_core::task::{TaskColor, TaskStatus};

    fn document(title: &str, deadline: Option<&str>) -> TaskDocument {
        TaskDocument {
            title: title.to_string(),
            company_name: "Initech".to_string(),
            status: TaskStatus::NotStarted,
            deadline: deadline.map(|d| d.to_string()),
            color: TaskColor::Default,
            completed: false,
        }
    }

    #[tokio::test]
    async fn test_add_assigns_id_and_monotonic_created_at() {
        let store = MemoryStore::new();

        let first = store.add_task("user-1", document("First", None)).await.unwrap();
        let second = store.add_task("user-1", document("Second", None)).await.unwrap();
        assert_ne!(first, second);

        let tasks = store
            .fetch_tasks("user-1", SortOrder::CreatedAtDesc)
            .await
            .unwrap();
        assert_eq!(tasks.len(), 2);
        // Newest first, and stamps strictly increase across rapid inserts.
        assert_eq!(tasks[0].title, "Second");
        assert!(tasks[0].created_at > tasks[1].created_at);
    }

    #[tokio::test]
    async fn test_subscription_receives_initial_and_change_snapshots() {
        let store = MemoryStore::new();
        store.add_task("user-1", document("Existing", None)).await.unwrap();

        let (mut feed, _handle) = store.subscribe_tasks("user-1", SortOrder::CreatedAtDesc);
        let initial = feed.next().await.unwrap();
        assert_eq!(initial.tasks.len(), 1);

        store.add_task("user-1", document("Added", None)).await.unwrap();
        let next = feed.next().await.unwrap();
        assert_eq!(next.tasks.len(), 2);
        assert_eq!(next.order, SortOrder::CreatedAtDesc);
    }

    #[tokio::test]
    async fn test_cancel_releases_listener() {
        let store = MemoryStore::new();
        let (_feed, handle) = store.subscribe_tasks("user-1", SortOrder::CreatedAtDesc);
        assert_eq!(store.subscriber_count("user-1"), 1);

        handle.cancel();
        assert_eq!(store.subscriber_count("user-1"), 0);
    }

    #[tokio::test]
    async fn test_dropped_handle_releases_listener() {
        let store = MemoryStore::new();
        {
            let (_feed, _handle) = store.subscribe_tasks("user-1", SortOrder::CreatedAtDesc);
            assert_eq!(store.subscriber_count("user-1"), 1);
        }
        assert_eq!(store.subscriber_count("user-1"), 0);
    }

    #[tokio::test]
    async fn test_update_missing_task_is_not_found() {
        let store = MemoryStore::new();
        let err = store
            .update_task("user-1", "missing", TaskPatch::completion(true))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent_and_pushes_once() {
        let store = MemoryStore::new();
        let task_id = store.add_task("user-1", document("Doomed", None)).await.unwrap();

        let (mut feed, _handle) = store.subscribe_tasks("user-1", SortOrder::CreatedAtDesc);
        feed.next().await.unwrap(); // initial

        store.delete_task("user-1", &task_id).await.unwrap();
        let after_delete = feed.next().await.unwrap();
        assert!(after_delete.tasks.is_empty());

        // Second delete is a no-op at the store: no error, no snapshot.
        store.delete_task("user-1", &task_id).await.unwrap();
        assert!(feed.try_next().is_none());
    }

    #[tokio::test]
    async fn test_collections_are_scoped_per_user() {
        let store = MemoryStore::new();
        let (mut feed, _handle) = store.subscribe_tasks("user-2", SortOrder::CreatedAtDesc);
        feed.next().await.unwrap(); // initial, empty

        store.add_task("user-1", document("Private", None)).await.unwrap();
        assert!(feed.try_next().is_none());
        assert!(
            store
                .fetch_tasks("user-2", SortOrder::CreatedAtDesc)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_note_upsert_creates_then_updates_in_place() {
        let store = MemoryStore::new();
        assert!(store.get_note("user-1", "Initech").await.unwrap().is_none());

        store.upsert_note("user-1", "Initech", "X").await.unwrap();
        let first = store.get_note("user-1", "Initech").await.unwrap().unwrap();
        assert_eq!(first.content, "X");

        store.upsert_note("user-1", "Initech", "Y").await.unwrap();
        let second = store.get_note("user-1", "Initech").await.unwrap().unwrap();
        assert_eq!(second.content, "Y");
        assert!(second.updated_at > first.updated_at);
    }
}
