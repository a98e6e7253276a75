//! Task synchronization and mutation service.
//!
//! This is the live counterpart of the task list view: it owns at most one
//! store subscription for its user and exposes the four mutation
//! operations. Mutations are fire-and-forget relative to the consumer —
//! none of them confirms the new state locally, correctness is
//! re-established by the next pushed snapshot.

use std::sync::{Arc, Mutex};

use jobtrack_core::UserSession;
use jobtrack_core::error::Result;
use jobtrack_core::task::{
    NewTask, SortOrder, SubscriptionHandle, Task, TaskDocument, TaskFeed, TaskPatch, TaskStore,
    TaskUpdate,
};

use crate::report::{ErrorSink, LogErrorSink};

/// Maintains a live, ordered view of one user's tasks and writes mutations
/// through to the document store.
pub struct TaskService {
    store: Arc<dyn TaskStore>,
    session: UserSession,
    errors: Arc<dyn ErrorSink>,
    subscription: Mutex<Option<SubscriptionHandle>>,
}

impl TaskService {
    /// Creates a service for a signed-in user, logging mutation failures.
    pub fn new(store: Arc<dyn TaskStore>, session: UserSession) -> Self {
        Self::with_error_sink(store, session, Arc::new(LogErrorSink))
    }

    /// Creates a service with a custom failure sink.
    pub fn with_error_sink(
        store: Arc<dyn TaskStore>,
        session: UserSession,
        errors: Arc<dyn ErrorSink>,
    ) -> Self {
        Self {
            store,
            session,
            errors,
            subscription: Mutex::new(None),
        }
    }

    /// Opens a live query over the user's tasks, ordered per `order`.
    ///
    /// Any subscription previously opened through this service is cancelled
    /// first, so one consumer never holds two live listeners. The old feed
    /// stops receiving snapshots from that point on.
    pub fn subscribe(&self, order: SortOrder) -> TaskFeed {
        if let Some(previous) = self.take_subscription() {
            tracing::debug!(
                "[TaskService] replacing subscription for user {}",
                self.session.user_id
            );
            previous.cancel();
        }
        let (feed, handle) = self.store.subscribe_tasks(&self.session.user_id, order);
        *self
            .subscription
            .lock()
            .expect("subscription slot poisoned") = Some(handle);
        feed
    }

    /// Cancels the current subscription, if any. Part of session teardown.
    pub fn detach(&self) {
        if let Some(handle) = self.take_subscription() {
            handle.cancel();
        }
    }

    /// Persists a new task with `completed = false` and a canonicalized
    /// deadline.
    ///
    /// An empty or whitespace-only title is silently ignored: the operation
    /// is not attempted and no error is surfaced, matching the original
    /// guard. The created task is observed through the next snapshot.
    pub async fn add_task(&self, new_task: NewTask) -> Result<()> {
        if new_task.title.trim().is_empty() {
            tracing::debug!("[TaskService] ignoring add_task with empty title");
            return Ok(());
        }
        let document = TaskDocument::from(new_task);
        let result = self
            .store
            .add_task(&self.session.user_id, document)
            .await
            .map(|_task_id| ());
        self.report("add_task", result)
    }

    /// Rewrites a task's editable fields; the completion flag is untouched.
    pub async fn update_task(&self, task_id: &str, update: TaskUpdate) -> Result<()> {
        let result = self
            .store
            .update_task(&self.session.user_id, task_id, TaskPatch::from(update))
            .await;
        self.report("update_task", result)
    }

    /// Removes a task. Deleting an already-deleted id is a no-op.
    pub async fn delete_task(&self, task_id: &str) -> Result<()> {
        let result = self.store.delete_task(&self.session.user_id, task_id).await;
        self.report("delete_task", result)
    }

    /// Flips the completion flag based on the caller-supplied snapshot.
    ///
    /// The negation is computed from `task.completed` as the caller saw it,
    /// not from a server-side read. Two rapid toggles issued from the same
    /// stale snapshot therefore both write the same value and the flag
    /// lands back where it started — last write wins, no transaction.
    pub async fn toggle_complete(&self, task: &Task) -> Result<()> {
        let result = self
            .store
            .update_task(
                &self.session.user_id,
                &task.id,
                TaskPatch::completion(!task.completed),
            )
            .await;
        self.report("toggle_complete", result)
    }

    fn take_subscription(&self) -> Option<SubscriptionHandle> {
        self.subscription
            .lock()
            .expect("subscription slot poisoned")
            .take()
    }

    /// Routes a failed mutation through the sink, once, before returning it.
    fn report<T>(&self, operation: &'static str, result: Result<T>) -> Result<T> {
        if let Err(error) = &result {
            self.errors.mutation_failed(operation, error);
        }
        result
    }
}

impl Drop for TaskService {
    fn drop(&mut self) {
        self.detach();
    }
}
