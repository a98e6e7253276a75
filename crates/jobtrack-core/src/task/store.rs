//! Task store trait and subscription types.
//!
//! Defines the contract consumed from the document store: per-document
//! writes plus a subscribe-to-query primitive that pushes the full current
//! result set on every change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use super::color::TaskColor;
use super::model::{NewTask, SortOrder, Task, TaskStatus, TaskUpdate};
use crate::error::Result;

/// The payload persisted for a new task document.
///
/// The store assigns `id` and `createdAt` on write; everything else is
/// supplied by the caller, with the deadline already canonicalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDocument {
    pub title: String,
    pub company_name: String,
    pub status: TaskStatus,
    pub deadline: Option<String>,
    pub color: TaskColor,
    pub completed: bool,
}

impl From<NewTask> for TaskDocument {
    fn from(new_task: NewTask) -> Self {
        Self {
            title: new_task.title,
            company_name: new_task.company_name,
            status: new_task.status,
            deadline: encode_deadline(new_task.deadline),
            color: new_task.color,
            completed: false,
        }
    }
}

/// A deadline write inside a partial update.
///
/// Distinguishes "write null" from "leave the stored value untouched":
/// a patch without a deadline entry does not touch the field at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeadlinePatch {
    /// Write the given timestamp, canonicalized to RFC3339.
    Set(DateTime<Utc>),
    /// Write an explicit null (no deadline).
    Clear,
}

impl DeadlinePatch {
    /// Builds a patch entry from an optional timestamp.
    pub fn from_option(deadline: Option<DateTime<Utc>>) -> Self {
        match deadline {
            Some(dt) => Self::Set(dt),
            None => Self::Clear,
        }
    }

    /// The canonical stored representation of this write.
    pub fn stored(&self) -> Option<String> {
        match self {
            Self::Set(dt) => Some(dt.to_rfc3339()),
            Self::Clear => None,
        }
    }
}

/// A partial task write: only the populated fields are written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub company_name: Option<String>,
    pub status: Option<TaskStatus>,
    pub deadline: Option<DeadlinePatch>,
    pub color: Option<TaskColor>,
    pub completed: Option<bool>,
}

impl TaskPatch {
    /// A patch that flips only the completion flag.
    pub fn completion(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Self::default()
        }
    }
}

impl From<TaskUpdate> for TaskPatch {
    fn from(update: TaskUpdate) -> Self {
        Self {
            title: Some(update.title),
            company_name: Some(update.company_name),
            status: Some(update.status),
            deadline: Some(DeadlinePatch::from_option(update.deadline)),
            color: Some(update.color),
            completed: None,
        }
    }
}

/// Canonicalizes an optional deadline to its stored representation.
pub fn encode_deadline(deadline: Option<DateTime<Utc>>) -> Option<String> {
    deadline.map(|dt| dt.to_rfc3339())
}

/// One full result-set push from a live query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSnapshot {
    /// The order the emitting subscription was opened with.
    pub order: SortOrder,
    /// The complete current task list, sorted per `order`.
    pub tasks: Vec<Task>,
}

/// The receiving end of a live task query.
///
/// Snapshots arrive in the order the store applies changes. The feed ends
/// (yields `None`) once the subscription is cancelled and the buffered
/// snapshots are drained.
#[derive(Debug)]
pub struct TaskFeed {
    rx: mpsc::UnboundedReceiver<TaskSnapshot>,
}

impl TaskFeed {
    /// Wraps a snapshot channel receiver.
    pub fn new(rx: mpsc::UnboundedReceiver<TaskSnapshot>) -> Self {
        Self { rx }
    }

    /// Waits for the next snapshot.
    pub async fn next(&mut self) -> Option<TaskSnapshot> {
        self.rx.recv().await
    }

    /// Returns a buffered snapshot without waiting, if one is available.
    pub fn try_next(&mut self) -> Option<TaskSnapshot> {
        self.rx.try_recv().ok()
    }
}

/// Cancels a live subscription when dropped or explicitly cancelled.
///
/// The underlying listener is released exactly once; consumers must always
/// pair a subscribe with this handle's teardown, otherwise the store keeps
/// pushing snapshots for a detached consumer.
pub struct SubscriptionHandle {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl SubscriptionHandle {
    /// Creates a handle from the store's unsubscribe closure.
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Cancels the subscription now.
    pub fn cancel(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for SubscriptionHandle {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for SubscriptionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriptionHandle")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

/// An abstract per-user task collection in the document store.
///
/// This trait defines the contract for the external document database,
/// decoupling the mutation layer from the concrete backend (in-memory
/// store, cloud document database, ...).
///
/// # Implementation Notes
///
/// Implementations must:
/// - Scope every operation to the given user's collection
/// - Assign `id` and a monotonically increasing `createdAt` on add
/// - Push a fresh, ordered snapshot to every live subscriber of the user's
///   collection after each applied write
#[async_trait::async_trait]
pub trait TaskStore: Send + Sync {
    /// Persists a new task document.
    ///
    /// # Returns
    ///
    /// - `Ok(task_id)`: The store-assigned document id
    /// - `Err(_)`: Error occurred during the write
    async fn add_task(&self, user_id: &str, document: TaskDocument) -> Result<String>;

    /// Applies a partial update to an existing document.
    ///
    /// # Returns
    ///
    /// - `Ok(())`: Patch applied
    /// - `Err(_)`: The document does not exist, or the write failed
    async fn update_task(&self, user_id: &str, task_id: &str, patch: TaskPatch) -> Result<()>;

    /// Removes a document. Deleting an id that is already gone is a no-op.
    async fn delete_task(&self, user_id: &str, task_id: &str) -> Result<()>;

    /// One-shot read of the user's current task list, sorted per `order`.
    async fn fetch_tasks(&self, user_id: &str, order: SortOrder) -> Result<Vec<Task>>;

    /// Opens a live query over the user's task collection.
    ///
    /// The current result set is pushed immediately, then again after every
    /// applied change. The returned handle releases the listener.
    fn subscribe_tasks(&self, user_id: &str, order: SortOrder) -> (TaskFeed, SubscriptionHandle);
}
