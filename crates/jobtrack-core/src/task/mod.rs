//! Task domain module.
//!
//! This module contains the task entity, the color palette, the sort
//! orders, and the store contract the synchronization layer consumes.
//!
//! # Module Structure
//!
//! - `model`: Core task domain models (`Task`, `TaskStatus`, `SortOrder`, ...)
//! - `color`: The closed color-tag palette with light/dark display pairs
//! - `store`: Document-store boundary (trait, patches, live-query types)

pub mod color;
mod model;
pub mod store;

pub use color::{ColorPair, PALETTE, TaskColor};
pub use model::{NewTask, SortOrder, Task, TaskStatus, TaskUpdate};
pub use store::{
    DeadlinePatch, SubscriptionHandle, TaskDocument, TaskFeed, TaskPatch, TaskSnapshot, TaskStore,
    encode_deadline,
};
