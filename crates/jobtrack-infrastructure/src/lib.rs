//! Infrastructure layer for JobTrack.
//!
//! Provides the in-memory document store implementing the core store
//! traits with live-query push semantics. The application layer only
//! depends on the traits, so a remote document database client can be
//! substituted without touching the synchronization logic.

pub mod memory_store;

pub use memory_store::MemoryStore;
