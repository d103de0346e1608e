//! Persistence collaborators for the canonical task sequence.
//!
//! # Responsibility
//! - Define the load/save contract the collection depends on.
//! - Provide in-memory, JSON blob and SQLite implementations.
//!
//! # Invariants
//! - Stores persist whole sequences; order is part of the stored state.
//! - Loads return raw records; coercion happens once in `TaskRecord::into_task`.

pub mod json_store;
pub mod sqlite_store;
pub mod task_store;
