//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record and its closed-set labels.
//! - Own the single ingress coercion step for externally supplied records.
//!
//! # Invariants
//! - Every task is identified by a stable, opaque `TaskId`.
//! - `category` and `priority` are always members of their closed sets.
//! - External data (store load, import) enters only through `record::TaskRecord`.

pub mod record;
pub mod task;
