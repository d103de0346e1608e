//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate task creation, merge and persistence into collection-level APIs.
//! - Keep callers (CLI, dictation hosts) decoupled from storage details.

pub mod collection;
pub mod merge;
