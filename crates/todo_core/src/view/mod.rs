//! Derived read views over the canonical task sequence.
//!
//! # Responsibility
//! - Reduce a task sequence by category and order it by sort mode.
//! - Keep both stages pure so views are always recomputable.
//!
//! # Invariants
//! - Neither stage mutates its input.
//! - Both stages are stable: ties keep their input order.

pub mod filter;
pub mod sort;
