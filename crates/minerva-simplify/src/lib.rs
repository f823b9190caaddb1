//! # minerva-simplify
//!
//! Reduction engine for Minerva expressions.
//!
//! This crate provides:
//! - `shallow_reduce`: one idempotent canonicalization step per node
//! - `reduce`: the bottom-up driver with a defensive depth cap
//! - Symbol substitution with per-occurrence deep copies
//! - Canonical ordering with cooperative interruption
//!
//! Reduction never changes an expression's mathematical value, only its
//! representation, and a step either fully rewrites a node or leaves it
//! unchanged.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod interrupt;
pub mod order;
pub mod reduce;
pub mod substitute;

#[cfg(test)]
mod proptests;

pub use interrupt::{InterruptFlag, INTERRUPT_POLL_PERIOD};
pub use order::{compare, sort_children};
pub use reduce::{reduce, shallow_reduce, MAX_REDUCTION_DEPTH};
pub use substitute::replace_symbol_with_expression;
