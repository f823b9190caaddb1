//! # minerva-core
//!
//! Core expression engine for the Minerva symbolic calculator.
//!
//! This crate provides:
//! - A fixed-capacity node pool with soft-failure allocation
//! - The closed set of expression node variants
//! - Copyable expression handles
//! - The symbol subsystem with its pinned byte-code table
//! - External context and preference interfaces
//!
//! ## Design principles
//!
//! - **Arena ownership**: nodes live in a pool that bounds their lifetime;
//!   callers hold lightweight handles, never pointers
//! - **Failures as values**: pool exhaustion yields a sentinel node,
//!   never a panic or an error path
//! - **Closed variant set**: every pass dispatches exhaustively over one
//!   enum

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod context;
pub mod handle;
pub mod node;
pub mod pool;
pub mod prefs;
pub mod sign;
pub mod symbol;
pub mod vars;

pub use context::{is_approximate, Context, EmptyContext, MapContext};
pub use handle::NodeRef;
pub use node::{BuiltinFunction, Children, Constant, ExprNode, NodeKind};
pub use pool::{NodePool, DEFAULT_POOL_CAPACITY};
pub use prefs::{AngleUnit, FloatDisplayMode};
pub use sign::{sign, Sign};
pub use symbol::{
    is_matrix_symbol, is_regression_symbol, is_scalar_symbol, is_series_symbol,
    is_variable_symbol, matrix_symbol, text_for_special_symbols, InvalidSymbolCode, SpecialSymbol,
    SymbolName,
};
pub use vars::{get_variables, MAX_VARIABLES};
