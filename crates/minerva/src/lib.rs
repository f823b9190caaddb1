//! # Minerva
//!
//! A pool-based symbolic expression engine.
//!
//! Expressions live in a fixed-capacity [`core::NodePool`]; every tree
//! is reachable through a stable [`core::NodeRef`] and allocation
//! failure surfaces as an in-band sentinel node instead of a panic.
//!
//! The workspace splits by concern:
//!
//! - **Core**: node pool, expression variants, the symbol subsystem
//! - **Simplify**: canonical ordering, substitution, shallow reduction
//!   with cooperative interruption
//! - **Poly**: polynomial degree and coefficient extraction
//! - **Approx**: generic single/double precision evaluation
//! - **Layout**: bounded serialization and display-layout construction
//! - **Regression**: the curve-model family for data fitting
//!
//! ## Quick Start
//!
//! ```rust
//! use minerva::prelude::*;
//!
//! let mut pool = NodePool::new(256);
//! let x = pool.symbol('x');
//! let zero = pool.integer(0);
//! let s = pool.function(BuiltinFunction::Sin, zero);
//! let sum = pool.add([x, s].as_slice());
//!
//! let flag = InterruptFlag::new();
//! let reduced = reduce(&mut pool, sum, &EmptyContext, AngleUnit::Radian, &flag);
//! assert_eq!(*pool.get(reduced), ExprNode::Symbol('x'.into()));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use minerva_approx as approx;
pub use minerva_core as core;
pub use minerva_layout as layout;
pub use minerva_poly as poly;
pub use minerva_regression as regression;
pub use minerva_simplify as simplify;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use minerva_approx::{approximate_double, approximate_single};
    pub use minerva_core::{
        AngleUnit, BuiltinFunction, Constant, Context, EmptyContext, ExprNode,
        FloatDisplayMode, MapContext, NodePool, NodeRef, SpecialSymbol, SymbolName,
    };
    pub use minerva_layout::{create_layout, serialize, LayoutNode};
    pub use minerva_poly::{polynomial_coefficients, polynomial_degree};
    pub use minerva_regression::Model;
    pub use minerva_simplify::{reduce, replace_symbol_with_expression, InterruptFlag};
}
