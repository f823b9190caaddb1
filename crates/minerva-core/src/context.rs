//! The symbol-value lookup context.
//!
//! The engine never owns symbol values; it queries an external key→expression
//! store through the [`Context`] trait. Looked-up trees live in the same
//! pool as the querying expression, managed by the embedding application.

use std::hash::BuildHasherDefault;

use hashbrown::HashMap;
use rustc_hash::FxHasher;

use crate::handle::NodeRef;
use crate::node::ExprNode;
use crate::pool::NodePool;
use crate::symbol::SymbolName;

/// An external store resolving symbol names to expressions.
pub trait Context {
    /// Returns the expression bound to `name`, if any.
    fn lookup(&self, name: SymbolName) -> Option<NodeRef>;
}

/// A context with no bindings.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmptyContext;

impl Context for EmptyContext {
    fn lookup(&self, _name: SymbolName) -> Option<NodeRef> {
        None
    }
}

/// An in-memory context backed by a hash map.
#[derive(Debug, Default)]
pub struct MapContext {
    bindings: HashMap<u8, NodeRef, BuildHasherDefault<FxHasher>>,
}

impl MapContext {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name` to `value`, replacing any previous binding.
    pub fn set(&mut self, name: impl Into<SymbolName>, value: NodeRef) {
        self.bindings.insert(name.into().code(), value);
    }

    /// Removes the binding for `name`.
    pub fn unset(&mut self, name: impl Into<SymbolName>) {
        self.bindings.remove(&name.into().code());
    }
}

impl Context for MapContext {
    fn lookup(&self, name: SymbolName) -> Option<NodeRef> {
        self.bindings.get(&name.code()).copied()
    }
}

/// Returns true if the symbol currently resolves to a non-exact value.
///
/// A symbol is approximate when its context binding contains a
/// floating-point leaf anywhere in the tree; unbound symbols are exact.
#[must_use]
pub fn is_approximate(name: SymbolName, pool: &NodePool, ctx: &dyn Context) -> bool {
    match ctx.lookup(name) {
        Some(value) => tree_contains_float(pool, value),
        None => false,
    }
}

fn tree_contains_float(pool: &NodePool, node: NodeRef) -> bool {
    if matches!(pool.get(node), ExprNode::Float(_)) {
        return true;
    }
    pool.get(node)
        .children()
        .iter()
        .any(|&child| tree_contains_float(pool, child))
}
