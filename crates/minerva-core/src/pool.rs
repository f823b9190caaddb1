//! Fixed-capacity node pool.
//!
//! All expression nodes live in one pool. Allocation draws from a free
//! list, reclamation pushes back onto it, and exhaustion hands out the
//! shared allocation-failed sentinel instead of failing the caller.
//! The pool is single-writer; nothing here is thread-safe.

use crate::handle::NodeRef;
use crate::node::{BuiltinFunction, Children, Constant, ExprNode};
use crate::symbol::SymbolName;

/// Default pool capacity, sized for calculator-scale expressions.
pub const DEFAULT_POOL_CAPACITY: usize = 4096;

/// One storage slot in the pool.
#[derive(Debug)]
enum Slot {
    /// A live node.
    Occupied(ExprNode),
    /// A reclaimed slot, linking to the next free slot.
    Free(Option<u32>),
}

/// The fixed-capacity arena owning all node storage.
///
/// Slot 0 permanently holds [`ExprNode::AllocationFailed`] and does not
/// count against capacity, so [`NodeRef::FAILED`] dereferences safely in
/// every pool.
#[derive(Debug)]
pub struct NodePool {
    slots: Vec<Slot>,
    free_head: Option<u32>,
    capacity: usize,
    live: usize,
}

impl Default for NodePool {
    fn default() -> Self {
        Self::new(DEFAULT_POOL_CAPACITY)
    }
}

impl NodePool {
    /// Creates a pool that can hold up to `capacity` live nodes.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity + 1);
        slots.push(Slot::Occupied(ExprNode::AllocationFailed));
        Self {
            slots,
            free_head: None,
            capacity,
            live: 0,
        }
    }

    /// Returns the maximum number of live nodes.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of live nodes (excluding the sentinel).
    #[must_use]
    pub fn len(&self) -> usize {
        self.live
    }

    /// Returns true if no nodes are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Allocates storage for `node`, returning its handle.
    ///
    /// On exhaustion returns [`NodeRef::FAILED`]; callers must check the
    /// sentinel before trusting a node-producing operation.
    pub fn allocate(&mut self, node: ExprNode) -> NodeRef {
        if let Some(index) = self.free_head {
            let Slot::Free(next) = self.slots[index as usize] else {
                // Free-list heads always point at free slots.
                return NodeRef::FAILED;
            };
            self.free_head = next;
            self.slots[index as usize] = Slot::Occupied(node);
            self.live += 1;
            return NodeRef::new(index);
        }

        if self.live >= self.capacity {
            return NodeRef::FAILED;
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot::Occupied(node));
        self.live += 1;
        NodeRef::new(index)
    }

    /// Returns the node behind `handle`.
    ///
    /// The sentinel handle resolves to [`ExprNode::AllocationFailed`];
    /// reclaimed handles resolve to [`ExprNode::Undefined`] rather than
    /// exposing stale payload.
    #[must_use]
    pub fn get(&self, handle: NodeRef) -> &ExprNode {
        match self.slots.get(handle.index() as usize) {
            Some(Slot::Occupied(node)) => node,
            _ => &ExprNode::Undefined,
        }
    }

    /// Rewrites the node behind `handle` in place.
    ///
    /// Used by reduction for all-or-nothing node replacement. Writing to
    /// the sentinel or a reclaimed slot is a no-op.
    pub fn replace(&mut self, handle: NodeRef, node: ExprNode) {
        if handle.is_allocation_failure() {
            return;
        }
        if let Some(slot @ Slot::Occupied(_)) = self.slots.get_mut(handle.index() as usize) {
            *slot = Slot::Occupied(node);
        }
    }

    /// Returns one slot to the free list.
    ///
    /// The node's children are untouched; use [`NodePool::reclaim_tree`]
    /// to release a whole subtree. Reclaiming the sentinel is a no-op.
    pub fn reclaim(&mut self, handle: NodeRef) {
        if handle.is_allocation_failure() {
            return;
        }
        let index = handle.index() as usize;
        if let Some(slot @ Slot::Occupied(_)) = self.slots.get_mut(index) {
            *slot = Slot::Free(self.free_head);
            self.free_head = Some(handle.index());
            self.live -= 1;
        }
    }

    /// Releases a subtree, children first.
    pub fn reclaim_tree(&mut self, handle: NodeRef) {
        if handle.is_allocation_failure() {
            return;
        }
        for child in self.get(handle).children() {
            self.reclaim_tree(child);
        }
        self.reclaim(handle);
    }

    /// Structurally copies the subtree at `handle`.
    ///
    /// Returns the sentinel if any copy allocation fails.
    pub fn deep_copy(&mut self, handle: NodeRef) -> NodeRef {
        if handle.is_allocation_failure() {
            return NodeRef::FAILED;
        }
        let node = self.get(handle).clone();
        let copied = match node {
            n if n.is_atom() => n,
            ExprNode::Add(args) => {
                let args = self.copy_children(&args);
                ExprNode::Add(args)
            }
            ExprNode::Mul(args) => {
                let args = self.copy_children(&args);
                ExprNode::Mul(args)
            }
            ExprNode::Pow { base, exp } => ExprNode::Pow {
                base: self.deep_copy(base),
                exp: self.deep_copy(exp),
            },
            ExprNode::Div { num, den } => ExprNode::Div {
                num: self.deep_copy(num),
                den: self.deep_copy(den),
            },
            ExprNode::Neg(arg) => ExprNode::Neg(self.deep_copy(arg)),
            ExprNode::Function { kind, arg } => ExprNode::Function {
                kind,
                arg: self.deep_copy(arg),
            },
            _ => unreachable!(),
        };
        if copied.children().iter().any(|c| c.is_allocation_failure()) {
            return NodeRef::FAILED;
        }
        self.allocate(copied)
    }

    fn copy_children(&mut self, args: &[NodeRef]) -> Children {
        args.iter().map(|&c| self.deep_copy(c)).collect()
    }

    // === Convenience constructors ===

    /// Creates an integer literal.
    pub fn integer(&mut self, value: i64) -> NodeRef {
        self.allocate(ExprNode::Integer(value))
    }

    /// Creates a rational literal, normalizing sign and common factors.
    ///
    /// A zero denominator, or a value whose normalized form does not fit
    /// the node payload, yields [`ExprNode::Undefined`].
    pub fn rational(&mut self, num: i64, den: i64) -> NodeRef {
        let node = normalize_rational(num, den).unwrap_or(ExprNode::Undefined);
        self.allocate(node)
    }

    /// Creates a floating-point literal.
    pub fn float(&mut self, value: f64) -> NodeRef {
        self.allocate(ExprNode::Float(value))
    }

    /// Creates a named constant.
    pub fn constant(&mut self, c: Constant) -> NodeRef {
        self.allocate(ExprNode::Constant(c))
    }

    /// Creates a symbol leaf.
    pub fn symbol(&mut self, name: impl Into<SymbolName>) -> NodeRef {
        self.allocate(ExprNode::Symbol(name.into()))
    }

    /// Creates a sum. A single argument is returned as-is.
    pub fn add(&mut self, args: impl Into<Children>) -> NodeRef {
        let args = args.into();
        match args.len() {
            0 => self.integer(0),
            1 => args[0],
            _ => self.allocate(ExprNode::Add(args)),
        }
    }

    /// Creates a product. A single argument is returned as-is.
    pub fn mul(&mut self, args: impl Into<Children>) -> NodeRef {
        let args = args.into();
        match args.len() {
            0 => self.integer(1),
            1 => args[0],
            _ => self.allocate(ExprNode::Mul(args)),
        }
    }

    /// Creates a power expression.
    pub fn pow(&mut self, base: NodeRef, exp: NodeRef) -> NodeRef {
        self.allocate(ExprNode::Pow { base, exp })
    }

    /// Creates a negation.
    pub fn neg(&mut self, arg: NodeRef) -> NodeRef {
        self.allocate(ExprNode::Neg(arg))
    }

    /// Creates a division.
    pub fn div(&mut self, num: NodeRef, den: NodeRef) -> NodeRef {
        self.allocate(ExprNode::Div { num, den })
    }

    /// Creates a function application.
    pub fn function(&mut self, kind: BuiltinFunction, arg: NodeRef) -> NodeRef {
        self.allocate(ExprNode::Function { kind, arg })
    }
}

/// Sign and gcd normalization, in i128 so that extreme inputs such as a
/// denominator of `i64::MIN` cannot overflow on negation. `None` when
/// the denominator is zero or the normalized value does not fit the
/// node payload.
fn normalize_rational(num: i64, den: i64) -> Option<ExprNode> {
    if den == 0 {
        return None;
    }
    let (mut num, mut den) = (i128::from(num), i128::from(den));
    if den < 0 {
        num = -num;
        den = -den;
    }
    let g = i128::try_from(gcd(num.unsigned_abs(), den.unsigned_abs())).ok()?;
    num /= g;
    den /= g;
    let num = i64::try_from(num).ok()?;
    if den == 1 {
        Some(ExprNode::Integer(num))
    } else {
        Some(ExprNode::Rational(num, u64::try_from(den).ok()?))
    }
}

/// Greatest common divisor; gcd(0, n) == n.
fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a.max(1)
}
