//! Symbol substitution.
//!
//! Rewrites every leaf matching a symbol name with a deep copy of a
//! replacement tree. Each occurrence receives its own copy, so
//! substituted sites never share structure, and copies are never
//! re-visited, so a replacement mentioning the substituted symbol cannot
//! trigger a substitution loop.

use minerva_core::{ExprNode, NodeRef, NodePool, SymbolName};

/// Replaces every occurrence of the symbol `name` in the tree at `node`
/// with a fresh deep copy of `replacement`.
///
/// The tree is rewritten in place where possible; the returned handle is
/// the (possibly new) root. Returns [`NodeRef::FAILED`] if a copy
/// allocation fails, leaving the original tree valid but possibly
/// partially substituted.
pub fn replace_symbol_with_expression(
    pool: &mut NodePool,
    node: NodeRef,
    name: SymbolName,
    replacement: NodeRef,
) -> NodeRef {
    if node.is_allocation_failure() || replacement.is_allocation_failure() {
        return NodeRef::FAILED;
    }

    match pool.get(node).clone() {
        ExprNode::Symbol(n) if n == name => {
            let copy = pool.deep_copy(replacement);
            if copy.is_allocation_failure() {
                return NodeRef::FAILED;
            }
            pool.reclaim(node);
            copy
        }
        n if n.is_atom() => node,
        mut compound => {
            let mut failed = false;
            rewrite_children(&mut compound, |child| {
                let new = replace_symbol_with_expression(pool, child, name, replacement);
                if new.is_allocation_failure() {
                    failed = true;
                    child
                } else {
                    new
                }
            });
            if failed {
                return NodeRef::FAILED;
            }
            pool.replace(node, compound);
            node
        }
    }
}

/// Applies `f` to each child handle of a compound node, in place.
fn rewrite_children(node: &mut ExprNode, mut f: impl FnMut(NodeRef) -> NodeRef) {
    match node {
        ExprNode::Add(args) | ExprNode::Mul(args) => {
            for arg in args.iter_mut() {
                *arg = f(*arg);
            }
        }
        ExprNode::Pow { base, exp } => {
            *base = f(*base);
            *exp = f(*exp);
        }
        ExprNode::Div { num, den } => {
            *num = f(*num);
            *den = f(*den);
        }
        ExprNode::Neg(arg) | ExprNode::Function { arg, .. } => {
            *arg = f(*arg);
        }
        _ => {}
    }
}
