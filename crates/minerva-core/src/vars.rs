//! Free-variable collection.

use crate::handle::NodeRef;
use crate::node::ExprNode;
use crate::pool::NodePool;

/// Maximum number of distinct variables reported by [`get_variables`].
pub const MAX_VARIABLES: usize = 6;

/// Collects the free symbol names in the tree that satisfy `predicate`.
///
/// Names are appended to `out` in first-occurrence order, without
/// duplicates. Returns the number of names collected, or -1 if more than
/// [`MAX_VARIABLES`] distinct names match.
pub fn get_variables(
    pool: &NodePool,
    node: NodeRef,
    predicate: fn(u8) -> bool,
    out: &mut Vec<u8>,
) -> i32 {
    let start = out.len();
    if collect(pool, node, predicate, out, start) {
        (out.len() - start) as i32
    } else {
        out.truncate(start);
        -1
    }
}

fn collect(
    pool: &NodePool,
    node: NodeRef,
    predicate: fn(u8) -> bool,
    out: &mut Vec<u8>,
    start: usize,
) -> bool {
    match pool.get(node) {
        ExprNode::Symbol(name) => {
            let code = name.code();
            // Only this call's region counts toward the limit; entries
            // already in `out` belong to the caller.
            if predicate(code) && !out[start..].contains(&code) {
                if out.len() - start >= MAX_VARIABLES {
                    return false;
                }
                out.push(code);
            }
            true
        }
        other => other
            .children()
            .iter()
            .all(|&child| collect(pool, child, predicate, out, start)),
    }
}
