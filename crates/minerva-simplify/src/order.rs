//! Canonical expression ordering.
//!
//! A total order over trees used to sort the children of commutative
//! nodes into canonical form: leaves before compound nodes (by kind
//! rank), then payload, then children lexicographically. The comparison
//! polls the interruption flag periodically; once interrupted it answers
//! `Equal`, which makes the enclosing sort leave the remaining elements
//! where they are.

use std::cmp::Ordering;

use minerva_core::{Constant, ExprNode, NodeRef, NodePool};

use crate::interrupt::{InterruptFlag, INTERRUPT_POLL_PERIOD};

/// Compares two trees in canonical order.
#[must_use]
pub fn compare(pool: &NodePool, a: NodeRef, b: NodeRef, interrupt: &InterruptFlag) -> Ordering {
    let mut visits = 0;
    compare_inner(pool, a, b, interrupt, &mut visits)
}

fn compare_inner(
    pool: &NodePool,
    a: NodeRef,
    b: NodeRef,
    interrupt: &InterruptFlag,
    visits: &mut u32,
) -> Ordering {
    *visits += 1;
    if *visits % INTERRUPT_POLL_PERIOD == 0 && interrupt.is_raised() {
        return Ordering::Equal;
    }

    let na = pool.get(a);
    let nb = pool.get(b);

    let by_kind = na.kind().cmp(&nb.kind());
    if by_kind != Ordering::Equal {
        return by_kind;
    }

    match (na, nb) {
        (ExprNode::Integer(x), ExprNode::Integer(y)) => x.cmp(y),
        (ExprNode::Rational(xn, xd), ExprNode::Rational(yn, yd)) => {
            // Cross-multiply in i128; denominators are positive.
            let lhs = i128::from(*xn) * i128::from(*yd);
            let rhs = i128::from(*yn) * i128::from(*xd);
            lhs.cmp(&rhs)
        }
        (ExprNode::Float(x), ExprNode::Float(y)) => x.total_cmp(y),
        (ExprNode::Constant(x), ExprNode::Constant(y)) => constant_rank(*x).cmp(&constant_rank(*y)),
        (ExprNode::Symbol(x), ExprNode::Symbol(y)) => x.code().cmp(&y.code()),
        (ExprNode::Function { kind: ka, .. }, ExprNode::Function { kind: kb, .. })
            if ka != kb =>
        {
            ka.name().cmp(kb.name())
        }
        _ => {
            let ca = na.children();
            let cb = nb.children();
            for (&x, &y) in ca.iter().zip(cb.iter()) {
                let ord = compare_inner(pool, x, y, interrupt, visits);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            ca.len().cmp(&cb.len())
        }
    }
}

fn constant_rank(c: Constant) -> u8 {
    match c {
        Constant::Pi => 0,
        Constant::E => 1,
    }
}

/// Sorts `children` into canonical order.
///
/// Insertion sort keeps the sort robust against the comparator going
/// constant after an interruption; already-placed elements stay put.
pub fn sort_children(pool: &NodePool, children: &mut [NodeRef], interrupt: &InterruptFlag) {
    for i in 1..children.len() {
        let mut j = i;
        while j > 0 && compare(pool, children[j - 1], children[j], interrupt) == Ordering::Greater {
            children.swap(j - 1, j);
            j -= 1;
        }
        if interrupt.is_raised() {
            return;
        }
    }
}
