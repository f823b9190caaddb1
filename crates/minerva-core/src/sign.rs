//! Static sign classification.
//!
//! Classifies an expression's sign when it is statically determinable,
//! without numeric evaluation. Anything uncertain is `Unknown`.

use crate::handle::NodeRef;
use crate::node::{BuiltinFunction, ExprNode};
use crate::pool::NodePool;

/// The statically known sign of an expression.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Sign {
    /// Strictly positive.
    Positive,
    /// Strictly negative.
    Negative,
    /// Not statically determinable (includes zero).
    Unknown,
}

impl Sign {
    /// Flips positive and negative; `Unknown` stays `Unknown`.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Positive => Self::Negative,
            Self::Negative => Self::Positive,
            Self::Unknown => Self::Unknown,
        }
    }
}

/// Classifies the sign of the expression at `node`.
#[must_use]
pub fn sign(pool: &NodePool, node: NodeRef) -> Sign {
    match pool.get(node) {
        ExprNode::Integer(v) => sign_of_i64(*v),
        ExprNode::Rational(num, _) => sign_of_i64(*num),
        ExprNode::Float(v) => {
            if *v > 0.0 {
                Sign::Positive
            } else if *v < 0.0 {
                Sign::Negative
            } else {
                Sign::Unknown
            }
        }
        ExprNode::Constant(_) => Sign::Positive,
        ExprNode::Neg(arg) => sign(pool, *arg).opposite(),
        ExprNode::Mul(args) => {
            let mut acc = Sign::Positive;
            for &arg in args {
                match sign(pool, arg) {
                    Sign::Unknown => return Sign::Unknown,
                    Sign::Negative => acc = acc.opposite(),
                    Sign::Positive => {}
                }
            }
            acc
        }
        ExprNode::Div { num, den } => match (sign(pool, *num), sign(pool, *den)) {
            (Sign::Unknown, _) | (_, Sign::Unknown) => Sign::Unknown,
            (a, b) if a == b => Sign::Positive,
            _ => Sign::Negative,
        },
        ExprNode::Add(args) => {
            // A sum of same-signed terms keeps that sign.
            let mut it = args.iter();
            let first = it.next().map_or(Sign::Unknown, |&a| sign(pool, a));
            if first == Sign::Unknown {
                return Sign::Unknown;
            }
            for &arg in it {
                if sign(pool, arg) != first {
                    return Sign::Unknown;
                }
            }
            first
        }
        ExprNode::Pow { base, .. } => {
            // A positive base keeps any real power positive.
            if sign(pool, *base) == Sign::Positive {
                Sign::Positive
            } else {
                Sign::Unknown
            }
        }
        ExprNode::Function { kind, .. } => match kind {
            BuiltinFunction::Exp => Sign::Positive,
            _ => Sign::Unknown,
        },
        _ => Sign::Unknown,
    }
}

fn sign_of_i64(v: i64) -> Sign {
    match v.cmp(&0) {
        std::cmp::Ordering::Greater => Sign::Positive,
        std::cmp::Ordering::Less => Sign::Negative,
        std::cmp::Ordering::Equal => Sign::Unknown,
    }
}
