//! Expression node variants.
//!
//! This module defines the closed set of node types stored in the pool.
//! Every engine pass (reduction, approximation, analysis, serialization)
//! dispatches by matching on this enum.

use smallvec::SmallVec;

use crate::handle::NodeRef;
use crate::symbol::SymbolName;

/// Inline child list; most nodes have at most four children.
pub type Children = SmallVec<[NodeRef; 4]>;

/// Named mathematical constants.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Constant {
    /// The circle constant π.
    Pi,
    /// Euler's number e.
    E,
}

/// Built-in unary functions.
///
/// A closed enum rather than an open function table: the engine's variant
/// set is fixed and enumerable, which keeps dispatch exhaustive.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum BuiltinFunction {
    /// Sine.
    Sin,
    /// Cosine.
    Cos,
    /// Tangent.
    Tan,
    /// Natural exponential.
    Exp,
    /// Natural logarithm.
    Ln,
    /// Logarithm base 10.
    Log10,
    /// Square root.
    Sqrt,
    /// Absolute value.
    Abs,
}

impl BuiltinFunction {
    /// Returns the canonical serialized name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Exp => "exp",
            Self::Ln => "ln",
            Self::Log10 => "log",
            Self::Sqrt => "√",
            Self::Abs => "abs",
        }
    }

    /// Returns true for the trigonometric functions, whose argument is
    /// interpreted in the configured angle unit.
    #[must_use]
    pub const fn is_trigonometric(self) -> bool {
        matches!(self, Self::Sin | Self::Cos | Self::Tan)
    }
}

/// The type tag discriminating node variants.
///
/// The declaration order doubles as the rank used by canonical ordering:
/// numbers sort before constants, constants before symbols, leaves before
/// compound nodes.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum NodeKind {
    /// Integer literal.
    Integer,
    /// Rational literal.
    Rational,
    /// Floating-point literal.
    Float,
    /// Named constant.
    Constant,
    /// Symbol leaf.
    Symbol,
    /// Built-in function application.
    Function,
    /// Power.
    Pow,
    /// Negation.
    Neg,
    /// Division.
    Div,
    /// Product.
    Mul,
    /// Sum.
    Add,
    /// Undefined result (e.g. division by zero).
    Undefined,
    /// The allocation-failed sentinel.
    AllocationFailed,
}

/// An expression node stored in the pool.
#[derive(Clone, PartialEq, Debug)]
pub enum ExprNode {
    // === Leaves ===
    /// A 64-bit integer literal.
    Integer(i64),

    /// A rational number (numerator, denominator).
    ///
    /// Invariant: denominator > 0, gcd(|num|, den) == 1.
    Rational(i64, u64),

    /// A floating-point literal. Marks the tree as approximate.
    Float(f64),

    /// A named mathematical constant.
    Constant(Constant),

    /// A symbolic variable with a one-byte name.
    Symbol(SymbolName),

    // === Compound nodes ===
    /// Sum of expressions: a + b + c + ...
    ///
    /// Invariant: at least 2 children once reduced.
    Add(Children),

    /// Product of expressions: a * b * c * ...
    ///
    /// Invariant: at least 2 children once reduced.
    Mul(Children),

    /// Power expression: base^exp.
    Pow {
        /// The base of the power.
        base: NodeRef,
        /// The exponent.
        exp: NodeRef,
    },

    /// Negation: -expr.
    Neg(NodeRef),

    /// Division: numerator / denominator.
    Div {
        /// The numerator.
        num: NodeRef,
        /// The denominator.
        den: NodeRef,
    },

    /// A built-in function application: f(arg).
    Function {
        /// The function.
        kind: BuiltinFunction,
        /// The argument.
        arg: NodeRef,
    },

    // === Sentinels ===
    /// An undefined value. Produced by reduction for expressions with no
    /// defined result; approximates to NaN.
    Undefined,

    /// The allocation-failed sentinel. Lives only in slot 0 of a pool.
    AllocationFailed,
}

impl ExprNode {
    /// Returns the type tag of this node.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        match self {
            ExprNode::Integer(_) => NodeKind::Integer,
            ExprNode::Rational(_, _) => NodeKind::Rational,
            ExprNode::Float(_) => NodeKind::Float,
            ExprNode::Constant(_) => NodeKind::Constant,
            ExprNode::Symbol(_) => NodeKind::Symbol,
            ExprNode::Add(_) => NodeKind::Add,
            ExprNode::Mul(_) => NodeKind::Mul,
            ExprNode::Pow { .. } => NodeKind::Pow,
            ExprNode::Neg(_) => NodeKind::Neg,
            ExprNode::Div { .. } => NodeKind::Div,
            ExprNode::Function { .. } => NodeKind::Function,
            ExprNode::Undefined => NodeKind::Undefined,
            ExprNode::AllocationFailed => NodeKind::AllocationFailed,
        }
    }

    /// Returns true if this node is a leaf (no children).
    #[must_use]
    pub fn is_atom(&self) -> bool {
        matches!(
            self,
            ExprNode::Integer(_)
                | ExprNode::Rational(_, _)
                | ExprNode::Float(_)
                | ExprNode::Constant(_)
                | ExprNode::Symbol(_)
                | ExprNode::Undefined
                | ExprNode::AllocationFailed
        )
    }

    /// Returns true if this node is a numeric literal.
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(
            self,
            ExprNode::Integer(_) | ExprNode::Rational(_, _) | ExprNode::Float(_)
        )
    }

    /// Returns true if this is the integer zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        matches!(self, ExprNode::Integer(0))
    }

    /// Returns true if this is the integer one.
    #[must_use]
    pub fn is_one(&self) -> bool {
        matches!(self, ExprNode::Integer(1))
    }

    /// Returns the number of children, fixed at construction.
    #[must_use]
    pub fn number_of_children(&self) -> usize {
        match self {
            n if n.is_atom() => 0,
            ExprNode::Add(args) | ExprNode::Mul(args) => args.len(),
            ExprNode::Pow { .. } | ExprNode::Div { .. } => 2,
            ExprNode::Neg(_) | ExprNode::Function { .. } => 1,
            _ => unreachable!(),
        }
    }

    /// Returns the children of this node.
    #[must_use]
    pub fn children(&self) -> Children {
        match self {
            n if n.is_atom() => Children::new(),
            ExprNode::Add(args) | ExprNode::Mul(args) => args.clone(),
            ExprNode::Pow { base, exp } => smallvec::smallvec![*base, *exp],
            ExprNode::Div { num, den } => smallvec::smallvec![*num, *den],
            ExprNode::Neg(arg) | ExprNode::Function { arg, .. } => {
                smallvec::smallvec![*arg]
            }
            _ => unreachable!(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_atom() {
        assert!(ExprNode::Integer(42).is_atom());
        assert!(ExprNode::Symbol(SymbolName(b'x')).is_atom());
        assert!(ExprNode::AllocationFailed.is_atom());
        assert!(!ExprNode::Neg(NodeRef::new(1)).is_atom());
    }

    #[test]
    fn test_is_zero_one() {
        assert!(ExprNode::Integer(0).is_zero());
        assert!(!ExprNode::Integer(1).is_zero());
        assert!(ExprNode::Integer(1).is_one());
        assert!(!ExprNode::Rational(1, 2).is_one());
    }

    #[test]
    fn test_child_count_matches_children() {
        let pow = ExprNode::Pow {
            base: NodeRef::new(1),
            exp: NodeRef::new(2),
        };
        assert_eq!(pow.number_of_children(), pow.children().len());

        let sum = ExprNode::Add(smallvec::smallvec![
            NodeRef::new(1),
            NodeRef::new(2),
            NodeRef::new(3)
        ]);
        assert_eq!(sum.number_of_children(), 3);
    }

    #[test]
    fn test_kind_rank_orders_leaves_first() {
        assert!(NodeKind::Integer < NodeKind::Symbol);
        assert!(NodeKind::Symbol < NodeKind::Pow);
        assert!(NodeKind::Pow < NodeKind::Add);
    }
}
