//! Two-dimensional display layouts.
//!
//! [`create_layout`] renders a tree into a [`LayoutNode`], a structural
//! description a display front end can measure and draw. Divisions
//! become stacked fractions and exponents become superscripts; every
//! other construct flattens into rows of text.

use minerva_core::{
    text_for_special_symbols, Constant, ExprNode, FloatDisplayMode, NodeRef, NodePool,
};

use crate::float_format::format_float;

/// A node of a display layout tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutNode {
    /// A run of text drawn on the baseline.
    Text(String),
    /// Horizontal juxtaposition of child layouts.
    Row(Vec<LayoutNode>),
    /// A numerator stacked over a denominator with a bar between.
    Fraction {
        /// Layout above the bar.
        num: Box<LayoutNode>,
        /// Layout below the bar.
        den: Box<LayoutNode>,
    },
    /// A base with a raised exponent.
    Superscript {
        /// Baseline layout.
        base: Box<LayoutNode>,
        /// Raised layout.
        exponent: Box<LayoutNode>,
    },
    /// A layout wrapped in visible parentheses.
    Parenthesized(Box<LayoutNode>),
}

impl LayoutNode {
    fn text(s: impl Into<String>) -> Self {
        LayoutNode::Text(s.into())
    }
}

/// Builds the display layout for the tree at `node`.
///
/// Floats render through the same formatter as textual serialization,
/// with the given mode and digit count.
#[must_use]
pub fn create_layout(
    pool: &NodePool,
    node: NodeRef,
    float_mode: FloatDisplayMode,
    significant_digits: usize,
) -> LayoutNode {
    layout_node(pool, node, float_mode, significant_digits, 0)
}

/// Binding strength used to decide parenthesization, mirroring the
/// textual serializer.
fn precedence(node: &ExprNode) -> u8 {
    match node {
        ExprNode::Add(_) => 1,
        ExprNode::Neg(_) => 2,
        ExprNode::Mul(_) => 3,
        // A stacked fraction visually groups its operands.
        ExprNode::Div { .. } => 5,
        ExprNode::Pow { .. } => 4,
        _ => 5,
    }
}

fn layout_node(
    pool: &NodePool,
    node: NodeRef,
    float_mode: FloatDisplayMode,
    digits: usize,
    parent_precedence: u8,
) -> LayoutNode {
    let n = pool.get(node);
    let own = precedence(n);

    let inner = match n {
        ExprNode::Integer(i) => LayoutNode::text(i.to_string()),
        ExprNode::Rational(num, den) => LayoutNode::Fraction {
            num: Box::new(LayoutNode::text(num.to_string())),
            den: Box::new(LayoutNode::text(den.to_string())),
        },
        ExprNode::Float(f) => LayoutNode::text(format_float(*f, float_mode, digits)),
        ExprNode::Constant(Constant::Pi) => LayoutNode::text("π"),
        ExprNode::Constant(Constant::E) => LayoutNode::text("e"),
        ExprNode::Symbol(name) => match text_for_special_symbols(*name) {
            Some(token) => LayoutNode::text(token),
            None => LayoutNode::text(char::from(name.code()).to_string()),
        },
        ExprNode::Add(args) => {
            let mut row = Vec::with_capacity(2 * args.len());
            for (i, &arg) in args.iter().enumerate() {
                if let ExprNode::Neg(neg_arg) = pool.get(arg) {
                    row.push(LayoutNode::text("-"));
                    row.push(layout_node(pool, *neg_arg, float_mode, digits, own + 1));
                } else {
                    if i > 0 {
                        row.push(LayoutNode::text("+"));
                    }
                    row.push(layout_node(pool, arg, float_mode, digits, own));
                }
            }
            LayoutNode::Row(row)
        }
        ExprNode::Mul(args) => {
            let mut row = Vec::with_capacity(2 * args.len());
            for (i, &arg) in args.iter().enumerate() {
                if i > 0 {
                    row.push(LayoutNode::text("·"));
                }
                row.push(layout_node(pool, arg, float_mode, digits, own));
            }
            LayoutNode::Row(row)
        }
        ExprNode::Pow { base, exp } => LayoutNode::Superscript {
            base: Box::new(layout_node(pool, *base, float_mode, digits, own + 1)),
            exponent: Box::new(layout_node(pool, *exp, float_mode, digits, 0)),
        },
        ExprNode::Neg(arg) => LayoutNode::Row(vec![
            LayoutNode::text("-"),
            layout_node(pool, *arg, float_mode, digits, own + 1),
        ]),
        ExprNode::Div { num, den } => LayoutNode::Fraction {
            num: Box::new(layout_node(pool, *num, float_mode, digits, 0)),
            den: Box::new(layout_node(pool, *den, float_mode, digits, 0)),
        },
        ExprNode::Function { kind, arg } => LayoutNode::Row(vec![
            LayoutNode::text(kind.name()),
            LayoutNode::Parenthesized(Box::new(layout_node(pool, *arg, float_mode, digits, 0))),
        ]),
        ExprNode::Undefined => LayoutNode::text("undef"),
        ExprNode::AllocationFailed => LayoutNode::Row(Vec::new()),
    };

    if own < parent_precedence {
        LayoutNode::Parenthesized(Box::new(inner))
    } else {
        inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minerva_core::BuiltinFunction;

    fn layout(pool: &NodePool, node: NodeRef) -> LayoutNode {
        create_layout(pool, node, FloatDisplayMode::Decimal, 7)
    }

    #[test]
    fn test_atoms_are_text() {
        let mut pool = NodePool::new(16);
        let five = pool.integer(5);
        assert_eq!(layout(&pool, five), LayoutNode::Text("5".to_string()));

        let x = pool.symbol('x');
        assert_eq!(layout(&pool, x), LayoutNode::Text("x".to_string()));
    }

    #[test]
    fn test_rational_stacks_as_fraction() {
        let mut pool = NodePool::new(16);
        let half = pool.rational(1, 2);
        assert_eq!(
            layout(&pool, half),
            LayoutNode::Fraction {
                num: Box::new(LayoutNode::Text("1".to_string())),
                den: Box::new(LayoutNode::Text("2".to_string())),
            }
        );
    }

    #[test]
    fn test_division_stacks_as_fraction() {
        let mut pool = NodePool::new(32);
        let x = pool.symbol('x');
        let one = pool.integer(1);
        let sum = pool.add([x, one].as_slice());
        let two = pool.integer(2);
        let q = pool.div(two, sum);

        match layout(&pool, q) {
            LayoutNode::Fraction { num, den } => {
                assert_eq!(*num, LayoutNode::Text("2".to_string()));
                // Fraction operands never need their own parentheses.
                assert!(matches!(*den, LayoutNode::Row(_)));
            }
            other => panic!("expected a fraction, got {other:?}"),
        }
    }

    #[test]
    fn test_power_is_superscript() {
        let mut pool = NodePool::new(16);
        let x = pool.symbol('x');
        let two = pool.integer(2);
        let p = pool.pow(x, two);
        assert_eq!(
            layout(&pool, p),
            LayoutNode::Superscript {
                base: Box::new(LayoutNode::Text("x".to_string())),
                exponent: Box::new(LayoutNode::Text("2".to_string())),
            }
        );
    }

    #[test]
    fn test_compound_base_is_parenthesized() {
        let mut pool = NodePool::new(32);
        let x = pool.symbol('x');
        let one = pool.integer(1);
        let sum = pool.add([x, one].as_slice());
        let two = pool.integer(2);
        let p = pool.pow(sum, two);

        match layout(&pool, p) {
            LayoutNode::Superscript { base, .. } => {
                assert!(matches!(*base, LayoutNode::Parenthesized(_)));
            }
            other => panic!("expected a superscript, got {other:?}"),
        }
    }

    #[test]
    fn test_function_wraps_argument() {
        let mut pool = NodePool::new(16);
        let x = pool.symbol('x');
        let s = pool.function(BuiltinFunction::Sin, x);
        assert_eq!(
            layout(&pool, s),
            LayoutNode::Row(vec![
                LayoutNode::Text("sin".to_string()),
                LayoutNode::Parenthesized(Box::new(LayoutNode::Text("x".to_string()))),
            ])
        );
    }

    #[test]
    fn test_negated_sum_term() {
        let mut pool = NodePool::new(32);
        let x = pool.symbol('x');
        let y = pool.symbol('y');
        let ny = pool.neg(y);
        let sum = pool.add([x, ny].as_slice());
        assert_eq!(
            layout(&pool, sum),
            LayoutNode::Row(vec![
                LayoutNode::Text("x".to_string()),
                LayoutNode::Text("-".to_string()),
                LayoutNode::Text("y".to_string()),
            ])
        );
    }
}
