//! Property-based tests for serialization.

use proptest::prelude::*;

use minerva_core::{BuiltinFunction, Constant, FloatDisplayMode, NodeRef, NodePool};

use crate::serialize::serialize;

/// A pool-independent description of a small expression tree.
#[derive(Clone, Debug)]
enum Shape {
    Int(i64),
    Sym(u8),
    Pi,
    Add(Vec<Shape>),
    Mul(Vec<Shape>),
    Neg(Box<Shape>),
    Div(Box<Shape>, Box<Shape>),
    Fun(u8, Box<Shape>),
}

fn shape() -> impl Strategy<Value = Shape> {
    let leaf = prop_oneof![
        (-99i64..99).prop_map(Shape::Int),
        prop_oneof![Just(b'x'), Just(b'y'), Just(b'a')].prop_map(Shape::Sym),
        Just(Shape::Pi),
    ];
    leaf.prop_recursive(4, 24, 3, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 2..4).prop_map(Shape::Add),
            prop::collection::vec(inner.clone(), 2..4).prop_map(Shape::Mul),
            inner.clone().prop_map(|t| Shape::Neg(Box::new(t))),
            (inner.clone(), inner.clone())
                .prop_map(|(n, d)| Shape::Div(Box::new(n), Box::new(d))),
            (0u8..3, inner).prop_map(|(f, t)| Shape::Fun(f, Box::new(t))),
        ]
    })
}

fn build(pool: &mut NodePool, shape: &Shape) -> NodeRef {
    match shape {
        Shape::Int(i) => pool.integer(*i),
        Shape::Sym(c) => pool.symbol(*c as char),
        Shape::Pi => pool.constant(Constant::Pi),
        Shape::Add(parts) => {
            let children: Vec<NodeRef> = parts.iter().map(|p| build(pool, p)).collect();
            pool.add(children.as_slice())
        }
        Shape::Mul(parts) => {
            let children: Vec<NodeRef> = parts.iter().map(|p| build(pool, p)).collect();
            pool.mul(children.as_slice())
        }
        Shape::Neg(inner) => {
            let arg = build(pool, inner);
            pool.neg(arg)
        }
        Shape::Div(num, den) => {
            let num = build(pool, num);
            let den = build(pool, den);
            pool.div(num, den)
        }
        Shape::Fun(f, inner) => {
            let kind = match f {
                0 => BuiltinFunction::Sin,
                1 => BuiltinFunction::Sqrt,
                _ => BuiltinFunction::Ln,
            };
            let arg = build(pool, inner);
            pool.function(kind, arg)
        }
    }
}

/// Bytes actually written; the text never contains NUL, so the tail of
/// untouched zeros marks the end.
fn written_len(buffer: &[u8]) -> usize {
    buffer.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn reported_length_survives_truncation(shape in shape()) {
        let mut pool = NodePool::new(4096);
        let root = build(&mut pool, &shape);
        prop_assume!(!root.is_allocation_failure());

        let mut big = vec![0u8; 4096];
        let full = serialize(&pool, root, &mut big, FloatDisplayMode::Decimal, 7);
        prop_assert!(full < big.len());
        let text = std::str::from_utf8(&big[..full]).expect("serializer emits UTF-8");
        prop_assert_eq!(text.len(), full);

        for cut in [0, 1, full / 2, full.saturating_sub(1)] {
            let mut small = vec![0u8; cut];
            let len = serialize(&pool, root, &mut small, FloatDisplayMode::Decimal, 7);
            // Truncation never changes the reported length.
            prop_assert_eq!(len, full);

            // The written bytes are a prefix of the full text that ends
            // on a character boundary.
            let w = written_len(&small);
            prop_assert!(big[..full].starts_with(&small[..w]));
            prop_assert!(text.is_char_boundary(w));
        }
    }
}
