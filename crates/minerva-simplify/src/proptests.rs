//! Property-based tests for reduction and substitution.

use proptest::prelude::*;

use minerva_core::{AngleUnit, BuiltinFunction, EmptyContext, NodeRef, NodePool, SymbolName};

use crate::interrupt::InterruptFlag;
use crate::reduce::reduce;
use crate::substitute::replace_symbol_with_expression;

/// A pool-independent description of a small expression tree.
#[derive(Clone, Debug)]
enum TreeSpec {
    Int(i64),
    Rat(i64, i64),
    Sym(u8),
    Add(Vec<TreeSpec>),
    Mul(Vec<TreeSpec>),
    Neg(Box<TreeSpec>),
    Pow(Box<TreeSpec>, i64),
    Fun(u8, Box<TreeSpec>),
}

fn tree_spec() -> impl Strategy<Value = TreeSpec> {
    let leaf = prop_oneof![
        (-50i64..50).prop_map(TreeSpec::Int),
        ((-20i64..20), (1i64..20)).prop_map(|(n, d)| TreeSpec::Rat(n, d)),
        prop_oneof![Just(b'x'), Just(b'y'), Just(b'z')].prop_map(TreeSpec::Sym),
    ];
    leaf.prop_recursive(4, 24, 3, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 2..4).prop_map(TreeSpec::Add),
            prop::collection::vec(inner.clone(), 2..4).prop_map(TreeSpec::Mul),
            inner.clone().prop_map(|t| TreeSpec::Neg(Box::new(t))),
            (inner.clone(), 0i64..4).prop_map(|(t, e)| TreeSpec::Pow(Box::new(t), e)),
            (0u8..4, inner).prop_map(|(f, t)| TreeSpec::Fun(f, Box::new(t))),
        ]
    })
}

fn build(pool: &mut NodePool, spec: &TreeSpec) -> NodeRef {
    match spec {
        TreeSpec::Int(i) => pool.integer(*i),
        TreeSpec::Rat(n, d) => pool.rational(*n, *d),
        TreeSpec::Sym(c) => pool.symbol(*c as char),
        TreeSpec::Add(parts) => {
            let children: Vec<NodeRef> = parts.iter().map(|p| build(pool, p)).collect();
            pool.add(children.as_slice())
        }
        TreeSpec::Mul(parts) => {
            let children: Vec<NodeRef> = parts.iter().map(|p| build(pool, p)).collect();
            pool.mul(children.as_slice())
        }
        TreeSpec::Neg(inner) => {
            let arg = build(pool, inner);
            pool.neg(arg)
        }
        TreeSpec::Pow(base, e) => {
            let b = build(pool, base);
            let exp = pool.integer(*e);
            pool.pow(b, exp)
        }
        TreeSpec::Fun(f, inner) => {
            let kind = match f {
                0 => BuiltinFunction::Sin,
                1 => BuiltinFunction::Exp,
                2 => BuiltinFunction::Ln,
                _ => BuiltinFunction::Abs,
            };
            let arg = build(pool, inner);
            pool.function(kind, arg)
        }
    }
}

/// Structural snapshot of a tree, independent of slot indices.
fn snapshot(pool: &NodePool, node: NodeRef) -> String {
    use minerva_core::ExprNode;
    let n = pool.get(node);
    let head = match n {
        ExprNode::Integer(i) => format!("int:{i}"),
        ExprNode::Rational(a, b) => format!("rat:{a}/{b}"),
        ExprNode::Float(f) => format!("float:{f}"),
        ExprNode::Constant(c) => format!("const:{c:?}"),
        ExprNode::Symbol(s) => format!("sym:{}", s.code()),
        ExprNode::Add(_) => "add".to_string(),
        ExprNode::Mul(_) => "mul".to_string(),
        ExprNode::Pow { .. } => "pow".to_string(),
        ExprNode::Neg(_) => "neg".to_string(),
        ExprNode::Div { .. } => "div".to_string(),
        ExprNode::Function { kind, .. } => format!("fn:{}", kind.name()),
        ExprNode::Undefined => "undef".to_string(),
        ExprNode::AllocationFailed => "failed".to_string(),
    };
    let children: Vec<String> = n.children().iter().map(|&c| snapshot(pool, c)).collect();
    if children.is_empty() {
        head
    } else {
        format!("{head}({})", children.join(","))
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn reduction_is_idempotent(spec in tree_spec()) {
        let mut pool = NodePool::new(4096);
        let flag = InterruptFlag::new();
        let root = build(&mut pool, &spec);
        prop_assume!(!root.is_allocation_failure());

        let first = reduce(&mut pool, root, &EmptyContext, AngleUnit::Radian, &flag);
        prop_assume!(!first.is_allocation_failure());
        let after_first = pool.get(first).clone();
        let after_snapshot = snapshot(&pool, first);

        let second = reduce(&mut pool, first, &EmptyContext, AngleUnit::Radian, &flag);
        prop_assert_eq!(second, first);
        prop_assert_eq!(pool.get(second).clone(), after_first);
        prop_assert_eq!(snapshot(&pool, second), after_snapshot);
    }

    #[test]
    fn substitution_removes_every_occurrence(spec in tree_spec()) {
        let mut pool = NodePool::new(8192);
        let root = build(&mut pool, &spec);
        prop_assume!(!root.is_allocation_failure());

        let value = pool.integer(7);
        let result =
            replace_symbol_with_expression(&mut pool, root, SymbolName(b'x'), value);
        prop_assume!(!result.is_allocation_failure());

        let mut vars = Vec::new();
        let count =
            minerva_core::get_variables(&pool, result, |c| c == b'x', &mut vars);
        prop_assert_eq!(count, 0);
    }
}
