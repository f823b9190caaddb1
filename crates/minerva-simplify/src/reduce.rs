//! Shallow reduction and the bottom-up reduction driver.
//!
//! `shallow_reduce` applies one canonicalization step to a single node,
//! assuming its children are already reduced; `reduce` walks a tree
//! bottom-up and applies the step at every level. A step either rewrites
//! the node in place (so caller handles stay valid) or leaves it
//! untouched, never half-rewritten. Rewrites preserve the expression's
//! mathematical value; only the representation changes.

use minerva_core::{
    is_approximate, AngleUnit, BuiltinFunction, Children, Constant, Context, ExprNode, NodeRef,
    NodePool, Sign, SymbolName,
};

use crate::interrupt::InterruptFlag;
use crate::order::sort_children;

/// Defensive cap on reduction recursion depth.
pub const MAX_REDUCTION_DEPTH: usize = 256;

/// An exact numeric value used during constant folding.
///
/// Arithmetic happens in i128 so that intermediate products cannot
/// overflow; a fold is declined when the final value does not fit back
/// into the node representation.
#[derive(Clone, Copy, Debug)]
struct Exact {
    num: i128,
    den: i128,
}

impl Exact {
    const ZERO: Exact = Exact { num: 0, den: 1 };
    const ONE: Exact = Exact { num: 1, den: 1 };

    fn from_node(node: &ExprNode) -> Option<Exact> {
        match node {
            ExprNode::Integer(i) => Some(Exact {
                num: i128::from(*i),
                den: 1,
            }),
            ExprNode::Rational(n, d) => Some(Exact {
                num: i128::from(*n),
                den: i128::from(*d),
            }),
            _ => None,
        }
    }

    fn is_zero(self) -> bool {
        self.num == 0
    }

    fn add(self, other: Exact) -> Option<Exact> {
        let num = self
            .num
            .checked_mul(other.den)?
            .checked_add(other.num.checked_mul(self.den)?)?;
        let den = self.den.checked_mul(other.den)?;
        Some(Exact { num, den })
    }

    fn mul(self, other: Exact) -> Option<Exact> {
        Some(Exact {
            num: self.num.checked_mul(other.num)?,
            den: self.den.checked_mul(other.den)?,
        })
    }

    fn div(self, other: Exact) -> Option<Exact> {
        if other.num == 0 {
            return None;
        }
        Some(Exact {
            num: self.num.checked_mul(other.den)?,
            den: self.den.checked_mul(other.num)?,
        })
    }

    /// Converts to a node, normalizing sign and common factors.
    /// `None` when the reduced value does not fit in the node payload.
    fn to_node(self) -> Option<ExprNode> {
        let (mut num, mut den) = (self.num, self.den);
        if den < 0 {
            num = num.checked_neg()?;
            den = den.checked_neg()?;
        }
        let g = gcd(num.unsigned_abs(), den.unsigned_abs());
        num /= i128::try_from(g).ok()?;
        den /= i128::try_from(g).ok()?;

        let num = i64::try_from(num).ok()?;
        if den == 1 {
            Some(ExprNode::Integer(num))
        } else {
            Some(ExprNode::Rational(num, u64::try_from(den).ok()?))
        }
    }
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a.max(1)
}

/// Reduces the whole tree at `node` bottom-up.
///
/// Returns the root handle (unchanged; rewrites happen in place), or
/// [`NodeRef::FAILED`] if the sentinel surfaced anywhere in the tree.
/// Past [`MAX_REDUCTION_DEPTH`] or after an interruption the remaining
/// subtree is returned unreduced.
pub fn reduce(
    pool: &mut NodePool,
    node: NodeRef,
    ctx: &dyn Context,
    angle_unit: AngleUnit,
    interrupt: &InterruptFlag,
) -> NodeRef {
    reduce_at_depth(pool, node, ctx, angle_unit, interrupt, 0)
}

fn reduce_at_depth(
    pool: &mut NodePool,
    node: NodeRef,
    ctx: &dyn Context,
    angle_unit: AngleUnit,
    interrupt: &InterruptFlag,
    depth: usize,
) -> NodeRef {
    if node.is_allocation_failure() {
        return NodeRef::FAILED;
    }
    if depth > MAX_REDUCTION_DEPTH || interrupt.is_raised() {
        return node;
    }

    for child in pool.get(node).children() {
        if reduce_at_depth(pool, child, ctx, angle_unit, interrupt, depth + 1)
            .is_allocation_failure()
        {
            return NodeRef::FAILED;
        }
    }

    shallow_reduce(pool, node, ctx, angle_unit, interrupt)
}

/// Applies one canonicalization step to `node`, whose children are
/// assumed already reduced.
///
/// The node is rewritten in place, so the returned handle equals `node`
/// except when the allocation-failure sentinel propagates.
pub fn shallow_reduce(
    pool: &mut NodePool,
    node: NodeRef,
    ctx: &dyn Context,
    angle_unit: AngleUnit,
    interrupt: &InterruptFlag,
) -> NodeRef {
    if node.is_allocation_failure() {
        return NodeRef::FAILED;
    }
    let current = pool.get(node).clone();
    if current
        .children()
        .iter()
        .any(|c| c.is_allocation_failure())
    {
        return NodeRef::FAILED;
    }
    if !matches!(current, ExprNode::Undefined)
        && current
            .children()
            .iter()
            .any(|&c| matches!(pool.get(c), ExprNode::Undefined))
    {
        become_undefined(pool, node);
        return node;
    }

    match current {
        ExprNode::Rational(n, d) => {
            if let Some(normalized) = (Exact {
                num: i128::from(n),
                den: i128::from(d),
            })
            .to_node()
            {
                pool.replace(node, normalized);
            }
        }
        ExprNode::Symbol(name) => reduce_symbol(pool, node, name, ctx),
        ExprNode::Add(args) => reduce_add(pool, node, args, interrupt),
        ExprNode::Mul(args) => reduce_mul(pool, node, args, interrupt),
        ExprNode::Neg(arg) => reduce_neg(pool, node, arg),
        ExprNode::Pow { base, exp } => reduce_pow(pool, node, base, exp),
        ExprNode::Div { num, den } => reduce_div(pool, node, num, den),
        ExprNode::Function { kind, arg } => reduce_function(pool, node, kind, arg, angle_unit),
        _ => {}
    }
    node
}

/// Replaces `node` with `content` taken from `donor`, releasing the donor
/// slot. The donor's children now belong to `node`.
fn collapse_into(pool: &mut NodePool, node: NodeRef, donor: NodeRef) {
    let content = pool.get(donor).clone();
    pool.replace(node, content);
    pool.reclaim(donor);
}

fn become_undefined(pool: &mut NodePool, node: NodeRef) {
    for child in pool.get(node).children() {
        pool.reclaim_tree(child);
    }
    pool.replace(node, ExprNode::Undefined);
}

fn replace_with_literal(pool: &mut NodePool, node: NodeRef, literal: ExprNode) {
    for child in pool.get(node).children() {
        pool.reclaim_tree(child);
    }
    pool.replace(node, literal);
}

fn tree_contains_symbol(pool: &NodePool, node: NodeRef, name: SymbolName) -> bool {
    match pool.get(node) {
        ExprNode::Symbol(n) => *n == name,
        other => other
            .children()
            .iter()
            .any(|&c| tree_contains_symbol(pool, c, name)),
    }
}

/// A symbol bound to an exact value in the context reduces to that value.
///
/// Context values are assumed to be stored in reduced form; the copy is
/// spliced in as-is.
fn reduce_symbol(pool: &mut NodePool, node: NodeRef, name: SymbolName, ctx: &dyn Context) {
    let Some(value) = ctx.lookup(name) else {
        return;
    };
    if value.is_allocation_failure()
        || is_approximate(name, pool, ctx)
        || tree_contains_symbol(pool, value, name)
    {
        return;
    }
    let copy = pool.deep_copy(value);
    if copy.is_allocation_failure() {
        return;
    }
    collapse_into(pool, node, copy);
}

/// Splits reduced children into exact numerics, floats and the rest.
fn partition_numeric(
    pool: &NodePool,
    args: &[NodeRef],
) -> (Vec<(NodeRef, Exact)>, Vec<(NodeRef, f64)>, Children) {
    let mut exact = Vec::new();
    let mut floats = Vec::new();
    let mut others = Children::new();
    for &c in args {
        match pool.get(c) {
            n @ (ExprNode::Integer(_) | ExprNode::Rational(_, _)) => {
                // from_node cannot fail for these variants
                if let Some(v) = Exact::from_node(n) {
                    exact.push((c, v));
                }
            }
            ExprNode::Float(f) => floats.push((c, *f)),
            _ => others.push(c),
        }
    }
    (exact, floats, others)
}

fn reduce_add(pool: &mut NodePool, node: NodeRef, args: Children, interrupt: &InterruptFlag) {
    let flat = flatten(pool, args, true);
    let (exact, floats, mut children) = partition_numeric(pool, &flat);

    // Fold the exact terms into one literal; drop an exact zero.
    let folded = exact
        .iter()
        .try_fold(Exact::ZERO, |acc, &(_, v)| acc.add(v))
        .and_then(Exact::to_node);
    fold_exact_terms(pool, &mut children, &exact, folded, 0);

    fold_floats(pool, &mut children, &floats, sum_floats);

    finish_nary(pool, node, children, interrupt, ExprNode::Add, 0);
}

fn reduce_mul(pool: &mut NodePool, node: NodeRef, args: Children, interrupt: &InterruptFlag) {
    let flat = flatten(pool, args, false);
    let (exact, floats, mut children) = partition_numeric(pool, &flat);

    // An exact zero absorbs the whole product.
    if exact.iter().any(|&(_, v)| v.is_zero()) {
        pool.replace(node, ExprNode::Mul(flat));
        replace_with_literal(pool, node, ExprNode::Integer(0));
        return;
    }

    let folded = exact
        .iter()
        .try_fold(Exact::ONE, |acc, &(_, v)| acc.mul(v))
        .and_then(Exact::to_node);
    fold_exact_terms(pool, &mut children, &exact, folded, 1);

    fold_floats(pool, &mut children, &floats, product_floats);

    finish_nary(pool, node, children, interrupt, ExprNode::Mul, 1);
}

/// Hoists grandchildren of the same associative operator into `args`.
fn flatten(pool: &mut NodePool, args: Children, additive: bool) -> Children {
    let mut flat = Children::new();
    for c in args {
        let nested = match pool.get(c) {
            ExprNode::Add(grand) if additive => Some(grand.clone()),
            ExprNode::Mul(grand) if !additive => Some(grand.clone()),
            _ => None,
        };
        match nested {
            Some(grand) => {
                flat.extend(grand);
                pool.reclaim(c);
            }
            None => flat.push(c),
        }
    }
    flat
}

/// Merges the exact numeric children into one folded literal.
///
/// `folded` is the pre-computed combined value; `None` (overflow) keeps
/// the original literals. The folded literal is allocated before the
/// originals are reclaimed so an exhausted pool declines the fold
/// instead of corrupting the node.
fn fold_exact_terms(
    pool: &mut NodePool,
    children: &mut Children,
    exact: &[(NodeRef, Exact)],
    folded: Option<ExprNode>,
    identity: i64,
) {
    let Some(total) = folded else {
        children.extend(exact.iter().map(|&(h, _)| h));
        return;
    };
    // The operator's identity vanishes from the child list; finish_nary
    // restores it for the empty case.
    let is_identity = total == ExprNode::Integer(identity);
    if exact.len() == 1 && !is_identity {
        children.push(exact[0].0);
        return;
    }
    if is_identity {
        for &(h, _) in exact {
            pool.reclaim(h);
        }
        return;
    }
    let lit = pool.allocate(total);
    if lit.is_allocation_failure() {
        children.extend(exact.iter().map(|&(h, _)| h));
        return;
    }
    for &(h, _) in exact {
        pool.reclaim(h);
    }
    children.push(lit);
}

fn sum_floats(values: &[f64]) -> f64 {
    values.iter().sum()
}

fn product_floats(values: &[f64]) -> f64 {
    values.iter().product()
}

/// Collapses multiple float children into one; a single float is kept
/// as-is so approximateness survives the reduction.
fn fold_floats(
    pool: &mut NodePool,
    children: &mut Children,
    floats: &[(NodeRef, f64)],
    fold: fn(&[f64]) -> f64,
) {
    match floats {
        [] => {}
        [(h, _)] => children.push(*h),
        many => {
            let values: Vec<f64> = many.iter().map(|&(_, v)| v).collect();
            let lit = pool.allocate(ExprNode::Float(fold(&values)));
            if lit.is_allocation_failure() {
                children.extend(many.iter().map(|&(h, _)| h));
            } else {
                for &(h, _) in many {
                    pool.reclaim(h);
                }
                children.push(lit);
            }
        }
    }
}

fn finish_nary(
    pool: &mut NodePool,
    node: NodeRef,
    mut children: Children,
    interrupt: &InterruptFlag,
    make: fn(Children) -> ExprNode,
    identity: i64,
) {
    match children.len() {
        0 => pool.replace(node, ExprNode::Integer(identity)),
        1 => {
            let only = children[0];
            pool.replace(node, make(children));
            collapse_into(pool, node, only);
        }
        _ => {
            if !interrupt.is_raised() {
                sort_children(pool, &mut children, interrupt);
            }
            pool.replace(node, make(children));
        }
    }
}

fn reduce_neg(pool: &mut NodePool, node: NodeRef, arg: NodeRef) {
    match pool.get(arg).clone() {
        ExprNode::Integer(i) => {
            if let Some(v) = i.checked_neg() {
                replace_with_literal(pool, node, ExprNode::Integer(v));
            }
        }
        ExprNode::Rational(n, d) => {
            if let Some(v) = n.checked_neg() {
                replace_with_literal(pool, node, ExprNode::Rational(v, d));
            }
        }
        ExprNode::Float(f) => replace_with_literal(pool, node, ExprNode::Float(-f)),
        ExprNode::Neg(inner) => {
            // -(-x) = x
            collapse_into(pool, node, inner);
            // node now holds the inner content; the outer arg slot is free
            pool.reclaim(arg);
        }
        _ => {}
    }
}

fn reduce_pow(pool: &mut NodePool, node: NodeRef, base: NodeRef, exp: NodeRef) {
    let base_node = pool.get(base).clone();
    let exp_node = pool.get(exp).clone();

    match (&base_node, &exp_node) {
        // x^0 = 1, except 0^0 which is undefined
        (_, ExprNode::Integer(0)) => {
            if base_node.is_zero() {
                become_undefined(pool, node);
            } else {
                replace_with_literal(pool, node, ExprNode::Integer(1));
            }
        }
        // x^1 = x
        (_, ExprNode::Integer(1)) => {
            pool.reclaim(exp);
            let content = pool.get(base).clone();
            pool.replace(node, content);
            pool.reclaim(base);
        }
        // 1^x = 1
        (ExprNode::Integer(1), _) => {
            replace_with_literal(pool, node, ExprNode::Integer(1));
        }
        // 0^x: 0 for provably positive x, undefined for negative x
        (ExprNode::Integer(0), _) => match minerva_core::sign(pool, exp) {
            Sign::Positive => replace_with_literal(pool, node, ExprNode::Integer(0)),
            Sign::Negative => become_undefined(pool, node),
            Sign::Unknown => {}
        },
        // Exact base with integer exponent folds
        (ExprNode::Integer(_) | ExprNode::Rational(_, _), ExprNode::Integer(e)) => {
            let Some(v) = Exact::from_node(&base_node) else {
                return;
            };
            if let Some(folded) = pow_exact(v, *e).and_then(Exact::to_node) {
                replace_with_literal(pool, node, folded);
            }
        }
        // (a^m)^n with integer m, n combines exponents
        (
            ExprNode::Pow {
                base: inner_base,
                exp: inner_exp,
            },
            ExprNode::Integer(n),
        ) => {
            let ExprNode::Integer(m) = pool.get(*inner_exp).clone() else {
                return;
            };
            let Some(combined) = m.checked_mul(*n) else {
                return;
            };
            let (inner_base, inner_exp) = (*inner_base, *inner_exp);
            pool.replace(inner_exp, ExprNode::Integer(combined));
            pool.replace(
                node,
                ExprNode::Pow {
                    base: inner_base,
                    exp: inner_exp,
                },
            );
            pool.reclaim(base);
            pool.reclaim(exp);
        }
        _ => {}
    }
}

/// Exact exponentiation with a bounded integer exponent.
fn pow_exact(base: Exact, exp: i64) -> Option<Exact> {
    if exp.unsigned_abs() > 64 {
        return None;
    }
    let mag = u32::try_from(exp.unsigned_abs()).ok()?;
    let num = base.num.checked_pow(mag)?;
    let den = base.den.checked_pow(mag)?;
    if exp >= 0 {
        Some(Exact { num, den })
    } else if num == 0 {
        None
    } else {
        Some(Exact { num: den, den: num })
    }
}

fn reduce_div(pool: &mut NodePool, node: NodeRef, num: NodeRef, den: NodeRef) {
    let num_node = pool.get(num).clone();
    let den_node = pool.get(den).clone();

    // Division by an exact zero is undefined.
    if den_node.is_zero() {
        become_undefined(pool, node);
        return;
    }
    // x/1 = x
    if den_node.is_one() {
        pool.reclaim(den);
        let content = pool.get(num).clone();
        pool.replace(node, content);
        pool.reclaim(num);
        return;
    }
    // 0/x = 0 for an exact non-zero denominator; a float denominator
    // could be a rounded zero, so it stays symbolic.
    if num_node.is_zero()
        && matches!(den_node, ExprNode::Integer(_) | ExprNode::Rational(_, _))
    {
        replace_with_literal(pool, node, ExprNode::Integer(0));
        return;
    }
    // Exact quotient folds
    if let (Some(a), Some(b)) = (Exact::from_node(&num_node), Exact::from_node(&den_node)) {
        if let Some(folded) = a.div(b).and_then(Exact::to_node) {
            replace_with_literal(pool, node, folded);
        }
    }
}

fn reduce_function(
    pool: &mut NodePool,
    node: NodeRef,
    kind: BuiltinFunction,
    arg: NodeRef,
    angle_unit: AngleUnit,
) {
    let arg_node = pool.get(arg).clone();

    match (kind, &arg_node) {
        (BuiltinFunction::Sin | BuiltinFunction::Tan, ExprNode::Integer(0)) => {
            replace_with_literal(pool, node, ExprNode::Integer(0));
        }
        (BuiltinFunction::Cos | BuiltinFunction::Exp, ExprNode::Integer(0)) => {
            replace_with_literal(pool, node, ExprNode::Integer(1));
        }
        // Pinned values at π, in radian mode only
        (BuiltinFunction::Sin | BuiltinFunction::Tan, ExprNode::Constant(Constant::Pi))
            if angle_unit == AngleUnit::Radian =>
        {
            replace_with_literal(pool, node, ExprNode::Integer(0));
        }
        (BuiltinFunction::Cos, ExprNode::Constant(Constant::Pi))
            if angle_unit == AngleUnit::Radian =>
        {
            replace_with_literal(pool, node, ExprNode::Integer(-1));
        }
        (BuiltinFunction::Ln, ExprNode::Integer(1)) | (BuiltinFunction::Log10, ExprNode::Integer(1)) => {
            replace_with_literal(pool, node, ExprNode::Integer(0));
        }
        (BuiltinFunction::Ln, ExprNode::Constant(Constant::E))
        | (BuiltinFunction::Log10, ExprNode::Integer(10)) => {
            replace_with_literal(pool, node, ExprNode::Integer(1));
        }
        // ln(exp(x)) = x for all real x
        (BuiltinFunction::Ln, ExprNode::Function { kind: BuiltinFunction::Exp, arg: inner }) => {
            let inner = *inner;
            collapse_into(pool, node, inner);
            pool.reclaim(arg);
        }
        // exp(ln(x)) = x only when x is provably positive
        (BuiltinFunction::Exp, ExprNode::Function { kind: BuiltinFunction::Ln, arg: inner }) => {
            let inner = *inner;
            if minerva_core::sign(pool, inner) == Sign::Positive {
                collapse_into(pool, node, inner);
                pool.reclaim(arg);
            }
        }
        (BuiltinFunction::Sqrt, ExprNode::Integer(i)) if *i >= 0 => {
            let root = (*i as f64).sqrt().round() as i64;
            if root.checked_mul(root) == Some(*i) {
                replace_with_literal(pool, node, ExprNode::Integer(root));
            }
        }
        (BuiltinFunction::Abs, ExprNode::Integer(i)) => {
            if let Some(v) = i.checked_abs() {
                replace_with_literal(pool, node, ExprNode::Integer(v));
            }
        }
        (BuiltinFunction::Abs, ExprNode::Rational(n, d)) => {
            if let Some(v) = n.checked_abs() {
                replace_with_literal(pool, node, ExprNode::Rational(v, *d));
            }
        }
        (BuiltinFunction::Abs, ExprNode::Float(f)) => {
            replace_with_literal(pool, node, ExprNode::Float(f.abs()));
        }
        (BuiltinFunction::Abs, _) => match minerva_core::sign(pool, arg) {
            Sign::Positive => {
                collapse_into(pool, node, arg);
            }
            Sign::Negative => {
                // |x| = -x; strip an existing negation instead of
                // stacking a second one.
                if let ExprNode::Neg(inner) = *pool.get(arg) {
                    collapse_into(pool, node, inner);
                    pool.reclaim(arg);
                } else {
                    pool.replace(node, ExprNode::Neg(arg));
                }
            }
            Sign::Unknown => {}
        },
        _ => {}
    }
}
