//! # minerva-approx
//!
//! Numeric evaluation of Minerva expression trees.
//!
//! One generic algorithm serves both precisions: [`approximate`] is
//! parametrized over [`num_traits::Float`] and instantiated as
//! [`approximate_single`] (f32) and [`approximate_double`] (f64).
//! Domain errors propagate as NaN or infinity through the tree, IEEE-754
//! style; nothing here returns an error.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use num_traits::Float;

use minerva_core::{
    AngleUnit, BuiltinFunction, Constant, Context, ExprNode, NodeRef, NodePool,
};

/// Defensive cap on evaluation recursion depth; deeper trees evaluate
/// to NaN.
pub const MAX_APPROXIMATION_DEPTH: usize = 256;

/// Evaluates the tree at `node` to a floating value of type `T`.
///
/// Symbols resolve through `ctx`; unresolved symbols, the
/// allocation-failed sentinel and undefined nodes all evaluate to NaN.
/// Trigonometric arguments are interpreted in `angle_unit`.
pub fn approximate<T: Float>(
    pool: &NodePool,
    node: NodeRef,
    ctx: &dyn Context,
    angle_unit: AngleUnit,
) -> T {
    approximate_at_depth(pool, node, ctx, angle_unit, 0)
}

/// Single-precision entry point.
pub fn approximate_single(
    pool: &NodePool,
    node: NodeRef,
    ctx: &dyn Context,
    angle_unit: AngleUnit,
) -> f32 {
    approximate(pool, node, ctx, angle_unit)
}

/// Double-precision entry point.
pub fn approximate_double(
    pool: &NodePool,
    node: NodeRef,
    ctx: &dyn Context,
    angle_unit: AngleUnit,
) -> f64 {
    approximate(pool, node, ctx, angle_unit)
}

fn approximate_at_depth<T: Float>(
    pool: &NodePool,
    node: NodeRef,
    ctx: &dyn Context,
    angle_unit: AngleUnit,
    depth: usize,
) -> T {
    if depth > MAX_APPROXIMATION_DEPTH {
        return T::nan();
    }
    let value = |child| approximate_at_depth::<T>(pool, child, ctx, angle_unit, depth + 1);

    match pool.get(node) {
        ExprNode::Integer(i) => from_f64(*i as f64),
        ExprNode::Rational(num, den) => from_f64::<T>(*num as f64) / from_f64::<T>(*den as f64),
        ExprNode::Float(f) => from_f64(*f),
        ExprNode::Constant(Constant::Pi) => from_f64(std::f64::consts::PI),
        ExprNode::Constant(Constant::E) => from_f64(std::f64::consts::E),
        ExprNode::Symbol(name) => match ctx.lookup(*name) {
            Some(bound) if bound != node => value(bound),
            _ => T::nan(),
        },
        ExprNode::Add(args) => args.iter().fold(T::zero(), |acc, &a| acc + value(a)),
        ExprNode::Mul(args) => args.iter().fold(T::one(), |acc, &a| acc * value(a)),
        ExprNode::Pow { base, exp } => {
            let b = value(*base);
            // Integer exponents use powi for exactness on negative bases
            if let ExprNode::Integer(e) = pool.get(*exp) {
                if let Ok(e) = i32::try_from(*e) {
                    return b.powi(e);
                }
            }
            b.powf(value(*exp))
        }
        ExprNode::Neg(arg) => -value(*arg),
        ExprNode::Div { num, den } => value(*num) / value(*den),
        ExprNode::Function { kind, arg } => {
            let x = value(*arg);
            match kind {
                BuiltinFunction::Sin => to_radians(x, angle_unit).sin(),
                BuiltinFunction::Cos => to_radians(x, angle_unit).cos(),
                BuiltinFunction::Tan => to_radians(x, angle_unit).tan(),
                BuiltinFunction::Exp => x.exp(),
                BuiltinFunction::Ln => x.ln(),
                BuiltinFunction::Log10 => x.log10(),
                BuiltinFunction::Sqrt => x.sqrt(),
                BuiltinFunction::Abs => x.abs(),
            }
        }
        ExprNode::Undefined | ExprNode::AllocationFailed => T::nan(),
    }
}

fn from_f64<T: Float>(v: f64) -> T {
    T::from(v).unwrap_or_else(T::nan)
}

fn to_radians<T: Float>(x: T, angle_unit: AngleUnit) -> T {
    x * from_f64(angle_unit.to_radians_factor())
}

/// Heuristic plotting-domain width for the expression at `node`.
///
/// Constants span nothing, a bare symbol gets a default window, and a
/// trigonometric node spans one period in the current angle unit; other
/// nodes report the widest range among their children. NaN means no
/// useful hint; binding cycles in the context hit the depth cap and
/// report NaN.
#[must_use]
pub fn characteristic_x_range(
    pool: &NodePool,
    node: NodeRef,
    ctx: &dyn Context,
    angle_unit: AngleUnit,
) -> f32 {
    range_at_depth(pool, node, ctx, angle_unit, 0)
}

fn range_at_depth(
    pool: &NodePool,
    node: NodeRef,
    ctx: &dyn Context,
    angle_unit: AngleUnit,
    depth: usize,
) -> f32 {
    const DEFAULT_SYMBOL_RANGE: f32 = 10.0;

    if depth > MAX_APPROXIMATION_DEPTH {
        return f32::NAN;
    }
    match pool.get(node) {
        n if n.is_number() => 0.0,
        ExprNode::Constant(_) => 0.0,
        ExprNode::Symbol(name) => match ctx.lookup(*name) {
            Some(bound) if bound != node => {
                range_at_depth(pool, bound, ctx, angle_unit, depth + 1)
            }
            _ => DEFAULT_SYMBOL_RANGE,
        },
        ExprNode::Function { kind, .. } if kind.is_trigonometric() => {
            angle_unit.period() as f32
        }
        other => other
            .children()
            .iter()
            .map(|&c| range_at_depth(pool, c, ctx, angle_unit, depth + 1))
            .fold(0.0, f32::max),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minerva_core::{EmptyContext, MapContext};

    fn eval_f64(pool: &NodePool, node: NodeRef) -> f64 {
        approximate_double(pool, node, &EmptyContext, AngleUnit::Radian)
    }

    #[test]
    fn test_rational_evaluation() {
        let mut pool = NodePool::new(16);
        let q = pool.rational(1, 4);
        assert_eq!(eval_f64(&pool, q), 0.25);
    }

    #[test]
    fn test_single_and_double_agree() {
        let mut pool = NodePool::new(16);
        let q = pool.rational(1, 4);
        let single = approximate_single(&pool, q, &EmptyContext, AngleUnit::Radian);
        let double = approximate_double(&pool, q, &EmptyContext, AngleUnit::Radian);
        assert!((f64::from(single) - double).abs() <= f64::from(f32::EPSILON));
    }

    #[test]
    fn test_arithmetic_tree() {
        let mut pool = NodePool::new(32);
        let two = pool.integer(2);
        let three = pool.integer(3);
        let x2 = pool.pow(two, three);
        let five = pool.integer(5);
        let sum = pool.add([x2, five].as_slice());
        assert_eq!(eval_f64(&pool, sum), 13.0);
    }

    #[test]
    fn test_symbol_resolution() {
        let mut pool = NodePool::new(16);
        let mut ctx = MapContext::new();
        let half = pool.rational(1, 2);
        ctx.set('a', half);

        let a = pool.symbol('a');
        let v: f64 = approximate(&pool, a, &ctx, AngleUnit::Radian);
        assert_eq!(v, 0.5);

        let b = pool.symbol('b');
        let unbound: f64 = approximate(&pool, b, &ctx, AngleUnit::Radian);
        assert!(unbound.is_nan());
    }

    #[test]
    fn test_domain_errors_are_nan() {
        let mut pool = NodePool::new(32);
        let minus_one = pool.integer(-1);
        let l = pool.function(BuiltinFunction::Ln, minus_one);
        assert!(eval_f64(&pool, l).is_nan());

        let minus_four = pool.integer(-4);
        let r = pool.function(BuiltinFunction::Sqrt, minus_four);
        assert!(eval_f64(&pool, r).is_nan());
    }

    #[test]
    fn test_division_by_zero_is_infinite() {
        let mut pool = NodePool::new(16);
        let one = pool.integer(1);
        let zero = pool.integer(0);
        let q = pool.div(one, zero);
        assert!(eval_f64(&pool, q).is_infinite());
    }

    #[test]
    fn test_angle_units() {
        let mut pool = NodePool::new(32);
        let ninety = pool.integer(90);
        let s = pool.function(BuiltinFunction::Sin, ninety);
        let degrees = approximate_double(&pool, s, &EmptyContext, AngleUnit::Degree);
        assert!((degrees - 1.0).abs() < 1e-12);

        let hundred = pool.integer(100);
        let s2 = pool.function(BuiltinFunction::Sin, hundred);
        let gradians = approximate_double(&pool, s2, &EmptyContext, AngleUnit::Gradian);
        assert!((gradians - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_constants() {
        let mut pool = NodePool::new(16);
        let pi = pool.constant(Constant::Pi);
        assert!((eval_f64(&pool, pi) - std::f64::consts::PI).abs() < 1e-15);
    }

    #[test]
    fn test_sentinel_evaluates_to_nan() {
        let pool = NodePool::new(4);
        assert!(eval_f64(&pool, NodeRef::FAILED).is_nan());
    }

    #[test]
    fn test_characteristic_range() {
        let mut pool = NodePool::new(32);
        let five = pool.integer(5);
        assert_eq!(
            characteristic_x_range(&pool, five, &EmptyContext, AngleUnit::Radian),
            0.0
        );

        let x = pool.symbol('x');
        let s = pool.function(BuiltinFunction::Sin, x);
        let range = characteristic_x_range(&pool, s, &EmptyContext, AngleUnit::Radian);
        assert!((f64::from(range) - 2.0 * std::f64::consts::PI).abs() < 1e-6);

        let x = pool.symbol('x');
        let s = pool.function(BuiltinFunction::Sin, x);
        let range = characteristic_x_range(&pool, s, &EmptyContext, AngleUnit::Degree);
        assert!((range - 360.0).abs() < 1e-6);
    }

    #[test]
    fn test_characteristic_range_with_cyclic_bindings() {
        let mut pool = NodePool::new(16);
        let mut ctx = MapContext::new();
        let a = pool.symbol('a');
        let b = pool.symbol('b');
        ctx.set('a', b);
        ctx.set('b', a);

        let range = characteristic_x_range(&pool, a, &ctx, AngleUnit::Radian);
        assert!(range.is_nan());
    }
}
