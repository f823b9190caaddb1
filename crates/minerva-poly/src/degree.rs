//! Polynomial degree analysis.

use minerva_core::{ExprNode, NodeRef, NodePool, SymbolName};

/// Sentinel returned when an expression is not polynomial in the symbol.
pub const NOT_POLYNOMIAL: i32 = -1;

/// Degrees above this are treated as non-polynomial; the engine targets
/// calculator-sized polynomials.
pub const MAX_POLYNOMIAL_DEGREE: i32 = 8;

/// Returns the degree of the expression at `node` as a polynomial in
/// `symbol`.
///
/// Returns 0 when the symbol does not occur, and [`NOT_POLYNOMIAL`] when
/// it occurs in a non-polynomial position: a denominator, an exponent,
/// or a function argument.
#[must_use]
pub fn polynomial_degree(pool: &NodePool, node: NodeRef, symbol: SymbolName) -> i32 {
    let degree = degree_inner(pool, node, symbol);
    if degree > MAX_POLYNOMIAL_DEGREE {
        NOT_POLYNOMIAL
    } else {
        degree
    }
}

fn degree_inner(pool: &NodePool, node: NodeRef, symbol: SymbolName) -> i32 {
    if node.is_allocation_failure() {
        return NOT_POLYNOMIAL;
    }
    match pool.get(node) {
        ExprNode::Symbol(name) => i32::from(*name == symbol),
        n if n.is_atom() => 0,
        ExprNode::Add(args) => {
            let mut degree = 0;
            for &arg in args {
                let d = degree_inner(pool, arg, symbol);
                if d == NOT_POLYNOMIAL {
                    return NOT_POLYNOMIAL;
                }
                degree = degree.max(d);
            }
            degree
        }
        ExprNode::Mul(args) => {
            let mut degree = 0;
            for &arg in args {
                let d = degree_inner(pool, arg, symbol);
                if d == NOT_POLYNOMIAL {
                    return NOT_POLYNOMIAL;
                }
                degree += d;
            }
            degree
        }
        ExprNode::Neg(arg) => degree_inner(pool, *arg, symbol),
        ExprNode::Pow { base, exp } => {
            if contains_symbol(pool, *exp, symbol) {
                return NOT_POLYNOMIAL;
            }
            let ExprNode::Integer(k) = pool.get(*exp) else {
                // Non-integer exponent: polynomial only if the base is
                // free of the symbol.
                return if contains_symbol(pool, *base, symbol) {
                    NOT_POLYNOMIAL
                } else {
                    0
                };
            };
            let base_degree = degree_inner(pool, *base, symbol);
            if base_degree == NOT_POLYNOMIAL {
                return NOT_POLYNOMIAL;
            }
            if base_degree == 0 {
                // Symbol-free base: any integer exponent stays constant.
                return 0;
            }
            if *k < 0 {
                return NOT_POLYNOMIAL;
            }
            match i32::try_from(*k) {
                Ok(k) if k <= MAX_POLYNOMIAL_DEGREE => base_degree.saturating_mul(k),
                _ => NOT_POLYNOMIAL,
            }
        }
        ExprNode::Div { num, den } => {
            if contains_symbol(pool, *den, symbol) {
                return NOT_POLYNOMIAL;
            }
            degree_inner(pool, *num, symbol)
        }
        ExprNode::Function { arg, .. } => {
            if contains_symbol(pool, *arg, symbol) {
                NOT_POLYNOMIAL
            } else {
                0
            }
        }
        _ => 0,
    }
}

/// Returns true if `symbol` occurs anywhere in the tree.
pub(crate) fn contains_symbol(pool: &NodePool, node: NodeRef, symbol: SymbolName) -> bool {
    match pool.get(node) {
        ExprNode::Symbol(name) => *name == symbol,
        other => other
            .children()
            .iter()
            .any(|&c| contains_symbol(pool, c, symbol)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const X: SymbolName = SymbolName(b'x');

    #[test]
    fn test_symbol_is_degree_one() {
        let mut pool = NodePool::new(16);
        let x = pool.symbol('x');
        assert_eq!(polynomial_degree(&pool, x, X), 1);
    }

    #[test]
    fn test_constant_and_unrelated_symbol_are_degree_zero() {
        let mut pool = NodePool::new(16);
        let five = pool.integer(5);
        let y = pool.symbol('y');
        assert_eq!(polynomial_degree(&pool, five, X), 0);
        assert_eq!(polynomial_degree(&pool, y, X), 0);
    }

    #[test]
    fn test_reciprocal_is_not_polynomial() {
        let mut pool = NodePool::new(16);
        let one = pool.integer(1);
        let x = pool.symbol('x');
        let inv = pool.div(one, x);
        assert_eq!(polynomial_degree(&pool, inv, X), NOT_POLYNOMIAL);
    }

    #[test]
    fn test_quadratic() {
        let mut pool = NodePool::new(32);
        let x = pool.symbol('x');
        let two = pool.integer(2);
        let x2 = pool.pow(x, two);
        let a = pool.symbol('a');
        let prod = pool.mul([a, x2].as_slice());
        assert_eq!(polynomial_degree(&pool, prod, X), 2);
    }

    #[test]
    fn test_symbol_in_exponent_is_not_polynomial() {
        let mut pool = NodePool::new(16);
        let two = pool.integer(2);
        let x = pool.symbol('x');
        let p = pool.pow(two, x);
        assert_eq!(polynomial_degree(&pool, p, X), NOT_POLYNOMIAL);
    }

    #[test]
    fn test_symbol_in_function_is_not_polynomial() {
        let mut pool = NodePool::new(16);
        let x = pool.symbol('x');
        let s = pool.function(minerva_core::BuiltinFunction::Sin, x);
        assert_eq!(polynomial_degree(&pool, s, X), NOT_POLYNOMIAL);

        let y = pool.symbol('y');
        let sy = pool.function(minerva_core::BuiltinFunction::Sin, y);
        assert_eq!(polynomial_degree(&pool, sy, X), 0);
    }

    #[test]
    fn test_degree_cap() {
        let mut pool = NodePool::new(32);
        let x = pool.symbol('x');
        let nine = pool.integer(9);
        let p = pool.pow(x, nine);
        assert_eq!(polynomial_degree(&pool, p, X), NOT_POLYNOMIAL);

        let x = pool.symbol('x');
        let eight = pool.integer(8);
        let p8 = pool.pow(x, eight);
        assert_eq!(polynomial_degree(&pool, p8, X), 8);
    }
}
