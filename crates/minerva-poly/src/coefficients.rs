//! Polynomial coefficient extraction.

use minerva_core::{AngleUnit, EmptyContext, ExprNode, NodeRef, NodePool, SymbolName};
use minerva_simplify::{reduce, InterruptFlag};

use crate::degree::{contains_symbol, polynomial_degree, NOT_POLYNOMIAL};

/// Extracts the coefficients of the expression at `node` as a polynomial
/// in `symbol`.
///
/// On success fills `out[0..=degree]` with reduced coefficient
/// expressions in ascending power order and returns the degree.
/// Coefficients are freshly built trees; they share no structure with the
/// analyzed expression. Returns [`NOT_POLYNOMIAL`] when the expression is
/// not polynomial in `symbol` or `out` is too short, leaving `out`
/// unspecified.
pub fn polynomial_coefficients(
    pool: &mut NodePool,
    node: NodeRef,
    symbol: SymbolName,
    out: &mut [NodeRef],
) -> i32 {
    let degree = polynomial_degree(pool, node, symbol);
    if degree == NOT_POLYNOMIAL {
        return NOT_POLYNOMIAL;
    }
    let slots = match usize::try_from(degree) {
        Ok(d) if d < out.len() => d + 1,
        _ => return NOT_POLYNOMIAL,
    };

    let Some(coeffs) = collect(pool, node, symbol) else {
        return NOT_POLYNOMIAL;
    };

    let interrupt = InterruptFlag::new();
    for (i, slot) in out.iter_mut().enumerate().take(slots) {
        let coeff = coeffs.get(i).copied().unwrap_or(NodeRef::FAILED);
        let coeff = if coeff.is_allocation_failure() {
            pool.integer(0)
        } else {
            coeff
        };
        if coeff.is_allocation_failure() {
            return NOT_POLYNOMIAL;
        }
        reduce(pool, coeff, &EmptyContext, AngleUnit::Radian, &interrupt);
        *slot = coeff;
    }
    // Contributions beyond the reported degree are all zero.
    for &extra in coeffs.iter().skip(slots) {
        pool.reclaim_tree(extra);
    }
    degree
}

/// Builds the coefficient vector bottom-up, ascending power order.
///
/// Every entry is a freshly allocated tree. `None` signals an allocation
/// failure or a non-polynomial shape (the degree pass has usually ruled
/// the latter out already).
fn collect(pool: &mut NodePool, node: NodeRef, symbol: SymbolName) -> Option<Vec<NodeRef>> {
    match pool.get(node).clone() {
        ExprNode::Symbol(name) if name == symbol => {
            let zero = pool.integer(0);
            let one = pool.integer(1);
            checked(vec![zero, one])
        }
        n if n.is_atom() => {
            let copy = pool.deep_copy(node);
            checked(vec![copy])
        }
        ExprNode::Add(args) => {
            let mut acc: Vec<NodeRef> = Vec::new();
            for &arg in &args {
                let term = collect(pool, arg, symbol)?;
                acc = add_vectors(pool, acc, term)?;
            }
            Some(acc)
        }
        ExprNode::Mul(args) => {
            let mut acc = {
                let one = pool.integer(1);
                checked(vec![one])?
            };
            for &arg in &args {
                let factor = collect(pool, arg, symbol)?;
                acc = convolve(pool, &acc, &factor)?;
                for c in factor {
                    pool.reclaim_tree(c);
                }
            }
            Some(acc)
        }
        ExprNode::Neg(arg) => {
            let inner = collect(pool, arg, symbol)?;
            let mut negated = Vec::with_capacity(inner.len());
            for c in inner {
                negated.push(pool.neg(c));
            }
            checked(negated)
        }
        ExprNode::Pow { base, exp } => {
            let ExprNode::Integer(k) = *pool.get(exp) else {
                let copy = pool.deep_copy(node);
                return checked(vec![copy]);
            };
            if k < 0 || contains_symbol(pool, exp, symbol) || !contains_symbol(pool, base, symbol)
            {
                let copy = pool.deep_copy(node);
                return checked(vec![copy]);
            }
            let base_coeffs = collect(pool, base, symbol)?;
            let mut acc = {
                let one = pool.integer(1);
                checked(vec![one])?
            };
            for _ in 0..k {
                acc = convolve(pool, &acc, &base_coeffs)?;
            }
            // base_coeffs entries were deep-copied into each convolution
            for c in base_coeffs {
                pool.reclaim_tree(c);
            }
            Some(acc)
        }
        ExprNode::Div { num, den } => {
            let num_coeffs = collect(pool, num, symbol)?;
            let mut divided = Vec::with_capacity(num_coeffs.len());
            for c in num_coeffs {
                let d = pool.deep_copy(den);
                divided.push(pool.div(c, d));
            }
            checked(divided)
        }
        _ => {
            let copy = pool.deep_copy(node);
            checked(vec![copy])
        }
    }
}

fn checked(coeffs: Vec<NodeRef>) -> Option<Vec<NodeRef>> {
    if coeffs.iter().any(|c| c.is_allocation_failure()) {
        None
    } else {
        Some(coeffs)
    }
}

/// Elementwise sum of two coefficient vectors.
fn add_vectors(
    pool: &mut NodePool,
    a: Vec<NodeRef>,
    b: Vec<NodeRef>,
) -> Option<Vec<NodeRef>> {
    let len = a.len().max(b.len());
    let mut result = Vec::with_capacity(len);
    let mut a = a.into_iter();
    let mut b = b.into_iter();
    for _ in 0..len {
        let entry = match (a.next(), b.next()) {
            (Some(x), Some(y)) => pool.add([x, y].as_slice()),
            (Some(x), None) | (None, Some(x)) => x,
            (None, None) => pool.integer(0),
        };
        result.push(entry);
    }
    checked(result)
}

/// Convolution of two coefficient vectors (polynomial product).
///
/// The factors' trees are deep-copied per contribution so the result
/// shares no structure with the inputs; `a` is consumed.
fn convolve(pool: &mut NodePool, a: &[NodeRef], b: &[NodeRef]) -> Option<Vec<NodeRef>> {
    let mut sums: Vec<Vec<NodeRef>> = vec![Vec::new(); a.len() + b.len() - 1];
    for (i, &x) in a.iter().enumerate() {
        for (j, &y) in b.iter().enumerate() {
            let x_copy = pool.deep_copy(x);
            let y_copy = pool.deep_copy(y);
            let term = pool.mul([x_copy, y_copy].as_slice());
            if term.is_allocation_failure() {
                return None;
            }
            sums[i + j].push(term);
        }
    }
    for &x in a {
        pool.reclaim_tree(x);
    }
    let mut result = Vec::with_capacity(sums.len());
    for terms in sums {
        let entry = if terms.is_empty() {
            pool.integer(0)
        } else {
            pool.add(terms.as_slice())
        };
        result.push(entry);
    }
    checked(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::degree::MAX_POLYNOMIAL_DEGREE;

    const X: SymbolName = SymbolName(b'x');

    fn coeff_slots() -> Vec<NodeRef> {
        vec![NodeRef::FAILED; (MAX_POLYNOMIAL_DEGREE + 1) as usize]
    }

    #[test]
    fn test_quadratic_coefficients() {
        // a*x^2 + b*x + c -> [c, b, a]
        let mut pool = NodePool::new(512);
        let a = pool.symbol('a');
        let x = pool.symbol('x');
        let two = pool.integer(2);
        let x2 = pool.pow(x, two);
        let ax2 = pool.mul([a, x2].as_slice());

        let b = pool.symbol('b');
        let x = pool.symbol('x');
        let bx = pool.mul([b, x].as_slice());

        let c = pool.symbol('c');
        let sum = pool.add([ax2, bx, c].as_slice());

        let mut out = coeff_slots();
        let degree = polynomial_coefficients(&mut pool, sum, X, &mut out);
        assert_eq!(degree, 2);

        assert_eq!(*pool.get(out[0]), ExprNode::Symbol(SymbolName(b'c')));
        assert_eq!(*pool.get(out[1]), ExprNode::Symbol(SymbolName(b'b')));
        assert_eq!(*pool.get(out[2]), ExprNode::Symbol(SymbolName(b'a')));
    }

    #[test]
    fn test_numeric_coefficients() {
        // 3*x + 5 -> [5, 3]
        let mut pool = NodePool::new(256);
        let three = pool.integer(3);
        let x = pool.symbol('x');
        let term = pool.mul([three, x].as_slice());
        let five = pool.integer(5);
        let sum = pool.add([term, five].as_slice());

        let mut out = coeff_slots();
        let degree = polynomial_coefficients(&mut pool, sum, X, &mut out);
        assert_eq!(degree, 1);
        assert_eq!(*pool.get(out[0]), ExprNode::Integer(5));
        assert_eq!(*pool.get(out[1]), ExprNode::Integer(3));
    }

    #[test]
    fn test_binomial_square() {
        // (x + 1)^2 -> [1, 2, 1]
        let mut pool = NodePool::new(512);
        let x = pool.symbol('x');
        let one = pool.integer(1);
        let sum = pool.add([x, one].as_slice());
        let two = pool.integer(2);
        let sq = pool.pow(sum, two);

        let mut out = coeff_slots();
        let degree = polynomial_coefficients(&mut pool, sq, X, &mut out);
        assert_eq!(degree, 2);
        assert_eq!(*pool.get(out[0]), ExprNode::Integer(1));
        assert_eq!(*pool.get(out[1]), ExprNode::Integer(2));
        assert_eq!(*pool.get(out[2]), ExprNode::Integer(1));
    }

    #[test]
    fn test_non_polynomial_is_rejected() {
        let mut pool = NodePool::new(64);
        let one = pool.integer(1);
        let x = pool.symbol('x');
        let inv = pool.div(one, x);

        let mut out = coeff_slots();
        assert_eq!(
            polynomial_coefficients(&mut pool, inv, X, &mut out),
            NOT_POLYNOMIAL
        );
    }

    #[test]
    fn test_constant_expression() {
        let mut pool = NodePool::new(64);
        let seven = pool.integer(7);
        let mut out = coeff_slots();
        let degree = polynomial_coefficients(&mut pool, seven, X, &mut out);
        assert_eq!(degree, 0);
        assert_eq!(*pool.get(out[0]), ExprNode::Integer(7));
    }

    #[test]
    fn test_coefficients_are_fresh_trees() {
        let mut pool = NodePool::new(256);
        let a = pool.symbol('a');
        let x = pool.symbol('x');
        let prod = pool.mul([a, x].as_slice());

        let mut out = coeff_slots();
        let degree = polynomial_coefficients(&mut pool, prod, X, &mut out);
        assert_eq!(degree, 1);
        // The degree-1 coefficient is a, but not the original a node.
        assert_eq!(*pool.get(out[1]), ExprNode::Symbol(SymbolName(b'a')));
        assert_ne!(out[1], a);
    }
}
