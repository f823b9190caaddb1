//! Property-based tests for polynomial analysis.

use proptest::prelude::*;

use minerva_core::{ExprNode, NodeRef, NodePool, SymbolName};

use crate::coefficients::polynomial_coefficients;
use crate::degree::{polynomial_degree, MAX_POLYNOMIAL_DEGREE};

const X: SymbolName = SymbolName(b'x');

/// Builds sum(coeffs[i] * x^i) without any pre-simplification.
fn build_poly(pool: &mut NodePool, coeffs: &[i64]) -> NodeRef {
    let mut terms: Vec<NodeRef> = Vec::new();
    for (i, &c) in coeffs.iter().enumerate() {
        let lit = pool.integer(c);
        let term = match i {
            0 => lit,
            1 => {
                let x = pool.symbol('x');
                pool.mul([lit, x].as_slice())
            }
            _ => {
                let x = pool.symbol('x');
                let e = pool.integer(i as i64);
                let p = pool.pow(x, e);
                pool.mul([lit, p].as_slice())
            }
        };
        terms.push(term);
    }
    pool.add(terms.as_slice())
}

fn coeff_vector() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(-20i64..20, 1..5).prop_map(|mut v| {
        // Keep the leading coefficient non-zero so the degree is exact.
        if let Some(last) = v.last_mut() {
            if *last == 0 {
                *last = 1;
            }
        }
        v
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn coefficients_round_trip(coeffs in coeff_vector()) {
        let mut pool = NodePool::new(8192);
        let expr = build_poly(&mut pool, &coeffs);
        prop_assume!(!expr.is_allocation_failure());

        let expected_degree = (coeffs.len() - 1) as i32;
        prop_assert_eq!(polynomial_degree(&pool, expr, X), expected_degree);

        let mut out = vec![NodeRef::FAILED; (MAX_POLYNOMIAL_DEGREE + 1) as usize];
        let degree = polynomial_coefficients(&mut pool, expr, X, &mut out);
        prop_assert_eq!(degree, expected_degree);

        for (i, &expected) in coeffs.iter().enumerate() {
            prop_assert_eq!(pool.get(out[i]).clone(), ExprNode::Integer(expected));
        }
    }
}
