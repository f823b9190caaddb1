//! # minerva-poly
//!
//! Polynomial structure analysis for Minerva expressions: degree with
//! respect to a named symbol, and extraction of coefficient expressions
//! in ascending power order.
//!
//! Non-polynomial expressions are reported through the negative
//! [`NOT_POLYNOMIAL`] sentinel, never an error path.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod coefficients;
pub mod degree;

#[cfg(test)]
mod proptests;

pub use coefficients::polynomial_coefficients;
pub use degree::{polynomial_degree, MAX_POLYNOMIAL_DEGREE, NOT_POLYNOMIAL};
