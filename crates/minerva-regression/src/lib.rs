//! # minerva-regression
//!
//! The curve-model family used by regression fitting.
//!
//! A [`Model`] is a parametric curve shape: it evaluates itself and its
//! partial derivatives with respect to each coefficient at a point. The
//! fitting loop itself lives outside this crate; models are pure and
//! stateless, so a solver can probe them freely. Domain violations, such
//! as the logarithm of a non-positive abscissa, evaluate to NaN rather
//! than erroring.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

/// A parametric curve shape fit against observed data.
///
/// `coefficients` always holds [`Model::number_of_coefficients`] values;
/// implementations index it directly.
pub trait Model {
    /// Number of coefficients this shape is parametrized by.
    fn number_of_coefficients(&self) -> usize;

    /// Evaluates the curve at `x` under the given coefficients.
    fn evaluate(&self, coefficients: &[f64], x: f64) -> f64;

    /// Partial derivative of [`Model::evaluate`] with respect to
    /// coefficient `index`, at `x`.
    fn partial_derivate(&self, coefficients: &[f64], index: usize, x: f64) -> f64;
}

/// `y = a·x + b`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearModel;

impl Model for LinearModel {
    fn number_of_coefficients(&self) -> usize {
        2
    }

    fn evaluate(&self, coefficients: &[f64], x: f64) -> f64 {
        coefficients[0] * x + coefficients[1]
    }

    fn partial_derivate(&self, _coefficients: &[f64], index: usize, x: f64) -> f64 {
        match index {
            0 => x,
            _ => 1.0,
        }
    }
}

/// `y = a·x² + b·x + c`.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuadraticModel;

impl Model for QuadraticModel {
    fn number_of_coefficients(&self) -> usize {
        3
    }

    fn evaluate(&self, coefficients: &[f64], x: f64) -> f64 {
        coefficients[0] * x * x + coefficients[1] * x + coefficients[2]
    }

    fn partial_derivate(&self, _coefficients: &[f64], index: usize, x: f64) -> f64 {
        match index {
            0 => x * x,
            1 => x,
            _ => 1.0,
        }
    }
}

/// `y = a·e^(b·x)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExponentialModel;

impl Model for ExponentialModel {
    fn number_of_coefficients(&self) -> usize {
        2
    }

    fn evaluate(&self, coefficients: &[f64], x: f64) -> f64 {
        coefficients[0] * (coefficients[1] * x).exp()
    }

    fn partial_derivate(&self, coefficients: &[f64], index: usize, x: f64) -> f64 {
        let growth = (coefficients[1] * x).exp();
        match index {
            0 => growth,
            _ => coefficients[0] * x * growth,
        }
    }
}

/// `y = a·ln(x) + b`.
///
/// Defined only for positive `x`; elsewhere the curve and its
/// derivatives are NaN.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogarithmicModel;

impl Model for LogarithmicModel {
    fn number_of_coefficients(&self) -> usize {
        2
    }

    fn evaluate(&self, coefficients: &[f64], x: f64) -> f64 {
        coefficients[0] * x.ln() + coefficients[1]
    }

    fn partial_derivate(&self, _coefficients: &[f64], index: usize, x: f64) -> f64 {
        match index {
            0 => x.ln(),
            _ => {
                if x > 0.0 {
                    1.0
                } else {
                    f64::NAN
                }
            }
        }
    }
}

/// `y = a·x^b`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PowerModel;

impl Model for PowerModel {
    fn number_of_coefficients(&self) -> usize {
        2
    }

    fn evaluate(&self, coefficients: &[f64], x: f64) -> f64 {
        coefficients[0] * x.powf(coefficients[1])
    }

    fn partial_derivate(&self, coefficients: &[f64], index: usize, x: f64) -> f64 {
        match index {
            0 => x.powf(coefficients[1]),
            _ => coefficients[0] * x.powf(coefficients[1]) * x.ln(),
        }
    }
}
