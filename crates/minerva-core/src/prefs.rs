//! Evaluation and display preferences.

/// Unit in which trigonometric arguments are interpreted.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum AngleUnit {
    /// Radians (2π per turn).
    #[default]
    Radian,
    /// Degrees (360 per turn).
    Degree,
    /// Gradians (400 per turn).
    Gradian,
}

impl AngleUnit {
    /// Angle-unit span of one full turn.
    #[must_use]
    pub fn period(self) -> f64 {
        match self {
            Self::Radian => 2.0 * std::f64::consts::PI,
            Self::Degree => 360.0,
            Self::Gradian => 400.0,
        }
    }

    /// Factor converting a value in this unit to radians.
    #[must_use]
    pub fn to_radians_factor(self) -> f64 {
        2.0 * std::f64::consts::PI / self.period()
    }
}

/// Notation used when printing floating-point values.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum FloatDisplayMode {
    /// Plain decimal notation where the magnitude allows it.
    #[default]
    Decimal,
    /// Normalized scientific notation (mantissa in [1, 10)).
    Scientific,
    /// Engineering notation (exponent a multiple of 3).
    Engineering,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radian_factor_is_identity() {
        assert!((AngleUnit::Radian.to_radians_factor() - 1.0).abs() < 1e-15);
    }

    #[test]
    fn test_degree_factor() {
        let f = AngleUnit::Degree.to_radians_factor();
        assert!((90.0 * f - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_gradian_period() {
        assert!((AngleUnit::Gradian.period() - 400.0).abs() < 1e-12);
    }
}
