//! Floating-point display formatting.

use minerva_core::FloatDisplayMode;

/// Largest supported significant-digit request.
pub const MAX_SIGNIFICANT_DIGITS: usize = 15;

/// Formats `value` with at most `significant_digits` significant digits
/// in the requested display mode.
///
/// NaN prints as `undef`, infinities as `inf`/`-inf`. The exponent
/// marker is `E`.
#[must_use]
pub fn format_float(value: f64, mode: FloatDisplayMode, significant_digits: usize) -> String {
    if value.is_nan() {
        return "undef".to_string();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-inf" } else { "inf" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let digits = significant_digits.clamp(1, MAX_SIGNIFICANT_DIGITS);
    let sign = if value < 0.0 { "-" } else { "" };

    // Round to the requested precision and split mantissa from exponent.
    let sci = format!("{:.*e}", digits - 1, value.abs());
    let (mantissa, exponent) = split_scientific(&sci);

    let body = match mode {
        FloatDisplayMode::Decimal => {
            format_decimal(&mantissa, exponent).unwrap_or_else(|| scientific(&mantissa, exponent))
        }
        FloatDisplayMode::Scientific => scientific(&mantissa, exponent),
        FloatDisplayMode::Engineering => engineering(&mantissa, exponent),
    };
    format!("{sign}{body}")
}

/// Splits `"d.ddde±x"` into significant digits (no dot, no trailing
/// zeros) and the decimal exponent of the leading digit.
fn split_scientific(sci: &str) -> (String, i32) {
    let (mant, exp) = sci.split_once('e').unwrap_or((sci, "0"));
    let exponent: i32 = exp.parse().unwrap_or(0);
    let mut digits: String = mant.chars().filter(|c| *c != '.').collect();
    while digits.len() > 1 && digits.ends_with('0') {
        digits.pop();
    }
    (digits, exponent)
}

/// Plain decimal when the magnitude keeps the text short; `None`
/// requests a scientific fallback.
fn format_decimal(digits: &str, exponent: i32) -> Option<String> {
    if !(-4..=(MAX_SIGNIFICANT_DIGITS as i32)).contains(&exponent) {
        return None;
    }
    if exponent < 0 {
        let zeros = "0".repeat((-exponent - 1) as usize);
        let mut out = format!("0.{zeros}{digits}");
        trim_fraction(&mut out);
        return Some(out);
    }
    let int_len = (exponent + 1) as usize;
    let mut out = String::new();
    if digits.len() > int_len {
        out.push_str(&digits[..int_len]);
        out.push('.');
        out.push_str(&digits[int_len..]);
        trim_fraction(&mut out);
    } else {
        out.push_str(digits);
        out.push_str(&"0".repeat(int_len - digits.len()));
    }
    Some(out)
}

fn scientific(digits: &str, exponent: i32) -> String {
    let mantissa = with_point(digits, 1);
    if exponent == 0 {
        mantissa
    } else {
        format!("{mantissa}E{exponent}")
    }
}

fn engineering(digits: &str, exponent: i32) -> String {
    let shifted = exponent.div_euclid(3) * 3;
    let int_len = (exponent - shifted + 1) as usize;
    let mantissa = with_point(digits, int_len);
    format!("{mantissa}E{shifted}")
}

/// Inserts a decimal point after `int_len` digits, zero-padding the
/// integer part if needed.
fn with_point(digits: &str, int_len: usize) -> String {
    let mut padded = digits.to_string();
    while padded.len() < int_len {
        padded.push('0');
    }
    if padded.len() == int_len {
        padded
    } else {
        let mut out = String::with_capacity(padded.len() + 1);
        out.push_str(&padded[..int_len]);
        out.push('.');
        out.push_str(&padded[int_len..]);
        out
    }
}

fn trim_fraction(out: &mut String) {
    if out.contains('.') {
        while out.ends_with('0') {
            out.pop();
        }
        if out.ends_with('.') {
            out.pop();
        }
    }
}
