//! Display formatting for conversion results
//!
//! Presentation only: the session keeps full-precision numbers and formats
//! them on the way out.

use serde::{Deserialize, Serialize};

/// Thresholds and precision for `format_number_with`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    /// Non-zero magnitudes below this switch to scientific notation
    pub small_threshold: f64,
    /// Magnitudes above this switch to scientific notation
    pub large_threshold: f64,
    /// Fractional digits in both notations
    pub precision: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            small_threshold: 1e-4,
            large_threshold: 1e9,
            precision: 4,
        }
    }
}

/// Format with the default options
pub fn format_number(value: f64) -> String {
    format_number_with(value, &FormatOptions::default())
}

/// Format a result for display. Total: every `f64` yields a string.
///
/// Examples: 3.0 -> "3", 3.12 -> "3.12", 1e12 -> "1.0000e+12", 0.00001234 -> "1.2340e-5"
pub fn format_number_with(value: f64, options: &FormatOptions) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value.is_sign_positive() { "Infinity".to_string() } else { "-Infinity".to_string() };
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if magnitude < options.small_threshold || magnitude > options.large_threshold {
        return format_scientific(value, options.precision);
    }

    format_fixed(value, options.precision)
}

/// Mantissa with `precision` digits and a signed exponent, e.g. "1.0000e+12"
fn format_scientific(value: f64, precision: usize) -> String {
    let mut exponent = value.abs().log10().floor() as i32;
    let mut mantissa = value / 10f64.powi(exponent);

    // Subnormals push 10^exponent out of range
    if !mantissa.is_finite() || mantissa == 0.0 {
        return format_scientific_fallback(value, precision);
    }

    // log10 can land one off next to a power of ten
    if mantissa.abs() >= 10.0 {
        mantissa /= 10.0;
        exponent += 1;
    } else if mantissa.abs() < 1.0 {
        mantissa *= 10.0;
        exponent -= 1;
    }

    mantissa = round_half_away(mantissa, precision);
    if mantissa.abs() >= 10.0 {
        mantissa /= 10.0;
        exponent += 1;
    }

    let sign = if exponent >= 0 { "+" } else { "" };
    format!("{:.*}e{}{}", precision, mantissa, sign, exponent)
}

fn format_scientific_fallback(value: f64, precision: usize) -> String {
    let formatted = format!("{:.*e}", precision, value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => formatted,
    }
}

/// Round ties away from zero; `format!` alone rounds them to even
fn round_half_away(value: f64, digits: usize) -> f64 {
    let scale = 10f64.powi(digits as i32);
    let scaled = value * scale;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / scale
}

/// Round to `precision` places, then drop trailing zeros and a dangling point
fn format_fixed(value: f64, precision: usize) -> String {
    let formatted = format!("{:.*}", precision, round_half_away(value, precision));
    let trimmed = if formatted.contains('.') {
        formatted.trim_end_matches('0').trim_end_matches('.')
    } else {
        formatted.as_str()
    };

    // A tiny negative can round to "-0"
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}
