//! # Display Formatting
//!
//! Turns a computed value into the text shown on the display. Typed text
//! never passes through here; only results of Equals, operator chaining,
//! Negate and Percent do.
//!
//! ```text
//! |x| >= 1e9 or 0 < |x| < 1e-7   →  "1.23e+09"      (scientific, 2 places)
//! whole number                   →  "42"
//! anything else                  →  "0.125"         (8 places, zeros stripped)
//! ```

/// Values at or above this magnitude switch to scientific notation.
pub const SCIENTIFIC_UPPER: f64 = 1e9;
/// Non-zero values below this magnitude switch to scientific notation.
pub const SCIENTIFIC_LOWER: f64 = 1e-7;

const FRACTION_DIGITS: usize = 8;

pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return non_finite(value);
    }

    let magnitude = value.abs();
    if magnitude >= SCIENTIFIC_UPPER || (value != 0.0 && magnitude < SCIENTIFIC_LOWER) {
        return scientific(value);
    }

    if value.fract() == 0.0 {
        return format!("{value:.0}");
    }

    let fixed = format!("{:.*}", FRACTION_DIGITS, value);
    let trimmed = fixed.trim_end_matches('0');
    trimmed.strip_suffix('.').unwrap_or(trimmed).to_string()
}

/// C-style `%.2e`: Rust prints `1.00e9`, the display wants `1.00e+09`.
fn scientific(value: f64) -> String {
    let raw = format!("{value:.2e}");
    let Some((mantissa, exponent)) = raw.split_once('e') else {
        return raw;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{mantissa}e{sign}{:02}", exponent.unsigned_abs())
}

fn non_finite(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else if value.is_sign_negative() {
        "-inf".to_string()
    } else {
        "inf".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_numbers_have_no_decimal_point() {
        assert_eq!(format_number(42.0), "42");
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(-7.0), "-7");
        assert_eq!(format_number(999_999_999.0), "999999999");
    }

    #[test]
    fn test_fractions_strip_trailing_zeros() {
        assert_eq!(format_number(0.1), "0.1");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(-2.25), "-2.25");
        assert_eq!(format_number(1.0 / 3.0), "0.33333333");
        assert_eq!(format_number(2.0 / 3.0), "0.66666667");
    }

    #[test]
    fn test_rounding_up_to_whole_drops_point() {
        assert_eq!(format_number(0.999_999_999), "1");
    }

    #[test]
    fn test_large_values_are_scientific() {
        assert_eq!(format_number(1e9), "1.00e+09");
        assert_eq!(format_number(2e9), "2.00e+09");
        assert_eq!(format_number(-1.5e12), "-1.50e+12");
        assert_eq!(format_number(1e100), "1.00e+100");
    }

    #[test]
    fn test_tiny_values_are_scientific() {
        assert_eq!(format_number(3e-8), "3.00e-08");
        assert_eq!(format_number(-1.25e-10), "-1.25e-10");
        assert_eq!(format_number(1e-7), "0.0000001");
    }

    #[test]
    fn test_non_finite_values() {
        assert_eq!(format_number(f64::INFINITY), "inf");
        assert_eq!(format_number(f64::NEG_INFINITY), "-inf");
        assert_eq!(format_number(f64::NAN), "nan");
    }
}
