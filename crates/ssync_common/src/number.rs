//! Number rendering for reports and labels.
//!
//! [`format_g`] reproduces the C `printf("%g")` conversion: six significant
//! digits, trailing zeros removed, and exponent notation only for very small
//! or very large magnitudes. [`format_shortest`] keeps every digit needed to
//! read the value back exactly.

/// Number of significant digits produced by [`format_g`].
const SIGNIFICANT_DIGITS: i32 = 6;

/// Formats `value` the way `printf("%g", value)` does.
///
/// ```
/// use ssync_common::format_g;
///
/// assert_eq!(format_g(-0.6), "-0.6");
/// assert_eq!(format_g(9.3), "9.3");
/// assert_eq!(format_g(1e-5), "1e-05");
/// ```
pub fn format_g(value: f64) -> String {
    if value.is_nan() {
        return "nan".into();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.into();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.into();
    }

    // Rounding to the target precision first gives the exponent C would use.
    let scientific = format!("{:.*e}", (SIGNIFICANT_DIGITS - 1) as usize, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= SIGNIFICANT_DIGITS {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{sign}{:02}",
            strip_trailing_zeros(mantissa),
            exponent.abs()
        )
    } else {
        let decimals = (SIGNIFICANT_DIGITS - 1 - exponent) as usize;
        strip_trailing_zeros(&format!("{value:.decimals$}")).to_string()
    }
}

/// Exponent range written in positional notation by [`format_shortest`].
const POSITIONAL_EXPONENTS: std::ops::Range<i32> = -4..16;

/// Formats `value` with the fewest digits that parse back to the same `f64`.
///
/// Positional notation is used for exponents in `-4..16`, exponent notation
/// with a signed two-digit exponent otherwise. Integral values carry no
/// fractional part.
///
/// ```
/// use ssync_common::format_shortest;
///
/// assert_eq!(format_shortest(0.1 + 0.2), "0.30000000000000004");
/// assert_eq!(format_shortest(1e-7), "1e-07");
/// assert_eq!(format_shortest(10.0), "10");
/// ```
pub fn format_shortest(value: f64) -> String {
    if value.is_nan() {
        return "nan".into();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.into();
    }
    if value == 0.0 {
        return value.to_string();
    }

    let scientific = format!("{value:e}");
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);
    if POSITIONAL_EXPONENTS.contains(&exponent) {
        value.to_string()
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exponent.abs())
    }
}

/// Drops trailing fractional zeros and a dangling decimal point.
fn strip_trailing_zeros(digits: &str) -> &str {
    if digits.contains('.') {
        digits.trim_end_matches('0').trim_end_matches('.')
    } else {
        digits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_have_no_fraction() {
        assert_eq!(format_g(10.0), "10");
        assert_eq!(format_g(-3.0), "-3");
        assert_eq!(format_g(123456.0), "123456");
    }

    #[test]
    fn fractions_are_trimmed() {
        assert_eq!(format_g(0.5), "0.5");
        assert_eq!(format_g(1.2), "1.2");
        assert_eq!(format_g(-0.6), "-0.6");
        assert_eq!(format_g(0.0001), "0.0001");
    }

    #[test]
    fn six_significant_digits() {
        assert_eq!(format_g(1.0 / 3.0), "0.333333");
        assert_eq!(format_g(123456.7), "123457");
        assert_eq!(format_g(0.1 + 0.2), "0.3");
    }

    #[test]
    fn exponent_form_for_extremes() {
        assert_eq!(format_g(1234567.0), "1.23457e+06");
        assert_eq!(format_g(0.00001), "1e-05");
        assert_eq!(format_g(-2.5e-7), "-2.5e-07");
    }

    #[test]
    fn rounding_carries_into_exponent() {
        assert_eq!(format_g(9.9999996), "10");
        assert_eq!(format_g(999999.7), "1e+06");
    }

    #[test]
    fn zero_and_non_finite() {
        assert_eq!(format_g(0.0), "0");
        assert_eq!(format_g(-0.0), "-0");
        assert_eq!(format_g(f64::NAN), "nan");
        assert_eq!(format_g(f64::INFINITY), "inf");
        assert_eq!(format_g(f64::NEG_INFINITY), "-inf");
    }

    #[test]
    fn shortest_keeps_every_digit() {
        assert_eq!(format_shortest(1.0 / 3.0), "0.3333333333333333");
        assert_eq!(format_shortest(-0.6), "-0.6");
        assert_eq!(format_shortest(0.0001), "0.0001");
        assert_eq!(format_shortest(123456789.0), "123456789");
    }

    #[test]
    fn shortest_switches_to_exponent_outside_positional_range() {
        assert_eq!(format_shortest(1e-7), "1e-07");
        assert_eq!(format_shortest(-2.5e-5), "-2.5e-05");
        assert_eq!(format_shortest(1e16), "1e+16");
        assert_eq!(format_shortest(1.5e300), "1.5e+300");
        assert_eq!(format_shortest(1e15), "1000000000000000");
    }

    #[test]
    fn shortest_zero_and_non_finite() {
        assert_eq!(format_shortest(0.0), "0");
        assert_eq!(format_shortest(-0.0), "-0");
        assert_eq!(format_shortest(f64::NAN), "nan");
        assert_eq!(format_shortest(f64::NEG_INFINITY), "-inf");
    }
}
