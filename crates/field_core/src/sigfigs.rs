//! Decimal-precision bookkeeping for stepping.
//!
//! Arrow-key stepping must not change how many decimals the user was
//! editing: stepping "1.50" yields "2.50", never "2.5". The counter and
//! the formatter below are the two halves of that bookkeeping.

/// Count the fractional digits of `text`: the characters after the first
/// `.` up to the next `.` or the end. `0` when there is no `.` or nothing
/// follows it.
///
/// # Examples
///
/// ```
/// use field_core::count_fractional_digits;
///
/// assert_eq!(count_fractional_digits("1.50"), 2);
/// assert_eq!(count_fractional_digits(".5"), 1);
/// assert_eq!(count_fractional_digits("150"), 0);
/// assert_eq!(count_fractional_digits("1."), 0);
/// ```
pub fn count_fractional_digits(text: &str) -> usize {
    let Some(dot) = text.find('.') else {
        return 0;
    };
    text[dot + 1..].chars().take_while(|c| *c != '.').count()
}

/// The natural shortest representation of `value` ("2", "2.5", "-0.25").
#[inline]
pub fn format_f64(value: f64) -> String {
    format!("{value}")
}

/// Render `value` with exactly `digits` fractional characters.
///
/// `digits == 0` falls back to the natural shortest representation (which
/// may itself carry a fraction). Otherwise the fractional part is padded
/// with `0` on the right, or truncated — never rounded, so a value the
/// clamp just pinned to a bound cannot drift across it.
///
/// # Examples
///
/// ```
/// use field_core::format_with_fractional_digits;
///
/// assert_eq!(format_with_fractional_digits(2.5, 2), "2.50");
/// assert_eq!(format_with_fractional_digits(2.0, 2), "2.00");
/// assert_eq!(format_with_fractional_digits(2.5, 0), "2.5");
/// assert_eq!(format_with_fractional_digits(1.2000000000000002, 1), "1.2");
/// ```
pub fn format_with_fractional_digits(value: f64, digits: usize) -> String {
    if digits == 0 {
        return format_f64(value);
    }

    let natural = format_f64(value);
    match natural.find('.') {
        None => format!("{natural}.{}", "0".repeat(digits)),
        Some(dot) => {
            let fractional_len = natural.len() - dot - 1;
            if fractional_len >= digits {
                natural[..dot + 1 + digits].to_string()
            } else {
                let mut out = natural;
                out.push_str(&"0".repeat(digits - fractional_len));
                out
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_digits_after_the_first_dot() {
        assert_eq!(count_fractional_digits("1.50"), 2);
        assert_eq!(count_fractional_digits("-1.5"), 1);
        assert_eq!(count_fractional_digits("0.125"), 3);
        assert_eq!(count_fractional_digits("42"), 0);
        assert_eq!(count_fractional_digits(""), 0);
        assert_eq!(count_fractional_digits("1."), 0);
        // Only the first dot's run counts.
        assert_eq!(count_fractional_digits("1.2.3"), 1);
    }

    #[test]
    fn pads_to_the_requested_width() {
        assert_eq!(format_with_fractional_digits(2.0, 1), "2.0");
        assert_eq!(format_with_fractional_digits(2.5, 3), "2.500");
        assert_eq!(format_with_fractional_digits(-1.5, 2), "-1.50");
    }

    #[test]
    fn truncates_float_noise_instead_of_rounding() {
        assert_eq!(format_with_fractional_digits(1.2000000000000002, 1), "1.2");
        assert_eq!(format_with_fractional_digits(0.30000000000000004, 2), "0.30");
    }

    #[test]
    fn zero_digits_keeps_the_natural_representation() {
        assert_eq!(format_with_fractional_digits(7.0, 0), "7");
        assert_eq!(format_with_fractional_digits(-0.5, 0), "-0.5");
    }

    #[test]
    fn formatted_values_round_trip_through_the_evaluator() {
        for (value, digits) in [(2.5, 2), (7.0, 1), (-1.25, 3), (0.5, 1)] {
            let formatted = format_with_fractional_digits(value, digits);
            let reparsed = numeric_expr::evaluate_numeric_expression(&formatted)
                .unwrap_or_else(|| panic!("{formatted:?} should evaluate"));
            assert!(
                (reparsed - value).abs() < 1e-9,
                "{value} -> {formatted} -> {reparsed}"
            );
        }
    }
}
