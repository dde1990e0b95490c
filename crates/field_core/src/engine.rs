//! The editing engine: per-event decisions for keystrokes, pastes, and
//! arrow-key stepping.
//!
//! Every function is a pure decision over explicit inputs. The shell owns
//! event plumbing and applies admitted candidates; the caller owns the
//! field value across calls.

use numeric_expr::{evaluate_numeric_expression, is_valid_numeric_input};

use crate::compose::compose;
use crate::selection::SelectionRange;
use crate::sigfigs::{count_fractional_digits, format_f64, format_with_fractional_digits};
use crate::value::FieldValue;

/// Stepping and validation configuration for one field. Immutable per
/// frame; supplied by the caller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepConfig {
    /// Arrow-key delta without shift.
    pub increment_small: f64,
    /// Arrow-key delta with shift held.
    pub increment_big: f64,
    /// Lower bound (inclusive), when configured.
    pub minimum: Option<f64>,
    /// Upper bound (inclusive), when configured.
    pub maximum: Option<f64>,
    /// Reject the decimal point in typed/pasted input.
    pub integer: bool,
}

impl Default for StepConfig {
    fn default() -> Self {
        Self {
            increment_small: 1.0,
            increment_big: 10.0,
            minimum: None,
            maximum: None,
            integer: false,
        }
    }
}

impl StepConfig {
    #[inline]
    fn delta(&self, big: bool) -> f64 {
        if big { self.increment_big } else { self.increment_small }
    }
}

/// Direction of an arrow-key step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepDirection {
    Up,
    Down,
}

/// Outcome of validating one insertion or paste.
///
/// `Admit` carries the full candidate text so the shell can commit it
/// without re-deriving the composition.
#[derive(Clone, Debug, PartialEq)]
pub enum EditDecision {
    Admit(String),
    Reject,
}

/// Decide a character-generating keystroke.
///
/// In the mixed regime the typed text has nothing to compose against: the
/// candidate is the inserted text alone. Otherwise the candidate replaces
/// the selection in the current text.
///
/// Rejected when the candidate fails the grammar, or when it evaluates to
/// a finite number outside the configured bounds. A grammar-valid but
/// unevaluable candidate (`"3+"`) is admitted — transient states are part
/// of typing.
pub fn decide_insertion(
    value: &FieldValue,
    selection: SelectionRange,
    inserted: &str,
    config: &StepConfig,
) -> EditDecision {
    let candidate = match value {
        FieldValue::Mixed => inserted.to_string(),
        FieldValue::Concrete(text) => compose(text, selection, inserted),
    };

    if !is_valid_numeric_input(&candidate, config.integer) {
        return EditDecision::Reject;
    }

    if let Some(evaluated) = evaluate_numeric_expression(&candidate) {
        let below = config.minimum.is_some_and(|minimum| evaluated < minimum);
        let above = config.maximum.is_some_and(|maximum| evaluated > maximum);
        if below || above {
            return EditDecision::Reject;
        }
    }

    EditDecision::Admit(candidate)
}

/// Decide a paste.
///
/// Paste is validated for shape only: the grammar check runs, the range
/// check does not. Typed input and paste are deliberately asymmetric here,
/// for compatibility with the long-observed behavior of this field.
pub fn decide_paste(
    value: &FieldValue,
    selection: SelectionRange,
    pasted: &str,
    config: &StepConfig,
) -> EditDecision {
    let candidate = match value {
        FieldValue::Mixed => pasted.to_string(),
        FieldValue::Concrete(text) => compose(text, selection, pasted),
    };

    if !is_valid_numeric_input(&candidate, config.integer) {
        return EditDecision::Reject;
    }

    EditDecision::Admit(candidate)
}

/// Compute the replacement text for an arrow-key step, or `None` when the
/// key is a no-op.
///
/// Mixed regime: the field has no numeric anchor. Without a minimum the
/// step resolves to `0 ± delta`; with one, Down lands exactly on the
/// minimum and Up on `minimum + delta`.
///
/// Concrete regime: an unevaluable value ignores the key, as does a step
/// whose direction is already at or past its bound. Otherwise the stepped
/// value is clamped to the bound on that side and formatted to the number
/// of fractional digits already on screen — taken from the current text
/// when it is plain digits-and-dots, else from the evaluated value's own
/// representation.
pub fn step(
    value: &FieldValue,
    direction: StepDirection,
    big: bool,
    config: &StepConfig,
) -> Option<String> {
    let delta = config.delta(big);

    match value {
        FieldValue::Mixed => {
            let new_value = match (config.minimum, direction) {
                (None, StepDirection::Down) => 0.0 - delta,
                (None, StepDirection::Up) => 0.0 + delta,
                (Some(minimum), StepDirection::Down) => minimum,
                (Some(minimum), StepDirection::Up) => minimum + delta,
            };
            Some(format_f64(new_value))
        }

        FieldValue::Concrete(text) => {
            let evaluated = evaluate_numeric_expression(text)?;

            match direction {
                StepDirection::Down
                    if config.minimum.is_some_and(|minimum| evaluated <= minimum) =>
                {
                    return None;
                }
                StepDirection::Up
                    if config.maximum.is_some_and(|maximum| evaluated >= maximum) =>
                {
                    return None;
                }
                _ => {}
            }

            let new_value = match direction {
                StepDirection::Down => match config.minimum {
                    None => evaluated - delta,
                    Some(minimum) => (evaluated - delta).max(minimum),
                },
                StepDirection::Up => match config.maximum {
                    None => evaluated + delta,
                    Some(maximum) => (evaluated + delta).min(maximum),
                },
            };

            let digits = if is_plain_decimal(text) {
                count_fractional_digits(text)
            } else {
                count_fractional_digits(&format_f64(evaluated))
            };

            Some(format_with_fractional_digits(new_value, digits))
        }
    }
}

/// Only ASCII digits and dots: the displayed precision can be read off the
/// text directly. Anything else (signs, operators) goes through the
/// evaluated value's representation instead.
fn is_plain_decimal(text: &str) -> bool {
    text.chars().all(|c| c.is_ascii_digit() || c == '.')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caret_at_end(text: &str) -> SelectionRange {
        SelectionRange::caret(text.len())
    }

    #[test]
    fn keystrokes_that_break_the_grammar_are_rejected() {
        let config = StepConfig::default();
        let value = FieldValue::new("12");

        assert_eq!(
            decide_insertion(&value, caret_at_end("12"), "a", &config),
            EditDecision::Reject
        );
        assert_eq!(
            decide_insertion(&value, caret_at_end("12"), "3", &config),
            EditDecision::Admit("123".to_string())
        );
    }

    #[test]
    fn integer_fields_reject_the_decimal_point() {
        let config = StepConfig { integer: true, ..StepConfig::default() };
        let value = FieldValue::new("12");

        assert_eq!(
            decide_insertion(&value, caret_at_end("12"), ".", &config),
            EditDecision::Reject
        );
    }

    #[test]
    fn trailing_operator_is_a_legal_transient_state() {
        let config = StepConfig::default();
        let value = FieldValue::new("5");

        assert_eq!(
            decide_insertion(&value, caret_at_end("5"), "+", &config),
            EditDecision::Admit("5+".to_string())
        );
    }

    #[test]
    fn typed_input_outside_bounds_is_rejected() {
        let config = StepConfig {
            maximum: Some(10.0),
            ..StepConfig::default()
        };
        let value = FieldValue::new("5");

        // "59" would evaluate to 59 > 10.
        assert_eq!(
            decide_insertion(&value, caret_at_end("5"), "9", &config),
            EditDecision::Reject
        );

        let config = StepConfig {
            minimum: Some(0.0),
            ..StepConfig::default()
        };
        let value = FieldValue::empty();
        assert_eq!(
            decide_insertion(&value, SelectionRange::caret(0), "-", &config),
            // "-" alone does not evaluate, so it cannot be range-rejected.
            EditDecision::Admit("-".to_string())
        );
    }

    #[test]
    fn insertion_replaces_the_selection() {
        let config = StepConfig::default();
        let value = FieldValue::new("1.50");

        assert_eq!(
            decide_insertion(&value, SelectionRange::new(0, 4), "7", &config),
            EditDecision::Admit("7".to_string())
        );
    }

    #[test]
    fn typing_into_a_mixed_field_starts_from_the_typed_character() {
        let config = StepConfig::default();

        assert_eq!(
            decide_insertion(&FieldValue::Mixed, SelectionRange::caret(0), "7", &config),
            EditDecision::Admit("7".to_string())
        );
        assert_eq!(
            decide_insertion(&FieldValue::Mixed, SelectionRange::caret(0), "x", &config),
            EditDecision::Reject
        );
    }

    #[test]
    fn paste_checks_shape_but_not_range() {
        let config = StepConfig {
            maximum: Some(10.0),
            integer: true,
            ..StepConfig::default()
        };
        let value = FieldValue::empty();

        // Out of range, but paste does not range-check.
        assert_eq!(
            decide_paste(&value, SelectionRange::caret(0), "999", &config),
            EditDecision::Admit("999".to_string())
        );
        // Shape failures still reject.
        assert_eq!(
            decide_paste(&value, SelectionRange::caret(0), "abc", &config),
            EditDecision::Reject
        );
        assert_eq!(
            decide_paste(&value, SelectionRange::caret(0), "1.5", &config),
            EditDecision::Reject
        );
    }

    #[test]
    fn pasting_into_a_mixed_field_replaces_wholesale() {
        let config = StepConfig::default();

        assert_eq!(
            decide_paste(&FieldValue::Mixed, SelectionRange::caret(0), "42", &config),
            EditDecision::Admit("42".to_string())
        );
    }

    #[test]
    fn stepping_preserves_displayed_precision() {
        let config = StepConfig::default();
        let value = FieldValue::new("1.50");

        assert_eq!(
            step(&value, StepDirection::Up, false, &config),
            Some("2.50".to_string())
        );
        assert_eq!(
            step(&value, StepDirection::Down, false, &config),
            Some("0.50".to_string())
        );
    }

    #[test]
    fn stepping_an_expression_uses_the_evaluated_representation() {
        let config = StepConfig::default();

        assert_eq!(
            step(&FieldValue::new("3+4"), StepDirection::Up, false, &config),
            Some("8".to_string())
        );
        assert_eq!(
            step(&FieldValue::new("1+0.5"), StepDirection::Up, false, &config),
            Some("2.5".to_string())
        );
        // A sign makes the text non-plain, so precision comes from the
        // evaluated value: "-1.50" evaluates to -1.5, one fractional digit.
        assert_eq!(
            step(&FieldValue::new("-1.50"), StepDirection::Up, false, &config),
            Some("-0.5".to_string())
        );
    }

    #[test]
    fn stepping_an_unevaluable_value_is_a_noop() {
        let config = StepConfig::default();

        assert_eq!(step(&FieldValue::new("3+"), StepDirection::Up, false, &config), None);
        assert_eq!(step(&FieldValue::empty(), StepDirection::Down, false, &config), None);
    }

    #[test]
    fn shift_steps_by_the_big_increment() {
        let config = StepConfig::default();

        assert_eq!(
            step(&FieldValue::new("5"), StepDirection::Up, true, &config),
            Some("15".to_string())
        );
    }

    #[test]
    fn stepping_clamps_to_bounds_and_then_ignores_the_key() {
        let config = StepConfig {
            minimum: Some(0.0),
            ..StepConfig::default()
        };

        // 2.5 -> 1.5 -> 0.5 -> clamped to exactly 0.0 -> no-op.
        let mut value = FieldValue::new("2.5");
        let mut seen = Vec::new();
        while let Some(next) = step(&value, StepDirection::Down, false, &config) {
            seen.push(next.clone());
            value = FieldValue::new(next);
        }
        assert_eq!(seen, ["1.5", "0.5", "0.0"]);

        let config = StepConfig {
            maximum: Some(100.0),
            ..StepConfig::default()
        };
        assert_eq!(
            step(&FieldValue::new("95"), StepDirection::Up, true, &config),
            Some("100".to_string())
        );
        assert_eq!(step(&FieldValue::new("100"), StepDirection::Up, true, &config), None);
    }

    #[test]
    fn mixed_steps_resolve_from_zero_without_a_minimum() {
        let config = StepConfig::default();

        assert_eq!(
            step(&FieldValue::Mixed, StepDirection::Up, false, &config),
            Some("1".to_string())
        );
        assert_eq!(
            step(&FieldValue::Mixed, StepDirection::Down, false, &config),
            Some("-1".to_string())
        );
        assert_eq!(
            step(&FieldValue::Mixed, StepDirection::Down, true, &config),
            Some("-10".to_string())
        );
    }

    #[test]
    fn mixed_steps_anchor_on_the_minimum_when_configured() {
        let config = StepConfig {
            minimum: Some(5.0),
            ..StepConfig::default()
        };

        assert_eq!(
            step(&FieldValue::Mixed, StepDirection::Down, false, &config),
            Some("5".to_string())
        );
        assert_eq!(
            step(&FieldValue::Mixed, StepDirection::Up, true, &config),
            Some("15".to_string())
        );
    }
}
