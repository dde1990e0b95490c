//! Field value and its numeric interpretation.

use numeric_expr::evaluate_numeric_expression;

/// Reserved string for callers that round-trip a field value through
/// string-typed storage (form state maps, serialized documents).
///
/// Inside this crate the mixed state is always the [`FieldValue::Mixed`]
/// variant; the sentinel only exists at the raw-string boundary, so a
/// future grammar admitting this literal as real input cannot collide with
/// the mixed state.
pub const MIXED_STRING: &str = "Mixed";

/// The authoritative content of a numeric field.
///
/// `Concrete` holds whatever the user has typed so far — including the
/// empty string and not-yet-evaluable expressions like `"3+"`. `Mixed`
/// stands for "multiple differing underlying values collapsed into one
/// field" and has no text of its own.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Concrete(String),
    Mixed,
}

impl FieldValue {
    pub fn new(text: impl Into<String>) -> Self {
        FieldValue::Concrete(text.into())
    }

    pub fn empty() -> Self {
        FieldValue::Concrete(String::new())
    }

    #[inline]
    pub fn is_mixed(&self) -> bool {
        matches!(self, FieldValue::Mixed)
    }

    /// The concrete text, if any.
    #[inline]
    pub fn as_concrete(&self) -> Option<&str> {
        match self {
            FieldValue::Concrete(text) => Some(text),
            FieldValue::Mixed => None,
        }
    }

    /// Convert from the raw-string boundary: [`MIXED_STRING`] maps to
    /// `Mixed`, everything else is concrete text.
    pub fn from_raw(raw: &str) -> Self {
        if raw == MIXED_STRING {
            FieldValue::Mixed
        } else {
            FieldValue::Concrete(raw.to_string())
        }
    }

    /// Convert to the raw-string boundary.
    pub fn as_raw(&self) -> &str {
        match self {
            FieldValue::Concrete(text) => text,
            FieldValue::Mixed => MIXED_STRING,
        }
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::empty()
    }
}

/// The numeric interpretation of a field value, as reported at the
/// numeric-callback boundary.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NumericValue {
    /// A finite evaluated number.
    Value(f64),
    /// Grammar-acceptable but not (yet) reducible to a finite number, e.g.
    /// an empty field or a trailing operator. A normal transient state.
    Invalid,
    /// Multiple differing underlying values.
    Mixed,
}

impl NumericValue {
    /// The finite number, if any.
    #[inline]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            NumericValue::Value(n) => Some(*n),
            _ => None,
        }
    }
}

/// Derive the numeric interpretation of `value`.
pub fn numeric_value(value: &FieldValue) -> NumericValue {
    match value {
        FieldValue::Mixed => NumericValue::Mixed,
        FieldValue::Concrete(text) => match evaluate_numeric_expression(text) {
            Some(n) => NumericValue::Value(n),
            None => NumericValue::Invalid,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_boundary_round_trips() {
        assert_eq!(FieldValue::from_raw("3+4"), FieldValue::new("3+4"));
        assert_eq!(FieldValue::from_raw(MIXED_STRING), FieldValue::Mixed);
        assert_eq!(FieldValue::Mixed.as_raw(), MIXED_STRING);
        assert_eq!(FieldValue::new("1.5").as_raw(), "1.5");
    }

    #[test]
    fn numeric_value_by_regime() {
        assert_eq!(numeric_value(&FieldValue::Mixed), NumericValue::Mixed);
        assert_eq!(
            numeric_value(&FieldValue::new("3+4")),
            NumericValue::Value(7.0)
        );
        assert_eq!(numeric_value(&FieldValue::new("3+")), NumericValue::Invalid);
        assert_eq!(numeric_value(&FieldValue::empty()), NumericValue::Invalid);
    }

    #[test]
    fn numeric_value_is_pure() {
        let value = FieldValue::new("1.5*2");
        assert_eq!(numeric_value(&value), numeric_value(&value));
    }
}
