//! Scenario replay against the pure engine.
//!
//! The runner models what the shell does around the engine: the field
//! starts focused with everything selected, admitted insertions collapse
//! the selection to a caret after the inserted text, and a step leaves the
//! new value fully selected. Rejections change nothing.

use std::fmt::Write;

use field_core::{
    EditDecision, FieldValue, NumericValue, SelectionRange, StepDirection, decide_insertion,
    decide_paste, numeric_value, step,
};

use crate::scenario::{Direction, EventSpec, Scenario};

const NUMERIC_TOLERANCE: f64 = 1e-9;

/// Replay `scenario`, returning a transcript-bearing error on mismatch.
pub fn run_scenario(scenario: &Scenario) -> Result<(), String> {
    let config = scenario.config.to_config();
    let mut value = match &scenario.value {
        Some(text) => FieldValue::new(text.clone()),
        None => FieldValue::Mixed,
    };
    // Focus selects everything, so the first keystroke replaces.
    let mut selection = SelectionRange::all_of(value.as_concrete().unwrap_or(""));
    let mut transcript = vec![format!("start: {:?}", value.as_raw())];

    for event in &scenario.events {
        match event {
            EventSpec::Type { text } => {
                for ch in text.chars() {
                    let typed = ch.to_string();
                    match decide_insertion(&value, selection, &typed, &config) {
                        EditDecision::Admit(candidate) => {
                            let caret = selection.start + typed.len();
                            value = FieldValue::Concrete(candidate);
                            selection = SelectionRange::caret(caret);
                            transcript.push(format!("type {typed:?}: -> {:?}", value.as_raw()));
                        }
                        EditDecision::Reject => {
                            transcript.push(format!("type {typed:?}: rejected"));
                        }
                    }
                }
            }

            EventSpec::Paste { text } => match decide_paste(&value, selection, text, &config) {
                EditDecision::Admit(candidate) => {
                    let caret = selection.start + text.len();
                    value = FieldValue::Concrete(candidate);
                    selection = SelectionRange::caret(caret);
                    transcript.push(format!("paste {text:?}: -> {:?}", value.as_raw()));
                }
                EditDecision::Reject => {
                    transcript.push(format!("paste {text:?}: rejected"));
                }
            },

            EventSpec::Arrow { direction, shift } => {
                let direction = match direction {
                    Direction::Up => StepDirection::Up,
                    Direction::Down => StepDirection::Down,
                };
                match step(&value, direction, *shift, &config) {
                    Some(next) => {
                        value = FieldValue::Concrete(next);
                        selection = SelectionRange::all_of(value.as_concrete().unwrap_or(""));
                        transcript.push(format!("arrow {direction:?}: -> {:?}", value.as_raw()));
                    }
                    None => {
                        transcript.push(format!("arrow {direction:?}: no-op"));
                    }
                }
            }
        }
    }

    check_expectation(scenario, &value).map_err(|mismatch| {
        let mut report = format!("scenario '{}' failed: {mismatch}\n", scenario.name);
        for line in &transcript {
            let _ = writeln!(&mut report, "  {line}");
        }
        report
    })
}

fn check_expectation(scenario: &Scenario, value: &FieldValue) -> Result<(), String> {
    let expect = &scenario.expect;

    match (&expect.value, expect.mixed) {
        (Some(text), _) => {
            if value.as_concrete() != Some(text.as_str()) {
                return Err(format!(
                    "expected value {:?}, got {:?}",
                    text,
                    value.as_raw()
                ));
            }
        }
        (None, true) => {
            if !value.is_mixed() {
                return Err(format!("expected mixed, got {:?}", value.as_raw()));
            }
        }
        (None, false) => unreachable!("validated at parse time"),
    }

    let numeric = numeric_value(value);
    if let Some(expected) = expect.numeric {
        match numeric {
            NumericValue::Value(actual) if (actual - expected).abs() <= NUMERIC_TOLERANCE => {}
            other => {
                return Err(format!("expected numeric {expected}, got {other:?}"));
            }
        }
    }
    if expect.invalid && numeric != NumericValue::Invalid {
        return Err(format!("expected an unevaluable value, got {numeric:?}"));
    }

    Ok(())
}
