//! # field_core
//!
//! UI-agnostic editing core for the numeric form fields.
//!
//! This crate provides the building blocks the widget shell routes events
//! through:
//! - [`FieldValue`]: the tri-state field content (`Concrete` text or the
//!   `Mixed` marker for heterogeneous multi-selection)
//! - [`SelectionRange`]: a normalized byte-range text selection
//! - [`compose`]: pure selection-aware string surgery for edits
//! - [`count_fractional_digits`] / [`format_with_fractional_digits`]: the
//!   decimal-precision bookkeeping used by stepping
//! - [`decide_insertion`] / [`decide_paste`] / [`step`]: the editing
//!   engine proper
//!
//! ## Design Principles
//!
//! Every function here is pure and re-entrant. The engine retains no state
//! between calls: the caller owns the field value, the shell owns the
//! ephemeral caret/selection, and each event is decided independently from
//! explicit parameters. Rejections are silent — a rejected edit simply
//! produces [`EditDecision::Reject`] and nothing else.

mod compose;
mod engine;
mod selection;
mod sigfigs;
mod text;
mod value;

pub use compose::compose;
pub use engine::{EditDecision, StepConfig, StepDirection, decide_insertion, decide_paste, step};
pub use selection::SelectionRange;
pub use sigfigs::{count_fractional_digits, format_f64, format_with_fractional_digits};
pub use value::{FieldValue, MIXED_STRING, NumericValue, numeric_value};

// Caret utilities for shells that need boundary-safe cursor movement and
// click-to-caret hit testing with a custom measurement function.
pub use text::{caret_from_x, clamp_to_char_boundary, next_cursor_boundary, prev_cursor_boundary};
