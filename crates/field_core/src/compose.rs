//! Selection-aware string surgery for edits.

use crate::selection::SelectionRange;
use crate::text::clamp_to_char_boundary;

/// Build the candidate text for an edit: replace the selected range of
/// `current` with `inserted`.
///
/// A collapsed selection is a pure insertion at the caret. This layer does
/// no validation — it is structural surgery only and always succeeds;
/// out-of-range or mid-character offsets are clamped to the nearest valid
/// boundary instead of panicking.
///
/// # Examples
///
/// ```
/// use field_core::{SelectionRange, compose};
///
/// // Insertion at a caret.
/// assert_eq!(compose("15", SelectionRange::caret(1), "."), "1.5");
/// // Replacement of a selection.
/// assert_eq!(compose("1.50", SelectionRange::new(0, 4), "2"), "2");
/// // Insertion at the end.
/// assert_eq!(compose("3", SelectionRange::caret(1), "+"), "3+");
/// ```
pub fn compose(current: &str, selection: SelectionRange, inserted: &str) -> String {
    let start = clamp_to_char_boundary(current, selection.start);
    let end = clamp_to_char_boundary(current, selection.end).max(start);

    let mut out = String::with_capacity(current.len() - (end - start) + inserted.len());
    out.push_str(&current[..start]);
    out.push_str(inserted);
    out.push_str(&current[end..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inserts_at_caret() {
        assert_eq!(compose("34", SelectionRange::caret(0), "-"), "-34");
        assert_eq!(compose("34", SelectionRange::caret(1), "."), "3.4");
        assert_eq!(compose("34", SelectionRange::caret(2), "5"), "345");
    }

    #[test]
    fn replaces_selection() {
        assert_eq!(compose("1.50", SelectionRange::new(2, 4), "75"), "1.75");
        assert_eq!(compose("100", SelectionRange::all_of("100"), "7"), "7");
    }

    #[test]
    fn empty_insertion_deletes_the_selection() {
        assert_eq!(compose("3+4", SelectionRange::new(1, 2), ""), "34");
    }

    #[test]
    fn out_of_range_offsets_are_clamped() {
        assert_eq!(compose("12", SelectionRange::new(5, 9), "3"), "123");
        assert_eq!(compose("", SelectionRange::caret(4), "7"), "7");
    }

    #[test]
    fn multibyte_offsets_snap_to_boundaries() {
        // Mid-character offsets move back to the character start.
        assert_eq!(compose("a€b", SelectionRange::new(2, 4), "x"), "axb");
    }
}
