//! Ephemeral per-field editing state.
//!
//! The caller owns the field value; this is only the caret, selection
//! anchor, and horizontal scroll the shell keeps between frames (in egui
//! memory). The value text is passed into every method because it lives
//! elsewhere.

use field_core::{
    SelectionRange, clamp_to_char_boundary, next_cursor_boundary, prev_cursor_boundary,
};

#[derive(Clone, Debug, Default)]
pub struct EditState {
    /// Caret position as a byte index (kept on a UTF-8 char boundary).
    pub caret: usize,
    /// Selection anchor; the selection is `min(anchor, caret)..max(anchor, caret)`.
    pub selection_anchor: Option<usize>,
    /// Horizontal scroll offset in px.
    pub scroll_x: f32,
}

impl EditState {
    /// Clamp caret and anchor to valid boundaries of `value`. Called before
    /// any use, since the caller may have replaced the value externally.
    pub fn clamp(&mut self, value: &str) {
        self.caret = clamp_to_char_boundary(value, self.caret);
        if let Some(anchor) = self.selection_anchor {
            let anchor = clamp_to_char_boundary(value, anchor);
            self.selection_anchor = (anchor != self.caret).then_some(anchor);
        }
        self.scroll_x = self.scroll_x.max(0.0);
    }

    /// The current selection, or a collapsed caret range when nothing is
    /// selected.
    pub fn selection_or_caret(&self, value: &str) -> SelectionRange {
        match self.selection(value) {
            Some(selection) => selection,
            None => SelectionRange::caret(clamp_to_char_boundary(value, self.caret)),
        }
    }

    /// The current non-empty selection, if any.
    pub fn selection(&self, value: &str) -> Option<SelectionRange> {
        let anchor = clamp_to_char_boundary(value, self.selection_anchor?);
        let caret = clamp_to_char_boundary(value, self.caret);
        (anchor != caret).then(|| SelectionRange::new(anchor, caret))
    }

    pub fn select_all(&mut self, value: &str) {
        self.caret = value.len();
        self.selection_anchor = (!value.is_empty()).then_some(0);
    }

    /// Collapse the selection and put the caret at `caret`.
    pub fn collapse_to(&mut self, value: &str, caret: usize) {
        self.caret = clamp_to_char_boundary(value, caret);
        self.selection_anchor = None;
    }

    /// Set the caret; with `selecting`, extend/modify the selection from
    /// the existing anchor (or start one at the old caret).
    pub fn set_caret(&mut self, value: &str, caret: usize, selecting: bool) {
        let caret = clamp_to_char_boundary(value, caret);
        if selecting {
            if self.selection_anchor.is_none() {
                self.selection_anchor = Some(self.caret);
            }
            self.caret = caret;
            // A collapsed selection keeps no anchor, so it cannot go "sticky".
            if self.selection_anchor == Some(self.caret) {
                self.selection_anchor = None;
            }
        } else {
            self.collapse_to(value, caret);
        }
    }

    pub fn move_left(&mut self, value: &str, selecting: bool) {
        if !selecting && let Some(selection) = self.selection(value) {
            self.collapse_to(value, selection.start);
            return;
        }
        self.set_caret(value, prev_cursor_boundary(value, self.caret), selecting);
    }

    pub fn move_right(&mut self, value: &str, selecting: bool) {
        if !selecting && let Some(selection) = self.selection(value) {
            self.collapse_to(value, selection.end);
            return;
        }
        self.set_caret(value, next_cursor_boundary(value, self.caret), selecting);
    }

    pub fn move_to_start(&mut self, value: &str, selecting: bool) {
        self.set_caret(value, 0, selecting);
    }

    pub fn move_to_end(&mut self, value: &str, selecting: bool) {
        self.set_caret(value, value.len(), selecting);
    }

    /// The range a backspace would delete: the selection, or one character
    /// before the caret. `None` at the start of an empty selection.
    pub fn backspace_range(&self, value: &str) -> Option<SelectionRange> {
        if let Some(selection) = self.selection(value) {
            return Some(selection);
        }
        let caret = clamp_to_char_boundary(value, self.caret);
        (caret > 0).then(|| SelectionRange::new(prev_cursor_boundary(value, caret), caret))
    }

    /// The range a forward delete would remove: the selection, or one
    /// character after the caret.
    pub fn delete_range(&self, value: &str) -> Option<SelectionRange> {
        if let Some(selection) = self.selection(value) {
            return Some(selection);
        }
        let caret = clamp_to_char_boundary(value, self.caret);
        (caret < value.len()).then(|| SelectionRange::new(caret, next_cursor_boundary(value, caret)))
    }

    /// Scroll horizontally just enough to keep the caret visible, with a
    /// small margin; never re-centers when the caret is already in view.
    pub fn update_scroll_for_caret(&mut self, caret_px: f32, text_w: f32, available_w: f32) {
        let available_w = available_w.max(0.0);
        let text_w = text_w.max(0.0);
        let caret_px = caret_px.clamp(0.0, text_w);

        if available_w <= 0.0 || text_w <= available_w {
            self.scroll_x = 0.0;
            return;
        }

        let max_scroll = text_w - available_w;
        let mut scroll_x = self.scroll_x.clamp(0.0, max_scroll);

        let margin: f32 = 4.0;
        let left_limit = margin.min(available_w);
        let right_limit = (available_w - margin).max(left_limit);

        let caret_in_view = caret_px - scroll_x;
        if caret_in_view < left_limit {
            scroll_x = (caret_px - left_limit).max(0.0);
        } else if caret_in_view > right_limit {
            scroll_x = (caret_px - right_limit).min(max_scroll);
        }

        self.scroll_x = scroll_x;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_all_then_collapse() {
        let value = "1.50";
        let mut state = EditState::default();

        state.select_all(value);
        assert_eq!(state.selection(value), Some(SelectionRange::new(0, 4)));

        state.collapse_to(value, 2);
        assert_eq!(state.selection(value), None);
        assert_eq!(state.caret, 2);
    }

    #[test]
    fn arrow_moves_collapse_selection_to_its_edges() {
        let value = "150";
        let mut state = EditState::default();
        state.select_all(value);

        state.move_left(value, false);
        assert_eq!(state.caret, 0);
        assert_eq!(state.selection(value), None);

        state.select_all(value);
        state.move_right(value, false);
        assert_eq!(state.caret, 3);
        assert_eq!(state.selection(value), None);
    }

    #[test]
    fn shift_arrows_grow_and_shrink_the_selection() {
        let value = "150";
        let mut state = EditState::default();
        state.collapse_to(value, 3);

        state.move_left(value, true);
        state.move_left(value, true);
        assert_eq!(state.selection(value), Some(SelectionRange::new(1, 3)));

        state.move_right(value, true);
        assert_eq!(state.selection(value), Some(SelectionRange::new(2, 3)));

        // Collapsing back onto the anchor clears it.
        state.move_right(value, true);
        assert_eq!(state.selection(value), None);
    }

    #[test]
    fn backspace_and_delete_ranges() {
        let value = "3+4";
        let mut state = EditState::default();

        state.collapse_to(value, 0);
        assert_eq!(state.backspace_range(value), None);
        assert_eq!(state.delete_range(value), Some(SelectionRange::new(0, 1)));

        state.collapse_to(value, 3);
        assert_eq!(state.backspace_range(value), Some(SelectionRange::new(2, 3)));
        assert_eq!(state.delete_range(value), None);

        state.select_all(value);
        assert_eq!(state.backspace_range(value), Some(SelectionRange::new(0, 3)));
        assert_eq!(state.delete_range(value), Some(SelectionRange::new(0, 3)));
    }

    #[test]
    fn clamp_recovers_from_external_value_changes() {
        let mut state = EditState::default();
        state.select_all("123456");

        state.clamp("12");
        assert_eq!(state.caret, 2);
        assert_eq!(state.selection("12"), Some(SelectionRange::new(0, 2)));
    }

    #[test]
    fn scroll_follows_the_caret_only_when_it_leaves_view() {
        let mut state = EditState::default();

        // Text fits: no scroll.
        state.update_scroll_for_caret(10.0, 40.0, 100.0);
        assert_eq!(state.scroll_x, 0.0);

        // Caret at the far right of overflowing text: scroll right.
        state.update_scroll_for_caret(200.0, 200.0, 100.0);
        assert!(state.scroll_x > 0.0);
        let settled = state.scroll_x;

        // Small caret move still in view: scroll unchanged.
        state.update_scroll_for_caret(195.0, 200.0, 100.0);
        assert_eq!(state.scroll_x, settled);

        // Caret back at the start: scroll home.
        state.update_scroll_for_caret(0.0, 200.0, 100.0);
        assert_eq!(state.scroll_x, 0.0);
    }
}
