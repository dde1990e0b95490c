//! UTF-8 caret utilities for the widget shell.
//!
//! Field values are almost always ASCII, but nothing stops a paste from
//! carrying arbitrary text through the validation path, so every caret
//! movement stays boundary-safe.

/// Clamp an arbitrary byte index to a valid UTF-8 character boundary.
///
/// Indices past the end clamp to `s.len()`; indices inside a multi-byte
/// character move back to its start.
///
/// # Examples
///
/// ```
/// use field_core::clamp_to_char_boundary;
///
/// let s = "a€b"; // '€' is 3 bytes
/// assert_eq!(clamp_to_char_boundary(s, 2), 1);
/// assert_eq!(clamp_to_char_boundary(s, 100), 5);
/// ```
#[inline]
pub fn clamp_to_char_boundary(s: &str, index: usize) -> usize {
    let mut index = index.min(s.len());
    while index > 0 && !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// The previous caret position before `i`, or 0 at the start.
///
/// # Examples
///
/// ```
/// use field_core::prev_cursor_boundary;
///
/// assert_eq!(prev_cursor_boundary("1.5", 2), 1);
/// assert_eq!(prev_cursor_boundary("1.5", 0), 0);
/// ```
pub fn prev_cursor_boundary(s: &str, i: usize) -> usize {
    let i = clamp_to_char_boundary(s, i);
    if i == 0 {
        return 0;
    }
    s[..i]
        .char_indices()
        .last()
        .map(|(idx, _)| idx)
        .unwrap_or(0)
}

/// The next caret position after `i`, or `s.len()` at the end.
///
/// # Examples
///
/// ```
/// use field_core::next_cursor_boundary;
///
/// assert_eq!(next_cursor_boundary("1.5", 1), 2);
/// assert_eq!(next_cursor_boundary("1.5", 3), 3);
/// ```
pub fn next_cursor_boundary(s: &str, i: usize) -> usize {
    let i = clamp_to_char_boundary(s, i);
    if i >= s.len() {
        return s.len();
    }
    let mut it = s[i..].char_indices();
    let _ = it.next(); // char at position 0
    it.next().map(|(idx, _)| i + idx).unwrap_or(s.len())
}

/// The caret position (byte index) nearest to an x-coordinate, given a
/// function measuring the pixel width of a prefix substring.
///
/// Field values are short, so a linear walk over boundaries is plenty; the
/// caret snaps to whichever side of the hit character is closer.
pub fn caret_from_x(value: &str, x: f32, mut measure_prefix: impl FnMut(&str) -> f32) -> usize {
    if value.is_empty() {
        return 0;
    }

    let x = x.max(0.0);
    let mut prev_idx = 0;
    let mut prev_w = 0.0f32;

    for idx in value
        .char_indices()
        .map(|(i, c)| i + c.len_utf8())
    {
        let w = measure_prefix(&value[..idx]).max(0.0);
        if w >= x {
            // Snap to the nearer of the two surrounding boundaries.
            return if x - prev_w <= w - x { prev_idx } else { idx };
        }
        prev_idx = idx;
        prev_w = w;
    }

    value.len()
}
