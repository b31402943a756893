//! Cursor movement and scrolling for list views.

use core::ops::Range;

use super::constants::{LIST_FIRST_ROW, LIST_ROWS};
use crate::ui::DisplaySink;

/// Cursor after moving forward, wrapping to the first entry.
pub(super) const fn next(index: usize, len: usize) -> usize {
    (index + 1) % len
}

/// Cursor after moving back, wrapping to the last entry.
pub(super) const fn prev(index: usize, len: usize) -> usize {
    (index + len - 1) % len
}

/// Entries shown on screen: the first `LIST_ROWS`, or a window ending at the
/// cursor once it moves past them.
pub(super) fn window(len: usize, cursor: usize) -> Range<usize> {
    if len <= LIST_ROWS {
        return 0..len;
    }
    let start = (cursor + 1).saturating_sub(LIST_ROWS).min(len - LIST_ROWS);
    start..start + LIST_ROWS
}

/// Draw the visible entries from [`LIST_FIRST_ROW`], inverting the cursor.
pub(super) fn draw<S, F>(sink: &mut S, len: usize, cursor: usize, label: F) -> Result<(), S::Error>
where
    S: DisplaySink,
    F: Fn(usize) -> &'static str,
{
    for (offset, index) in window(len, cursor).enumerate() {
        sink.draw_text(LIST_FIRST_ROW + offset as u8, label(index), index == cursor)?;
    }
    Ok(())
}
