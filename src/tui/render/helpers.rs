use ratatui::style::Style;
use ratatui::text::Span;

use crate::util::unicode;

/// Checkbox for a task row
pub(super) fn check_symbol(completed: bool) -> &'static str {
    if completed { "[x]" } else { "[ ]" }
}

/// Compute total display width of a slice of spans
pub(super) fn spans_width(spans: &[Span]) -> usize {
    spans
        .iter()
        .map(|s| unicode::display_width(&s.content))
        .sum()
}

/// Append `right` to `left`, padded so it ends at column `width`.
/// `right` is dropped when it does not fit.
pub(super) fn push_right_aligned<'a>(
    left: &mut Vec<Span<'a>>,
    right: Vec<Span<'a>>,
    width: usize,
    pad_style: Style,
) {
    let used = spans_width(left);
    let right_width = spans_width(&right);
    if used + right_width >= width {
        return;
    }
    left.push(Span::styled(" ".repeat(width - used - right_width), pad_style));
    left.extend(right);
}
