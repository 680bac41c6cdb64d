//! Display label shortening for charts.

use std::borrow::Cow;

/// Labels longer than this many characters are shortened for display.
pub const MAX_LABEL_CHARS: usize = 60;

const ELLIPSIS: &str = "...";

/// Cuts `text` to its first `max_chars` characters followed by `...`.
///
/// Text of at most `max_chars` characters is returned unchanged. Only the
/// rendered label is shortened, never the value it labels.
pub fn truncate_label(text: &str, max_chars: usize) -> Cow<'_, str> {
    match text.char_indices().nth(max_chars) {
        None => Cow::Borrowed(text),
        Some((end, _)) => Cow::Owned(format!("{}{ELLIPSIS}", &text[..end])),
    }
}
