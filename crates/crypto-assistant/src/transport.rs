//! Chat-transport message splitting.

/// Split `text` once so the head holds at most `limit` characters.
///
/// The head ends just after the last newline inside the first `limit`
/// characters, or at exactly `limit` characters when that window has no
/// newline. `head + tail == text`.
pub fn split_at_boundary(text: &str, limit: usize) -> (&str, &str) {
    let limit = limit.max(1);
    let Some((window_end, _)) = text.char_indices().nth(limit) else {
        return (text, "");
    };
    let cut = text[..window_end]
        .rfind('\n')
        .map_or(window_end, |idx| idx + 1);
    text.split_at(cut)
}

/// Split `text` into chunks of at most `limit` characters each.
///
/// Applies [`split_at_boundary`] until nothing is left; concatenating the
/// chunks reproduces `text`.
pub fn split_message(text: &str, limit: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        let (head, tail) = split_at_boundary(rest, limit);
        chunks.push(head.to_string());
        rest = tail;
    }
    chunks
}
