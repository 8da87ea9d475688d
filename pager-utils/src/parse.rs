/// Parse a typed selection reply into a stable item index.
///
/// The reply must consist only of ASCII digits and name an index in
/// `[0, item_count)`. Anything else (signs, whitespace, brackets, overflow)
/// does not match, so the caller keeps waiting instead of failing.
pub fn parse_selection_index(content: &str, item_count: usize) -> Option<usize> {
    if content.is_empty() || !content.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }

    content
        .parse::<usize>()
        .ok()
        .filter(|index| *index < item_count)
}

/// Split a `a | b | c` argument into trimmed, non-empty items.
pub fn parse_item_list(raw: &str) -> Vec<String> {
    raw.split('|')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

/// Parse an optional positive count argument, falling back to `default`.
///
/// Returns `None` when a value is present but is not a positive integer.
pub fn parse_positive_count(raw: Option<&str>, default: usize) -> Option<usize> {
    match raw {
        Some(value) => value.trim().parse::<usize>().ok().filter(|count| *count >= 1),
        None => Some(default),
    }
}
