pub mod categories;
pub mod products;
pub mod tags;

/// Trims the input, collapses whitespace runs into single spaces and drops
/// control characters.
pub(crate) fn sanitize_inline_text(input: &str) -> String {
    let mut sanitized = String::with_capacity(input.len());
    let mut previous_whitespace = false;

    for ch in input.trim().chars() {
        if ch.is_whitespace() {
            if !previous_whitespace {
                sanitized.push(' ');
                previous_whitespace = true;
            }
        } else if ch.is_control() {
            continue;
        } else {
            sanitized.push(ch);
            previous_whitespace = false;
        }
    }

    sanitized
}

/// Resolves a field that clients may spell two ways.
///
/// Returns the sanitized `preferred` value when it is non-blank, otherwise the
/// sanitized `fallback`, otherwise `None`.
pub(crate) fn resolve_alias(preferred: Option<&str>, fallback: Option<&str>) -> Option<String> {
    [preferred, fallback]
        .into_iter()
        .flatten()
        .map(sanitize_inline_text)
        .find(|value| !value.is_empty())
}
