// Column resolution.
//
// Sheet headers drift: people paste titles with a trailing space, a BOM
// from an exported CSV, or a zero-width space from a chat client. The
// target column is found by exact match first, then by a space-insensitive
// match.

/// Characters removed from headers before any comparison.
const INVISIBLE_CHARS: [char; 2] = ['\u{200B}', '\u{FEFF}'];

/// Strip zero-width spaces and BOMs, then surrounding whitespace.
pub fn clean_header(header: &str) -> String {
    header
        .chars()
        .filter(|c| !INVISIBLE_CHARS.contains(c))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Clean every header in order.
pub fn clean_headers<S: AsRef<str>>(headers: &[S]) -> Vec<String> {
    headers.iter().map(|h| clean_header(h.as_ref())).collect()
}

/// Find the header that names `target`.
///
/// Exact match wins; otherwise the first header that equals `target` once
/// spaces are removed from both. `None` means the sheet has no such
/// column, which callers treat as "no data".
pub fn find_target_column<'a, S: AsRef<str>>(headers: &'a [S], target: &str) -> Option<&'a str> {
    if let Some(exact) = headers.iter().find(|h| h.as_ref() == target) {
        return Some(exact.as_ref());
    }

    let squeezed_target = strip_spaces(target);
    headers
        .iter()
        .map(AsRef::as_ref)
        .find(|h| strip_spaces(h) == squeezed_target)
}

fn strip_spaces(s: &str) -> String {
    s.replace(' ', "")
}
