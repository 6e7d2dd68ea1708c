/// Markup and control symbols that must never reach the synthesis backend.
pub const FORBIDDEN_SYMBOLS: &[char] = &[
    '*', '_', '`', '~', '^', '<', '>', '#', '{', '}', '[', ']', '|', '\\',
];

/// Strips markdown-ish symbols, collapses whitespace runs to one space and trims.
pub fn sanitize(text: &str) -> String {
    let stripped: String = text
        .chars()
        .filter(|c| !FORBIDDEN_SYMBOLS.contains(c))
        .collect();

    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}
