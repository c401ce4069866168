/// Turn arbitrary text into a URL path segment.
///
/// Lowercases the input, collapses every run of characters outside
/// `[a-z0-9]` into a single `-`, and trims leading/trailing separators.
/// Used for game slugs derived from titles and for tag/category URLs.
pub fn slugify(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_sep = false;
    for c in input.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_sep && !out.is_empty() {
                out.push('-');
            }
            pending_sep = false;
            out.push(c);
        } else {
            pending_sep = true;
        }
    }
    out
}

/// Top-level directories the generated site uses for its own pages and
/// assets. A game with one of these slugs would overwrite them.
pub const RESERVED_SLUGS: [&str; 8] = [
    "browse",
    "new-games",
    "popular-games",
    "tags",
    "categories",
    "tag",
    "category",
    "assets",
];

pub fn is_reserved(slug: &str) -> bool {
    RESERVED_SLUGS.contains(&slug)
}
