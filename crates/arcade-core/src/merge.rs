//! Splice regenerated content regions into a previously written page.
//!
//! A region is an element carrying a stable `id`. Merging replaces the inner
//! content of each region in the old document with the inner content of the
//! same region in the new document. The region's own start tag, its siblings
//! and everything outside it are kept byte for byte, so hand edits elsewhere
//! in the page survive regeneration.

use std::ops::Range;

use serde::Serialize;

/// Elements that never have content or an end tag.
const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose content is raw text and must not be scanned for tags.
const RAW_TEXT_ELEMENTS: [&str; 4] = ["script", "style", "textarea", "title"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergeOutcome {
    pub html: String,
    /// Regions whose content was replaced.
    pub replaced: Vec<String>,
    /// Regions present in the new document but not in the old one.
    pub missing: Vec<String>,
}

impl MergeOutcome {
    /// True when the old document was kept and patched.
    pub fn merged(&self) -> bool {
        !self.replaced.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagKind {
    Start,
    End,
}

#[derive(Debug, Clone)]
struct Tag {
    kind: TagKind,
    name: String,
    id: Option<String>,
    self_closing: bool,
    /// Byte range of the whole tag, `<` through `>`.
    span: Range<usize>,
}

impl Tag {
    fn opens_content(&self) -> bool {
        self.kind == TagKind::Start
            && !self.self_closing
            && !VOID_ELEMENTS.contains(&self.name.as_str())
    }
}

/// Streams start and end tags out of an HTML document, skipping text,
/// comments, doctypes and raw-text element bodies.
struct TagScanner<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> TagScanner<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn bytes(&self) -> &'a [u8] {
        self.src.as_bytes()
    }

    /// Index just past the next `>` at or after `from`, or end of input.
    fn skip_past_gt(&self, from: usize) -> usize {
        find_from(self.bytes(), from, b">").map_or(self.src.len(), |i| i + 1)
    }

    fn read_name(&self, mut i: usize) -> (String, usize) {
        let bytes = self.bytes();
        let start = i;
        while i < bytes.len()
            && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'-' || bytes[i] == b':')
        {
            i += 1;
        }
        (self.src[start..i].to_ascii_lowercase(), i)
    }

    /// Parse attributes from `i` up to and including the closing `>`.
    /// Returns (id, self_closing, index past `>`).
    fn read_attributes(&self, mut i: usize) -> (Option<String>, bool, usize) {
        let bytes = self.bytes();
        let mut id = None;
        let mut self_closing = false;
        while i < bytes.len() {
            match bytes[i] {
                b'>' => return (id, self_closing, i + 1),
                b'/' => {
                    self_closing = true;
                    i += 1;
                    continue;
                },
                c if c.is_ascii_whitespace() => {
                    i += 1;
                    continue;
                },
                _ => {},
            }
            self_closing = false;
            let name_start = i;
            while i < bytes.len()
                && !bytes[i].is_ascii_whitespace()
                && !matches!(bytes[i], b'=' | b'>' | b'/')
            {
                i += 1;
            }
            let attr_name = &self.src[name_start..i];
            while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            if i >= bytes.len() || bytes[i] != b'=' {
                continue;
            }
            i += 1;
            while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            let value = match bytes.get(i) {
                Some(&q @ (b'"' | b'\'')) => {
                    let value_start = i + 1;
                    let value_end = find_from(bytes, value_start, &[q]).unwrap_or(bytes.len());
                    i = (value_end + 1).min(bytes.len());
                    &self.src[value_start..value_end]
                },
                _ => {
                    let value_start = i;
                    while i < bytes.len() && !bytes[i].is_ascii_whitespace() && bytes[i] != b'>' {
                        i += 1;
                    }
                    &self.src[value_start..i]
                },
            };
            if attr_name.eq_ignore_ascii_case("id") && id.is_none() {
                id = Some(value.to_string());
            }
        }
        (id, self_closing, bytes.len())
    }

    /// Jump to the `</name` that closes a raw-text element.
    fn skip_raw_text(&mut self, name: &str) {
        let needle = format!("</{name}");
        let lower = self.src[self.pos..].to_ascii_lowercase();
        self.pos = match lower.find(&needle) {
            Some(offset) => self.pos + offset,
            None => self.src.len(),
        };
    }
}

impl Iterator for TagScanner<'_> {
    type Item = Tag;

    fn next(&mut self) -> Option<Tag> {
        let bytes = self.bytes();
        loop {
            let lt = find_from(bytes, self.pos, b"<")?;
            let rest = &bytes[lt..];

            if rest.starts_with(b"<!--") {
                self.pos = find_from(bytes, lt + 4, b"-->").map_or(bytes.len(), |i| i + 3);
                continue;
            }
            if rest.starts_with(b"<!") || rest.starts_with(b"<?") {
                self.pos = self.skip_past_gt(lt);
                continue;
            }
            if rest.starts_with(b"</") && rest.get(2).is_some_and(u8::is_ascii_alphabetic) {
                let (name, after) = self.read_name(lt + 2);
                let end = self.skip_past_gt(after);
                self.pos = end;
                return Some(Tag {
                    kind: TagKind::End,
                    name,
                    id: None,
                    self_closing: false,
                    span: lt..end,
                });
            }
            if rest.get(1).is_some_and(u8::is_ascii_alphabetic) {
                let (name, after) = self.read_name(lt + 1);
                let (id, self_closing, end) = self.read_attributes(after);
                self.pos = end;
                if !self_closing && RAW_TEXT_ELEMENTS.contains(&name.as_str()) {
                    self.skip_raw_text(&name);
                }
                return Some(Tag {
                    kind: TagKind::Start,
                    name,
                    id,
                    self_closing,
                    span: lt..end,
                });
            }
            // A stray `<` in text.
            self.pos = lt + 1;
        }
    }
}

fn find_from(haystack: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
    if from >= haystack.len() || needle.is_empty() {
        return None;
    }
    haystack[from..]
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|i| from + i)
}

/// Byte range of the inner content of the element with `id`, if the element
/// exists, can hold content and is properly closed.
fn region_inner(src: &str, id: &str) -> Option<Range<usize>> {
    let mut scanner = TagScanner::new(src);
    let open = scanner.by_ref().find(|t| t.kind == TagKind::Start && t.id.as_deref() == Some(id))?;
    if !open.opens_content() {
        return None;
    }
    let mut depth = 1usize;
    for tag in scanner {
        if tag.name != open.name {
            continue;
        }
        match tag.kind {
            TagKind::Start if tag.opens_content() => depth += 1,
            TagKind::Start => {},
            TagKind::End => {
                depth -= 1;
                if depth == 0 {
                    return Some(open.span.end..tag.span.start);
                }
            },
        }
    }
    None
}

/// Replace the content of each region in `old` with its content from `new`.
///
/// Regions absent from `new` are skipped; regions absent from `old` are
/// reported in `missing`. When no region could be replaced the new document
/// is returned as is.
pub fn merge_regions(old: &str, new: &str, ids: &[&str]) -> MergeOutcome {
    let mut html = old.to_string();
    let mut replaced = Vec::new();
    let mut missing = Vec::new();

    for &id in ids {
        let Some(fresh) = region_inner(new, id) else {
            tracing::debug!(region = id, "Region not in regenerated page, skipping");
            continue;
        };
        let Some(stale) = region_inner(&html, id) else {
            missing.push(id.to_string());
            continue;
        };
        html.replace_range(stale, &new[fresh]);
        replaced.push(id.to_string());
    }

    if replaced.is_empty() {
        html = new.to_string();
    }
    MergeOutcome {
        html,
        replaced,
        missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_only_the_region() {
        let old = r#"<html><body><p>hand edit</p><div id="list-grid" class="grid"><a>old</a></div><footer>mine</footer></body></html>"#;
        let new = r#"<html><body><div id="list-grid" class="other"><a>new 1</a><a>new 2</a></div></body></html>"#;
        let out = merge_regions(old, new, &["list-grid"]);
        assert_eq!(
            out.html,
            r#"<html><body><p>hand edit</p><div id="list-grid" class="grid"><a>new 1</a><a>new 2</a></div><footer>mine</footer></body></html>"#
        );
        assert_eq!(out.replaced, vec!["list-grid"]);
        assert!(out.missing.is_empty());
        assert!(out.merged());
    }

    #[test]
    fn nested_same_name_elements() {
        let old = r#"<div id="r"><div><div>a</div></div><div>b</div></div><div>after</div>"#;
        let new = r#"<div id="r"><div>fresh</div></div>"#;
        let out = merge_regions(old, new, &["r"]);
        assert_eq!(out.html, r#"<div id="r"><div>fresh</div></div><div>after</div>"#);
    }

    #[test]
    fn nothing_matched_returns_new_document() {
        let old = "<html><body><div class=\"grid\">legacy</div></body></html>";
        let new = "<html><body><div id=\"list-grid\">fresh</div></body></html>";
        let out = merge_regions(old, new, &["list-grid"]);
        assert_eq!(out.html, new);
        assert_eq!(out.missing, vec!["list-grid"]);
        assert!(!out.merged());
    }

    #[test]
    fn empty_old_document_returns_new() {
        let new = "<div id=\"a\">x</div>";
        assert_eq!(merge_regions("", new, &["a"]).html, new);
    }

    #[test]
    fn region_missing_from_new_is_skipped() {
        let old = "<div id=\"a\">1</div><div id=\"b\">2</div>";
        let new = "<div id=\"a\">one</div>";
        let out = merge_regions(old, new, &["a", "b"]);
        assert_eq!(out.html, "<div id=\"a\">one</div><div id=\"b\">2</div>");
        assert_eq!(out.replaced, vec!["a"]);
        assert!(out.missing.is_empty());
    }

    #[test]
    fn partial_match_reports_missing() {
        let old = "<section><div id=\"popular-grid\">p</div></section>";
        let new = "<div id=\"popular-grid\">P</div><div id=\"new-grid\">N</div>";
        let out = merge_regions(old, new, &["popular-grid", "new-grid"]);
        assert_eq!(out.html, "<section><div id=\"popular-grid\">P</div></section>");
        assert_eq!(out.missing, vec!["new-grid"]);
    }

    #[test]
    fn ignores_markup_inside_scripts_and_comments() {
        let old = concat!(
            "<script>var s = '<div id=\"g\">fake</div>';</script>",
            "<!-- <div id=\"g\">commented</div> -->",
            "<div id='g'>real</div>"
        );
        let new = "<div id=\"g\">fresh</div>";
        let out = merge_regions(old, new, &["g"]);
        assert!(out.html.contains("fake</div>';</script>"));
        assert!(out.html.contains("<!-- <div id=\"g\">commented</div> -->"));
        assert!(out.html.ends_with("<div id='g'>fresh</div>"));
    }

    #[test]
    fn void_elements_do_not_affect_depth() {
        let old = "<DIV ID=grid><img src=\"a.png\"><br/><input value=\"<\"></DIV><p>tail</p>";
        let new = "<div id=\"grid\"><hr></div>";
        let out = merge_regions(old, new, &["grid"]);
        assert_eq!(out.html, "<DIV ID=grid><hr></DIV><p>tail</p>");
    }

    #[test]
    fn unclosed_region_is_missing() {
        let old = "<div id=\"a\"><p>never closed";
        let new = "<div id=\"a\">x</div>";
        let out = merge_regions(old, new, &["a"]);
        assert_eq!(out.missing, vec!["a"]);
        assert_eq!(out.html, new);
    }

    #[test]
    fn multibyte_content_is_preserved() {
        let old = "<p>café ☕</p><div id=\"a\">ü</div><p>ñ</p>";
        let new = "<div id=\"a\">日本</div>";
        let out = merge_regions(old, new, &["a"]);
        assert_eq!(out.html, "<p>café ☕</p><div id=\"a\">日本</div><p>ñ</p>");
    }

    #[test]
    fn attribute_values_with_gt() {
        let old = "<div data-x=\"a>b\" id=\"a\">old</div>";
        let new = "<div id=\"a\">new</div>";
        assert_eq!(
            merge_regions(old, new, &["a"]).html,
            "<div data-x=\"a>b\" id=\"a\">new</div>"
        );
    }
}
