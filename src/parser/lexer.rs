//! Tag Scanner
//!
//! Fast, tolerant tokenization of HTML into open/close tag events.
//! Text between tags is never tokenized; stray `<` characters are skipped.

use super::position::{LineIndex, Position};

/// Elements that never take a closing tag
pub const SELF_CLOSING_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose content is raw text and must not be scanned for tags
const RAW_TEXT_TAGS: &[&str] = &["script", "style"];

/// An opening or closing tag found in the source
#[derive(Debug, Clone, PartialEq)]
pub struct TagEvent<'a> {
    /// Lowercase tag name
    pub name: String,
    pub is_closing: bool,
    pub self_closing: bool,
    /// Everything between the tag name and the closing `>`
    pub attributes_raw: &'a str,
    /// Position of the opening `<`
    pub position: Position,
    /// Position just past the closing `>`
    pub end_position: Position,
    /// Byte offset of the opening `<`
    pub start: usize,
    /// Byte offset just past the closing `>`
    pub end: usize,
}

impl<'a> TagEvent<'a> {
    pub fn is_opening(&self) -> bool {
        !self.is_closing
    }

    /// Iterate the attributes declared on this tag
    pub fn attributes(&self) -> Attributes<'a> {
        Attributes::new(self.attributes_raw)
    }

    /// Find an attribute by name (case-insensitive)
    pub fn attribute(&self, name: &str) -> Option<Attribute<'a>> {
        self.attributes()
            .find(|attr| attr.name.eq_ignore_ascii_case(name))
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }
}

/// Lazy, restartable scanner over the tags of an HTML document
///
/// Call [`scan_tags`] again to rescan from the top; a clone resumes from the
/// same point. Each scan is finite and never fails.
#[derive(Debug, Clone)]
pub struct TagScanner<'a> {
    text: &'a str,
    index: LineIndex<'a>,
    offset: usize,
}

/// Scan `text` for tag events in document order
pub fn scan_tags(text: &str) -> TagScanner<'_> {
    TagScanner::new(text)
}

impl<'a> TagScanner<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            index: LineIndex::new(text),
            offset: 0,
        }
    }

    /// Try to read a tag starting at the `<` at `start`
    fn read_tag(&self, start: usize) -> Option<TagEvent<'a>> {
        let bytes = self.text.as_bytes();
        let mut cursor = start + 1;

        let is_closing = bytes.get(cursor) == Some(&b'/');
        if is_closing {
            cursor += 1;
        }

        // Tag names start with a letter; `<3` or `< b` in prose are not tags
        let name_start = cursor;
        if !bytes.get(cursor).is_some_and(u8::is_ascii_alphabetic) {
            return None;
        }
        while bytes.get(cursor).is_some_and(u8::is_ascii_alphanumeric) {
            cursor += 1;
        }
        let name = self.text[name_start..cursor].to_ascii_lowercase();

        let close = find_tag_end(bytes, cursor)?;
        let attributes_raw = &self.text[cursor..close];
        let end = close + 1;

        // Only void elements self-close; a trailing `/` on `<div/>` is ignored
        let self_closing = !is_closing && SELF_CLOSING_TAGS.contains(&name.as_str());

        Some(TagEvent {
            name,
            is_closing,
            self_closing,
            attributes_raw,
            position: self.index.position(start),
            end_position: self.index.position(end),
            start,
            end,
        })
    }

    /// Move past the content of a raw-text element up to its closing tag
    fn skip_raw_text(&mut self, name: &str) {
        let needle = format!("</{}", name);
        let rest = self.text[self.offset..].to_ascii_lowercase();
        self.offset = match rest.find(&needle) {
            Some(idx) => self.offset + idx,
            None => self.text.len(),
        };
    }
}

impl<'a> Iterator for TagScanner<'a> {
    type Item = TagEvent<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(rel) = self.text[self.offset..].find('<') {
            let start = self.offset + rel;

            // Comments are skipped wholesale, markup inside them is inert
            if self.text[start..].starts_with("<!--") {
                self.offset = match self.text[start + 4..].find("-->") {
                    Some(idx) => start + 4 + idx + 3,
                    None => self.text.len(),
                };
                continue;
            }

            match self.read_tag(start) {
                Some(event) => {
                    self.offset = event.end;
                    if event.is_opening()
                        && !event.self_closing
                        && RAW_TEXT_TAGS.contains(&event.name.as_str())
                    {
                        self.skip_raw_text(&event.name);
                    }
                    return Some(event);
                }
                None => self.offset = start + 1,
            }
        }

        self.offset = self.text.len();
        None
    }
}

/// Find the `>` closing a tag, ignoring any inside quoted attribute values.
///
/// An unterminated quote falls back to the first `>` after the name.
fn find_tag_end(bytes: &[u8], from: usize) -> Option<usize> {
    let mut quote: Option<u8> = None;
    let mut after_equals = false;

    for (idx, &b) in bytes.iter().enumerate().skip(from) {
        match quote {
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None => match b {
                b'>' => return Some(idx),
                b'=' => after_equals = true,
                b'"' | b'\'' if after_equals => quote = Some(b),
                b if b.is_ascii_whitespace() => {}
                _ => after_equals = false,
            },
        }
    }

    bytes[from..]
        .iter()
        .position(|&b| b == b'>')
        .map(|idx| from + idx)
}

/// A single attribute like `href="x"` or a bare `disabled`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attribute<'a> {
    pub name: &'a str,
    pub value: Option<&'a str>,
}

/// Iterator over the attributes in a raw attribute blob
#[derive(Debug, Clone)]
pub struct Attributes<'a> {
    raw: &'a str,
    cursor: usize,
}

impl<'a> Attributes<'a> {
    pub fn new(raw: &'a str) -> Self {
        Self { raw, cursor: 0 }
    }

    fn skip_while(&mut self, pred: impl Fn(u8) -> bool) {
        let bytes = self.raw.as_bytes();
        while self.cursor < bytes.len() && pred(bytes[self.cursor]) {
            self.cursor += 1;
        }
    }

    fn peek(&self) -> Option<u8> {
        self.raw.as_bytes().get(self.cursor).copied()
    }
}

impl<'a> Iterator for Attributes<'a> {
    type Item = Attribute<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.skip_while(|b| b.is_ascii_whitespace() || b == b'/');
            self.peek()?;

            let name_start = self.cursor;
            self.skip_while(|b| !(b.is_ascii_whitespace() || matches!(b, b'=' | b'/' | b'>')));
            let name = &self.raw[name_start..self.cursor];

            if name.is_empty() {
                // Stray `=` or `>` with no name in front
                self.cursor += 1;
                continue;
            }

            self.skip_while(|b| b.is_ascii_whitespace());
            if self.peek() != Some(b'=') {
                return Some(Attribute { name, value: None });
            }
            self.cursor += 1;
            self.skip_while(|b| b.is_ascii_whitespace());

            let value = match self.peek() {
                Some(q @ (b'"' | b'\'')) => {
                    let value_start = self.cursor + 1;
                    let value_end = self.raw[value_start..]
                        .find(q as char)
                        .map(|idx| value_start + idx)
                        .unwrap_or(self.raw.len());
                    self.cursor = (value_end + 1).min(self.raw.len());
                    &self.raw[value_start..value_end]
                }
                _ => {
                    let value_start = self.cursor;
                    self.skip_while(|b| !b.is_ascii_whitespace());
                    &self.raw[value_start..self.cursor]
                }
            };

            return Some(Attribute {
                name,
                value: Some(value),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(text: &str) -> Vec<String> {
        scan_tags(text)
            .map(|e| {
                if e.is_closing {
                    format!("/{}", e.name)
                } else {
                    e.name
                }
            })
            .collect()
    }

    #[test]
    fn test_scan_simple_document() {
        assert_eq!(
            names("<h1>Hi</h1><p>x</p>"),
            vec!["h1", "/h1", "p", "/p"]
        );
    }

    #[test]
    fn test_names_are_lowercased() {
        let events: Vec<_> = scan_tags("<DIV CLASS=\"a\"></Div>").collect();
        assert_eq!(events[0].name, "div");
        assert_eq!(events[1].name, "div");
        assert!(events[1].is_closing);
    }

    #[test]
    fn test_stray_angle_brackets_are_skipped() {
        assert_eq!(names("a < b and 3<4 <p>ok</p> <"), vec!["p", "/p"]);
    }

    #[test]
    fn test_unterminated_tag_is_skipped() {
        assert_eq!(names("<p>text</p><div"), vec!["p", "/p"]);
    }

    #[test]
    fn test_self_closing_table() {
        let events: Vec<_> = scan_tags("<img src=\"a.png\"><br/><div/><p>").collect();
        assert!(events[0].self_closing);
        assert!(events[1].self_closing);
        assert!(!events[2].self_closing);
        assert!(!events[3].self_closing);
    }

    #[test]
    fn test_trailing_slash_in_unquoted_value() {
        let events: Vec<_> = scan_tags("<a href=https://example.com/>Home</a>").collect();
        assert_eq!(events.len(), 2);
        assert!(!events[0].self_closing);
        assert_eq!(
            events[0].attribute("href").unwrap().value,
            Some("https://example.com/")
        );
    }

    #[test]
    fn test_doctype_and_comments_are_not_tags() {
        assert_eq!(
            names("<!DOCTYPE html><!-- <p> hidden --><html></html>"),
            vec!["html", "/html"]
        );
    }

    #[test]
    fn test_script_content_is_not_scanned() {
        assert_eq!(
            names("<script>if (a<b && c>d) {}</script><p></p>"),
            vec!["script", "/script", "p", "/p"]
        );
    }

    #[test]
    fn test_quoted_greater_than_in_attribute() {
        let events: Vec<_> = scan_tags("<a title=\"x > y\" href=\"#\">go</a>").collect();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].attribute("title").unwrap().value, Some("x > y"));
        assert!(events[0].has_attribute("href"));
    }

    #[test]
    fn test_apostrophe_in_bare_text_does_not_open_quote() {
        assert_eq!(names("<p don't>x</p>"), vec!["p", "/p"]);
    }

    #[test]
    fn test_positions() {
        let events: Vec<_> = scan_tags("<div>\n  <span></span>\n</div>").collect();
        assert_eq!(events[1].position, Position::new(2, 3));
        assert_eq!(events[1].end_position, Position::new(2, 9));
        assert_eq!(events[3].position, Position::new(3, 1));
    }

    #[test]
    fn test_scan_is_restartable() {
        let text = "<ul><li>a</li><li>b</li></ul>";
        let first: Vec<_> = scan_tags(text).collect();
        let second: Vec<_> = scan_tags(text).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_attribute_forms() {
        let attrs: Vec<_> =
            Attributes::new(" id=main class='a b' disabled data-x = \"1\" /").collect();
        assert_eq!(attrs.len(), 4);
        assert_eq!(attrs[0], Attribute { name: "id", value: Some("main") });
        assert_eq!(attrs[1].value, Some("a b"));
        assert_eq!(attrs[2], Attribute { name: "disabled", value: None });
        assert_eq!(attrs[3].value, Some("1"));
    }

    #[test]
    fn test_empty_attribute_value_is_present() {
        let event = scan_tags("<img src=\"a.png\" alt=\"\">").next().unwrap();
        assert_eq!(event.attribute("alt").unwrap().value, Some(""));
    }
}
