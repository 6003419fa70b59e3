//! CSS Selector/Declaration Scanner
//!
//! Splits stylesheet text into selector blocks and their declarations.
//! No nesting, no cascade: at-rule blocks with nested braces are skipped.

/// One `selector { ... }` block
#[derive(Debug, Clone, PartialEq)]
pub struct CssBlock {
    /// Selector text, trimmed, exactly as written (grouped selectors stay joined)
    pub selector: String,
    pub declarations: Vec<Declaration>,
}

/// A `property: value` pair
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub property: String,
    pub value: String,
}

impl CssBlock {
    /// Declarations for `property`, in source order (property names are case-insensitive)
    pub fn declarations_for<'a>(
        &'a self,
        property: &'a str,
    ) -> impl Iterator<Item = &'a Declaration> + 'a {
        self.declarations
            .iter()
            .filter(move |decl| decl.property.eq_ignore_ascii_case(property))
    }
}

/// Scan stylesheet text into blocks
pub fn scan_css(text: &str) -> Vec<CssBlock> {
    let stripped = strip_comments(text);
    let mut blocks = Vec::new();
    let mut selector_start = 0;
    let mut chars = stripped.char_indices();

    while let Some((idx, ch)) = chars.next() {
        match ch {
            '{' => {
                let selector = stripped[selector_start..idx].trim();
                let body_start = idx + 1;
                let mut depth = 1;
                let mut nested = false;
                let mut body_end = stripped.len();

                for (inner_idx, inner) in chars.by_ref() {
                    match inner {
                        '{' => {
                            depth += 1;
                            nested = true;
                        }
                        '}' => {
                            depth -= 1;
                            if depth == 0 {
                                body_end = inner_idx;
                                break;
                            }
                        }
                        _ => {}
                    }
                }

                if nested {
                    log::trace!("skipping nested block '{}'", selector);
                } else if !selector.is_empty() {
                    blocks.push(CssBlock {
                        selector: selector.to_string(),
                        declarations: parse_declarations(&stripped[body_start..body_end]),
                    });
                }

                selector_start = (body_end + 1).min(stripped.len());
            }
            // A stray closing brace ends nothing; drop what came before it.
            // A `;` at the top level ends a statement like `@import url(...);`
            '}' | ';' => selector_start = idx + 1,
            _ => {}
        }
    }

    blocks
}

/// Split a block body on `;` into trimmed, non-empty declarations
fn parse_declarations(body: &str) -> Vec<Declaration> {
    body.split(';')
        .filter_map(|decl| {
            let (property, value) = decl.split_once(':')?;
            let property = property.trim();
            if property.is_empty() {
                return None;
            }
            Some(Declaration {
                property: property.to_string(),
                value: value.trim().to_string(),
            })
        })
        .collect()
}

/// Remove `/* ... */` comments; an unterminated comment runs to the end
fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find("/*") {
        out.push_str(&rest[..start]);
        match rest[start + 2..].find("*/") {
            Some(end) => rest = &rest[start + 2 + end + 2..],
            None => {
                rest = "";
                break;
            }
        }
    }
    out.push_str(rest);
    out
}
