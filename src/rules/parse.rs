//! Rule DSL Parser
//!
//! Turns compact rule text (`exists:h1`, `count:p>=1`, `text:h1=Hi`,
//! `rule:.box display=flex`) into a [`Rule`]. Total: anything unrecognized
//! becomes `Rule::Invalid`.

use super::ast::{CountOp, ExpectedValue, Rule, Selector};

/// Parse a rule string.
///
/// Never fails; unparseable text yields `Rule::Invalid` carrying the input.
pub fn parse_rule(text: &str) -> Rule {
    let trimmed = text.trim();

    let parsed = if let Some(rest) = trimmed.strip_prefix("exists:") {
        parse_selector(rest).map(|selector| Rule::Exists { selector })
    } else if let Some(rest) = trimmed.strip_prefix("count:") {
        parse_count(rest)
    } else if let Some(rest) = trimmed.strip_prefix("text:") {
        parse_text(rest)
    } else if let Some(rest) = trimmed.strip_prefix("rule:") {
        parse_css_declaration(rest)
    } else {
        None
    };

    parsed.unwrap_or_else(|| {
        log::debug!("unparseable rule text: {:?}", text);
        Rule::Invalid {
            raw: text.to_string(),
        }
    })
}

/// `!DOCTYPE` or a tag name (letter followed by letters/digits)
fn parse_selector(token: &str) -> Option<Selector> {
    let token = token.trim();
    if token.eq_ignore_ascii_case("!DOCTYPE") {
        return Some(Selector::Doctype);
    }
    parse_tag(token).map(Selector::Tag)
}

fn parse_tag(token: &str) -> Option<String> {
    let token = token.trim();
    let first = token.chars().next()?;
    if !first.is_ascii_alphabetic() || !token.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(token.to_ascii_lowercase())
}

/// `<tag><op><n>`
fn parse_count(rest: &str) -> Option<Rule> {
    let op_start = rest.find(['<', '>', '='])?;
    let tag = parse_tag(&rest[..op_start])?;

    let remainder = &rest[op_start..];
    let op = CountOp::ALL
        .into_iter()
        .find(|op| remainder.starts_with(op.as_str()))?;

    let number = remainder[op.as_str().len()..].trim();
    if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let threshold = number.parse::<u32>().ok()?;

    Some(Rule::Count {
        selector: Selector::Tag(tag),
        op,
        threshold,
    })
}

/// `<tag>=<expected text>`; the expected text is kept verbatim
fn parse_text(rest: &str) -> Option<Rule> {
    let (token, expected) = rest.split_once('=')?;
    let tag = parse_tag(token)?;

    Some(Rule::Text {
        selector: Selector::Tag(tag),
        expected: expected.to_string(),
    })
}

/// `<selector> <property>=<value>`
///
/// The property is the first whitespace-preceded identifier followed by `=`,
/// so descendant selectors (`.nav a color=red`) keep their spaces.
fn parse_css_declaration(rest: &str) -> Option<Rule> {
    let rest = rest.trim();
    let bytes = rest.as_bytes();

    let (prop_start, prop_end, value_start) = (1..bytes.len())
        .filter(|&idx| bytes[idx - 1].is_ascii_whitespace() && !bytes[idx].is_ascii_whitespace())
        .find_map(|idx| property_at(bytes, idx).map(|(end, eq)| (idx, end, eq + 1)))?;

    let selector = rest[..prop_start].trim();
    let property = &rest[prop_start..prop_end];
    let value = rest[value_start..].trim();
    if selector.is_empty() || value.is_empty() {
        return None;
    }

    let expected = if value == "*" {
        ExpectedValue::Wildcard
    } else {
        ExpectedValue::Exact(value.to_string())
    };

    Some(Rule::CssDeclaration {
        selector: selector.to_string(),
        property: property.to_string(),
        expected,
    })
}

/// If an identifier followed by `=` starts at `start`, return its end and the `=` offset
fn property_at(bytes: &[u8], start: usize) -> Option<(usize, usize)> {
    let is_ident = |b: u8| b.is_ascii_alphanumeric() || b == b'-' || b == b'_';

    let mut end = start;
    while end < bytes.len() && is_ident(bytes[end]) {
        end += 1;
    }
    if end == start {
        return None;
    }

    let mut eq = end;
    while eq < bytes.len() && bytes[eq].is_ascii_whitespace() {
        eq += 1;
    }
    (bytes.get(eq) == Some(&b'=')).then_some((end, eq))
}
