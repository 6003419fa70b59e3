//! HTML Rule Evaluator
//!
//! Answers existence, count and text assertions directly against the tag
//! stream. No tree is built; inner text comes from depth counting.

use crate::grading::RuleOutcome;
use crate::parser::{scan_tags, TagEvent};
use crate::rules::{Rule, Selector};

/// Evaluate an HTML rule against raw markup
pub fn evaluate_html(rule: &Rule, html: &str) -> RuleOutcome {
    match rule {
        Rule::Exists {
            selector: Selector::Doctype,
        } => {
            if has_doctype(html) {
                RuleOutcome::pass("Found <!DOCTYPE> declaration")
            } else {
                RuleOutcome::fail("Missing <!DOCTYPE> declaration before the first tag")
            }
        }
        Rule::Exists { selector } => {
            if count_matching(selector, html) > 0 {
                RuleOutcome::pass(format!("Found <{}> tag", selector))
            } else {
                RuleOutcome::fail(format!("No <{}> tag found", selector))
            }
        }
        Rule::Count {
            selector,
            op,
            threshold,
        } => {
            let count = count_matching(selector, html);
            let message = format!(
                "Found {} <{}> {} (needs {}{})",
                count,
                selector,
                if count == 1 { "tag" } else { "tags" },
                op.symbol(),
                threshold
            );
            RuleOutcome::new(op.holds(count, *threshold), message)
        }
        Rule::Text { selector, expected } => evaluate_text(selector, expected, html),
        Rule::CssDeclaration { .. } => {
            RuleOutcome::fail(format!("Rule `{}` checks CSS, not HTML", rule))
        }
        Rule::Invalid { raw } => RuleOutcome::invalid(raw),
    }
}

/// A `<!doctype` occurring before the first tag, in any case
pub fn has_doctype(html: &str) -> bool {
    let first_tag = scan_tags(html).next().map(|e| e.start).unwrap_or(html.len());
    html[..first_tag].to_ascii_lowercase().contains("<!doctype")
}

/// Number of opening tags a selector matches
pub fn count_matching(selector: &Selector, html: &str) -> usize {
    match selector {
        Selector::Doctype => usize::from(has_doctype(html)),
        Selector::Tag(name) => scan_tags(html)
            .filter(|e| e.is_opening() && e.name == *name)
            .count(),
    }
}

/// Inner text of every closed element named `tag`, in document order.
///
/// The raw source between the opening tag and its balancing closing tag,
/// nested markup included. Elements without a closing tag are left out.
pub fn element_texts<'a>(html: &'a str, tag: &str) -> Vec<&'a str> {
    let events: Vec<TagEvent<'_>> = scan_tags(html).collect();

    events
        .iter()
        .enumerate()
        .filter(|(_, e)| e.is_opening() && !e.self_closing && e.name == tag)
        .filter_map(|(open_idx, _)| {
            let close_idx = matching_close(&events, open_idx)?;
            Some(&html[events[open_idx].end..events[close_idx].start])
        })
        .collect()
}

/// Index of the closing tag that balances the opening tag at `open_idx`,
/// counting only tags with the same name
fn matching_close(events: &[TagEvent<'_>], open_idx: usize) -> Option<usize> {
    let name = &events[open_idx].name;
    let mut depth = 0usize;

    for (idx, event) in events.iter().enumerate().skip(open_idx + 1) {
        if event.name != *name {
            continue;
        }
        if event.is_closing {
            if depth == 0 {
                return Some(idx);
            }
            depth -= 1;
        } else if !event.self_closing {
            depth += 1;
        }
    }

    None
}

fn evaluate_text(selector: &Selector, expected: &str, html: &str) -> RuleOutcome {
    let Selector::Tag(tag) = selector else {
        return RuleOutcome::fail(format!("<{}> has no text to compare", selector));
    };

    let expected = expected.trim();
    let texts = element_texts(html, tag);

    if texts.iter().any(|text| text.trim() == expected) {
        return RuleOutcome::pass(format!("<{}> text is \"{}\"", tag, expected));
    }

    match texts.first() {
        Some(found) => RuleOutcome::fail(format!(
            "<{}> text is \"{}\", expected \"{}\"",
            tag,
            found.trim(),
            expected
        )),
        None => RuleOutcome::fail(format!(
            "No closed <{}> element found (expected text \"{}\")",
            tag, expected
        )),
    }
}
