//! CSS Rule Evaluator

use crate::grading::RuleOutcome;
use crate::parser::scan_css;
use crate::rules::{ExpectedValue, Rule};

/// Evaluate a `rule:` assertion against raw stylesheet text.
///
/// Selectors match by exact text after trimming; `h1, h2` only matches a
/// rule written for `h1, h2`.
pub fn evaluate_css(rule: &Rule, css: &str) -> RuleOutcome {
    let Rule::CssDeclaration {
        selector,
        property,
        expected,
    } = rule
    else {
        return match rule {
            Rule::Invalid { raw } => RuleOutcome::invalid(raw),
            _ => RuleOutcome::fail(format!("Rule `{}` checks HTML, not CSS", rule)),
        };
    };

    let selector = selector.trim();
    let blocks = scan_css(css);
    let matching: Vec<_> = blocks.iter().filter(|b| b.selector == selector).collect();

    if matching.is_empty() {
        return RuleOutcome::fail(format!("No `{}` rule found", selector));
    }

    let values: Vec<&str> = matching
        .iter()
        .flat_map(|block| block.declarations_for(property))
        .map(|decl| strip_important(&decl.value))
        .collect();

    if let Some(value) = values.iter().find(|value| value_matches(expected, value)) {
        return RuleOutcome::pass(format!("`{}` sets {}: {}", selector, property, value));
    }

    match (values.last(), expected) {
        (None, _) => RuleOutcome::fail(format!("`{}` does not set {}", selector, property)),
        (Some(_), ExpectedValue::Wildcard) => RuleOutcome::fail(format!(
            "`{}` declares {} without a value",
            selector, property
        )),
        (Some(found), ExpectedValue::Exact(wanted)) => RuleOutcome::fail(format!(
            "`{}` sets {} to `{}`, expected `{}`",
            selector, property, found, wanted
        )),
    }
}

fn value_matches(expected: &ExpectedValue, value: &str) -> bool {
    match expected {
        ExpectedValue::Wildcard => !value.is_empty(),
        ExpectedValue::Exact(wanted) => value == wanted.trim(),
    }
}

/// Drop a trailing `!important`
fn strip_important(value: &str) -> &str {
    let value = value.trim();
    match value.rfind('!') {
        Some(idx) if value[idx + 1..].trim().eq_ignore_ascii_case("important") => {
            value[..idx].trim_end()
        }
        _ => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::parse_rule;

    fn eval(rule: &str, css: &str) -> RuleOutcome {
        evaluate_css(&parse_rule(rule), css)
    }

    #[test]
    fn test_exact_match() {
        let css = ".container { display: flex; }";
        assert!(eval("rule:.container display=flex", css).passed);

        let outcome = eval("rule:.container display=grid", css);
        assert!(!outcome.passed);
        assert_eq!(
            outcome.message,
            "`.container` sets display to `flex`, expected `grid`"
        );
    }

    #[test]
    fn test_value_is_case_sensitive() {
        assert!(!eval("rule:p color=Red", "p { color: red }").passed);
    }

    #[test]
    fn test_important_is_ignored() {
        assert!(eval("rule:p color=red", "p { color: red !important; }").passed);
        assert!(eval("rule:p color=red", "p { color: red!IMPORTANT }").passed);
    }

    #[test]
    fn test_wildcard() {
        let rule = "rule:body background-color=*";
        assert!(eval(rule, "body { background-color: #fff; }").passed);
        assert!(!eval(rule, "body { color: #fff; }").passed);
        assert!(!eval(rule, "body { background-color: ; }").passed);
    }

    #[test]
    fn test_any_matching_block_counts() {
        let css = "p { margin: 0 } p { color: blue }";
        assert!(eval("rule:p color=blue", css).passed);
    }

    #[test]
    fn test_grouped_selector_is_verbatim() {
        let css = "h1, h2 { color: navy; }";
        assert!(!eval("rule:h1 color=navy", css).passed);
        assert!(eval("rule:h1, h2 color=navy", css).passed);
    }

    #[test]
    fn test_leading_import_is_ignored() {
        let css = "@import url('https://fonts.googleapis.com/css2?family=Lato');\nbody { color: red; }";
        assert!(eval("rule:body color=red", css).passed);
    }

    #[test]
    fn test_missing_selector_message() {
        let outcome = eval("rule:.card padding=1rem", "p { color: red }");
        assert_eq!(outcome.message, "No `.card` rule found");
    }

    #[test]
    fn test_html_rule_fails_against_css() {
        assert!(!eval("exists:p", "p { color: red }").passed);
    }
}
