//! Structural Validator
//!
//! Stack machine over the tag stream that reports mismatched and unclosed
//! tags, duplicate ids and missing required attributes. Never aborts: bad
//! markup only produces more diagnostics.

use serde::Serialize;
use std::collections::HashSet;

use crate::parser::{scan_tags, Position, TagEvent};
use crate::validation::messages::MessageTemplates;

/// Attributes an opening tag must carry, as `(tag, attribute)`
const REQUIRED_ATTRIBUTES: &[(&str, &str)] = &[("img", "alt"), ("a", "href")];

/// Severity of a diagnostic message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// What kind of structural problem was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "code", content = "attribute", rename_all = "kebab-case")]
pub enum DiagnosticCode {
    MismatchedTag,
    UnclosedTag,
    DuplicateId,
    MissingAttribute(&'static str),
}

impl DiagnosticCode {
    /// Stable identifier used as the editor marker code
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticCode::MismatchedTag => "mismatched-tag",
            DiagnosticCode::UnclosedTag => "unclosed-tag",
            DiagnosticCode::DuplicateId => "duplicate-id",
            DiagnosticCode::MissingAttribute(_) => "missing-attribute",
        }
    }
}

/// A positioned finding for one tag
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub position: Position,
    /// End of the offending tag, for marker ranges
    pub end_position: Position,
    pub severity: Severity,
    #[serde(flatten)]
    pub code: DiagnosticCode,
    pub message: String,
}

/// Result of validating a document
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ValidationResult {
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, event: &TagEvent<'_>, code: DiagnosticCode, message: String) {
        self.push(event.position, event.end_position, Severity::Error, code, message);
    }

    pub fn add_warning(&mut self, event: &TagEvent<'_>, code: DiagnosticCode, message: String) {
        self.push(event.position, event.end_position, Severity::Warning, code, message);
    }

    fn push(
        &mut self,
        position: Position,
        end_position: Position,
        severity: Severity,
        code: DiagnosticCode,
        message: String,
    ) {
        self.diagnostics.push(Diagnostic {
            position,
            end_position,
            severity,
            code,
            message,
        });
    }

    /// Warnings don't make a document invalid
    pub fn is_valid(&self) -> bool {
        !self.diagnostics.iter().any(|d| d.severity == Severity::Error)
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    /// Diagnostics with a given code
    pub fn with_code(&self, code: DiagnosticCode) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.code == code)
    }
}

/// An open element waiting for its closing tag
#[derive(Debug)]
struct TagStackFrame {
    name: String,
    open_position: Position,
    open_end: Position,
}

/// Validate a document with the built-in English messages
pub fn validate_document(html: &str) -> ValidationResult {
    validate_document_with(html, &MessageTemplates::default())
}

/// Validate a document, rendering messages from `templates`
pub fn validate_document_with(html: &str, templates: &MessageTemplates) -> ValidationResult {
    let mut result = ValidationResult::new();
    let mut stack: Vec<TagStackFrame> = Vec::new();
    let mut seen_ids: HashSet<String> = HashSet::new();

    for event in scan_tags(html) {
        if event.is_closing {
            validate_closing_tag(&event, &mut stack, templates, &mut result);
            continue;
        }

        validate_attributes(&event, &mut seen_ids, templates, &mut result);

        if !event.self_closing {
            stack.push(TagStackFrame {
                name: event.name.clone(),
                open_position: event.position,
                open_end: event.end_position,
            });
        }
    }

    // Whatever is left was never closed, reported oldest first
    for frame in stack {
        result.push(
            frame.open_position,
            frame.open_end,
            Severity::Error,
            DiagnosticCode::UnclosedTag,
            templates.unclosed_tag(&frame.name),
        );
    }

    log::debug!(
        "validated document: {} errors, {} warnings",
        result.error_count(),
        result.warning_count()
    );

    result
}

/// Match a closing tag against the top of the stack.
///
/// A mismatch never pops, so one stray tag cannot unwind unrelated frames.
fn validate_closing_tag(
    event: &TagEvent<'_>,
    stack: &mut Vec<TagStackFrame>,
    templates: &MessageTemplates,
    result: &mut ValidationResult,
) {
    let message = match stack.last() {
        Some(top) if top.name == event.name => None,
        Some(top) => Some(templates.mismatched_tag(&event.name, &top.name)),
        None => Some(templates.unexpected_closing_tag(&event.name)),
    };

    match message {
        Some(message) => result.add_error(event, DiagnosticCode::MismatchedTag, message),
        None => {
            stack.pop();
        }
    }
}

/// Duplicate ids and required attributes on an opening tag
fn validate_attributes(
    event: &TagEvent<'_>,
    seen_ids: &mut HashSet<String>,
    templates: &MessageTemplates,
    result: &mut ValidationResult,
) {
    if let Some(id) = event.attribute("id").and_then(|attr| attr.value) {
        let id = id.trim();
        if !id.is_empty() && !seen_ids.insert(id.to_string()) {
            result.add_error(event, DiagnosticCode::DuplicateId, templates.duplicate_id(id));
        }
    }

    for &(tag, attribute) in REQUIRED_ATTRIBUTES {
        if event.name == tag && !event.has_attribute(attribute) {
            result.add_warning(
                event,
                DiagnosticCode::MissingAttribute(attribute),
                templates.missing_attribute(tag, attribute),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(html: &str) -> Vec<DiagnosticCode> {
        validate_document(html)
            .diagnostics
            .into_iter()
            .map(|d| d.code)
            .collect()
    }

    #[test]
    fn test_validation_result() {
        let mut result = ValidationResult::new();
        assert!(result.is_valid());

        let event = scan_tags("<p>").next().unwrap();
        result.add_warning(&event, DiagnosticCode::MissingAttribute("alt"), "w".to_string());
        assert!(result.is_valid());

        result.add_error(&event, DiagnosticCode::UnclosedTag, "e".to_string());
        assert!(!result.is_valid());
        assert_eq!(result.error_count(), 1);
        assert_eq!(result.warning_count(), 1);
    }

    #[test]
    fn test_well_formed_document_is_clean() {
        let html = "<!DOCTYPE html>\n<html><head><title>T</title></head>\
                    <body><h1 id=\"top\">Hi</h1><img src=\"a.png\" alt=\"\"><br>\
                    <a href=\"#top\">up</a></body></html>";
        assert!(validate_document(html).diagnostics.is_empty());
    }

    #[test]
    fn test_closing_tag_with_empty_stack() {
        let result = validate_document("</p>");
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].code, DiagnosticCode::MismatchedTag);
        assert_eq!(
            result.diagnostics[0].message,
            "Closing tag </p> has no matching opening tag"
        );
    }

    #[test]
    fn test_mismatch_does_not_pop() {
        // </b> mismatches <i>, so both <b> and <i> stay open
        assert_eq!(
            codes("<b><i></b>"),
            vec![
                DiagnosticCode::MismatchedTag,
                DiagnosticCode::UnclosedTag,
                DiagnosticCode::UnclosedTag
            ]
        );
    }

    #[test]
    fn test_duplicate_id_reported_on_second_use() {
        let result = validate_document("<div id=\"a\"></div>\n<p id='a'></p>");
        assert_eq!(result.diagnostics.len(), 1);
        let diag = &result.diagnostics[0];
        assert_eq!(diag.code, DiagnosticCode::DuplicateId);
        assert_eq!(diag.position, Position::new(2, 1));
        assert!(diag.message.contains("\"a\""));
    }

    #[test]
    fn test_missing_href_is_warning() {
        let result = validate_document("<a>link</a>");
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].severity, Severity::Warning);
        assert_eq!(
            result.diagnostics[0].code,
            DiagnosticCode::MissingAttribute("href")
        );
        assert!(result.is_valid());
    }

    #[test]
    fn test_custom_templates_are_used() {
        let templates = MessageTemplates {
            unclosed_tag: "open: {tag}".to_string(),
            ..MessageTemplates::default()
        };
        let result = validate_document_with("<section>", &templates);
        assert_eq!(result.diagnostics[0].message, "open: section");
    }

    #[test]
    fn test_diagnostic_serializes_code() {
        let result = validate_document("<img src=\"x.png\">");
        let json = serde_json::to_value(&result.diagnostics[0]).unwrap();
        assert_eq!(json["code"], "missing-attribute");
        assert_eq!(json["attribute"], "alt");
        assert_eq!(json["severity"], "warning");
        assert_eq!(json["position"]["line"], 1);
    }
}
