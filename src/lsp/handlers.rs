use tower_lsp::lsp_types::*;

use crate::lsp::backend::Backend;
use crate::parser::Position as SourcePosition;
use crate::validation::engine::Severity;
use crate::validation::{validate_document_with, MessageTemplates};

const SOURCE: &str = "markup-grader";

/// Trait for handling diagnostics
#[tower_lsp::async_trait]
pub trait HandleDiagnostics {
    async fn publish_diagnostics(&self, uri: Url);
    async fn clear_diagnostics(&self, uri: Url);
}

#[tower_lsp::async_trait]
impl HandleDiagnostics for Backend {
    /// Validate a stored document and publish its markers
    async fn publish_diagnostics(&self, uri: Url) {
        let docs = self.documents.lock().await;
        let doc_state = match docs.get(&uri) {
            Some(state) => state,
            None => return,
        };

        if !doc_state.is_html(&uri) {
            return;
        }

        let diagnostics = document_diagnostics(
            &doc_state.content,
            &self.templates,
            self.config.max_input_bytes,
        );
        drop(docs); // Release the lock before talking to the client

        log::debug!("publishing {} diagnostics for {}", diagnostics.len(), uri);
        self.client
            .publish_diagnostics(uri, diagnostics, None)
            .await;
    }

    async fn clear_diagnostics(&self, uri: Url) {
        self.client.publish_diagnostics(uri, Vec::new(), None).await;
    }
}

/// Structural diagnostics for a document, as editor markers
pub fn document_diagnostics(
    content: &str,
    templates: &MessageTemplates,
    max_input_bytes: usize,
) -> Vec<Diagnostic> {
    if content.len() > max_input_bytes {
        log::warn!(
            "skipping validation of {} byte document (limit {})",
            content.len(),
            max_input_bytes
        );
        return vec![Diagnostic::new(
            Range::new(Position::new(0, 0), Position::new(0, 0)),
            Some(DiagnosticSeverity::INFORMATION),
            None,
            Some(SOURCE.to_string()),
            format!(
                "Document is too large to validate ({} bytes, limit {})",
                content.len(),
                max_input_bytes
            ),
            None,
            None,
        )];
    }

    validate_document_with(content, templates)
        .diagnostics
        .into_iter()
        .map(create_lsp_diagnostic)
        .collect()
}

/// Map a validation diagnostic 1:1 onto an LSP diagnostic
pub fn create_lsp_diagnostic(diagnostic: crate::validation::Diagnostic) -> Diagnostic {
    let severity = match diagnostic.severity {
        Severity::Error => DiagnosticSeverity::ERROR,
        Severity::Warning => DiagnosticSeverity::WARNING,
    };

    Diagnostic::new(
        Range::new(
            to_lsp_position(diagnostic.position),
            to_lsp_position(diagnostic.end_position),
        ),
        Some(severity),
        Some(NumberOrString::String(diagnostic.code.as_str().to_string())),
        Some(SOURCE.to_string()),
        diagnostic.message,
        None,
        None,
    )
}

/// 1-based source positions to 0-based LSP positions.
///
/// Columns count characters, so text outside the BMP drifts by one unit per
/// character against the client's UTF-16 offsets.
fn to_lsp_position(position: SourcePosition) -> Position {
    Position::new(
        position.line.saturating_sub(1),
        position.column.saturating_sub(1),
    )
}
