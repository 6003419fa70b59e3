//! Validation Engine
//!
//! Structural checks on student HTML, separated from scanning and editor concerns.

pub mod engine;
pub mod messages;

pub use engine::{
    validate_document, validate_document_with, Diagnostic, DiagnosticCode, Severity,
};
pub use messages::MessageTemplates;

// Re-export common types
pub use engine::ValidationResult;
