//! Markup Grader
//!
//! A tolerant code-assessment engine for beginner HTML/CSS.
//!
//! This library provides:
//! - Tag and CSS scanning that never fails on malformed input
//! - Structural validation with line/column diagnostics
//! - A compact rule DSL and evaluators for grading checks
//! - An LSP backend that publishes diagnostics as editor markers

pub mod config;
pub mod grading;
pub mod lsp;
pub mod parser;
pub mod rules;
pub mod validation;

// Re-exports for clean public API
pub use config::Config;
pub use grading::{evaluate_check, evaluate_checks, Check, CheckKind, CheckResult, Submission};
pub use parser::{scan_css, scan_tags, Position, TagEvent};
pub use rules::{parse_rule, Rule};
pub use validation::{validate_document, Diagnostic, MessageTemplates};
