//! Grading
//!
//! Rule evaluators for HTML and CSS plus the check/result types callers
//! feed them. Every evaluation is a pure function of its inputs.

pub mod check;
pub mod css;
pub mod html;

pub use check::{
    evaluate_check, evaluate_checks, Check, CheckKind, CheckResult, LessonChecks, Submission,
};
pub use css::evaluate_css;
pub use html::evaluate_html;

/// Verdict and learner-facing message for one rule
#[derive(Debug, Clone, PartialEq)]
pub struct RuleOutcome {
    pub passed: bool,
    pub message: String,
}

impl RuleOutcome {
    pub fn new(passed: bool, message: impl Into<String>) -> Self {
        Self {
            passed,
            message: message.into(),
        }
    }

    pub fn pass(message: impl Into<String>) -> Self {
        Self::new(true, message)
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self::new(false, message)
    }

    /// Unparseable rules always fail and show the text so authors can fix it
    pub fn invalid(raw: &str) -> Self {
        Self::fail(format!("Invalid rule: {}", raw))
    }
}
