//! Checks and Results
//!
//! Lesson-supplied checks, evaluated one at a time against a submission.
//! Results are recomputed from scratch on every attempt.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::grading::{evaluate_css, evaluate_html};
use crate::rules::{parse_rule, Rule};

/// Which half of the submission a check looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckKind {
    Html,
    Css,
}

/// A single pedagogical assertion
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Check {
    pub id: String,
    pub kind: CheckKind,
    #[serde(rename = "rule")]
    pub rule_text: String,
    #[serde(default)]
    pub hint: String,
}

impl Check {
    pub fn new(id: &str, kind: CheckKind, rule_text: &str) -> Self {
        Self {
            id: id.to_string(),
            kind,
            rule_text: rule_text.to_string(),
            hint: String::new(),
        }
    }

    pub fn rule(&self) -> Rule {
        parse_rule(&self.rule_text)
    }
}

/// Outcome of one check
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckResult {
    pub check_id: String,
    pub passed: bool,
    pub message: String,
}

/// The student's code as submitted
#[derive(Debug, Clone, Copy, Default)]
pub struct Submission<'a> {
    pub html: &'a str,
    pub css: &'a str,
}

impl<'a> Submission<'a> {
    pub fn new(html: &'a str, css: &'a str) -> Self {
        Self { html, css }
    }
}

/// Evaluate one check against a submission
pub fn evaluate_check(check: &Check, submission: &Submission<'_>) -> CheckResult {
    let rule = check.rule();
    let outcome = match check.kind {
        CheckKind::Html => evaluate_html(&rule, submission.html),
        CheckKind::Css => evaluate_css(&rule, submission.css),
    };

    log::trace!(
        "check '{}' ({}): {}",
        check.id,
        rule,
        if outcome.passed { "pass" } else { "fail" }
    );

    CheckResult {
        check_id: check.id.clone(),
        passed: outcome.passed,
        message: outcome.message,
    }
}

/// Evaluate checks in order; each result is independent of the others
pub fn evaluate_checks(checks: &[Check], submission: &Submission<'_>) -> Vec<CheckResult> {
    checks
        .iter()
        .map(|check| evaluate_check(check, submission))
        .collect()
}

/// Root of a lesson's check file (matches TOML)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LessonChecks {
    #[serde(default)]
    pub checks: Vec<Check>,
}

impl LessonChecks {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("invalid check file")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read check file {:?}", path))?;
        Self::from_toml_str(&content)
    }
}
