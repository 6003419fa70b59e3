//! Diagnostic Message Templates
//!
//! Message text is injected into the validator so translations live outside
//! the core. Templates use `{name}` placeholders.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// One template per diagnostic kind; missing keys fall back to English
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MessageTemplates {
    /// Placeholders: `{found}`, `{expected}`
    pub mismatched_tag: String,
    /// Placeholders: `{found}`
    pub unexpected_closing_tag: String,
    /// Placeholders: `{tag}`
    pub unclosed_tag: String,
    /// Placeholders: `{id}`
    pub duplicate_id: String,
    /// Placeholders: `{tag}`, `{attribute}`
    pub missing_attribute: String,
}

impl Default for MessageTemplates {
    fn default() -> Self {
        Self {
            mismatched_tag: "Closing tag </{found}> does not match the open <{expected}> tag"
                .to_string(),
            unexpected_closing_tag: "Closing tag </{found}> has no matching opening tag"
                .to_string(),
            unclosed_tag: "Tag <{tag}> is never closed".to_string(),
            duplicate_id: "Duplicate id \"{id}\"; ids must be unique in a page".to_string(),
            missing_attribute: "<{tag}> is missing the {attribute} attribute".to_string(),
        }
    }
}

impl MessageTemplates {
    /// Parse a TOML translation table
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("invalid message template file")
    }

    /// Load a TOML translation table from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read message templates {:?}", path))?;
        Self::from_toml_str(&content)
    }

    pub fn mismatched_tag(&self, found: &str, expected: &str) -> String {
        render(&self.mismatched_tag, &[("found", found), ("expected", expected)])
    }

    pub fn unexpected_closing_tag(&self, found: &str) -> String {
        render(&self.unexpected_closing_tag, &[("found", found)])
    }

    pub fn unclosed_tag(&self, tag: &str) -> String {
        render(&self.unclosed_tag, &[("tag", tag)])
    }

    pub fn duplicate_id(&self, id: &str) -> String {
        render(&self.duplicate_id, &[("id", id)])
    }

    pub fn missing_attribute(&self, tag: &str, attribute: &str) -> String {
        render(&self.missing_attribute, &[("tag", tag), ("attribute", attribute)])
    }
}

/// Substitute `{key}` placeholders; unknown placeholders are left as written
fn render(template: &str, args: &[(&str, &str)]) -> String {
    args.iter().fold(template.to_string(), |acc, (key, value)| {
        acc.replace(&format!("{{{}}}", key), value)
    })
}
