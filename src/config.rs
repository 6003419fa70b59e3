//! Configuration management for the markup grader.
//!
//! Handles:
//! - Command-line argument parsing
//! - Message template discovery
//! - The input size limit applied before anything is scanned

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::validation::MessageTemplates;

/// Inputs larger than this are refused unless overridden
pub const DEFAULT_MAX_INPUT_BYTES: usize = 1024 * 1024;

/// Command-line arguments for the markup grader
#[derive(Debug, Parser)]
#[command(name = "markup-grader")]
#[command(about = "Structural validation and rule-based grading for student HTML/CSS")]
#[command(version)]
pub struct Args {
    /// Translation table for diagnostic messages
    #[arg(long, global = true, help = "TOML file with diagnostic message templates")]
    pub messages: Option<PathBuf>,

    /// Log level
    #[arg(
        long,
        global = true,
        default_value = "info",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,

    /// Largest input accepted for validation or grading
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_INPUT_BYTES)]
    pub max_input_bytes: usize,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// Run the language server on stdio (default)
    Serve,
    /// Print structural diagnostics for an HTML file
    Validate {
        file: PathBuf,
        #[arg(long, help = "Print diagnostics as JSON")]
        json: bool,
    },
    /// Evaluate a lesson's checks against a submission
    Grade {
        #[arg(long, help = "TOML file listing the lesson's checks")]
        checks: PathBuf,
        #[arg(long, help = "Submitted HTML file")]
        html: Option<PathBuf>,
        #[arg(long, help = "Submitted CSS file")]
        css: Option<PathBuf>,
        #[arg(long, help = "Print results as JSON")]
        json: bool,
    },
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    pub command: Command,
    /// Message template file, explicit or found in the user config directory
    pub messages_path: Option<PathBuf>,
    pub log_level: String,
    pub max_input_bytes: usize,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args) -> Result<Self> {
        if args.max_input_bytes == 0 {
            bail!("--max-input-bytes must be greater than zero");
        }

        let messages_path = args.messages.or_else(default_messages_path);

        Ok(Config {
            command: args.command.unwrap_or(Command::Serve),
            messages_path,
            log_level: args.log_level,
            max_input_bytes: args.max_input_bytes,
        })
    }

    /// Message templates from the configured file, or the built-in defaults
    pub fn message_templates(&self) -> Result<MessageTemplates> {
        match &self.messages_path {
            Some(path) => MessageTemplates::load(path),
            None => Ok(MessageTemplates::default()),
        }
    }

    /// Refuse inputs over the configured limit
    pub fn check_input_size(&self, len: usize) -> Result<()> {
        if len > self.max_input_bytes {
            bail!(
                "input is {} bytes, over the {} byte limit",
                len,
                self.max_input_bytes
            );
        }
        Ok(())
    }

    /// Read a submission file, enforcing the size limit
    pub fn read_input(&self, path: &Path) -> Result<String> {
        let content =
            std::fs::read_to_string(path).with_context(|| format!("failed to read {:?}", path))?;
        self.check_input_size(content.len())
            .with_context(|| format!("{:?} is too large", path))?;
        Ok(content)
    }
}

/// `<config dir>/markup-grader/messages.toml`, when present
fn default_messages_path() -> Option<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("markup-grader").join("messages.toml"))
        .filter(|path| path.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_serve() {
        let args = Args::parse_from(["markup-grader"]);
        let config = Config::from_args(args).expect("config");
        assert_eq!(config.command, Command::Serve);
        assert_eq!(config.max_input_bytes, DEFAULT_MAX_INPUT_BYTES);
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let args = Args::parse_from([
            "markup-grader",
            "validate",
            "page.html",
            "--json",
            "--max-input-bytes",
            "10",
        ]);
        let config = Config::from_args(args).expect("config");
        assert_eq!(
            config.command,
            Command::Validate {
                file: PathBuf::from("page.html"),
                json: true
            }
        );
        assert!(config.check_input_size(10).is_ok());
        assert!(config.check_input_size(11).is_err());
    }

    #[test]
    fn test_zero_limit_is_rejected() {
        let args = Args::parse_from(["markup-grader", "--max-input-bytes", "0"]);
        assert!(Config::from_args(args).is_err());
    }
}
