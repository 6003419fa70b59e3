//! Markup Scanners
//!
//! Tolerant, position-tracking scanners for student HTML and CSS.
//! No DOM is built: HTML becomes a stream of tag events, CSS a list of blocks.

pub mod css;
pub mod lexer;
pub mod position;

pub use css::{scan_css, CssBlock, Declaration};
pub use lexer::{scan_tags, Attribute, TagEvent, TagScanner, SELF_CLOSING_TAGS};
pub use position::{LineIndex, Position};
