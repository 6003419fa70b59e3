//! LSP Protocol Implementation
//!
//! Publishes structural diagnostics for open HTML documents as editor markers.

pub mod backend;
pub mod document;
pub mod handlers;
pub mod server;

pub use backend::Backend;
pub use server::serve;
