//! `xp`: print the nodes of an XML or HTML document that match a path expression.
//!
//! The query engine lives in `xp-path` and the document adapters in
//! `xp-source`; this crate wires them to the command line.

pub mod cli;
pub mod error;

pub use cli::{Args, DocumentKind, OutputFormat, run};
pub use error::XpError;

/// The version reported by `xp --version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
