//! Errors reported by the `xp` command-line tool.

use thiserror::Error;
use xp_path::PathError;

/// Everything that can stop the command-line tool.
#[derive(Error, Debug)]
pub enum XpError {
    #[error("Invalid path expression: {0}")]
    Path(#[from] PathError),

    #[error("Error parsing document: {0}")]
    Document(#[from] roxmltree::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON output error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No path expression given")]
    MissingPath,
}
