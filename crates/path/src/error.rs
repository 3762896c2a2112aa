use thiserror::Error;

/// Errors raised while parsing a path expression.
///
/// The engine itself never fails; every variant here originates in the parser
/// and is returned before any traversal starts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("Malformed predicate in '{segment}': {reason}")]
    MalformedPredicate { segment: String, reason: String },

    #[error("Unsupported predicate '{0}'")]
    UnsupportedPredicate(String),

    #[error("Missing tag name in segment '{0}'")]
    MissingTag(String),
}

impl PathError {
    pub(crate) fn malformed(segment: &str, reason: &str) -> Self {
        PathError::MalformedPredicate {
            segment: segment.to_string(),
            reason: reason.to_string(),
        }
    }
}
