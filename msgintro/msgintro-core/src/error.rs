//! Error types shared by the core types.

/// Returned when an array-indicator suffix such as `[4]` or `[]` is malformed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid array indicator '{indicator}': {detail}")]
pub struct ArrayIndicatorError {
    pub indicator: String,
    pub detail: String,
}
