//! Error type for schema parsing and tree construction.

use msgintro_core::ArrayIndicatorError;

/// Errors raised while turning schema text into a definition tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// A line of the schema text could not be understood.
    #[error("line {line}: {detail}")]
    Parse { line: usize, detail: String },

    /// A field's array suffix is malformed.
    #[error("line {line}: {source}")]
    ArrayIndicator {
        line: usize,
        #[source]
        source: ArrayIndicatorError,
    },

    /// A field handed to the tree builder has a malformed array suffix.
    #[error("field '{path}': {source}")]
    InvalidArray {
        path: String,
        #[source]
        source: ArrayIndicatorError,
    },

    /// A composite type contains itself, directly or through other types.
    #[error("recursive type '{type_name}' at '{path}'")]
    RecursiveType { type_name: String, path: String },

    /// The root type is not present in the component table.
    #[error("root type '{0}' not found in component table")]
    MissingRoot(String),
}

impl SchemaError {
    pub(crate) fn parse(line: usize, detail: impl Into<String>) -> Self {
        Self::Parse {
            line,
            detail: detail.into(),
        }
    }
}
