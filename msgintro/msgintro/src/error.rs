//! Error types for the introspection session.

use msgintro_layout::LayoutError;
use msgintro_msg::SchemaError;

/// Errors produced by [`Introspector`](crate::Introspector).
#[derive(Debug, thiserror::Error)]
pub enum IntrospectError {
    /// The schema text for a new hash could not be parsed or expanded.
    #[error("failed to parse schema '{type_name}' (hash '{hash}'): {source}")]
    SchemaParse {
        hash: String,
        type_name: String,
        #[source]
        source: SchemaError,
    },

    /// An instance was ingested under a hash that is not registered.
    #[error("no schema registered for hash '{hash}'")]
    UnknownSchema { hash: String },

    /// The buffer does not fit the registered schema.
    #[error("failed to lay out message for hash '{hash}': {source}")]
    Layout {
        hash: String,
        #[source]
        source: LayoutError,
    },
}
