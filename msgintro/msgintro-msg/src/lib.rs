//! Message IDL → definition tree for `msgintro`.
//!
//! A schema blob holds the root type's field lines followed by any number of
//! nested definitions, each introduced by a `MSG: pkg/Type` directive and
//! usually preceded by a `====` separator line.
//!
//! # Pipeline
//!
//! ```text
//! schema text (UTF-8 .msg bundle)
//!   └─ parse_components     – line scanner → ComponentTable
//!       └─ resolve_references  – partial type names → qualified names
//!           └─ DefinitionTree::build  – recursive expansion from the root type
//! ```

mod error;
mod lex;
mod parser;
mod resolver;
mod schema;
mod table;
mod tree;

pub use error::SchemaError;
pub use parser::parse_components;
pub use resolver::{Resolution, resolve_references, resolve_type_name};
pub use schema::MessageSchema;
pub use table::{Component, ComponentTable, ConstantDescriptor, FieldDescriptor, UnresolvedRef};
pub use tree::DefinitionTree;
