//! Schema-independent building blocks for `msgintro`.
//!
//! This crate provides the primitive catalog ([`PrimitiveKind`]), the
//! resolved field description ([`Definition`]) shared by the tree builder and
//! the layout walker, and the decoded [`Value`] representation returned by
//! field accessors.

mod definition;
mod error;
mod primitive;
mod value;

pub use definition::{ArrayShape, Definition};
pub use error::ArrayIndicatorError;
pub use primitive::PrimitiveKind;
pub use value::{Duration, Time, Value};
