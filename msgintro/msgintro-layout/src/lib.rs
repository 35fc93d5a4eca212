//! Instance-level half of `msgintro`.
//!
//! [`Layout::build`] walks a [`msgintro_msg::DefinitionTree`] against one
//! serialized buffer and produces the flat offset map: every leaf's instance
//! path (`poses[1].position.x`) mapped to its byte offset and primitive kind.
//! [`MessageView`] pairs a layout with the buffer it was built from and
//! decodes values at those offsets.

mod error;
mod view;
mod walker;

pub use error::LayoutError;
pub use view::MessageView;
pub use walker::{FieldSlot, Layout};
