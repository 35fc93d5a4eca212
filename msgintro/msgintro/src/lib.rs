mod error;
mod introspector;
mod registry;

pub use error::IntrospectError;
pub use introspector::{FieldInfo, Introspector};
pub use msgintro_core as core;
pub use msgintro_layout as layout;
pub use msgintro_msg as msg;
pub use registry::{EvictionPolicy, KeepAll, Lru, SchemaHash, SchemaRegistry, SingleSlot};
