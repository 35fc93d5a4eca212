pub mod components;
pub mod get;
pub mod offsets;
pub mod tree;
