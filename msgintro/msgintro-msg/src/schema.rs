use crate::{
    error::SchemaError, parser::parse_components, table::ComponentTable, tree::DefinitionTree,
};

/// A parsed message type: its component table and the tree expanded from it.
///
/// Immutable once built, so it can be shared across threads and laid out
/// against any number of message instances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageSchema {
    type_name: String,
    components: ComponentTable,
    tree: DefinitionTree,
}

impl MessageSchema {
    /// Parse `text` and expand `type_name` into a definition tree.
    pub fn parse(type_name: &str, text: &str) -> Result<Self, SchemaError> {
        let components = parse_components(type_name, text)?;
        let tree = DefinitionTree::build(&components, type_name)?;
        Ok(Self {
            type_name: type_name.to_string(),
            components,
            tree,
        })
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn components(&self) -> &ComponentTable {
        &self.components
    }

    pub fn tree(&self) -> &DefinitionTree {
        &self.tree
    }
}
