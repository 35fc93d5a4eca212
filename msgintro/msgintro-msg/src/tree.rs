//! Recursive definition tree built from a [`ComponentTable`].

use std::fmt::{self, Display, Formatter, Write as _};

use msgintro_core::Definition;

use crate::{error::SchemaError, lex::path_tokens, table::ComponentTable};

/// A definition and its ordered child fields.
///
/// The shape and every path are determined by the schema alone. Child order
/// is declaration order, which is also serialization order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionTree {
    definition: Definition,
    fields: Vec<DefinitionTree>,
}

impl DefinitionTree {
    /// Expand `root_type` using `table`.
    ///
    /// The root node has an empty name and path; its children's paths are
    /// their bare field names.
    pub fn build(table: &ComponentTable, root_type: &str) -> Result<Self, SchemaError> {
        if !table.contains(root_type) {
            return Err(SchemaError::MissingRoot(root_type.to_string()));
        }
        let mut stack = Vec::new();
        expand(table, "", root_type, "", "", &mut stack)
    }

    pub fn definition(&self) -> &Definition {
        &self.definition
    }

    pub fn fields(&self) -> &[DefinitionTree] {
        &self.fields
    }

    /// Node at `path`. Bracketed indices are ignored; the empty path is the root.
    pub fn find(&self, path: &str) -> Option<&DefinitionTree> {
        let mut current = self;
        for token in path_tokens(path) {
            current = current
                .fields
                .iter()
                .find(|field| field.definition.name() == token)?;
        }
        Some(current)
    }

    pub fn path_exists(&self, path: &str) -> bool {
        self.find(path).is_some()
    }

    /// Whether `path` resolves and any node along it is an array.
    pub fn path_has_arrays(&self, path: &str) -> bool {
        self.definitions_along(path)
            .is_some_and(|chain| chain.iter().any(|d| d.is_array()))
    }

    /// Definition at `path`.
    pub fn definition_at(&self, path: &str) -> Option<&Definition> {
        self.find(path).map(|node| &node.definition)
    }

    /// Definitions from the root's first child down to `path`, or `None` if
    /// any segment is missing.
    pub fn definitions_along(&self, path: &str) -> Option<Vec<&Definition>> {
        let mut chain = Vec::new();
        let mut current = self;
        for token in path_tokens(path) {
            current = current
                .fields
                .iter()
                .find(|field| field.definition.name() == token)?;
            chain.push(&current.definition);
        }
        Some(chain)
    }

    /// Child definitions of the node at `parent_path`.
    pub fn list_fields(&self, parent_path: &str) -> Option<Vec<&Definition>> {
        self.find(parent_path)
            .map(|node| node.fields.iter().map(|f| &f.definition).collect())
    }

    /// Depth-first dump, one line per node, one tab of indent per level.
    pub fn render(&self) -> Result<String, fmt::Error> {
        let mut out = String::new();
        render_node(self, 0, &mut out)?;
        Ok(out)
    }
}

impl Display for DefinitionTree {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render()?)
    }
}

fn render_node(node: &DefinitionTree, depth: usize, out: &mut String) -> fmt::Result {
    writeln!(out, "{}{}", "\t".repeat(depth), node.definition)?;
    for child in &node.fields {
        render_node(child, depth + 1, out)?;
    }
    Ok(())
}

fn join_path(parent_path: &str, name: &str) -> String {
    if parent_path.is_empty() {
        name.to_string()
    } else {
        format!("{parent_path}.{name}")
    }
}

fn expand(
    table: &ComponentTable,
    parent_path: &str,
    type_name: &str,
    array: &str,
    name: &str,
    stack: &mut Vec<String>,
) -> Result<DefinitionTree, SchemaError> {
    let mut definition =
        Definition::new(type_name, array, name, parent_path).map_err(|source| {
            SchemaError::InvalidArray {
                path: join_path(parent_path, name),
                source,
            }
        })?;

    if definition.is_primitive() {
        return Ok(DefinitionTree {
            definition,
            fields: Vec::new(),
        });
    }

    let Some(component_fields) = table.fields(type_name) else {
        log::debug!(
            "'{}' has unresolved type '{}'; treating as empty",
            definition.path(),
            type_name
        );
        definition.mark_unresolved();
        return Ok(DefinitionTree {
            definition,
            fields: Vec::new(),
        });
    };

    if stack.iter().any(|t| t == type_name) {
        return Err(SchemaError::RecursiveType {
            type_name: type_name.to_string(),
            path: definition.path().to_string(),
        });
    }
    stack.push(type_name.to_string());

    let mut fields = Vec::with_capacity(component_fields.len());
    let mut size = 0;
    for field in component_fields {
        let child = expand(
            table,
            definition.path(),
            &field.type_name,
            &field.array,
            &field.name,
            stack,
        )?;
        size += child.definition.size();
        fields.push(child);
    }
    stack.pop();

    definition.set_size(size);
    Ok(DefinitionTree { definition, fields })
}
