//! The component table produced by the IDL parser.

use std::{
    collections::BTreeMap,
    fmt::{self, Display, Formatter},
};

/// One raw field line: `type[array] name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Type name as written, rewritten to the qualified name after resolution.
    pub type_name: String,
    /// Array suffix as written (`""`, `"[]"`, `"[N]"`).
    pub array: String,
    pub name: String,
}

impl FieldDescriptor {
    pub fn new(
        type_name: impl Into<String>,
        array: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            array: array.into(),
            name: name.into(),
        }
    }
}

/// A constant line: `type NAME=value`. Constants occupy no bytes on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstantDescriptor {
    pub type_name: String,
    pub name: String,
    /// Raw value text as it appeared in the source.
    pub value: String,
}

/// Fields and constants of one message type, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Component {
    pub fields: Vec<FieldDescriptor>,
    pub constants: Vec<ConstantDescriptor>,
}

/// A field whose type matched no component, or matched several.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedRef {
    /// Qualified name of the component declaring the field.
    pub component: String,
    pub field: String,
    pub type_name: String,
    /// Qualified names that matched ambiguously; empty when nothing matched.
    pub candidates: Vec<String>,
}

/// Qualified type name → component, iterated in name order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentTable {
    components: BTreeMap<String, Component>,
    unresolved: Vec<UnresolvedRef>,
}

impl ComponentTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, type_name: &str) -> Option<&Component> {
        self.components.get(type_name)
    }

    /// Ordered fields of `type_name`, if it is a known component.
    pub fn fields(&self, type_name: &str) -> Option<&[FieldDescriptor]> {
        self.components.get(type_name).map(|c| c.fields.as_slice())
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.components.contains_key(type_name)
    }

    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.components.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Component)> {
        self.components.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// References left unresolved by the last resolution pass.
    pub fn unresolved(&self) -> &[UnresolvedRef] {
        &self.unresolved
    }

    /// Get or create the component named `type_name`.
    pub fn component_mut(&mut self, type_name: &str) -> &mut Component {
        self.components.entry(type_name.to_string()).or_default()
    }

    pub(crate) fn set_unresolved(&mut self, unresolved: Vec<UnresolvedRef>) {
        self.unresolved = unresolved;
    }
}

impl Display for ComponentTable {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (type_name, component) in &self.components {
            writeln!(f, "{type_name}")?;
            for c in &component.constants {
                writeln!(
                    f,
                    "\tconst name = {} type = {} value = {}",
                    c.name, c.type_name, c.value
                )?;
            }
            for field in &component.fields {
                writeln!(
                    f,
                    "\tname = {} type = {} array = {}",
                    field.name, field.type_name, field.array
                )?;
            }
        }
        Ok(())
    }
}
