//! Resolved field descriptions.

use std::fmt;

use crate::{error::ArrayIndicatorError, primitive::PrimitiveKind};

/// Array shape of a field, parsed from its bracket suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrayShape {
    /// Not an array.
    None,
    /// `T[N]`: exactly `N` elements, no length prefix on the wire.
    Fixed(usize),
    /// `T[]` or `T[<=N]`: a `u32` element count precedes the elements.
    Variable,
}

impl ArrayShape {
    /// Parse an array-indicator suffix: `""`, `"[]"`, `"[N]"` or `"[<=N]"`.
    pub fn parse(indicator: &str) -> Result<Self, ArrayIndicatorError> {
        if indicator.is_empty() {
            return Ok(Self::None);
        }
        let err = |detail: &str| ArrayIndicatorError {
            indicator: indicator.to_string(),
            detail: detail.to_string(),
        };
        let inner = indicator
            .strip_prefix('[')
            .and_then(|s| s.strip_suffix(']'))
            .ok_or_else(|| err("expected a bracketed suffix"))?
            .trim();

        if inner.is_empty() {
            return Ok(Self::Variable);
        }
        if let Some(bound) = inner.strip_prefix("<=") {
            // Bounded sequences are length-prefixed like unbounded ones.
            bound
                .trim()
                .parse::<usize>()
                .map_err(|_| err("non-numeric sequence bound"))?;
            return Ok(Self::Variable);
        }
        inner
            .parse::<usize>()
            .map(Self::Fixed)
            .map_err(|_| err("non-numeric array length"))
    }

    pub fn is_array(self) -> bool {
        self != Self::None
    }

    /// Fixed element count, or 0 for non-arrays and variable arrays.
    pub fn fixed_len(self) -> usize {
        match self {
            Self::Fixed(n) => n,
            Self::None | Self::Variable => 0,
        }
    }
}

/// A resolved field node in a definition tree.
///
/// Definitions are immutable once built; per-instance state such as the
/// element count of a variable array lives in the layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    type_name: String,
    primitive_kind: PrimitiveKind,
    size: usize,
    array: String,
    array_shape: ArrayShape,
    name: String,
    path: String,
    unresolved: bool,
}

impl Definition {
    /// Create a definition from raw field text, placed under `parent_path`.
    ///
    /// The nominal size starts at the primitive width; composites are sized
    /// later from their children with [`Definition::set_size`].
    pub fn new(
        type_name: &str,
        array: &str,
        name: &str,
        parent_path: &str,
    ) -> Result<Self, ArrayIndicatorError> {
        let primitive_kind = PrimitiveKind::classify(type_name);
        let path = if parent_path.is_empty() {
            name.to_string()
        } else {
            format!("{parent_path}.{name}")
        };
        Ok(Self {
            type_name: type_name.to_string(),
            primitive_kind,
            size: primitive_kind.width(),
            array: array.to_string(),
            array_shape: ArrayShape::parse(array)?,
            name: name.to_string(),
            path,
            unresolved: false,
        })
    }

    /// Type name; fully qualified for resolved composites.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn is_primitive(&self) -> bool {
        self.primitive_kind.is_primitive()
    }

    pub fn primitive_kind(&self) -> PrimitiveKind {
        self.primitive_kind
    }

    /// Nominal schema size in bytes. Not an instance byte span.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The raw array-indicator text, e.g. `"[3]"`.
    pub fn array(&self) -> &str {
        &self.array
    }

    pub fn is_array(&self) -> bool {
        self.array_shape.is_array()
    }

    pub fn array_shape(&self) -> ArrayShape {
        self.array_shape
    }

    /// Fixed array bound; 0 for non-arrays and variable arrays.
    pub fn array_length(&self) -> usize {
        self.array_shape.fixed_len()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Dotted path from the tree root.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Whether this composite's type matched no component definition.
    pub fn is_unresolved(&self) -> bool {
        self.unresolved
    }

    pub fn set_size(&mut self, size: usize) {
        self.size = size;
    }

    pub fn mark_unresolved(&mut self) {
        self.unresolved = true;
    }
}

impl fmt::Display for Definition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "name = {} type = {} size = {} array = {}",
            self.name, self.type_name, self.size, self.array
        )
    }
}
