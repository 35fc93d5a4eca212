//! The primitive catalog: builtin type names and their wire widths.

use std::fmt;

/// Primitive kinds understood by the layout walker and field accessors.
///
/// `NonPrimitive` marks composite (nested message) fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    NonPrimitive,
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Float32,
    Float64,
    /// `u32` length prefix followed by the payload bytes.
    String,
    /// Two `u32` words: seconds then nanoseconds.
    Time,
    /// Two `u32` words: seconds then nanoseconds.
    Duration,
}

impl PrimitiveKind {
    /// Look up a builtin type name.
    ///
    /// Returns `None` for names that are not in the catalog; such types are
    /// composites. `byte` and `char` are accepted as aliases of `int8` and
    /// `uint8`.
    pub fn from_type_name(name: &str) -> Option<Self> {
        let kind = match name {
            "bool" => Self::Bool,
            "int8" | "byte" => Self::Int8,
            "int16" => Self::Int16,
            "int32" => Self::Int32,
            "int64" => Self::Int64,
            "uint8" | "char" => Self::Uint8,
            "uint16" => Self::Uint16,
            "uint32" => Self::Uint32,
            "uint64" => Self::Uint64,
            "float32" => Self::Float32,
            "float64" => Self::Float64,
            "string" => Self::String,
            "time" => Self::Time,
            "duration" => Self::Duration,
            _ => return None,
        };
        Some(kind)
    }

    /// Kind for `name`, falling back to [`PrimitiveKind::NonPrimitive`].
    pub fn classify(name: &str) -> Self {
        Self::from_type_name(name).unwrap_or(Self::NonPrimitive)
    }

    /// Whether `name` is a builtin type.
    pub fn is_primitive_name(name: &str) -> bool {
        Self::from_type_name(name).is_some()
    }

    /// Fixed wire width in bytes. `String` and `NonPrimitive` report 0.
    pub fn width(self) -> usize {
        match self {
            Self::NonPrimitive | Self::String => 0,
            Self::Bool | Self::Int8 | Self::Uint8 => 1,
            Self::Int16 | Self::Uint16 => 2,
            Self::Int32 | Self::Uint32 | Self::Float32 => 4,
            Self::Int64 | Self::Uint64 | Self::Float64 | Self::Time | Self::Duration => 8,
        }
    }

    pub fn is_primitive(self) -> bool {
        self != Self::NonPrimitive
    }

    /// Canonical catalog name of the kind (`"non_primitive"` for composites).
    pub fn type_name(self) -> &'static str {
        match self {
            Self::NonPrimitive => "non_primitive",
            Self::Bool => "bool",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Uint8 => "uint8",
            Self::Uint16 => "uint16",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::String => "string",
            Self::Time => "time",
            Self::Duration => "duration",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.type_name())
    }
}
