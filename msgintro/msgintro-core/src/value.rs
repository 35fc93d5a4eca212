//! Decoded primitive values returned by field accessors.

use std::sync::Arc;

use crate::primitive::PrimitiveKind;

/// A `time` field: seconds and nanoseconds since the epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Time {
    pub sec: u32,
    pub nsec: u32,
}

impl Time {
    pub fn new(sec: u32, nsec: u32) -> Self {
        Self { sec, nsec }
    }

    pub fn as_secs_f64(&self) -> f64 {
        f64::from(self.sec) + f64::from(self.nsec) / 1e9
    }
}

/// A `duration` field: seconds and nanoseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Duration {
    pub sec: u32,
    pub nsec: u32,
}

impl Duration {
    pub fn new(sec: u32, nsec: u32) -> Self {
        Self { sec, nsec }
    }

    pub fn as_secs_f64(&self) -> f64 {
        f64::from(self.sec) + f64::from(self.nsec) / 1e9
    }
}

/// A single decoded primitive field.
/// The variant always matches the field's [`PrimitiveKind`]; no coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    String(Arc<str>),
    Time(Time),
    Duration(Duration),
}

impl Value {
    pub fn string(s: impl AsRef<str>) -> Self {
        Self::String(Arc::from(s.as_ref()))
    }

    /// The primitive kind this value was decoded from.
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Value::Bool(_) => PrimitiveKind::Bool,
            Value::I8(_) => PrimitiveKind::Int8,
            Value::I16(_) => PrimitiveKind::Int16,
            Value::I32(_) => PrimitiveKind::Int32,
            Value::I64(_) => PrimitiveKind::Int64,
            Value::U8(_) => PrimitiveKind::Uint8,
            Value::U16(_) => PrimitiveKind::Uint16,
            Value::U32(_) => PrimitiveKind::Uint32,
            Value::U64(_) => PrimitiveKind::Uint64,
            Value::F32(_) => PrimitiveKind::Float32,
            Value::F64(_) => PrimitiveKind::Float64,
            Value::String(_) => PrimitiveKind::String,
            Value::Time(_) => PrimitiveKind::Time,
            Value::Duration(_) => PrimitiveKind::Duration,
        }
    }

    /// Numeric view of the value.
    ///
    /// Integers and floats widen to `f64`, `bool` becomes 0 or 1, time and
    /// duration become fractional seconds. Strings are parsed as a number
    /// and yield `NaN` when they do not parse.
    pub fn as_f64(&self) -> f64 {
        match self {
            Value::Bool(v) => f64::from(u8::from(*v)),
            Value::I8(v) => f64::from(*v),
            Value::I16(v) => f64::from(*v),
            Value::I32(v) => f64::from(*v),
            Value::I64(v) => *v as f64,
            Value::U8(v) => f64::from(*v),
            Value::U16(v) => f64::from(*v),
            Value::U32(v) => f64::from(*v),
            Value::U64(v) => *v as f64,
            Value::F32(v) => f64::from(*v),
            Value::F64(v) => *v,
            Value::String(s) => s.trim().parse::<f64>().unwrap_or(f64::NAN),
            Value::Time(t) => t.as_secs_f64(),
            Value::Duration(d) => d.as_secs_f64(),
        }
    }
}
