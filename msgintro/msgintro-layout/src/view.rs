//! Typed, path-addressed reads over one laid-out buffer.

use bytes::Buf;
use msgintro_core::{Duration, PrimitiveKind, Time, Value};

use crate::walker::{FieldSlot, Layout};

/// A [`Layout`] together with the buffer it was built against.
///
/// Every accessor returns `None` when the path is not in the layout, when
/// the stored kind is not the requested one, or when the read would leave
/// the buffer.
#[derive(Debug, Clone, Copy)]
pub struct MessageView<'a> {
    layout: &'a Layout,
    data: &'a [u8],
}

macro_rules! typed_getters {
    ($($(#[$meta:meta])* $name:ident => $kind:ident, $ty:ty, $read:ident;)*) => {
        $(
            $(#[$meta])*
            pub fn $name(&self, path: &str) -> Option<$ty> {
                self.bytes_at(path, PrimitiveKind::$kind)?.$read().ok()
            }
        )*
    };
}

impl<'a> MessageView<'a> {
    pub fn new(layout: &'a Layout, data: &'a [u8]) -> Self {
        Self { layout, data }
    }

    pub fn layout(&self) -> &'a Layout {
        self.layout
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    pub fn path_exists(&self, path: &str) -> bool {
        self.layout.contains(path)
    }

    pub fn slot(&self, path: &str) -> Option<FieldSlot> {
        self.layout.slot(path)
    }

    pub fn array_len(&self, path: &str) -> Option<usize> {
        self.layout.array_len(path)
    }

    /// `bool` is the raw byte, nonzero meaning true.
    pub fn get_bool(&self, path: &str) -> Option<bool> {
        self.bytes_at(path, PrimitiveKind::Bool)?
            .try_get_u8()
            .ok()
            .map(|b| b != 0)
    }

    typed_getters! {
        get_i8 => Int8, i8, try_get_i8;
        get_i16 => Int16, i16, try_get_i16_le;
        get_i32 => Int32, i32, try_get_i32_le;
        get_i64 => Int64, i64, try_get_i64_le;
        get_u8 => Uint8, u8, try_get_u8;
        get_u16 => Uint16, u16, try_get_u16_le;
        get_u32 => Uint32, u32, try_get_u32_le;
        get_u64 => Uint64, u64, try_get_u64_le;
        get_f32 => Float32, f32, try_get_f32_le;
        get_f64 => Float64, f64, try_get_f64_le;
    }

    pub fn get_time(&self, path: &str) -> Option<Time> {
        let (sec, nsec) = self.sec_nsec(path, PrimitiveKind::Time)?;
        Some(Time::new(sec, nsec))
    }

    pub fn get_duration(&self, path: &str) -> Option<Duration> {
        let (sec, nsec) = self.sec_nsec(path, PrimitiveKind::Duration)?;
        Some(Duration::new(sec, nsec))
    }

    /// Payload of a string field, without its length prefix.
    pub fn get_string_bytes(&self, path: &str) -> Option<&'a [u8]> {
        let mut rest = self.bytes_at(path, PrimitiveKind::String)?;
        let len = rest.try_get_u32_le().ok()? as usize;
        rest.get(..len)
    }

    /// String field as text; `None` if the payload is not UTF-8.
    pub fn get_string(&self, path: &str) -> Option<String> {
        let bytes = self.get_string_bytes(path)?;
        std::str::from_utf8(bytes).ok().map(str::to_string)
    }

    /// Numeric view of any primitive field.
    ///
    /// Strings that do not parse as a number give `NaN`, not `None`.
    pub fn get_number(&self, path: &str) -> Option<f64> {
        if self.slot(path)?.kind == PrimitiveKind::String {
            let bytes = self.get_string_bytes(path)?;
            let number = std::str::from_utf8(bytes)
                .ok()
                .and_then(|s| s.trim().parse::<f64>().ok())
                .unwrap_or(f64::NAN);
            return Some(number);
        }
        self.get_value(path).map(|v| v.as_f64())
    }

    /// Decode whatever is stored at `path` according to its own kind.
    pub fn get_value(&self, path: &str) -> Option<Value> {
        let value = match self.slot(path)?.kind {
            PrimitiveKind::NonPrimitive => return None,
            PrimitiveKind::Bool => Value::Bool(self.get_bool(path)?),
            PrimitiveKind::Int8 => Value::I8(self.get_i8(path)?),
            PrimitiveKind::Int16 => Value::I16(self.get_i16(path)?),
            PrimitiveKind::Int32 => Value::I32(self.get_i32(path)?),
            PrimitiveKind::Int64 => Value::I64(self.get_i64(path)?),
            PrimitiveKind::Uint8 => Value::U8(self.get_u8(path)?),
            PrimitiveKind::Uint16 => Value::U16(self.get_u16(path)?),
            PrimitiveKind::Uint32 => Value::U32(self.get_u32(path)?),
            PrimitiveKind::Uint64 => Value::U64(self.get_u64(path)?),
            PrimitiveKind::Float32 => Value::F32(self.get_f32(path)?),
            PrimitiveKind::Float64 => Value::F64(self.get_f64(path)?),
            PrimitiveKind::String => Value::string(self.get_string(path)?),
            PrimitiveKind::Time => Value::Time(self.get_time(path)?),
            PrimitiveKind::Duration => Value::Duration(self.get_duration(path)?),
        };
        Some(value)
    }

    /// Buffer tail starting at the slot for `path`, if it holds `kind`.
    fn bytes_at(&self, path: &str, kind: PrimitiveKind) -> Option<&'a [u8]> {
        let slot = self.layout.slot(path)?;
        if slot.kind != kind {
            return None;
        }
        self.data.get(slot.offset..)
    }

    fn sec_nsec(&self, path: &str, kind: PrimitiveKind) -> Option<(u32, u32)> {
        let mut rest = self.bytes_at(path, kind)?;
        let sec = rest.try_get_u32_le().ok()?;
        let nsec = rest.try_get_u32_le().ok()?;
        Some((sec, nsec))
    }
}
