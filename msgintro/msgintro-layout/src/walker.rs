//! Single forward pass from a definition tree plus a buffer to the flat
//! offset map.

use std::collections::HashMap;

use bytes::Buf;
use msgintro_core::{ArrayShape, PrimitiveKind};
use msgintro_msg::DefinitionTree;

use crate::error::LayoutError;

/// Where one leaf lives in the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldSlot {
    /// Byte offset of the value; for strings, of the length prefix.
    pub offset: usize,
    pub kind: PrimitiveKind,
}

/// Flat offset map for one message instance.
///
/// Keys are instance paths: dotted field names with `[i]` after every array
/// segment. Variable array counts read from the buffer live here, not in the
/// tree, so one tree can be laid out against many buffers at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout {
    entries: Vec<(String, FieldSlot)>,
    index: HashMap<String, usize>,
    array_lens: HashMap<String, usize>,
    consumed: usize,
    buffer_len: usize,
}

impl Layout {
    /// Walk `tree` over `buffer` from offset 0.
    pub fn build(tree: &DefinitionTree, buffer: &[u8]) -> Result<Self, LayoutError> {
        let mut walker = Walker {
            buf: buffer,
            pos: 0,
            layout: Layout {
                buffer_len: buffer.len(),
                ..Layout::default()
            },
        };
        for field in tree.fields() {
            walker.walk_node(field, "")?;
        }

        let mut layout = walker.layout;
        layout.consumed = walker.pos;
        if layout.consumed < buffer.len() {
            log::debug!(
                "'{}' used {} of {} bytes; ignoring trailing bytes",
                tree.definition().type_name(),
                layout.consumed,
                buffer.len()
            );
        }
        Ok(layout)
    }

    pub fn slot(&self, path: &str) -> Option<FieldSlot> {
        self.index.get(path).map(|&i| self.entries[i].1)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.index.contains_key(path)
    }

    /// All leaves in walk order, which is also buffer order.
    pub fn slots(&self) -> impl Iterator<Item = (&str, FieldSlot)> {
        self.entries.iter().map(|(path, slot)| (path.as_str(), *slot))
    }

    /// Element count of the array occurrence at `path` (`poses`, `poses[2].data`).
    pub fn array_len(&self, path: &str) -> Option<usize> {
        self.array_lens.get(path).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bytes covered by the walk.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    pub fn buffer_len(&self) -> usize {
        self.buffer_len
    }

    fn insert(&mut self, path: String, slot: FieldSlot) {
        self.index.insert(path.clone(), self.entries.len());
        self.entries.push((path, slot));
    }
}

struct Walker<'a> {
    buf: &'a [u8],
    pos: usize,
    layout: Layout,
}

impl Walker<'_> {
    fn walk_node(&mut self, node: &DefinitionTree, parent: &str) -> Result<(), LayoutError> {
        let def = node.definition();
        if def.is_unresolved() {
            log::debug!(
                "'{}' has unresolved type '{}'; its elements occupy no bytes",
                def.path(),
                def.type_name()
            );
        }

        let path = if parent.is_empty() {
            def.name().to_string()
        } else {
            format!("{parent}.{}", def.name())
        };

        let count = match def.array_shape() {
            ArrayShape::None => return self.walk_element(node, &path),
            ArrayShape::Fixed(n) => n,
            ArrayShape::Variable => {
                let n = self.read_u32(&path)? as usize;
                self.pos += 4;
                n
            }
        };
        self.layout.array_lens.insert(path.clone(), count);

        let element = element_min_size(node);
        if element == 0 {
            return Ok(());
        }
        let needed = count.saturating_mul(element);
        if needed > self.remaining() {
            return Err(self.eof(&path, needed));
        }
        for i in 0..count {
            self.walk_element(node, &format!("{path}[{i}]"))?;
        }
        Ok(())
    }

    fn walk_element(&mut self, node: &DefinitionTree, path: &str) -> Result<(), LayoutError> {
        let kind = node.definition().primitive_kind();
        if !kind.is_primitive() {
            for child in node.fields() {
                self.walk_node(child, path)?;
            }
            return Ok(());
        }

        let offset = self.pos;
        let width = match kind {
            PrimitiveKind::String => (self.read_u32(path)? as usize).saturating_add(4),
            other => other.width(),
        };
        if width > self.remaining() {
            return Err(self.eof(path, width));
        }
        self.layout.insert(path.to_string(), FieldSlot { offset, kind });
        self.pos += width;
        Ok(())
    }

    fn read_u32(&self, path: &str) -> Result<u32, LayoutError> {
        let mut rest = self.buf.get(self.pos..).unwrap_or_default();
        rest.try_get_u32_le().map_err(|_| self.eof(path, 4))
    }

    fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    fn eof(&self, path: &str, needed: usize) -> LayoutError {
        LayoutError::UnexpectedEof {
            path: path.to_string(),
            offset: self.pos,
            needed,
            len: self.buf.len(),
        }
    }
}

/// Fewest bytes one element of `node` can occupy on the wire.
fn element_min_size(node: &DefinitionTree) -> usize {
    let def = node.definition();
    match def.primitive_kind() {
        PrimitiveKind::String => 4,
        PrimitiveKind::NonPrimitive => node.fields().iter().map(min_size).sum(),
        other => other.width(),
    }
}

/// Fewest bytes `node` can occupy, array framing included.
fn min_size(node: &DefinitionTree) -> usize {
    match node.definition().array_shape() {
        ArrayShape::None => element_min_size(node),
        ArrayShape::Fixed(n) => n.saturating_mul(element_min_size(node)),
        ArrayShape::Variable => 4,
    }
}
