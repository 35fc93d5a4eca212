//! The introspection session: register schemas, ingest instances, read fields.

use std::sync::Arc;

use bytes::Bytes;
use msgintro_core::{Definition, Duration, Time, Value};
use msgintro_layout::{FieldSlot, Layout, MessageView};
use msgintro_msg::{DefinitionTree, MessageSchema};

use crate::{
    error::IntrospectError,
    registry::{SchemaHash, SchemaRegistry, SingleSlot},
};

/// Description of one field of the active schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInfo {
    pub name: String,
    pub type_name: String,
    /// Array suffix as written (`""`, `"[]"`, `"[N]"`).
    pub array: String,
    pub is_primitive: bool,
    pub path: String,
}

impl FieldInfo {
    fn from_definition(def: &Definition) -> Self {
        Self {
            name: def.name().to_string(),
            type_name: def.type_name().to_string(),
            array: def.array().to_string(),
            is_primitive: def.is_primitive(),
            path: def.path().to_string(),
        }
    }
}

struct Instance {
    hash: SchemaHash,
    schema: Arc<MessageSchema>,
    data: Bytes,
    layout: Layout,
}

/// A single-consumer introspection session.
///
/// Schema queries (`definition_tree`, `list_fields`, ...) answer for the
/// active schema: the one most recently registered or ingested. Field reads
/// answer for the current instance, the last buffer ingested successfully.
pub struct Introspector {
    registry: SchemaRegistry,
    active: Option<(SchemaHash, Arc<MessageSchema>)>,
    current: Option<Instance>,
}

impl Default for Introspector {
    fn default() -> Self {
        Self::new()
    }
}

impl Introspector {
    /// Session that keeps one schema at a time.
    pub fn new() -> Self {
        Self::with_registry(SchemaRegistry::with_policy(SingleSlot::default()))
    }

    pub fn with_registry(registry: SchemaRegistry) -> Self {
        Self {
            registry,
            active: None,
            current: None,
        }
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    pub fn is_registered(&self, hash: &str) -> bool {
        self.registry.contains(hash)
    }

    /// Register a schema under `hash` and make it the active schema.
    ///
    /// A hash that is already registered is not parsed again.
    pub fn register(
        &mut self,
        hash: &str,
        type_name: &str,
        text: &str,
    ) -> Result<Arc<MessageSchema>, IntrospectError> {
        let schema = self
            .registry
            .register(hash, type_name, text)
            .map_err(|source| IntrospectError::SchemaParse {
                hash: hash.to_string(),
                type_name: type_name.to_string(),
                source,
            })?;
        self.active = Some((SchemaHash::from(hash), Arc::clone(&schema)));

        if let Some(instance) = &self.current
            && !self.registry.contains(instance.hash.as_str())
        {
            log::debug!(
                "schema '{}' was evicted; dropping current instance",
                instance.hash
            );
            self.current = None;
        }
        Ok(schema)
    }

    /// Lay out `data` against the schema registered under `hash`.
    ///
    /// On failure the previous instance is dropped as well.
    pub fn ingest(&mut self, hash: &str, data: &[u8]) -> Result<(), IntrospectError> {
        self.current = None;
        let schema = self
            .registry
            .lookup(hash)
            .ok_or_else(|| IntrospectError::UnknownSchema {
                hash: hash.to_string(),
            })?;
        let layout =
            Layout::build(schema.tree(), data).map_err(|source| IntrospectError::Layout {
                hash: hash.to_string(),
                source,
            })?;

        let hash = SchemaHash::from(hash);
        self.active = Some((hash.clone(), Arc::clone(&schema)));
        self.current = Some(Instance {
            hash,
            schema,
            data: Bytes::copy_from_slice(data),
            layout,
        });
        Ok(())
    }

    /// Register `text` under `hash` if needed, then ingest `data`.
    pub fn ingest_with(
        &mut self,
        hash: &str,
        type_name: &str,
        text: &str,
        data: &[u8],
    ) -> Result<(), IntrospectError> {
        if !self.registry.contains(hash) {
            self.register(hash, type_name, text)?;
        }
        self.ingest(hash, data)
    }

    // ── schema queries ───────────────────────────────────────────────────────

    pub fn schema(&self) -> Option<&Arc<MessageSchema>> {
        self.active.as_ref().map(|(_, schema)| schema)
    }

    pub fn definition_tree(&self) -> Option<&DefinitionTree> {
        self.schema().map(|schema| schema.tree())
    }

    /// Direct children of `parent_path` in the active schema.
    pub fn list_fields(&self, parent_path: &str) -> Option<Vec<FieldInfo>> {
        let fields = self.definition_tree()?.list_fields(parent_path)?;
        Some(fields.into_iter().map(FieldInfo::from_definition).collect())
    }

    pub fn field_info(&self, path: &str) -> Option<FieldInfo> {
        self.definition_tree()?
            .definition_at(path)
            .map(FieldInfo::from_definition)
    }

    /// Component table of the active schema, one block per type.
    pub fn print_components(&self) -> Option<String> {
        self.schema().map(|schema| schema.components().to_string())
    }

    /// Definition tree of the active schema, one line per node.
    pub fn print_definition_tree(&self) -> Option<String> {
        self.definition_tree().map(|tree| tree.to_string())
    }

    // ── instance access ──────────────────────────────────────────────────────

    pub fn current_hash(&self) -> Option<&SchemaHash> {
        self.current.as_ref().map(|instance| &instance.hash)
    }

    /// Schema of the current instance, which may differ from [`Self::schema`]
    /// after another hash was registered.
    pub fn instance_schema(&self) -> Option<&Arc<MessageSchema>> {
        self.current.as_ref().map(|instance| &instance.schema)
    }

    pub fn layout(&self) -> Option<&Layout> {
        self.current.as_ref().map(|instance| &instance.layout)
    }

    pub fn view(&self) -> Option<MessageView<'_>> {
        self.current
            .as_ref()
            .map(|instance| MessageView::new(&instance.layout, &instance.data))
    }

    pub fn path_exists(&self, path: &str) -> bool {
        self.view().is_some_and(|v| v.path_exists(path))
    }

    pub fn slot(&self, path: &str) -> Option<FieldSlot> {
        self.view()?.slot(path)
    }

    pub fn array_len(&self, path: &str) -> Option<usize> {
        self.view()?.array_len(path)
    }

    pub fn get_bool(&self, path: &str) -> Option<bool> {
        self.view()?.get_bool(path)
    }

    pub fn get_i8(&self, path: &str) -> Option<i8> {
        self.view()?.get_i8(path)
    }

    pub fn get_i16(&self, path: &str) -> Option<i16> {
        self.view()?.get_i16(path)
    }

    pub fn get_i32(&self, path: &str) -> Option<i32> {
        self.view()?.get_i32(path)
    }

    pub fn get_i64(&self, path: &str) -> Option<i64> {
        self.view()?.get_i64(path)
    }

    pub fn get_u8(&self, path: &str) -> Option<u8> {
        self.view()?.get_u8(path)
    }

    pub fn get_u16(&self, path: &str) -> Option<u16> {
        self.view()?.get_u16(path)
    }

    pub fn get_u32(&self, path: &str) -> Option<u32> {
        self.view()?.get_u32(path)
    }

    pub fn get_u64(&self, path: &str) -> Option<u64> {
        self.view()?.get_u64(path)
    }

    pub fn get_f32(&self, path: &str) -> Option<f32> {
        self.view()?.get_f32(path)
    }

    pub fn get_f64(&self, path: &str) -> Option<f64> {
        self.view()?.get_f64(path)
    }

    pub fn get_time(&self, path: &str) -> Option<Time> {
        self.view()?.get_time(path)
    }

    pub fn get_duration(&self, path: &str) -> Option<Duration> {
        self.view()?.get_duration(path)
    }

    pub fn get_string(&self, path: &str) -> Option<String> {
        self.view()?.get_string(path)
    }

    pub fn get_string_bytes(&self, path: &str) -> Option<&[u8]> {
        self.view()?.get_string_bytes(path)
    }

    pub fn get_number(&self, path: &str) -> Option<f64> {
        self.view()?.get_number(path)
    }

    pub fn get_value(&self, path: &str) -> Option<Value> {
        self.view()?.get_value(path)
    }
}
