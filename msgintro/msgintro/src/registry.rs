//! Parsed schemas keyed by content hash, with pluggable eviction.

use std::{
    borrow::Borrow,
    collections::{HashMap, VecDeque},
    fmt,
    sync::Arc,
};

use msgintro_msg::{MessageSchema, SchemaError};

/// Opaque content hash identifying one schema text (e.g. an MD5 digest).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SchemaHash(String);

impl SchemaHash {
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SchemaHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for SchemaHash {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SchemaHash {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for SchemaHash {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Decides which schemas a [`SchemaRegistry`] drops as new ones arrive.
pub trait EvictionPolicy: Send + Sync {
    /// `hash` was just inserted. Returns the hashes to evict.
    fn on_insert(&mut self, hash: &SchemaHash) -> Vec<SchemaHash>;

    /// `hash` was looked up or re-registered.
    fn on_access(&mut self, _hash: &SchemaHash) {}
}

/// Never evicts.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeepAll;

impl EvictionPolicy for KeepAll {
    fn on_insert(&mut self, _hash: &SchemaHash) -> Vec<SchemaHash> {
        Vec::new()
    }
}

/// Holds only the most recently inserted schema.
#[derive(Debug, Clone, Default)]
pub struct SingleSlot {
    current: Option<SchemaHash>,
}

impl EvictionPolicy for SingleSlot {
    fn on_insert(&mut self, hash: &SchemaHash) -> Vec<SchemaHash> {
        self.current
            .replace(hash.clone())
            .filter(|previous| previous != hash)
            .into_iter()
            .collect()
    }
}

/// Evicts the least recently used schema once more than `capacity` are held.
#[derive(Debug, Clone)]
pub struct Lru {
    capacity: usize,
    order: VecDeque<SchemaHash>,
}

impl Lru {
    /// A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            order: VecDeque::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn touch(&mut self, hash: &SchemaHash) {
        if let Some(pos) = self.order.iter().position(|h| h == hash) {
            self.order.remove(pos);
        }
        self.order.push_back(hash.clone());
    }
}

impl EvictionPolicy for Lru {
    fn on_insert(&mut self, hash: &SchemaHash) -> Vec<SchemaHash> {
        self.touch(hash);
        let excess = self.order.len().saturating_sub(self.capacity);
        self.order.drain(..excess).collect()
    }

    fn on_access(&mut self, hash: &SchemaHash) {
        self.touch(hash);
    }
}

/// Parsed schemas keyed by [`SchemaHash`].
///
/// Registering a hash that is already present returns the stored schema
/// without parsing the text again.
pub struct SchemaRegistry {
    schemas: HashMap<SchemaHash, Arc<MessageSchema>>,
    policy: Box<dyn EvictionPolicy>,
    parse_count: usize,
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SchemaRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut hashes: Vec<&str> = self.schemas.keys().map(SchemaHash::as_str).collect();
        hashes.sort_unstable();
        f.debug_struct("SchemaRegistry")
            .field("schemas", &hashes)
            .field("parse_count", &self.parse_count)
            .finish_non_exhaustive()
    }
}

impl SchemaRegistry {
    /// Registry that keeps every schema.
    pub fn new() -> Self {
        Self::with_policy(KeepAll)
    }

    pub fn with_policy(policy: impl EvictionPolicy + 'static) -> Self {
        Self {
            schemas: HashMap::new(),
            policy: Box::new(policy),
            parse_count: 0,
        }
    }

    /// Parse and store `text` under `hash`, or return the schema already
    /// stored there.
    pub fn register(
        &mut self,
        hash: &str,
        type_name: &str,
        text: &str,
    ) -> Result<Arc<MessageSchema>, SchemaError> {
        if let Some((key, schema)) = self.schemas.get_key_value(hash) {
            if schema.type_name() != type_name {
                log::debug!(
                    "hash '{hash}' already holds '{}'; ignoring type name '{type_name}'",
                    schema.type_name()
                );
            }
            let schema = Arc::clone(schema);
            let key = key.clone();
            self.policy.on_access(&key);
            return Ok(schema);
        }

        let schema = Arc::new(MessageSchema::parse(type_name, text)?);
        self.parse_count += 1;
        let key = SchemaHash::from(hash);
        self.schemas.insert(key.clone(), Arc::clone(&schema));

        for evicted in self.policy.on_insert(&key) {
            if evicted != key && self.schemas.remove(&evicted).is_some() {
                log::debug!("evicted schema '{evicted}'");
            }
        }
        Ok(schema)
    }

    /// Stored schema for `hash`, counted as a use by the eviction policy.
    pub fn lookup(&mut self, hash: &str) -> Option<Arc<MessageSchema>> {
        let (key, schema) = self.schemas.get_key_value(hash)?;
        let schema = Arc::clone(schema);
        let key = key.clone();
        self.policy.on_access(&key);
        Some(schema)
    }

    /// Stored schema for `hash`, without touching eviction order.
    pub fn get(&self, hash: &str) -> Option<&Arc<MessageSchema>> {
        self.schemas.get(hash)
    }

    pub fn contains(&self, hash: &str) -> bool {
        self.schemas.contains_key(hash)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Number of schema texts parsed so far.
    pub fn parse_count(&self) -> usize {
        self.parse_count
    }
}
