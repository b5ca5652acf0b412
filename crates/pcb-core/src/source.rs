//! Record source abstraction. Adapters hand the core plain attribute maps.

use std::collections::HashMap;

use serde_json::{Map, Value};

use pcb_domain::RecordKind;

use crate::CoreError;

/// A source record as read from storage, before alias normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    /// Stable identity, typically the storage path.
    pub id: String,
    /// Display fallback, typically the file stem.
    pub name: String,
    pub attributes: Map<String, Value>,
}

impl RawRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, attributes: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            attributes,
        }
    }

    /// Builds a record whose id and name are both `name`. Non-object values yield no attributes.
    pub fn from_value(name: impl Into<String>, value: Value) -> Self {
        let name = name.into();
        let attributes = match value {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self::new(name.clone(), name, attributes)
    }
}

/// Supplies raw records per kind. Implementations are read-only and re-read on every call.
pub trait RecordSource: Send + Sync {
    fn load(&self, kind: RecordKind) -> Result<Vec<RawRecord>, CoreError>;
}

/// In-memory source used by tests and embedding callers.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    records: HashMap<RecordKind, Vec<RawRecord>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, kind: RecordKind, record: RawRecord) {
        self.records.entry(kind).or_default().push(record);
    }

    pub fn with(mut self, kind: RecordKind, name: &str, attributes: Value) -> Self {
        self.insert(kind, RawRecord::from_value(name, attributes));
        self
    }
}

impl RecordSource for MemorySource {
    fn load(&self, kind: RecordKind) -> Result<Vec<RawRecord>, CoreError> {
        Ok(self.records.get(&kind).cloned().unwrap_or_default())
    }
}
