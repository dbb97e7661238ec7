use crate::FieldRegistry;
use serde_json::{Map, Value};

/// A record type driven by a static field registry.
///
/// Implementors supply [`registry`](Record::registry); everything else is
/// provided. The [`record!`](crate::record!) macro writes both the struct
/// and the impl, but hand-written impls are equally valid — the trait only
/// asks for the registry.
pub trait Record: Default + 'static {
    /// The field registry for this record type.
    fn registry() -> &'static FieldRegistry<Self>;

    /// Reads a field by name. Returns `None` for absent fields and for
    /// names outside the registry.
    fn get(&self, name: &str) -> Option<Value> {
        Self::registry().field(name).and_then(|f| (f.get)(self))
    }

    /// Writes a field by name through its registered setter.
    ///
    /// Returns false when `name` is not a registered field; the record is
    /// untouched in that case.
    fn set(&mut self, name: &str, value: Value) -> bool {
        match Self::registry().field(name) {
            Some(f) => {
                (f.set)(self, value);
                true
            }
            None => false,
        }
    }

    /// Builds a record from a key-value mapping.
    ///
    /// Each registered field present in the mapping is assigned through its
    /// setter; fields absent from the mapping keep their defaults. Keys that
    /// are not registered fields are ignored — external data is allowed to
    /// be over-complete.
    fn from_map(map: &Map<String, Value>) -> Self {
        let mut record = Self::default();
        for field in Self::registry().fields {
            if let Some(value) = map.get(field.name) {
                (field.set)(&mut record, value.clone());
            }
        }
        record
    }

    /// Builds a record from a JSON value, typically a decoded payload.
    ///
    /// Non-object input yields the default record.
    fn from_json(value: &Value) -> Self {
        match value.as_object() {
            Some(map) => Self::from_map(map),
            None => Self::default(),
        }
    }

    /// Dumps the present fields into a mapping, keyed by field name.
    fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        for field in Self::registry().fields {
            if let Some(value) = (field.get)(self) {
                map.insert(field.name.to_string(), value);
            }
        }
        map
    }
}
