//! The symmetric serializer.
//!
//! [`encode`] walks the registry in declaration order and writes each
//! present field into a sink; [`decode`] walks the same registry and reads
//! each field back, leaving defaults where the source has no value. Both
//! sides share one field list, which is what makes the pair symmetric:
//! `decode(encode(r))` equals `r` on every registered field, and a source
//! written before a field existed still decodes cleanly.

use crate::Record;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Key-value writer the encoder targets.
pub trait FieldSink {
    /// Writes one field value under its name.
    fn write_field(&mut self, name: &str, value: Value);
}

/// Key-value reader the decoder draws from.
pub trait FieldSource {
    /// Reads the value for a field name, if the source has one.
    fn read_field(&self, name: &str) -> Option<Value>;
}

/// Encodes a record's present fields into `sink`, in registry order.
///
/// Absent fields are skipped entirely; the decoder treats a missing key as
/// "keep the default", so nothing is lost. Writes are deterministic: the
/// same record produces the same sequence every time.
pub fn encode<T: Record>(record: &T, sink: &mut impl FieldSink) {
    for field in T::registry().fields {
        if let Some(value) = (field.get)(record) {
            sink.write_field(field.name, value);
        }
    }
}

/// Decodes a record from `source`.
///
/// Starts from the default record and assigns each registered field the
/// source has a value for. Missing keys are not an error — a serialized
/// form produced before a field was added to the registry decodes with
/// that field at its default.
#[must_use]
pub fn decode<T: Record>(source: &impl FieldSource) -> T {
    let mut record = T::default();
    for field in T::registry().fields {
        if let Some(value) = source.read_field(field.name) {
            (field.set)(&mut record, value);
        }
    }
    record
}

/// An ordered, in-memory field buffer implementing both codec ends.
///
/// This is the serialized form's in-memory representation: encoding fills
/// it in registry order, and it serializes to a plain JSON array of
/// `[name, value]` pairs for blob storage. Reads return the last write for
/// a name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldBuffer {
    entries: Vec<(String, Value)>,
}

impl FieldBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The buffered `(name, value)` pairs, in write order.
    #[must_use]
    pub fn entries(&self) -> &[(String, Value)] {
        &self.entries
    }

    /// Number of buffered writes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FieldSink for FieldBuffer {
    fn write_field(&mut self, name: &str, value: Value) {
        self.entries.push((name.to_string(), value));
    }
}

impl FieldSource for FieldBuffer {
    fn read_field(&self, name: &str) -> Option<Value> {
        self.entries
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
    }
}
