//! The attribute registry: a per-type, ordered, static field list.
//!
//! The registry is the single source of truth for which fields exist on a
//! record type. Construction, encoding, decoding, and observation all
//! iterate it; no generic code ever touches a field outside it.

use serde_json::Value;
use std::fmt;

/// One registered field: its name plus the getter/setter pair that moves
/// values between the typed struct field and the JSON value medium.
///
/// The pair is built once, at type-definition time. There is no runtime
/// name-to-method resolution anywhere in the crate.
pub struct FieldDef<T> {
    /// Field name as it appears in mappings and serialized forms.
    pub name: &'static str,
    /// Reads the field; `None` when the field is absent.
    pub get: fn(&T) -> Option<Value>,
    /// Writes the field. A value the field cannot represent leaves it absent.
    pub set: fn(&mut T, Value),
}

impl<T> fmt::Debug for FieldDef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDef")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// The ordered field list for a record type, fixed at type-definition time.
///
/// Declared as a `static` per record type and handed out by
/// [`Record::registry`](crate::Record::registry). Never mutated at runtime;
/// adding a field means editing the declaration.
pub struct FieldRegistry<T: 'static> {
    /// Stable name for the record type (e.g. `"contact"`).
    pub record_type: &'static str,
    /// Registered fields, in declaration order.
    pub fields: &'static [FieldDef<T>],
}

impl<T> FieldRegistry<T> {
    /// Returns the registered field names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.name)
    }

    /// Returns true if `name` is a registered field.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDef<T>> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Number of registered fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the registry declares no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<T> fmt::Debug for FieldRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRegistry")
            .field("record_type", &self.record_type)
            .field("fields", &self.fields)
            .finish()
    }
}
