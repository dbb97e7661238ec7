//! Per-field change observation for records.
//!
//! [`Observed`] wraps a record and notifies subscribers whenever a field
//! is assigned through it. Subscription lifetime is explicit on purpose:
//! [`observe`](Observed::observe) hands back a [`SubscriptionId`] the
//! caller must retain, [`unobserve`](Observed::unobserve) cancels it, and
//! dropping the wrapper ends every subscription tied to it. A subscription
//! is scoped to the wrapper instance it was created on — it never follows
//! the data into another wrapper.
//!
//! Only assignments made through the wrapper notify. Unwrapping the record
//! (or mutating a copy) is invisible to observers, which is the point:
//! there is no hidden machinery attached to the record itself.

use recordkit_model::Record;
use serde_json::Value;
use std::fmt;
use tracing::trace;
use uuid::Uuid;

/// Opaque token for one subscription on one [`Observed`] instance.
///
/// Retain it; it is the only way to cancel the subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single delivered change: the field name and the values either side
/// of the assignment. `None` means the field was absent.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldChange {
    pub field: String,
    pub old: Option<Value>,
    pub new: Option<Value>,
}

type Callback = Box<dyn Fn(&FieldChange) + Send + Sync>;

struct Subscriber {
    id: SubscriptionId,
    field: &'static str,
    callback: Callback,
}

impl fmt::Debug for Subscriber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscriber")
            .field("id", &self.id)
            .field("field", &self.field)
            .finish_non_exhaustive()
    }
}

/// A record wrapped with an observer list.
///
/// Assignments through [`set`](Observed::set) and
/// [`clear`](Observed::clear) notify that field's subscribers with the old
/// and new values. Notification is assignment-triggered: writing a value
/// equal to the current one still notifies, and observers that only care
/// about real changes can compare the two sides themselves.
#[derive(Debug)]
pub struct Observed<T: Record> {
    record: T,
    subscribers: Vec<Subscriber>,
}

impl<T: Record> Observed<T> {
    /// Wraps a record for observation.
    #[must_use]
    pub fn new(record: T) -> Self {
        Self {
            record,
            subscribers: Vec::new(),
        }
    }

    /// Subscribes `callback` to assignments of `field` on this instance.
    ///
    /// Returns `None` when `field` is not in the registry. The returned
    /// token must be retained to cancel later.
    pub fn observe(
        &mut self,
        field: &str,
        callback: impl Fn(&FieldChange) + Send + Sync + 'static,
    ) -> Option<SubscriptionId> {
        let field = T::registry().field(field)?.name;
        let id = SubscriptionId::new();
        self.subscribers.push(Subscriber {
            id,
            field,
            callback: Box::new(callback),
        });
        trace!(%id, field, record_type = T::registry().record_type, "observer added");
        Some(id)
    }

    /// Cancels a subscription. Returns false if the token is unknown
    /// (already cancelled, or from another instance).
    pub fn unobserve(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|s| s.id != id);
        let removed = self.subscribers.len() < before;
        if removed {
            trace!(%id, "observer removed");
        }
        removed
    }

    /// Assigns `value` to `field` through its registered setter, then
    /// notifies the field's subscribers with the old and new values.
    ///
    /// Returns false (and notifies nobody) when `field` is not registered.
    pub fn set(&mut self, field: &str, value: Value) -> bool {
        let Some(def) = T::registry().field(field) else {
            return false;
        };
        let old = (def.get)(&self.record);
        (def.set)(&mut self.record, value);
        let new = (def.get)(&self.record);
        self.notify(def.name, old, new);
        true
    }

    /// Clears `field` back to absent, notifying its subscribers.
    pub fn clear(&mut self, field: &str) -> bool {
        self.set(field, Value::Null)
    }

    /// Reads a field through the registry.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<Value> {
        self.record.get(field)
    }

    /// The wrapped record.
    #[must_use]
    pub fn record(&self) -> &T {
        &self.record
    }

    /// Unwraps the record, ending every subscription with the wrapper.
    #[must_use]
    pub fn into_record(self) -> T {
        self.record
    }

    /// Number of live subscriptions on this instance.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.subscribers.len()
    }

    fn notify(&self, field: &'static str, old: Option<Value>, new: Option<Value>) {
        let change = FieldChange {
            field: field.to_string(),
            old,
            new,
        };
        let mut delivered = 0usize;
        for sub in self.subscribers.iter().filter(|s| s.field == field) {
            (sub.callback)(&change);
            delivered += 1;
        }
        if delivered > 0 {
            trace!(field, delivered, "field change dispatched");
        }
    }
}

impl<T: Record> From<T> for Observed<T> {
    fn from(record: T) -> Self {
        Self::new(record)
    }
}
