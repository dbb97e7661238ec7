//! Attribute-declared record model for recordkit.
//!
//! Every record type declares its fields exactly once, in a static
//! [`FieldRegistry`]. Everything generic flows from that declaration:
//! - [`Record`] — name-dispatched access plus tolerant hash construction
//!   (`from_map` applies recognized keys, ignores the rest)
//! - [`encode`] / [`decode`] — the symmetric serializer; decoding an
//!   encoded record yields an equal record on every registered field
//! - [`FieldBuffer`] — an ordered in-memory sink/source for the codec
//! - [`record!`] — declares a record struct and its registry in one place
//!
//! Adding a field to a model means editing its declaration, nothing else:
//! construction, encoding, and decoding pick it up from the registry.

mod codec;
mod macros;
mod record;
mod registry;

pub use codec::{FieldBuffer, FieldSink, FieldSource, decode, encode};
pub use record::Record;
pub use registry::{FieldDef, FieldRegistry};

#[doc(hidden)]
pub use serde_json as __serde_json;
