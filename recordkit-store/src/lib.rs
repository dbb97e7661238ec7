//! Durable key-value storage for recordkit.
//!
//! Provides the persistence collaborator the record model serializes into:
//!
//! - [`KvStore`] — a SQLite-backed key-value store for JSON primitives and
//!   opaque byte blobs, durable across process restarts until removed or
//!   cleared. Handles are explicit: callers open a store at a path (or in
//!   memory) and pass it where it is needed; there is no ambient global
//!   instance.
//! - [`archive_record`] / [`unarchive_record`] — the opaque-blob encoding
//!   that bridges the symmetric field codec to blob storage.
//! - [`save_record`] / [`load_record`] — one-key record persistence built
//!   from the two layers above.

mod archive;
mod error;
mod kv;

pub use archive::{archive_record, load_record, save_record, unarchive_record};
pub use error::{StoreError, StoreResult};
pub use kv::KvStore;
