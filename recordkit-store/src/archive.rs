//! Opaque-blob archiving of records.
//!
//! A record is archived by running it through the symmetric field codec
//! into a [`FieldBuffer`] and serializing the buffer to JSON bytes. The
//! bytes are opaque to the store; only the codec gives them meaning again.
//! Because decoding is registry-driven, an archive written before a field
//! joined the registry still unarchives, with that field at its default.

use crate::error::StoreResult;
use crate::kv::KvStore;
use recordkit_model::{FieldBuffer, Record, decode, encode};
use tracing::trace;

/// Archives a record's registered fields into opaque bytes.
pub fn archive_record<T: Record>(record: &T) -> StoreResult<Vec<u8>> {
    let mut buf = FieldBuffer::new();
    encode(record, &mut buf);
    Ok(serde_json::to_vec(&buf)?)
}

/// Restores a record from archived bytes.
///
/// Fields the archive has no value for stay at their defaults.
pub fn unarchive_record<T: Record>(bytes: &[u8]) -> StoreResult<T> {
    let buf: FieldBuffer = serde_json::from_slice(bytes)?;
    Ok(decode(&buf))
}

/// Archives `record` and stores it as a blob under `key`.
pub fn save_record<T: Record>(store: &KvStore, key: &str, record: &T) -> StoreResult<()> {
    let bytes = archive_record(record)?;
    store.set_blob(key, &bytes)?;
    trace!(key, record_type = T::registry().record_type, "record saved");
    Ok(())
}

/// Loads and unarchives the record stored under `key`.
///
/// Returns `None` when the key holds nothing.
pub fn load_record<T: Record>(store: &KvStore, key: &str) -> StoreResult<Option<T>> {
    match store.get_blob(key)? {
        Some(bytes) => Ok(Some(unarchive_record(&bytes)?)),
        None => Ok(None),
    }
}
