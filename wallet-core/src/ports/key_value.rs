//! Key-value store port - raw persistence abstraction

use crate::domain::result::Result;

/// String-keyed, string-valued storage
///
/// Mirrors the browser storage the wallet was first written against: values
/// are opaque strings (usually JSON) and every key the wallet owns shares
/// one namespace prefix. Implementations must tolerate removing a key that
/// does not exist.
pub trait KeyValueStore: Send + Sync {
    /// Read a value, `None` if the key is absent
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Insert or overwrite a value
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a key (no-op if absent)
    fn remove(&self, key: &str) -> Result<()>;

    /// List every key currently stored
    fn keys(&self) -> Result<Vec<String>>;
}
