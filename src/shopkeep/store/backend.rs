use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The storage namespaces a backend must provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Area {
    /// Key-value area: snapshot mirror, session flag, persisted images.
    Local,
    /// Record area: the versioned snapshot.
    Records,
}

impl Area {
    pub fn dir_name(&self) -> &'static str {
        match self {
            Area::Local => "local",
            Area::Records => "records",
        }
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Abstract interface for raw storage I/O.
///
/// Values are opaque strings (serialized JSON). This trait handles the "how"
/// of storage (filesystem vs memory); the typed stores in this module handle
/// the "what".
pub trait StorageBackend {
    /// Read a value. Returns Ok(None) when the key has never been written.
    /// Returns Err only on actual I/O errors (permissions, disk failure).
    fn get(&self, area: Area, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn put(&self, area: Area, key: &str, value: &str) -> Result<()>;

    /// Remove a value. Removing a missing key is not an error.
    fn remove(&self, area: Area, key: &str) -> Result<()>;
}
