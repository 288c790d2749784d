use super::backend::{Area, StorageBackend};
use crate::error::{Result, StoreError};
use crate::model::StoredData;

/// Key of the single record holding the versioned snapshot.
pub const RECORD_KEY: &str = "appData";

/// Typed view over the record area.
pub struct RecordStore<'a, B: StorageBackend> {
    backend: &'a B,
}

impl<'a, B: StorageBackend> RecordStore<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    pub fn load(&self) -> Result<Option<StoredData>> {
        match self.backend.get(Area::Records, RECORD_KEY)? {
            Some(raw) => {
                let stored: StoredData =
                    serde_json::from_str(&raw).map_err(StoreError::Serialization)?;
                Ok(Some(stored))
            }
            None => Ok(None),
        }
    }

    /// Replace the record. The whole aggregate is written in one `put`.
    pub fn save(&self, stored: &StoredData) -> Result<()> {
        let raw = serde_json::to_string_pretty(stored).map_err(StoreError::Serialization)?;
        self.backend.put(Area::Records, RECORD_KEY, &raw)
    }
}
