use super::backend::{Area, StorageBackend};
use super::images::PersistedImage;
use crate::error::{Result, StoreError};
use crate::model::AppData;
use tracing::warn;

pub const SNAPSHOT_KEY: &str = "storeData";
pub const AUTH_KEY: &str = "adminAuthStatus";
pub const IMAGES_KEY: &str = "storedImages";

/// Typed view over the key-value area.
pub struct LocalStore<'a, B: StorageBackend> {
    backend: &'a B,
}

impl<'a, B: StorageBackend> LocalStore<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    /// The unversioned `{products, settings}` mirror, if one was saved.
    pub fn load_snapshot(&self) -> Result<Option<AppData>> {
        match self.backend.get(Area::Local, SNAPSHOT_KEY)? {
            Some(raw) => {
                let data: AppData =
                    serde_json::from_str(&raw).map_err(StoreError::Serialization)?;
                Ok(Some(data))
            }
            None => Ok(None),
        }
    }

    pub fn save_snapshot(&self, data: &AppData) -> Result<()> {
        let raw = serde_json::to_string_pretty(data).map_err(StoreError::Serialization)?;
        self.backend.put(Area::Local, SNAPSHOT_KEY, &raw)
    }

    /// Reads the session flag. Storage errors count as "not logged in".
    pub fn is_authenticated(&self) -> bool {
        match self.backend.get(Area::Local, AUTH_KEY) {
            Ok(value) => value.as_deref().map(str::trim) == Some("true"),
            Err(e) => {
                warn!(error = %e, "Could not read session flag");
                false
            }
        }
    }

    pub fn set_authenticated(&self, authenticated: bool) -> Result<()> {
        if authenticated {
            self.backend.put(Area::Local, AUTH_KEY, "true")
        } else {
            self.backend.remove(Area::Local, AUTH_KEY)
        }
    }

    pub fn load_image_records(&self) -> Result<Vec<PersistedImage>> {
        match self.backend.get(Area::Local, IMAGES_KEY)? {
            Some(raw) => serde_json::from_str(&raw).map_err(StoreError::Serialization),
            None => Ok(Vec::new()),
        }
    }

    pub fn save_image_records(&self, records: &[PersistedImage]) -> Result<()> {
        let raw = serde_json::to_string(records).map_err(StoreError::Serialization)?;
        self.backend.put(Area::Local, IMAGES_KEY, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;

    #[test]
    fn test_snapshot_roundtrip() {
        let backend = MemBackend::new();
        let local = LocalStore::new(&backend);
        assert_eq!(local.load_snapshot().unwrap(), None);

        let mut data = AppData::default();
        data.products.truncate(1);
        local.save_snapshot(&data).unwrap();
        assert_eq!(local.load_snapshot().unwrap(), Some(data));
    }

    #[test]
    fn test_session_flag() {
        let backend = MemBackend::new();
        let local = LocalStore::new(&backend);
        assert!(!local.is_authenticated());

        local.set_authenticated(true).unwrap();
        assert!(local.is_authenticated());

        local.set_authenticated(false).unwrap();
        assert!(!local.is_authenticated());
    }

    #[test]
    fn test_session_flag_requires_exact_true() {
        let backend = MemBackend::new();
        backend.put(Area::Local, AUTH_KEY, "yes").unwrap();
        assert!(!LocalStore::new(&backend).is_authenticated());
    }

    #[test]
    fn test_corrupt_snapshot_is_an_error() {
        let backend = MemBackend::new();
        backend.put(Area::Local, SNAPSHOT_KEY, "[1, 2").unwrap();
        assert!(LocalStore::new(&backend).load_snapshot().is_err());
    }
}
