use super::backend::StorageBackend;
use super::images::{GalleryImage, ImageStore, PersistedImage, UploadedFile};
use super::local::LocalStore;
use super::records::RecordStore;
use crate::error::Result;
use crate::model::{AppData, StoredData};
use crate::source::PublishedSource;
use crate::sync::{self, DataOrigin};
use crate::version::Version;
use tracing::{info, warn};

/// Session state over one storage backend: the adopted dataset, its version,
/// and the image gallery.
pub struct ShopStore<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
    data: AppData,
    version: Version,
    origin: DataOrigin,
    has_changes: bool,
    images: ImageStore,
}

impl<B: StorageBackend> ShopStore<B> {
    /// Reconcile the available sources and load the gallery.
    pub fn open<S: PublishedSource>(backend: B, source: &S, max_image_bytes: u64) -> Self {
        let authenticated = LocalStore::new(&backend).is_authenticated();
        let loaded = sync::reconcile(&backend, source, authenticated);
        let images = ImageStore::load(&backend, max_image_bytes);
        Self {
            backend,
            data: loaded.data,
            version: loaded.version,
            origin: loaded.origin,
            has_changes: false,
            images,
        }
    }

    /// Re-run startup reconciliation and regenerate every image URL.
    pub fn reload<S: PublishedSource>(&mut self, source: &S) {
        let loaded = sync::reconcile(&self.backend, source, self.is_authenticated());
        self.data = loaded.data;
        self.version = loaded.version;
        self.origin = loaded.origin;
        self.images.reload(&self.backend);
    }

    pub fn data(&self) -> &AppData {
        &self.data
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn origin(&self) -> DataOrigin {
        self.origin
    }

    /// True once a save happened that has not been exported yet.
    pub fn has_changes(&self) -> bool {
        self.has_changes
    }

    pub fn clear_changes(&mut self) {
        self.has_changes = false;
    }

    pub fn snapshot(&self) -> StoredData {
        StoredData::new(self.data.clone(), self.version)
    }

    pub fn is_authenticated(&self) -> bool {
        LocalStore::new(&self.backend).is_authenticated()
    }

    pub fn set_authenticated(&self, authenticated: bool) -> Result<()> {
        LocalStore::new(&self.backend).set_authenticated(authenticated)
    }

    /// Save a whole new aggregate under the next version.
    ///
    /// The record write decides success: if it fails, nothing changes. The
    /// key-value mirror is best effort.
    pub fn commit(&mut self, data: AppData) -> Result<StoredData> {
        let next = self.version.next();
        let stored = StoredData::new(data, next);
        RecordStore::new(&self.backend).save(&stored)?;

        if let Err(e) = LocalStore::new(&self.backend).save_snapshot(&self.data_of(&stored)) {
            warn!(error = %e, "Could not mirror snapshot to key-value storage");
        }

        self.data = self.data_of(&stored);
        self.version = next;
        self.origin = DataOrigin::Records;
        self.has_changes = true;
        info!(version = %next, products = self.data.products.len(), "Saved store data");
        Ok(stored)
    }

    fn data_of(&self, stored: &StoredData) -> AppData {
        AppData {
            products: stored.products.clone(),
            settings: stored.settings.clone(),
        }
    }

    pub fn images(&self) -> &ImageStore {
        &self.images
    }

    pub fn upload_image(&mut self, file: UploadedFile) -> Result<GalleryImage> {
        self.images.upload(&self.backend, file)
    }

    pub fn delete_image(&mut self, id: &str) -> Result<GalleryImage> {
        self.images.delete(&self.backend, id)
    }

    /// Replace the persisted image set and regenerate every URL.
    pub fn replace_images(&mut self, records: &[PersistedImage]) -> Result<()> {
        self.images.replace_all(&self.backend, records)
    }

    pub fn image_records(&self) -> Vec<PersistedImage> {
        self.images.persisted_records()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::StaticSource;
    use crate::store::backend::Area;
    use crate::store::images::MAX_IMAGE_BYTES;
    use crate::store::mem_backend::MemBackend;
    use crate::store::records::RECORD_KEY;

    fn admin_store() -> ShopStore<MemBackend> {
        let backend = MemBackend::new();
        LocalStore::new(&backend).set_authenticated(true).unwrap();
        ShopStore::open(backend, &StaticSource::absent(), MAX_IMAGE_BYTES)
    }

    #[test]
    fn test_commit_bumps_version_by_one_tenth() {
        let mut store = admin_store();
        assert_eq!(store.version(), Version::INITIAL);

        let mut data = store.data().clone();
        data.settings.tagline = "New".into();
        let stored = store.commit(data).unwrap();

        assert_eq!(stored.app_version.to_string(), "1.1");
        assert_eq!(store.version().to_string(), "1.1");
        assert!(store.has_changes());
        assert_eq!(store.data().settings.tagline, "New");
    }

    #[test]
    fn test_commit_writes_records_and_mirror() {
        let mut store = admin_store();
        let mut data = store.data().clone();
        data.products.pop();
        store.commit(data.clone()).unwrap();

        let records = RecordStore::new(store.backend()).load().unwrap().unwrap();
        assert_eq!(records.products, data.products);
        assert_eq!(records.app_version, Version::from_tenths(11));

        let mirror = LocalStore::new(store.backend()).load_snapshot().unwrap();
        assert_eq!(mirror, Some(data));
    }

    #[test]
    fn test_failed_record_write_changes_nothing() {
        let mut store = admin_store();
        store.backend.set_simulate_write_error(Area::Records, true);

        let before = store.data().clone();
        let mut data = before.clone();
        data.products.clear();

        assert!(store.commit(data).is_err());
        assert_eq!(store.data(), &before);
        assert_eq!(store.version(), Version::INITIAL);
        assert!(!store.has_changes());
    }

    #[test]
    fn test_mirror_failure_does_not_fail_commit() {
        let mut store = admin_store();
        store.backend.set_simulate_write_error(Area::Local, true);

        let data = store.data().clone();
        assert!(store.commit(data).is_ok());
        assert_eq!(store.version(), Version::from_tenths(11));
    }

    #[test]
    fn test_commit_after_drifted_version_lands_on_next_tenth() {
        let backend = MemBackend::new();
        LocalStore::new(&backend).set_authenticated(true).unwrap();
        backend
            .put(
                Area::Records,
                RECORD_KEY,
                r#"{"products": [], "settings": {}, "appVersion": 1.2000000000000002}"#,
            )
            .unwrap();

        let mut store = ShopStore::open(backend, &StaticSource::absent(), MAX_IMAGE_BYTES);
        assert_eq!(store.version(), Version::from_tenths(12));

        let data = store.data().clone();
        let stored = store.commit(data).unwrap();
        assert_eq!(stored.app_version.as_f64(), 1.3);

        let raw = store.backend.get(Area::Records, RECORD_KEY).unwrap().unwrap();
        assert!(raw.contains("\"appVersion\": 1.3"));
    }

    #[test]
    fn test_reopen_sees_committed_version() {
        let mut store = admin_store();
        for _ in 0..3 {
            let data = store.data().clone();
            store.commit(data).unwrap();
        }
        let backend = store.backend;

        let reopened = ShopStore::open(backend, &StaticSource::absent(), MAX_IMAGE_BYTES);
        assert_eq!(reopened.origin(), DataOrigin::Records);
        assert_eq!(reopened.version().to_string(), "1.3");
        assert!(!reopened.has_changes());
    }
}
