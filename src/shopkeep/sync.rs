//! # Startup Reconciliation
//!
//! Decides which dataset a session starts from. There are up to four
//! candidates:
//!
//! 1. **Records**: the versioned snapshot in the record area
//! 2. **Published**: the deployed `store-data.json`
//! 3. **Local snapshot**: the unversioned mirror in the key-value area
//! 4. **Defaults**: the hardcoded catalog and settings
//!
//! ## Authenticated sessions
//!
//! Admins edit the record area, so it is trusted first. The published file
//! only wins when it is strictly newer:
//!
//! ```text
//! records present?
//! ├── yes: published.version > records.version ? adopt published, write it to records
//! │                                            : adopt records
//! └── no:  published present ? adopt published : adopt defaults (1.0)
//!          and seed records with whatever was adopted
//! ```
//!
//! ## Public sessions
//!
//! Visitors see the published file, falling back to the local snapshot and
//! then the defaults. Nothing is written.
//!
//! ## Failure Handling
//!
//! Every read or parse failure is logged and treated as "source absent".
//! Reconciliation itself cannot fail.

use crate::model::{AppData, StoredData};
use crate::source::{load_published, PublishedSource};
use crate::store::backend::StorageBackend;
use crate::store::local::LocalStore;
use crate::store::records::RecordStore;
use crate::version::Version;
use serde::Serialize;
use std::fmt;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DataOrigin {
    Records,
    Published,
    LocalSnapshot,
    Defaults,
}

impl fmt::Display for DataOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DataOrigin::Records => "local records",
            DataOrigin::Published => "published file",
            DataOrigin::LocalSnapshot => "local snapshot",
            DataOrigin::Defaults => "defaults",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Loaded {
    pub data: AppData,
    pub version: Version,
    pub origin: DataOrigin,
}

impl Loaded {
    fn from_stored(stored: StoredData, origin: DataOrigin) -> Self {
        let (data, version) = stored.into_parts();
        Self {
            data,
            version,
            origin,
        }
    }

    fn defaults() -> Self {
        Self {
            data: AppData::default(),
            version: Version::INITIAL,
            origin: DataOrigin::Defaults,
        }
    }
}

pub fn reconcile<B, S>(backend: &B, source: &S, authenticated: bool) -> Loaded
where
    B: StorageBackend,
    S: PublishedSource,
{
    if authenticated {
        reconcile_admin(backend, source)
    } else {
        reconcile_public(backend, source)
    }
}

fn reconcile_admin<B: StorageBackend, S: PublishedSource>(backend: &B, source: &S) -> Loaded {
    let records = RecordStore::new(backend);

    let stored = match records.load() {
        Ok(stored) => stored,
        Err(e) => {
            warn!(error = %e, "Could not read stored records, treating them as absent");
            None
        }
    };
    let published = load_published(source);

    match (stored, published) {
        (Some(stored), Some(published)) if published.app_version > stored.app_version => {
            info!(
                published = %published.app_version,
                stored = %stored.app_version,
                "Published data is newer, replacing stored records"
            );
            seed(&records, &published);
            Loaded::from_stored(published, DataOrigin::Published)
        }
        (Some(stored), published) => {
            debug!(
                stored = %stored.app_version,
                published = ?published.map(|p| p.app_version.to_string()),
                "Keeping stored records"
            );
            Loaded::from_stored(stored, DataOrigin::Records)
        }
        (None, Some(published)) => {
            debug!(version = %published.app_version, "Seeding records from published data");
            seed(&records, &published);
            Loaded::from_stored(published, DataOrigin::Published)
        }
        (None, None) => {
            debug!("No stored or published data, seeding records with defaults");
            let loaded = Loaded::defaults();
            seed(
                &records,
                &StoredData::new(loaded.data.clone(), loaded.version),
            );
            loaded
        }
    }
}

fn seed<B: StorageBackend>(records: &RecordStore<'_, B>, stored: &StoredData) {
    if let Err(e) = records.save(stored) {
        warn!(error = %e, "Could not write records, continuing with in-memory data");
    }
}

fn reconcile_public<B: StorageBackend, S: PublishedSource>(backend: &B, source: &S) -> Loaded {
    if let Some(published) = load_published(source) {
        return Loaded::from_stored(published, DataOrigin::Published);
    }

    match LocalStore::new(backend).load_snapshot() {
        Ok(Some(data)) => {
            debug!("Using local snapshot");
            Loaded {
                data,
                version: Version::INITIAL,
                origin: DataOrigin::LocalSnapshot,
            }
        }
        Ok(None) => Loaded::defaults(),
        Err(e) => {
            warn!(error = %e, "Ignoring unreadable local snapshot");
            Loaded::defaults()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Product;
    use crate::source::StaticSource;
    use crate::store::backend::Area;
    use crate::store::mem_backend::MemBackend;
    use crate::store::records::RECORD_KEY;

    fn stored_named(name: &str, tenths: u32) -> StoredData {
        let mut data = AppData::default();
        data.settings.site_name = name.to_string();
        StoredData::new(data, Version::from_tenths(tenths))
    }

    fn published(name: &str, version: &str) -> StaticSource {
        StaticSource::new(format!(
            r#"{{"products": [], "settings": {{"siteName": "{}"}}, "appVersion": {}}}"#,
            name, version
        ))
    }

    #[test]
    fn test_newer_published_wins_and_overwrites_records() {
        let backend = MemBackend::new();
        RecordStore::new(&backend)
            .save(&stored_named("Local", 12))
            .unwrap();

        let loaded = reconcile(&backend, &published("Published", "1.3"), true);

        assert_eq!(loaded.origin, DataOrigin::Published);
        assert_eq!(loaded.data.settings.site_name, "Published");
        assert_eq!(loaded.version, Version::from_tenths(13));

        let records = RecordStore::new(&backend).load().unwrap().unwrap();
        assert_eq!(records.settings.site_name, "Published");
        assert_eq!(records.app_version, Version::from_tenths(13));
    }

    #[test]
    fn test_equal_version_keeps_records() {
        let backend = MemBackend::new();
        RecordStore::new(&backend)
            .save(&stored_named("Local", 13))
            .unwrap();

        let loaded = reconcile(&backend, &published("Published", "1.3"), true);
        assert_eq!(loaded.origin, DataOrigin::Records);
        assert_eq!(loaded.data.settings.site_name, "Local");
    }

    #[test]
    fn test_older_published_keeps_records() {
        let backend = MemBackend::new();
        RecordStore::new(&backend)
            .save(&stored_named("Local", 20))
            .unwrap();

        let loaded = reconcile(&backend, &published("Published", "1.9"), true);
        assert_eq!(loaded.origin, DataOrigin::Records);
        assert_eq!(loaded.version, Version::from_tenths(20));
    }

    #[test]
    fn test_float_drift_in_published_version_is_not_newer() {
        let backend = MemBackend::new();
        RecordStore::new(&backend)
            .save(&stored_named("Local", 13))
            .unwrap();

        // 1.0 + 0.1 + 0.1 + 0.1 as a float-based writer would produce it
        let loaded = reconcile(
            &backend,
            &published("Published", "1.3000000000000003"),
            true,
        );
        assert_eq!(loaded.origin, DataOrigin::Records);
    }

    #[test]
    fn test_no_records_seeds_from_published() {
        let backend = MemBackend::new();
        let loaded = reconcile(&backend, &published("Published", "2.5"), true);

        assert_eq!(loaded.origin, DataOrigin::Published);
        let records = RecordStore::new(&backend).load().unwrap().unwrap();
        assert_eq!(records.app_version, Version::from_tenths(25));
    }

    #[test]
    fn test_no_sources_seeds_defaults() {
        let backend = MemBackend::new();
        let loaded = reconcile(&backend, &StaticSource::absent(), true);

        assert_eq!(loaded.origin, DataOrigin::Defaults);
        assert_eq!(loaded.version, Version::INITIAL);
        assert_eq!(loaded.data, AppData::default());

        let records = RecordStore::new(&backend).load().unwrap().unwrap();
        assert_eq!(records.app_version, Version::INITIAL);
    }

    #[test]
    fn test_corrupt_records_fall_through_to_published() {
        let backend = MemBackend::new();
        backend.put(Area::Records, RECORD_KEY, "{not json").unwrap();

        let loaded = reconcile(&backend, &published("Published", "1.1"), true);
        assert_eq!(loaded.origin, DataOrigin::Published);
    }

    #[test]
    fn test_seed_failure_is_not_fatal() {
        let backend = MemBackend::new();
        backend.set_simulate_write_error(Area::Records, true);

        let loaded = reconcile(&backend, &StaticSource::absent(), true);
        assert_eq!(loaded.origin, DataOrigin::Defaults);
    }

    #[test]
    fn test_public_prefers_published_over_records() {
        let backend = MemBackend::new();
        RecordStore::new(&backend)
            .save(&stored_named("Local", 90))
            .unwrap();

        let loaded = reconcile(&backend, &published("Published", "1.0"), false);
        assert_eq!(loaded.origin, DataOrigin::Published);
        assert_eq!(loaded.data.settings.site_name, "Published");
    }

    #[test]
    fn test_public_falls_back_to_local_snapshot() {
        let backend = MemBackend::new();
        let mut data = AppData::default();
        data.products = vec![Product {
            id: "9".into(),
            name: "Mug".into(),
            description: String::new(),
            price: 8.0,
            image: String::new(),
            category: "Kitchen".into(),
            in_stock: true,
        }];
        LocalStore::new(&backend).save_snapshot(&data).unwrap();

        let loaded = reconcile(&backend, &StaticSource::absent(), false);
        assert_eq!(loaded.origin, DataOrigin::LocalSnapshot);
        assert_eq!(loaded.data, data);
    }

    #[test]
    fn test_public_never_writes() {
        let backend = MemBackend::new();
        let loaded = reconcile(&backend, &StaticSource::absent(), false);
        assert_eq!(loaded.origin, DataOrigin::Defaults);
        assert_eq!(backend.get(Area::Records, RECORD_KEY).unwrap(), None);
    }
}
