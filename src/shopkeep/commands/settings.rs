use crate::commands::helpers::{persist, require_auth};
use crate::commands::{CmdMessage, CmdResult};
use crate::download::Downloads;
use crate::error::Result;
use crate::store::{ShopStore, StorageBackend};

pub fn show<B: StorageBackend>(store: &ShopStore<B>) -> Result<CmdResult> {
    Ok(CmdResult::default().with_settings(store.data().settings.clone()))
}

/// Set one field. The whole settings record is saved as a new version.
pub fn set<B: StorageBackend, D: Downloads>(
    store: &mut ShopStore<B>,
    downloads: &D,
    field: &str,
    value: String,
) -> Result<CmdResult> {
    require_auth(store)?;

    let mut data = store.data().clone();
    data.settings.set_field(field, value)?;
    let settings = data.settings.clone();

    let mut result = CmdResult::default();
    let stored = persist(store, downloads, data, &mut result)?;
    result.add_message(CmdMessage::success(format!(
        "Settings saved (v{})",
        stored.app_version
    )));
    Ok(result.with_settings(settings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::download::MemDownloads;
    use crate::error::StoreError;
    use crate::source::StaticSource;
    use crate::store::images::MAX_IMAGE_BYTES;
    use crate::store::mem_backend::MemBackend;
    use crate::store::records::RecordStore;

    #[test]
    fn test_set_field_saves_whole_record() {
        let mut store = ShopStore::open(MemBackend::new(), &StaticSource::absent(), MAX_IMAGE_BYTES);
        store.set_authenticated(true).unwrap();

        set(&mut store, &MemDownloads::new(), "site-name", "Corner Shop".into()).unwrap();

        let records = RecordStore::new(store.backend()).load().unwrap().unwrap();
        assert_eq!(records.settings.site_name, "Corner Shop");
        assert_eq!(records.settings.tagline, "Amazing products for amazing people");
        assert_eq!(show(&store).unwrap().settings.unwrap().site_name, "Corner Shop");
    }

    #[test]
    fn test_set_unknown_field_is_rejected() {
        let mut store = ShopStore::open(MemBackend::new(), &StaticSource::absent(), MAX_IMAGE_BYTES);
        store.set_authenticated(true).unwrap();
        let err = set(&mut store, &MemDownloads::new(), "colour", "red".into()).unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
        assert!(!store.has_changes());
    }

    #[test]
    fn test_set_requires_login() {
        let mut store = ShopStore::open(MemBackend::new(), &StaticSource::absent(), MAX_IMAGE_BYTES);
        let err = set(&mut store, &MemDownloads::new(), "tagline", "x".into()).unwrap_err();
        assert!(matches!(err, StoreError::NotAuthenticated));
    }
}
