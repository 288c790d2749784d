use crate::commands::{CmdMessage, CmdResult};
use crate::config::ShopConfig;
use crate::error::{Result, StoreError};
use crate::source::PublishedSource;
use crate::store::{ShopStore, StorageBackend};
use tracing::info;

/// Check the password, persist the session flag and reload as an admin.
pub fn login<B: StorageBackend, S: PublishedSource>(
    store: &mut ShopStore<B>,
    source: &S,
    config: &ShopConfig,
    password: &str,
) -> Result<CmdResult> {
    if password != config.admin_password {
        return Err(StoreError::InvalidPassword);
    }

    store.set_authenticated(true)?;
    store.reload(source);
    info!(version = %store.version(), origin = %store.origin(), "Admin logged in");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Logged in. Store data v{} from {}",
        store.version(),
        store.origin()
    )));
    Ok(result)
}

pub fn logout<B: StorageBackend>(store: &mut ShopStore<B>) -> Result<CmdResult> {
    store.set_authenticated(false)?;
    store.clear_changes();

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success("Logged out"));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::StaticSource;
    use crate::store::images::MAX_IMAGE_BYTES;
    use crate::store::mem_backend::MemBackend;
    use crate::sync::DataOrigin;

    fn public_store() -> ShopStore<MemBackend> {
        ShopStore::open(MemBackend::new(), &StaticSource::absent(), MAX_IMAGE_BYTES)
    }

    #[test]
    fn test_login_with_default_password() {
        let mut store = public_store();
        let config = ShopConfig::default();

        login(&mut store, &StaticSource::absent(), &config, "admin123").unwrap();
        assert!(store.is_authenticated());
        // Admin reconciliation seeds the record area.
        assert_eq!(store.origin(), DataOrigin::Defaults);
        assert!(crate::store::records::RecordStore::new(store.backend())
            .load()
            .unwrap()
            .is_some());
    }

    #[test]
    fn test_login_wrong_password() {
        let mut store = public_store();
        let err = login(
            &mut store,
            &StaticSource::absent(),
            &ShopConfig::default(),
            "hunter2",
        )
        .unwrap_err();
        assert!(matches!(err, StoreError::InvalidPassword));
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_login_uses_configured_password() {
        let mut store = public_store();
        let mut config = ShopConfig::default();
        config.set("admin-password", "s3cret").unwrap();

        assert!(login(&mut store, &StaticSource::absent(), &config, "admin123").is_err());
        assert!(login(&mut store, &StaticSource::absent(), &config, "s3cret").is_ok());
    }

    #[test]
    fn test_logout_clears_flag_and_pending_changes() {
        let mut store = public_store();
        store.set_authenticated(true).unwrap();
        let data = store.data().clone();
        store.commit(data).unwrap();
        assert!(store.has_changes());

        logout(&mut store).unwrap();
        assert!(!store.is_authenticated());
        assert!(!store.has_changes());
    }
}
