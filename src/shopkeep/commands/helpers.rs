use crate::commands::{CmdMessage, CmdResult};
use crate::download::Downloads;
use crate::error::{Result, StoreError};
use crate::model::{AppData, StoredData};
use crate::source::PUBLISHED_FILE_NAME;
use crate::store::{ShopStore, StorageBackend};
use tracing::warn;

pub fn require_auth<B: StorageBackend>(store: &ShopStore<B>) -> Result<()> {
    if store.is_authenticated() {
        Ok(())
    } else {
        Err(StoreError::NotAuthenticated)
    }
}

/// Commit `data` under the next version and hand the resulting
/// `store-data.json` to the downloads sink.
///
/// Only the commit can fail. A failed download is reported as a warning.
pub fn persist<B: StorageBackend, D: Downloads>(
    store: &mut ShopStore<B>,
    downloads: &D,
    data: AppData,
    result: &mut CmdResult,
) -> Result<StoredData> {
    let stored = store.commit(data)?;

    match deliver_json(downloads, PUBLISHED_FILE_NAME, &stored) {
        Ok(path) => {
            result.add_message(CmdMessage::info(format!(
                "Updated {} written to {}",
                PUBLISHED_FILE_NAME,
                path.display()
            )));
            result.files.push(path);
        }
        Err(e) => {
            warn!(error = %e, "Could not deliver store-data.json after save");
            result.add_message(CmdMessage::warning(format!(
                "Saved, but could not write {}: {}",
                PUBLISHED_FILE_NAME, e
            )));
        }
    }

    Ok(stored)
}

pub fn deliver_json<D: Downloads, T: serde::Serialize>(
    downloads: &D,
    filename: &str,
    value: &T,
) -> Result<std::path::PathBuf> {
    let body = serde_json::to_string_pretty(value).map_err(StoreError::Serialization)?;
    downloads.deliver(filename, &body)
}
