use crate::commands::helpers::deliver_json;
use crate::commands::{CmdMessage, CmdResult};
use crate::download::Downloads;
use crate::error::Result;
use crate::model::StoredData;
use crate::source::PUBLISHED_FILE_NAME;
use crate::store::images::PersistedImage;
use crate::store::{ShopStore, StorageBackend};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

pub const FULL_BACKUP_FILE_NAME: &str = "store-full-backup.json";
pub const FULL_BACKUP_FORMAT: &str = "2.0";

/// Store data plus every image, as one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullBackup {
    pub store_data: StoredData,
    pub image_data: Vec<PersistedImage>,
    pub exported_at: DateTime<Utc>,
    pub version: String,
}

/// Write the current data as `store-data.json`, ready to publish.
pub fn run<B: StorageBackend, D: Downloads>(
    store: &mut ShopStore<B>,
    downloads: &D,
) -> Result<CmdResult> {
    let snapshot = store.snapshot();
    let path = deliver_json(downloads, PUBLISHED_FILE_NAME, &snapshot)?;
    store.clear_changes();
    info!(version = %snapshot.app_version, path = %path.display(), "Exported store data");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Exported v{} to {}",
        snapshot.app_version,
        path.display()
    )));
    result.files.push(path);
    Ok(result)
}

pub fn full<B: StorageBackend, D: Downloads>(
    store: &mut ShopStore<B>,
    downloads: &D,
) -> Result<CmdResult> {
    let backup = FullBackup {
        store_data: store.snapshot(),
        image_data: store.image_records(),
        exported_at: Utc::now(),
        version: FULL_BACKUP_FORMAT.to_string(),
    };
    let path = deliver_json(downloads, FULL_BACKUP_FILE_NAME, &backup)?;
    store.clear_changes();
    info!(images = backup.image_data.len(), path = %path.display(), "Exported full backup");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Exported v{} with {} image(s) to {}",
        backup.store_data.app_version,
        backup.image_data.len(),
        path.display()
    )));
    result.files.push(path);
    Ok(result)
}
