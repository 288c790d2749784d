//! Import either document `export` produces.
//!
//! The format is sniffed from the structure: an object carrying both
//! `storeData` and `imageData` is a full backup, anything else is read as a
//! plain store-data snapshot. Imported data is saved as the next version of
//! the current session, whatever version the file carries.

use crate::codec::{Codec, DataUrlCodec};
use crate::commands::helpers::{persist, require_auth};
use crate::commands::{CmdMessage, CmdResult};
use crate::download::Downloads;
use crate::error::{Result, StoreError};
use crate::model::AppData;
use crate::store::images::PersistedImage;
use crate::store::{ShopStore, StorageBackend};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug)]
enum ImportDocument {
    Snapshot(AppData),
    FullBackup {
        data: AppData,
        images: Vec<PersistedImage>,
    },
}

fn is_present(value: Option<&Value>) -> bool {
    matches!(value, Some(v) if !v.is_null())
}

fn parse(text: &str) -> Result<ImportDocument> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| StoreError::Import(format!("Invalid JSON file: {}", e)))?;

    if is_present(value.get("storeData")) && is_present(value.get("imageData")) {
        let data: AppData = serde_json::from_value(value["storeData"].clone())
            .map_err(|e| StoreError::Import(format!("Invalid storeData: {}", e)))?;
        let images: Vec<PersistedImage> = serde_json::from_value(value["imageData"].clone())
            .map_err(|e| StoreError::Import(format!("Invalid imageData: {}", e)))?;
        return Ok(ImportDocument::FullBackup { data, images });
    }

    let data: AppData = serde_json::from_value(value)
        .map_err(|e| StoreError::Import(format!("Not a store data file: {}", e)))?;
    Ok(ImportDocument::Snapshot(data))
}

fn check(data: &AppData) -> Result<()> {
    data.validate()
        .map_err(|e| StoreError::Import(e.to_string()))
}

/// Import from text. On any parse or decode error nothing is changed.
pub fn run<B: StorageBackend, D: Downloads>(
    store: &mut ShopStore<B>,
    downloads: &D,
    text: &str,
) -> Result<CmdResult> {
    require_auth(store)?;

    let mut result = CmdResult::default();
    match parse(text)? {
        ImportDocument::Snapshot(data) => {
            check(&data)?;
            let products = data.products.len();
            let stored = persist(store, downloads, data, &mut result)?;
            info!(version = %stored.app_version, products, "Imported store data");
            result.add_message(CmdMessage::success(format!(
                "Imported {} product(s) as v{}",
                products, stored.app_version
            )));
        }
        ImportDocument::FullBackup { data, images } => {
            check(&data)?;
            let codec = DataUrlCodec;
            for record in &images {
                codec.decode(record).map_err(|e| {
                    StoreError::Import(format!("Image {} ({}): {}", record.name, record.id, e))
                })?;
            }

            // Images go first: a failed image write must leave the data
            // untouched, and a failed commit puts the previous images back.
            let previous = store.image_records();
            store.replace_images(&images)?;
            let products = data.products.len();
            let stored = match persist(store, downloads, data, &mut result) {
                Ok(stored) => stored,
                Err(e) => {
                    if let Err(restore) = store.replace_images(&previous) {
                        warn!(error = %restore, "Could not restore images after failed import");
                    }
                    return Err(e);
                }
            };
            info!(
                version = %stored.app_version,
                products,
                images = images.len(),
                "Imported full backup"
            );
            result.add_message(CmdMessage::success(format!(
                "Imported {} product(s) and {} image(s) as v{}",
                products,
                images.len(),
                stored.app_version
            )));
        }
    }
    Ok(result)
}

pub fn run_path<B: StorageBackend, D: Downloads>(
    store: &mut ShopStore<B>,
    downloads: &D,
    path: &Path,
) -> Result<CmdResult> {
    let text = fs::read_to_string(path).map_err(StoreError::Io)?;
    run(store, downloads, &text)
}
