use crate::commands::helpers::require_auth;
use crate::commands::{CmdMessage, CmdResult, ImageSummary};
use crate::error::{Result, StoreError};
use crate::model::ProductDraft;
use crate::store::images::{format_size, mime_from_extension, UploadedFile};
use crate::store::{ShopStore, StorageBackend};
use std::fs;
use std::path::Path;

pub fn list<B: StorageBackend>(store: &ShopStore<B>) -> Result<CmdResult> {
    let images: Vec<ImageSummary> = store.images().list().iter().map(Into::into).collect();
    let mut result = CmdResult::default().with_images(images);
    if result.images.is_empty() {
        result.add_message(CmdMessage::info("No images uploaded."));
    }
    Ok(result)
}

pub fn upload<B: StorageBackend>(store: &mut ShopStore<B>, file: UploadedFile) -> Result<CmdResult> {
    require_auth(store)?;

    let entry = store.upload_image(file)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Uploaded {} ({}) as {}",
        entry.image.name,
        format_size(entry.image.size),
        entry.image.id
    )));
    Ok(result.with_images(vec![(&entry).into()]))
}

/// Read a file from disk and upload it, guessing the MIME type from its
/// extension.
pub fn upload_path<B: StorageBackend>(store: &mut ShopStore<B>, path: &Path) -> Result<CmdResult> {
    let bytes = fs::read(path).map_err(StoreError::Io)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    upload(
        store,
        UploadedFile {
            name,
            mime: mime_from_extension(path),
            bytes,
        },
    )
}

/// Delete an image. If `selection` currently points at the image's URL, it
/// is cleared.
pub fn delete<B: StorageBackend>(
    store: &mut ShopStore<B>,
    id: &str,
    selection: Option<&mut ProductDraft>,
) -> Result<CmdResult> {
    require_auth(store)?;

    let removed = store.delete_image(id)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Deleted image {} ({})",
        removed.image.name, removed.image.id
    )));

    if let Some(draft) = selection {
        if draft.clear_image_if(&removed.url) {
            result.add_message(CmdMessage::info("Cleared the selected product image"));
        }
    }
    Ok(result.with_images(vec![(&removed).into()]))
}
