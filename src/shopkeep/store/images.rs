//! # Image Gallery (Blob Store)
//!
//! Uploaded images are held in memory as [`StoredImage`] values, each paired
//! with a transient object URL (`blob:shopkeep/<uuid>`). URLs live only as
//! long as the gallery does: every load generates fresh ones, and deleting an
//! image revokes its URL.
//!
//! For durability the full image set is written to the key-value area under
//! `storedImages` as [`PersistedImage`] records (base64 data URLs, see
//! [`crate::codec`]).
//!
//! There is no deduplication and no reference counting: a product that
//! points at a deleted image keeps its (now dead) URL.

use super::backend::StorageBackend;
use super::local::LocalStore;
use crate::codec::{Codec, DataUrlCodec};
use crate::error::{Result, StoreError};
use crate::model::time_based_id;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

/// Upload limit: 5 MiB.
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

const OBJECT_URL_PREFIX: &str = "blob:shopkeep/";

#[derive(Debug, Clone, PartialEq)]
pub struct StoredImage {
    pub id: String,
    pub name: String,
    pub size: u64,
    pub mime: String,
    pub uploaded_at: DateTime<Utc>,
    pub bytes: Vec<u8>,
}

/// Durable form of a [`StoredImage`]. This is also the `imageData` entry
/// shape of a full backup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedImage {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub size: u64,
    #[serde(rename = "type", default)]
    pub mime: String,
    pub uploaded_at: DateTime<Utc>,
    pub data_url: String,
}

/// A file handed to [`ImageStore::upload`].
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GalleryImage {
    pub image: StoredImage,
    pub url: String,
}

pub struct ImageStore {
    images: Vec<GalleryImage>,
    max_bytes: u64,
    codec: DataUrlCodec,
}

fn create_object_url() -> String {
    format!("{}{}", OBJECT_URL_PREFIX, Uuid::new_v4())
}

impl ImageStore {
    pub fn new(max_bytes: u64) -> Self {
        Self {
            images: Vec::new(),
            max_bytes,
            codec: DataUrlCodec,
        }
    }

    /// Load the persisted gallery. Never fails: unreadable storage yields an
    /// empty gallery and undecodable records are skipped.
    pub fn load<B: StorageBackend>(backend: &B, max_bytes: u64) -> Self {
        let mut store = Self::new(max_bytes);
        store.reload(backend);
        store
    }

    /// Drop every object URL and rebuild the gallery from storage.
    pub fn reload<B: StorageBackend>(&mut self, backend: &B) {
        self.images.clear();

        let records = match LocalStore::new(backend).load_image_records() {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, "Could not read stored images, starting with an empty gallery");
                return;
            }
        };

        for record in &records {
            match self.codec.decode(record) {
                Ok(image) => self.images.push(GalleryImage {
                    image,
                    url: create_object_url(),
                }),
                Err(e) => warn!(id = %record.id, name = %record.name, error = %e, "Skipping unreadable image"),
            }
        }
        debug!(count = self.images.len(), "Loaded image gallery");
    }

    pub fn list(&self) -> &[GalleryImage] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&GalleryImage> {
        self.images.iter().find(|g| g.image.id == id)
    }

    pub fn url_for(&self, id: &str) -> Option<&str> {
        self.get(id).map(|g| g.url.as_str())
    }

    pub fn validate(&self, file: &UploadedFile) -> Result<()> {
        if !file.mime.starts_with("image/") {
            return Err(StoreError::Validation(
                "Please select a valid image file".to_string(),
            ));
        }
        if file.bytes.len() as u64 > self.max_bytes {
            return Err(StoreError::Validation(format!(
                "Image size must be less than {}",
                format_size(self.max_bytes)
            )));
        }
        Ok(())
    }

    /// Validate, persist and add an image. The gallery is unchanged on error.
    pub fn upload<B: StorageBackend>(
        &mut self,
        backend: &B,
        file: UploadedFile,
    ) -> Result<GalleryImage> {
        self.validate(&file)?;

        let id = time_based_id(self.images.iter().map(|g| g.image.id.as_str()));
        let image = StoredImage {
            id,
            name: file.name,
            size: file.bytes.len() as u64,
            mime: file.mime,
            uploaded_at: Utc::now(),
            bytes: file.bytes,
        };

        let mut records = self.persisted_records();
        records.push(self.codec.encode(&image));
        LocalStore::new(backend).save_image_records(&records)?;

        let entry = GalleryImage {
            image,
            url: create_object_url(),
        };
        self.images.push(entry.clone());
        debug!(id = %entry.image.id, size = entry.image.size, "Uploaded image");
        Ok(entry)
    }

    /// Remove an image and revoke its URL. Returns the removed entry so the
    /// caller can clear selections pointing at the revoked URL.
    pub fn delete<B: StorageBackend>(&mut self, backend: &B, id: &str) -> Result<GalleryImage> {
        let pos = self
            .images
            .iter()
            .position(|g| g.image.id == id)
            .ok_or_else(|| StoreError::ImageNotFound(id.to_string()))?;

        let records: Vec<PersistedImage> = self
            .images
            .iter()
            .filter(|g| g.image.id != id)
            .map(|g| self.codec.encode(&g.image))
            .collect();
        LocalStore::new(backend).save_image_records(&records)?;

        let removed = self.images.remove(pos);
        debug!(id = %id, url = %removed.url, "Revoked image URL");
        Ok(removed)
    }

    /// Replace the whole persisted set, then reload so URLs are regenerated.
    pub fn replace_all<B: StorageBackend>(
        &mut self,
        backend: &B,
        records: &[PersistedImage],
    ) -> Result<()> {
        LocalStore::new(backend).save_image_records(records)?;
        self.reload(backend);
        Ok(())
    }

    pub fn persisted_records(&self) -> Vec<PersistedImage> {
        self.images
            .iter()
            .map(|g| self.codec.encode(&g.image))
            .collect()
    }
}

/// Human readable byte size: `0 Bytes`, `500 Bytes`, `1.5 KB`, `5 MB`.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let formatted = format!("{:.2}", value);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, UNITS[unit])
}

/// Guess an image MIME type from a file extension.
pub fn mime_from_extension(path: &std::path::Path) -> String {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    let mime = match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "avif" => "image/avif",
        "bmp" => "image/bmp",
        "ico" => "image/x-icon",
        "json" => "application/json",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    };
    mime.to_string()
}
