//! # Blob Codec
//!
//! Images live in memory as raw bytes, but the key-value area only stores
//! text. A [`Codec`] converts between the in-memory value and its persistable
//! record. [`DataUrlCodec`] is the one shipped implementation: it stores the
//! payload as a base64 `data:` URL, the same form browsers produce, so
//! exported backups stay portable.

use crate::error::{Result, StoreError};
use crate::store::images::{PersistedImage, StoredImage};
use base64::{engine::general_purpose::STANDARD, Engine};

pub trait Codec {
    type Value;
    type Record;

    fn encode(&self, value: &Self::Value) -> Self::Record;

    fn decode(&self, record: &Self::Record) -> Result<Self::Value>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DataUrlCodec;

impl DataUrlCodec {
    pub fn to_data_url(mime: &str, bytes: &[u8]) -> String {
        format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
    }

    /// Split a base64 data URL into its MIME type and decoded payload.
    pub fn parse_data_url(data_url: &str) -> Result<(String, Vec<u8>)> {
        let rest = data_url
            .strip_prefix("data:")
            .ok_or_else(|| invalid("not a data URL"))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| invalid("missing payload separator"))?;
        let mime = header
            .strip_suffix(";base64")
            .ok_or_else(|| invalid("only base64 data URLs are supported"))?;
        let bytes = STANDARD
            .decode(payload.trim())
            .map_err(|e| invalid(&e.to_string()))?;
        Ok((mime.to_string(), bytes))
    }
}

fn invalid(reason: &str) -> StoreError {
    StoreError::Validation(format!("Invalid image data: {}", reason))
}

impl Codec for DataUrlCodec {
    type Value = StoredImage;
    type Record = PersistedImage;

    fn encode(&self, image: &StoredImage) -> PersistedImage {
        PersistedImage {
            id: image.id.clone(),
            name: image.name.clone(),
            size: image.size,
            mime: image.mime.clone(),
            uploaded_at: image.uploaded_at,
            data_url: Self::to_data_url(&image.mime, &image.bytes),
        }
    }

    fn decode(&self, record: &PersistedImage) -> Result<StoredImage> {
        let (url_mime, bytes) = Self::parse_data_url(&record.data_url)?;
        // The record's own type wins; the data URL header is a fallback for
        // hand-edited backups that dropped it.
        let mime = if record.mime.is_empty() {
            url_mime
        } else {
            record.mime.clone()
        };
        Ok(StoredImage {
            id: record.id.clone(),
            name: record.name.clone(),
            size: bytes.len() as u64,
            mime,
            uploaded_at: record.uploaded_at,
            bytes,
        })
    }
}
