//! The published dataset: a static `store-data.json` deployed next to the
//! storefront. Read-only; shopkeep never writes to it.

use crate::error::{Result, StoreError};
use crate::model::StoredData;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const PUBLISHED_FILE_NAME: &str = "store-data.json";

pub trait PublishedSource {
    /// Fetch the raw document. Ok(None) means the source is absent.
    fn fetch(&self) -> Result<Option<String>>;
}

/// Published file on local disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PublishedSource for FileSource {
    fn fetch(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&self.path)
            .map(Some)
            .map_err(StoreError::Io)
    }
}

/// Published document held in memory. Used by tests and embedders that
/// fetch the file themselves.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    body: Option<String>,
}

impl StaticSource {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: Some(body.into()),
        }
    }

    pub fn absent() -> Self {
        Self::default()
    }
}

impl PublishedSource for StaticSource {
    fn fetch(&self) -> Result<Option<String>> {
        Ok(self.body.clone())
    }
}

/// Fetch and parse the published dataset. Any failure counts as "absent".
pub fn load_published<S: PublishedSource>(source: &S) -> Option<StoredData> {
    let raw = match source.fetch() {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!("No published data file");
            return None;
        }
        Err(e) => {
            warn!(error = %e, "Could not fetch published data");
            return None;
        }
    };

    match serde_json::from_str::<StoredData>(&raw) {
        Ok(stored) => Some(stored),
        Err(e) => {
            warn!(error = %e, "Ignoring unparseable published data");
            None
        }
    }
}
