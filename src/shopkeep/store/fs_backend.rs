use super::backend::{Area, StorageBackend};
use crate::error::{Result, StoreError};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Filesystem backend: one `<key>.json` file per key, one directory per area.
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn area_dir(&self, area: Area) -> PathBuf {
        self.root.join(area.dir_name())
    }

    fn key_path(&self, area: Area, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.area_dir(area).join(format!("{}.json", key)))
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(StoreError::Io)?;
        }
        Ok(())
    }
}

/// Keys become file names, so they must stay inside the area directory.
fn validate_key(key: &str) -> Result<()> {
    let ok = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.');
    if ok {
        Ok(())
    } else {
        Err(StoreError::Store(format!("Invalid storage key: {:?}", key)))
    }
}

impl StorageBackend for FsBackend {
    fn get(&self, area: Area, key: &str) -> Result<Option<String>> {
        let path = self.key_path(area, key)?;
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(StoreError::Io)?;
        Ok(Some(content))
    }

    fn put(&self, area: Area, key: &str, value: &str) -> Result<()> {
        let target = self.key_path(area, key)?;
        let dir = self.area_dir(area);
        self.ensure_dir(&dir)?;

        // Atomic Write
        let tmp_path = dir.join(format!(".{}-{}.tmp", key, Uuid::new_v4()));
        fs::write(&tmp_path, value).map_err(StoreError::Io)?;
        fs::rename(&tmp_path, target).map_err(StoreError::Io)?;
        Ok(())
    }

    fn remove(&self, area: Area, key: &str) -> Result<()> {
        let path = self.key_path(area, key)?;
        if path.exists() {
            fs::remove_file(path).map_err(StoreError::Io)?;
        }
        Ok(())
    }
}
