//! Where exported files go. In a browser this is the download prompt; here
//! it is a directory.

use crate::error::{Result, StoreError};
use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;

pub trait Downloads {
    /// Deliver a file and return where it ended up.
    fn deliver(&self, filename: &str, contents: &str) -> Result<PathBuf>;
}

/// Writes downloads into a directory, replacing files of the same name.
#[derive(Debug, Clone)]
pub struct DirDownloads {
    dir: PathBuf,
}

impl DirDownloads {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }
}

impl Downloads for DirDownloads {
    fn deliver(&self, filename: &str, contents: &str) -> Result<PathBuf> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).map_err(StoreError::Io)?;
        }
        let path = self.dir.join(filename);
        fs::write(&path, contents).map_err(StoreError::Io)?;
        Ok(path)
    }
}

/// Keeps downloads in memory for inspection.
#[derive(Debug, Default)]
pub struct MemDownloads {
    files: RefCell<Vec<(String, String)>>,
    fail: bool,
}

impl MemDownloads {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            files: RefCell::new(Vec::new()),
            fail: true,
        }
    }

    pub fn count(&self) -> usize {
        self.files.borrow().len()
    }

    /// Contents of the most recent delivery with this name.
    pub fn latest(&self, filename: &str) -> Option<String> {
        self.files
            .borrow()
            .iter()
            .rev()
            .find(|(name, _)| name == filename)
            .map(|(_, body)| body.clone())
    }
}

impl Downloads for MemDownloads {
    fn deliver(&self, filename: &str, contents: &str) -> Result<PathBuf> {
        if self.fail {
            return Err(StoreError::Store("Simulated download failure".into()));
        }
        self.files
            .borrow_mut()
            .push((filename.to_string(), contents.to_string()));
        Ok(PathBuf::from(format!("memory://{}", filename)))
    }
}
