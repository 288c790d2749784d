use crate::error::{Result, StoreError};
use crate::source::PUBLISHED_FILE_NAME;
use crate::store::images::MAX_IMAGE_BYTES;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Configuration for shopkeep, stored in `<root>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShopConfig {
    /// Password checked by `login`
    #[serde(default = "default_admin_password")]
    pub admin_password: String,

    /// Location of the published `store-data.json` (default `<root>/public/store-data.json`)
    #[serde(default)]
    pub published_data: Option<PathBuf>,

    /// Where exports and save backups are written (default `<root>/downloads`)
    #[serde(default)]
    pub downloads_dir: Option<PathBuf>,

    /// Upload size limit in bytes
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: u64,
}

fn default_admin_password() -> String {
    DEFAULT_ADMIN_PASSWORD.to_string()
}

fn default_max_image_bytes() -> u64 {
    MAX_IMAGE_BYTES
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            admin_password: default_admin_password(),
            published_data: None,
            downloads_dir: None,
            max_image_bytes: default_max_image_bytes(),
        }
    }
}

/// Keys accepted by [`ShopConfig::set`].
pub const CONFIG_KEYS: &[&str] = &[
    "admin-password",
    "published-data",
    "downloads-dir",
    "max-image-bytes",
];

impl ShopConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(StoreError::Io)?;
        let config: ShopConfig =
            serde_json::from_str(&content).map_err(StoreError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(StoreError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(StoreError::Serialization)?;
        fs::write(config_path, content).map_err(StoreError::Io)?;
        Ok(())
    }

    pub fn published_path(&self, root: &Path) -> PathBuf {
        self.published_data
            .clone()
            .unwrap_or_else(|| root.join("public").join(PUBLISHED_FILE_NAME))
    }

    pub fn downloads_path(&self, root: &Path) -> PathBuf {
        self.downloads_dir
            .clone()
            .unwrap_or_else(|| root.join("downloads"))
    }

    /// Display value for a key. The password is masked.
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "admin-password" => "*".repeat(self.admin_password.chars().count()),
            "published-data" => display_opt_path(&self.published_data),
            "downloads-dir" => display_opt_path(&self.downloads_dir),
            "max-image-bytes" => self.max_image_bytes.to_string(),
            _ => return None,
        };
        Some(value)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "admin-password" => {
                if value.is_empty() {
                    return Err(StoreError::Validation(
                        "Password cannot be empty".to_string(),
                    ));
                }
                self.admin_password = value.to_string();
            }
            "published-data" => self.published_data = non_empty_path(value),
            "downloads-dir" => self.downloads_dir = non_empty_path(value),
            "max-image-bytes" => {
                self.max_image_bytes = value.parse().map_err(|_| {
                    StoreError::Validation(format!("Not a byte count: {}", value))
                })?;
            }
            other => {
                return Err(StoreError::Validation(format!(
                    "Unknown config key: {} (expected one of: {})",
                    other,
                    CONFIG_KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }
}

fn display_opt_path(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(default)".to_string())
}

fn non_empty_path(value: &str) -> Option<PathBuf> {
    if value.trim().is_empty() {
        None
    } else {
        Some(PathBuf::from(value))
    }
}
