use crate::config::ShopConfig;
use crate::model::{Product, SiteSettings};
use crate::store::images::GalleryImage;
use chrono::{DateTime, Utc};
use std::path::PathBuf;

pub mod config;
pub mod export;
pub mod helpers;
pub mod images;
pub mod import;
pub mod products;
pub mod session;
pub mod settings;
pub mod status;

pub use status::StatusReport;

#[derive(Debug, Clone)]
pub struct ShopPaths {
    pub root: PathBuf,
}

impl ShopPaths {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// Gallery entry as shown to the user. Carries no image bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageSummary {
    pub id: String,
    pub name: String,
    pub size: u64,
    pub mime: String,
    pub uploaded_at: DateTime<Utc>,
    pub url: String,
}

impl From<&GalleryImage> for ImageSummary {
    fn from(entry: &GalleryImage) -> Self {
        Self {
            id: entry.image.id.clone(),
            name: entry.image.name.clone(),
            size: entry.image.size,
            mime: entry.image.mime.clone(),
            uploaded_at: entry.image.uploaded_at,
            url: entry.url.clone(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub products: Vec<Product>,
    pub images: Vec<ImageSummary>,
    pub settings: Option<SiteSettings>,
    pub status: Option<StatusReport>,
    pub config: Option<ShopConfig>,
    /// Files written by the command (exports, save backups).
    pub files: Vec<PathBuf>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_products(mut self, products: Vec<Product>) -> Self {
        self.products = products;
        self
    }

    pub fn with_images(mut self, images: Vec<ImageSummary>) -> Self {
        self.images = images;
        self
    }

    pub fn with_settings(mut self, settings: SiteSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    pub fn with_status(mut self, status: StatusReport) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_config(mut self, config: ShopConfig) -> Self {
        self.config = Some(config);
        self
    }
}
