//! # API Facade
//!
//! A thin facade over the command layer and the single entry point for every
//! storefront operation, whatever the UI.
//!
//! The facade dispatches to `commands/*.rs` and normalizes inputs (file paths
//! into uploads, edits into drafts). It does no business logic, no terminal
//! I/O and no formatting: it returns `Result<CmdResult>`.
//!
//! ## Generic Over Its Collaborators
//!
//! `StorefrontApi<B, D, S>` is generic over the storage backend, the
//! downloads sink and the published data source:
//! - Production: `StorefrontApi<FsBackend, DirDownloads, FileSource>`
//! - Testing: `StorefrontApi<MemBackend, MemDownloads, StaticSource>`
//!
//! API tests check dispatch only. Command logic is tested in the command
//! modules, storage behavior in the store modules.

use crate::commands;
use crate::config::ShopConfig;
use crate::download::Downloads;
use crate::error::Result;
use crate::model::ProductDraft;
use crate::source::PublishedSource;
use crate::store::{ShopStore, StorageBackend};
use std::path::Path;

pub struct StorefrontApi<B: StorageBackend, D: Downloads, S: PublishedSource> {
    store: ShopStore<B>,
    downloads: D,
    source: S,
    config: ShopConfig,
    paths: commands::ShopPaths,
}

impl<B, D, S> StorefrontApi<B, D, S>
where
    B: StorageBackend,
    D: Downloads,
    S: PublishedSource,
{
    /// Open a session: reconcile the data sources and load the gallery.
    pub fn new(
        backend: B,
        downloads: D,
        source: S,
        config: ShopConfig,
        paths: commands::ShopPaths,
    ) -> Self {
        let store = ShopStore::open(backend, &source, config.max_image_bytes);
        Self {
            store,
            downloads,
            source,
            config,
            paths,
        }
    }

    pub fn status(&self) -> Result<commands::CmdResult> {
        commands::status::run(&self.store)
    }

    pub fn login(&mut self, password: &str) -> Result<commands::CmdResult> {
        commands::session::login(&mut self.store, &self.source, &self.config, password)
    }

    pub fn logout(&mut self) -> Result<commands::CmdResult> {
        commands::session::logout(&mut self.store)
    }

    pub fn list_products(&self) -> Result<commands::CmdResult> {
        commands::products::list(&self.store)
    }

    pub fn add_product(&mut self, draft: ProductDraft) -> Result<commands::CmdResult> {
        commands::products::add(&mut self.store, &self.downloads, draft)
    }

    pub fn update_product(
        &mut self,
        id: &str,
        edit: commands::products::ProductEdit,
    ) -> Result<commands::CmdResult> {
        commands::products::update(&mut self.store, &self.downloads, id, edit)
    }

    pub fn remove_product(&mut self, id: &str) -> Result<commands::CmdResult> {
        commands::products::remove(&mut self.store, &self.downloads, id)
    }

    pub fn show_settings(&self) -> Result<commands::CmdResult> {
        commands::settings::show(&self.store)
    }

    pub fn set_setting(&mut self, field: &str, value: String) -> Result<commands::CmdResult> {
        commands::settings::set(&mut self.store, &self.downloads, field, value)
    }

    pub fn list_images(&self) -> Result<commands::CmdResult> {
        commands::images::list(&self.store)
    }

    pub fn upload_image(&mut self, path: &Path) -> Result<commands::CmdResult> {
        commands::images::upload_path(&mut self.store, path)
    }

    pub fn delete_image(
        &mut self,
        id: &str,
        selection: Option<&mut ProductDraft>,
    ) -> Result<commands::CmdResult> {
        commands::images::delete(&mut self.store, id, selection)
    }

    pub fn export(&mut self, full: bool) -> Result<commands::CmdResult> {
        if full {
            commands::export::full(&mut self.store, &self.downloads)
        } else {
            commands::export::run(&mut self.store, &self.downloads)
        }
    }

    pub fn import(&mut self, path: &Path) -> Result<commands::CmdResult> {
        commands::import::run_path(&mut self.store, &self.downloads, path)
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.paths, action)
    }

    pub fn store(&self) -> &ShopStore<B> {
        &self.store
    }

    pub fn downloads(&self) -> &D {
        &self.downloads
    }

    pub fn paths(&self) -> &commands::ShopPaths {
        &self.paths
    }
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::products::ProductEdit;
pub use commands::{CmdMessage, CmdResult, ImageSummary, MessageLevel, ShopPaths, StatusReport};
