//! # Storage Layer
//!
//! All state lives on the local machine, split over two storage areas behind
//! one injected [`backend::StorageBackend`]:
//!
//! - **Key-value area** ([`local::LocalStore`]): the unversioned
//!   `{products, settings}` mirror, the admin session flag, and the persisted
//!   image gallery.
//! - **Record area** ([`records::RecordStore`]): the versioned snapshot that
//!   admins edit.
//!
//! The backend only moves strings around; the typed stores own the JSON
//! shapes. [`shop_store::ShopStore`] ties them together with the session
//! state (adopted data, version, pending changes) and the image gallery.
//!
//! ## Consistency
//!
//! Each `put` is atomic, but nothing spans two keys. Saving data and saving
//! images are separate writes; a crash between them can leave the areas out
//! of step. This is accepted for a manual admin tool.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: production, one JSON file per key.
//! - [`mem_backend::MemBackend`]: for testing logic without filesystem I/O,
//!   with per-area write failure simulation. [`memory::InMemoryShop`] wraps
//!   it, and `memory::fixtures` (behind `test_utils`) builds seeded sessions.
//!
//! ## Storage Layout
//!
//! ```text
//! <root>/
//! ├── config.json
//! ├── local/
//! │   ├── storeData.json        # unversioned snapshot mirror
//! │   ├── adminAuthStatus.json  # session flag
//! │   └── storedImages.json     # image gallery (base64 data URLs)
//! ├── records/
//! │   └── appData.json          # versioned snapshot
//! ├── public/
//! │   └── store-data.json       # published dataset (read-only)
//! └── downloads/                # exports and save backups
//! ```

pub mod backend;
pub mod fs_backend;
pub mod images;
pub mod local;
pub mod mem_backend;
pub mod memory;
pub mod records;
pub mod shop_store;

pub use backend::{Area, StorageBackend};
pub use shop_store::ShopStore;
