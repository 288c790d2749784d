//! # Shopkeep Architecture
//!
//! Shopkeep is the data core of a small static storefront: a product catalog
//! and site settings that an admin edits locally and then publishes as a
//! single `store-data.json` file. It is a library that happens to have a CLI
//! client, not the other way around.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Session checks, product/settings edits, import/export    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/, sync.rs)                            │
//! │  - StorageBackend trait: FsBackend, MemBackend              │
//! │  - Versioned records, key-value mirror, image gallery       │
//! │  - Startup reconciliation against the published file        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Versions
//!
//! Every save bumps the data version by exactly one tenth (see [`version`]).
//! On startup an admin session adopts the published file only when its
//! version is strictly newer than the local records (see [`sync`]).
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward, code never writes to stdout/stderr and never exits.
//! Files the user should receive go through the [`download::Downloads`] sink,
//! the published file comes in through [`source::PublishedSource`].
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`store`]: Storage abstraction, typed areas and the image gallery
//! - [`sync`]: Startup reconciliation
//! - [`model`]: Products, settings and the persisted aggregate
//! - [`version`]: Fixed-point data version
//! - [`codec`]: Image bytes to data URL and back
//! - [`source`]: The published dataset
//! - [`download`]: Where exported files go
//! - [`config`]: Configuration management
//! - [`error`]: Error types
//! - `cli`: Argument parsing and printing for the binary (not part of the lib API)

pub mod api;
pub mod codec;
pub mod commands;
pub mod config;
pub mod download;
pub mod error;
pub mod model;
pub mod source;
pub mod store;
pub mod sync;
pub mod version;
