//! # CLI Layer
//!
//! One possible UI client for shopkeep. This is the only place that parses
//! arguments, prints to the terminal, installs the log subscriber, and turns
//! errors into exit codes (the latter in `main.rs`).
//!
//! - `run()`: main dispatch, called by `main.rs`
//! - `init_context()`: resolves the data root and builds the API
//! - `handle_*()`: per-command handlers that call the API and print the result

mod args;
mod print;

use args::{Cli, Commands, ImageCommands, ProductCommands, SettingsCommands};
use clap::Parser;
use directories::ProjectDirs;
use print::{
    print_config, print_images, print_messages, print_products, print_settings, print_status,
};
use shopkeep::api::{CmdResult, ConfigAction, ProductEdit, ShopPaths, StorefrontApi};
use shopkeep::config::ShopConfig;
use shopkeep::download::DirDownloads;
use shopkeep::error::{Result, StoreError};
use shopkeep::model::ProductDraft;
use shopkeep::source::FileSource;
use shopkeep::store::fs_backend::FsBackend;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const HOME_ENV: &str = "SHOPKEEP_HOME";

type Api = StorefrontApi<FsBackend, DirDownloads, FileSource>;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let root = resolve_root(cli.root.clone())?;

    // Config is handled without opening the store, so a broken store can
    // still be reconfigured.
    let command = match cli.command.unwrap_or(Commands::Status) {
        Commands::Config { key, value } => return handle_config(root, key, value),
        command => command,
    };

    let mut api = init_context(root)?;
    match command {
        Commands::Login { password } => handle_login(&mut api, &password),
        Commands::Logout => show(api.logout()?),
        Commands::Products(cmd) => handle_products(&mut api, cmd),
        Commands::Settings(cmd) => handle_settings(&mut api, cmd),
        Commands::Images(cmd) => handle_images(&mut api, cmd),
        Commands::Export { full } => show(api.export(full)?),
        Commands::Import { file } => show(api.import(&file)?),
        Commands::Status | Commands::Config { .. } => handle_status(&api),
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("shopkeep=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn resolve_root(flag: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(root) = flag {
        return Ok(root);
    }
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "shopkeep", "shopkeep")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| StoreError::Store("Could not determine data directory".to_string()))
}

fn init_context(root: PathBuf) -> Result<Api> {
    let config = ShopConfig::load(&root)?;
    let source = FileSource::new(config.published_path(&root));
    let downloads = DirDownloads::new(config.downloads_path(&root));
    debug!(root = %root.display(), published = %source.path().display(), "Opening store");

    let backend = FsBackend::new(root.clone());
    Ok(StorefrontApi::new(
        backend,
        downloads,
        source,
        config,
        ShopPaths::new(root),
    ))
}

fn show(result: CmdResult) -> Result<()> {
    print_messages(&result.messages);
    Ok(())
}

fn handle_status(api: &Api) -> Result<()> {
    let result = api.status()?;
    if let Some(status) = &result.status {
        print_status(status);
    }
    show(result)
}

fn handle_login(api: &mut Api, password: &str) -> Result<()> {
    show(api.login(password)?)
}

fn handle_products(api: &mut Api, cmd: ProductCommands) -> Result<()> {
    match cmd {
        ProductCommands::List => {
            let result = api.list_products()?;
            print_products(&result.products);
            show(result)
        }
        ProductCommands::Add {
            name,
            price,
            fields,
        } => {
            let stock = fields.stock();
            let draft = ProductDraft {
                name,
                price,
                description: fields.description.unwrap_or_default(),
                image: fields.image.unwrap_or_default(),
                category: fields.category.unwrap_or_default(),
                in_stock: stock.unwrap_or(true),
            };
            show(api.add_product(draft)?)
        }
        ProductCommands::Edit {
            id,
            name,
            price,
            fields,
        } => {
            let edit = ProductEdit {
                name,
                price,
                in_stock: fields.stock(),
                description: fields.description,
                image: fields.image,
                category: fields.category,
            };
            if edit.is_empty() {
                return Err(StoreError::Validation("Nothing to change".to_string()));
            }
            let result = api.update_product(&id, edit)?;
            print_products(&result.products);
            show(result)
        }
        ProductCommands::Remove { id } => show(api.remove_product(&id)?),
    }
}

fn handle_settings(api: &mut Api, cmd: SettingsCommands) -> Result<()> {
    let result = match cmd {
        SettingsCommands::Show => api.show_settings()?,
        SettingsCommands::Set { field, value } => api.set_setting(&field, value)?,
    };
    if let Some(settings) = &result.settings {
        print_settings(settings);
    }
    show(result)
}

fn handle_images(api: &mut Api, cmd: ImageCommands) -> Result<()> {
    match cmd {
        ImageCommands::List => {
            let result = api.list_images()?;
            print_images(&result.images);
            show(result)
        }
        ImageCommands::Upload { file } => show(api.upload_image(&file)?),
        ImageCommands::Delete { id } => show(api.delete_image(&id, None)?),
    }
}

fn handle_config(root: PathBuf, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };

    let result = shopkeep::commands::config::run(&ShopPaths::new(root), action)?;
    if let Some(config) = &result.config {
        if result.messages.is_empty() {
            print_config(config);
        }
    }
    show(result)
}
