use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "shopkeep")]
#[command(about = "Manage a static storefront's catalog, settings and images", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (defaults to $SHOPKEEP_HOME, then the platform data dir)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show session, version and catalog summary
    #[command(alias = "st")]
    Status,

    /// Log in as admin
    Login {
        /// Admin password
        password: String,
    },

    /// Log out
    Logout,

    /// Manage products
    #[command(subcommand, alias = "p")]
    Products(ProductCommands),

    /// Show or change site settings
    #[command(subcommand)]
    Settings(SettingsCommands),

    /// Manage the image gallery
    #[command(subcommand, alias = "img")]
    Images(ImageCommands),

    /// Write store-data.json (or a full backup with images) to the downloads directory
    Export {
        /// Include every image in a store-full-backup.json
        #[arg(long)]
        full: bool,
    },

    /// Import a store-data.json or store-full-backup.json
    Import {
        /// File to import
        file: PathBuf,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (e.g., downloads-dir)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProductCommands {
    /// List products
    #[command(alias = "ls")]
    List,

    /// Add a product
    Add {
        name: String,

        #[arg(long)]
        price: f64,

        #[command(flatten)]
        fields: ProductFields,
    },

    /// Change fields of a product
    #[command(alias = "e")]
    Edit {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        price: Option<f64>,

        #[command(flatten)]
        fields: ProductFields,
    },

    /// Remove a product
    #[command(alias = "rm")]
    Remove { id: String },
}

#[derive(Args, Debug, Default)]
pub struct ProductFields {
    #[arg(long)]
    pub description: Option<String>,

    /// Gallery image id or a URL
    #[arg(long)]
    pub image: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    /// Mark the product as out of stock
    #[arg(long, conflicts_with = "in_stock")]
    pub out_of_stock: bool,

    /// Mark the product as in stock
    #[arg(long)]
    pub in_stock: bool,
}

impl ProductFields {
    pub fn stock(&self) -> Option<bool> {
        match (self.in_stock, self.out_of_stock) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum SettingsCommands {
    /// Show all settings
    Show,

    /// Set one field (e.g. site-name, hero-title)
    Set { field: String, value: String },
}

#[derive(Subcommand, Debug)]
pub enum ImageCommands {
    /// List uploaded images
    #[command(alias = "ls")]
    List,

    /// Upload an image file
    Upload { file: PathBuf },

    /// Delete an image by id
    #[command(alias = "rm")]
    Delete { id: String },
}
