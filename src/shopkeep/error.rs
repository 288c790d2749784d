use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    #[error("Image not found: {0}")]
    ImageNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("{0}")]
    Validation(String),

    #[error("Import failed: {0}")]
    Import(String),

    #[error("Invalid password")]
    InvalidPassword,

    #[error("Not logged in (run `shopkeep login` first)")]
    NotAuthenticated,
}

pub type Result<T> = std::result::Result<T, StoreError>;
