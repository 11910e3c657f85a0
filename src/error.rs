use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading the component library or writing the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("failed to parse catalog export {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("category '{0}' not found in component library")]
    MissingCategory(String),
    #[error("failed to serialize catalog: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
