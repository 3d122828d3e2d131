use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PaletteError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Image(#[from] image::ImageError),
    #[error("invalid option: {0}")]
    InvalidOption(String),
    #[error("failed to load palette catalog from {path}: {source}")]
    CatalogLoad {
        path: PathBuf,
        #[source]
        source: Box<PaletteError>,
    },
}

pub type Result<T> = std::result::Result<T, PaletteError>;
