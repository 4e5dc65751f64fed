use palette_engine::MapError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Invalid source image: {0}")]
    InvalidSourceFormat(String),

    #[error("File exists at save location: {}", path.display())]
    OverwriteRefused { path: PathBuf },

    #[error("File not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Engine(#[from] MapError),
}

impl From<palette_engine::PaletteError> for ArtifactError {
    fn from(e: palette_engine::PaletteError) -> Self {
        ArtifactError::Engine(e.into())
    }
}

impl From<palette_engine::IndexMapError> for ArtifactError {
    fn from(e: palette_engine::IndexMapError) -> Self {
        ArtifactError::Engine(e.into())
    }
}
