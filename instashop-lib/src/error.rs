use std::path::Path;

use instashop_catalog::CatalogError;
use thiserror::Error;

/// Errors from scanning, settings, and generation pacing.
#[derive(Debug, Error)]
pub enum LibError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("Not a file: {0}")]
    NotAFile(String),

    #[error("Settings parse error in {path}: {source}")]
    SettingsParse {
        path: String,
        source: toml::de::Error,
    },

    #[error("Settings serialize error: {0}")]
    SettingsSerialize(#[from] toml::ser::Error),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The generation task panicked.
    #[error("Generation task failed: {0}")]
    Task(String),
}

impl LibError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }
}
