//! Error type shared across the crate.
//!
//! Setup failures (`InvalidFolder`, `NoImages`, `InvalidPairCount`,
//! `LoadingError`) are user-facing: the host shows the localized message
//! from [`MemoryError::dialog_key`] and returns to configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias for crate operations.
pub type Result<T> = std::result::Result<T, MemoryError>;

#[derive(Debug, Error)]
pub enum MemoryError {
    #[error("image folder {0:?} does not exist")]
    InvalidFolder(PathBuf),

    #[error("no images found in {0:?}")]
    NoImages(PathBuf),

    #[error("pair count must be between 1 and {max}")]
    InvalidPairCount { max: usize },

    #[error("only {count} images could be loaded")]
    LoadingError { count: usize },

    #[error("failed to decode image {path:?}: {source}")]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("i/o error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path:?}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid settings record: {0}")]
    Settings(#[from] serde_json::Error),
}

impl MemoryError {
    /// Catalog key of the localized dialog text for user-facing errors.
    ///
    /// Returns `None` for internal failures, which the host only logs.
    #[must_use]
    pub fn dialog_key(&self) -> Option<&'static str> {
        match self {
            Self::InvalidFolder(_) => Some("dialogs.invalid_folder"),
            Self::NoImages(_) => Some("dialogs.no_images"),
            Self::InvalidPairCount { .. } => Some("dialogs.invalid_pair_count"),
            Self::LoadingError { .. } => Some("dialogs.loading_error"),
            _ => None,
        }
    }

    /// Named parameters for the dialog text.
    #[must_use]
    pub fn dialog_params(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::InvalidPairCount { max } => vec![("max_pairs", max.to_string())],
            Self::LoadingError { count } => vec![("count", count.to_string())],
            _ => Vec::new(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
