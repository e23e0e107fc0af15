use std::path::Path;

use thiserror::Error;

/// I/O and format errors from the artifact store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to write '{path}': {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid JSON in '{path}': {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },

    #[error("invalid sector configuration in '{path}': {source}")]
    InvalidConfig {
        path: String,
        source: marketpulse_core::ValidationError,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    pub(crate) fn read(path: &Path, source: std::io::Error) -> Self {
        Self::Read {
            path: path.display().to_string(),
            source,
        }
    }

    pub(crate) fn write(path: &Path, source: std::io::Error) -> Self {
        Self::Write {
            path: path.display().to_string(),
            source,
        }
    }

    pub(crate) fn parse(path: &Path, source: serde_json::Error) -> Self {
        Self::Parse {
            path: path.display().to_string(),
            source,
        }
    }
}
