// Error types shared by the persistence layers (config, scores, log file)

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config file: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("cannot serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
    #[error("no usable config or data directory")]
    NoProjectDirs,
}

impl AppError {
    /// Attach the offending path to an I/O error
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        AppError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
