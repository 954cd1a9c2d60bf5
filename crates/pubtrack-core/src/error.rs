use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("Portfolio root does not exist: {path}")]
    RootNotFound { path: PathBuf },

    #[error("Config file already exists: {path} (use --force to overwrite)")]
    ConfigExists { path: PathBuf },

    #[error("Failed to parse config {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TrackerError>;

impl TrackerError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::RootNotFound { .. } => 2,
            Self::ConfigParse { .. } => 3,
            Self::ConfigExists { .. } => 4,
            _ => 1,
        }
    }
}
