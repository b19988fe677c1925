use hescore::core::tables::TableLoadError;
use hescore::engine::config::ConfigError;
use hescore::engine::error::TranslationError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Translation(#[from] TranslationError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to load lookup tables: {0}")]
    Tables(#[from] TableLoadError),

    #[error("Input is invalid: {count} violation(s) found")]
    InvalidDocument { count: usize },

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
