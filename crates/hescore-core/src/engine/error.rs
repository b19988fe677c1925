use thiserror::Error;

use super::config::ConfigError;
use crate::core::collaborators::UnitError;
use crate::core::document::path::PathSyntaxError;
use crate::core::geometry::ShapeError;
use crate::core::model::ParseCategoryError;
use crate::core::tables::infiltration::LeakageError;
use crate::core::tables::{LookupError, TableLoadError};
use crate::validation::Violation;

#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("Input failed structural validation with {} violation(s)", .0.len())]
    Validation(Vec<Violation>),

    #[error("Lookup failed: {0}")]
    Lookup(#[from] LookupError),

    #[error("Structural reference failed: {0}")]
    StructuralReference(String),

    #[error("{0}")]
    UnrecognizedVariant(#[from] ParseCategoryError),

    #[error("Missing required element '{path}' in {context}")]
    MissingElement { context: String, path: String },

    #[error("Invalid value '{value}' for '{path}' in {context}: {reason}")]
    InvalidValue {
        context: String,
        path: String,
        value: String,
        reason: String,
    },

    #[error("Unit conversion failed: {0}")]
    Units(#[from] UnitError),

    #[error("Invalid building shape: {0}")]
    Shape(#[from] ShapeError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to load lookup tables: {0}")]
    TableLoad(#[from] TableLoadError),

    #[error("Invalid requirement table: {0}")]
    PathSyntax(#[from] PathSyntaxError),
}

impl From<LeakageError> for TranslationError {
    fn from(error: LeakageError) -> Self {
        match error {
            LeakageError::Lookup(e) => TranslationError::Lookup(e),
            LeakageError::Units(e) => TranslationError::Units(e),
        }
    }
}
