use super::config::TranslationConfig;
use super::error::TranslationError;
use super::progress::ProgressReporter;
use crate::core::collaborators::Collaborators;
use crate::core::document::{Document, Element};
use crate::core::geometry::Shape;
use crate::core::tables::LookupTables;
use crate::validation::hescore::BUILDING_DETAILS;

/// Everything a transformation step may read. All members are borrowed immutably for the
/// whole run.
#[derive(Clone, Copy)]
pub struct TranslationContext<'a> {
    pub document: &'a Document,
    pub details: &'a Element,
    pub shape: &'a Shape,
    pub tables: &'a LookupTables,
    pub collaborators: &'a dyn Collaborators,
    pub config: &'a TranslationConfig,
    pub reporter: &'a ProgressReporter<'a>,
}

impl<'a> TranslationContext<'a> {
    pub fn new(
        document: &'a Document,
        shape: &'a Shape,
        tables: &'a LookupTables,
        collaborators: &'a dyn Collaborators,
        config: &'a TranslationConfig,
        reporter: &'a ProgressReporter<'a>,
    ) -> Result<Self, TranslationError> {
        Ok(Self {
            document,
            details: building_details(document)?,
            shape,
            tables,
            collaborators,
            config,
            reporter,
        })
    }

    /// Source elements at `path` below the building details, in document order.
    pub fn elements(&self, path: &str) -> Vec<&'a Element> {
        self.details.find_all(path)
    }

    pub fn building(&self) -> Result<&'a Element, TranslationError> {
        self.document
            .find("/HPXML/Building")
            .ok_or_else(|| TranslationError::MissingElement {
                context: "document".to_string(),
                path: "/HPXML/Building".to_string(),
            })
    }
}

pub fn building_details(document: &Document) -> Result<&Element, TranslationError> {
    document
        .find(BUILDING_DETAILS)
        .ok_or_else(|| TranslationError::MissingElement {
            context: "document".to_string(),
            path: BUILDING_DETAILS.to_string(),
        })
}
