//! # Validation Module
//!
//! Structural validation of the sparse input against a declarative content model.
//!
//! ## Overview
//!
//! A requirement table maps context selectors to child requirements with an expected
//! cardinality. Root entries are checked once against the whole document; conditional
//! entries apply to each element their selector matches and are skipped entirely when it
//! matches nothing. Validation never stops at the first problem: every violation across
//! the document is collected and returned together.
//!
//! ## Key Components
//!
//! - [`Validator`] - Compiles a requirement table and checks documents against it
//! - [`Requirement`] - One context selector with its child requirements
//! - [`Violation`] - A human-readable cardinality mismatch
//! - [`hescore`] - The built-in home-energy-score content model

pub mod hescore;

use crate::core::document::Document;
use crate::core::document::path::{PathExpr, PathSyntaxError};
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    /// Any count listed is acceptable.
    Exactly(&'static [usize]),
    OneOrMore,
}

impl Cardinality {
    pub const ONE: Cardinality = Cardinality::Exactly(&[1]);
    pub const ZERO_OR_ONE: Cardinality = Cardinality::Exactly(&[0, 1]);
    pub const NONE: Cardinality = Cardinality::Exactly(&[0]);

    pub fn admits(self, count: usize) -> bool {
        match self {
            Cardinality::Exactly(sizes) => sizes.contains(&count),
            Cardinality::OneOrMore => count > 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Context {
    Root,
    Each(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    pub context: Context,
    pub children: Vec<(String, Cardinality)>,
}

impl Requirement {
    pub fn root() -> Self {
        Self {
            context: Context::Root,
            children: Vec::new(),
        }
    }

    pub fn each(selector: &str) -> Self {
        Self {
            context: Context::Each(selector.to_string()),
            children: Vec::new(),
        }
    }

    pub fn require(mut self, expression: &str, cardinality: Cardinality) -> Self {
        self.children.push((expression.to_string(), cardinality));
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub xpath: String,
    pub expected: Cardinality,
    pub found: usize,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.expected {
            Cardinality::Exactly(sizes) => write!(
                f,
                "Expected {:?} element(s) but found {} element(s) for xpath: {}",
                sizes, self.found, self.xpath
            ),
            Cardinality::OneOrMore => write!(
                f,
                "Expected 1 or more element(s) but found 0 elements for xpath: {}",
                self.xpath
            ),
        }
    }
}

#[derive(Debug, Clone)]
struct CompiledChild {
    expression: PathExpr,
    combined: String,
    cardinality: Cardinality,
}

#[derive(Debug, Clone)]
struct CompiledRequirement {
    selector: Option<PathExpr>,
    children: Vec<CompiledChild>,
}

#[derive(Debug, Clone)]
pub struct Validator {
    requirements: Vec<CompiledRequirement>,
}

impl Validator {
    pub fn new(table: &[Requirement]) -> Result<Self, PathSyntaxError> {
        let requirements = table
            .iter()
            .map(compile_requirement)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { requirements })
    }

    /// Validator for the built-in home-energy-score content model.
    pub fn hescore() -> Result<Self, PathSyntaxError> {
        Self::new(&hescore::requirements())
    }

    pub fn validate(&self, document: &Document) -> Vec<Violation> {
        let mut violations = Vec::new();
        let root = document.root();

        for requirement in &self.requirements {
            let contexts = match &requirement.selector {
                None => vec![root],
                Some(selector) => selector.select(document, root),
            };
            if contexts.is_empty() {
                continue;
            }
            for context in contexts {
                for child in &requirement.children {
                    let found = child.expression.count(document, context);
                    if !child.cardinality.admits(found) {
                        violations.push(Violation {
                            xpath: child.combined.clone(),
                            expected: child.cardinality,
                            found,
                        });
                    }
                }
            }
        }

        debug!(
            requirements = self.requirements.len(),
            violations = violations.len(),
            "Validated document structure."
        );
        violations
    }
}

fn compile_requirement(requirement: &Requirement) -> Result<CompiledRequirement, PathSyntaxError> {
    let selector = match &requirement.context {
        Context::Root => None,
        Context::Each(source) => Some(PathExpr::parse(source)?),
    };
    let children = requirement
        .children
        .iter()
        .map(|(source, cardinality)| {
            let expression = PathExpr::parse(source)?;
            let combined = match &selector {
                None => source.clone(),
                Some(context) if expression.starts_with_predicate() => {
                    format!("{}{}", context.as_str(), source)
                }
                Some(context) => format!("{}/{}", context.as_str(), source),
            };
            Ok(CompiledChild {
                expression,
                combined,
                cardinality: *cardinality,
            })
        })
        .collect::<Result<Vec<_>, PathSyntaxError>>()?;
    Ok(CompiledRequirement { selector, children })
}
