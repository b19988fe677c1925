//! # HEScore Ruleset Library
//!
//! Translates a sparse home-energy-score building characterization into a fully specified
//! building description ready for detailed simulation.
//!
//! ## Architectural Philosophy
//!
//! The library keeps the same strict layering throughout, so each layer can be tested on
//! its own.
//!
//! - **[`core`]: The Foundation.** Stateless data: the input element tree, the typed output
//!   model, geometry derivation and the engineering lookup tables.
//!
//! - **[`validation`]: The Gatekeeper.** A declarative content model checked against the
//!   input before any translation runs, reporting every cardinality violation at once.
//!
//! - **[`engine`]: The Logic Core.** Configuration, the error taxonomy, progress reporting,
//!   and the ordered transformation steps that read the input and build the output.
//!
//! - **[`workflows`]: The Public API.** Ties validation, geometry and the engine together
//!   into a single translation entry point.

pub mod core;
pub mod engine;
pub mod validation;
pub mod workflows;

#[cfg(test)]
pub(crate) mod test_support;
