//! # Workflows Module
//!
//! High-level entry points that run a complete translation from a sparse building
//! characterization to a fully specified building description.
//!
//! ## Overview
//!
//! A workflow validates the input, derives the building shape once, runs the
//! transformation steps in their fixed order and assembles the results. Callers supply
//! the lookup tables, the collaborator implementations, the configuration and a progress
//! reporter; nothing is read from disk or global state during a run.
//!
//! ## Architecture
//!
//! - **Translation Workflow** ([`translate`]) - Validation, geometry, every enclosure and
//!   systems step, default loads and final assembly.

pub mod translate;
