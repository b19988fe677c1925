//! # Core Module
//!
//! Stateless building blocks of the ruleset: the input element tree, the typed output
//! model, the shared geometry deriver, and the engineering lookup tables.
//!
//! ## Overview
//!
//! Nothing in this module holds per-run state. Every function is a pure mapping from its
//! inputs to a value or a typed error, which lets the [`crate::engine`] layer borrow the
//! derived shape and the tables immutably across all transformation steps.
//!
//! ## Architecture
//!
//! - **Input Tree** ([`document`]) - Ordered element tree and path expressions over it
//! - **Output Model** ([`model`]) - Typed building description and categorical vocabularies
//! - **Geometry** ([`geometry`]) - Rectangular-footprint shape derivation and orientations
//! - **Defaults** ([`tables`]) - Assembly, efficiency, fenestration and infiltration tables
//! - **Collaborators** ([`collaborators`]) - Airflow, unit and occupancy routines

pub mod collaborators;
pub mod document;
pub mod geometry;
pub mod model;
pub mod tables;
