//! Transformation steps of the translation ruleset.
//!
//! Each step covers one subsystem of the building description. Steps read the validated
//! source document through the shared [`TranslationContext`](super::context::TranslationContext),
//! consult the lookup tables and the derived building shape, and return typed output
//! fragments that the workflow assembles. Steps run in a fixed order because later steps
//! attach to surfaces emitted by earlier ones (skylights to roofs, doors to walls).

pub mod air_infiltration;
pub mod attics;
pub mod doors;
pub mod foundations;
pub mod hvac;
pub mod hvac_distribution;
pub mod loads;
pub mod photovoltaics;
pub mod read;
pub mod skylights;
pub mod summary;
pub mod walls;
pub mod water_heating;
pub mod windows;
