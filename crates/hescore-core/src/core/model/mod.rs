//! # Model Module
//!
//! The strongly typed, fully specified building description produced by a translation,
//! together with the closed categorical vocabularies shared by input parsing and output.
//!
//! Every output element kind is its own struct serialized with HPXML-style element names,
//! so the description can be handed to any serializer at the boundary.
//!
//! ## Key Components
//!
//! - [`BuildingDescription`] - The root of the output tree
//! - [`enclosure`] - Envelope surfaces, fenestration and air leakage
//! - [`systems`] - HVAC, water heating and photovoltaics
//! - [`loads`] - Appliances, lighting and miscellaneous plug loads
//! - [`categories`] - Closed enums for every categorical input field

pub mod building;
pub mod categories;
pub mod enclosure;
pub mod loads;
pub mod systems;

pub use building::{BuildingDescription, BuildingSummary, ClimateZone, Site};
pub use categories::ParseCategoryError;
pub use enclosure::Enclosure;
pub use loads::{Appliances, Lighting, PlugLoad};
pub use systems::{Capacity, Efficiency, Systems};
