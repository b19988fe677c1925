use super::LookupError;
use crate::core::model::categories::{FrameType, GasFill, GlassLayers, GlassType};
use phf::{Map, phf_map};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenestrationKind {
    Window,
    Skylight,
}

impl fmt::Display for FenestrationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenestrationKind::Window => f.write_str("window"),
            FenestrationKind::Skylight => f.write_str("skylight"),
        }
    }
}

/// Construction of a window or skylight described by its frame and glazing rather than
/// by a rated U-factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlazingDescription {
    pub frame: FrameType,
    pub thermal_break: bool,
    pub layers: GlassLayers,
    pub glass: Option<GlassType>,
    pub gas_fill: Option<GasFill>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FenestrationPerformance {
    pub u_factor: f64,
    pub shgc: f64,
}

// Code layout: glass layers, glass type, gas fill, frame class.
static WINDOW_PERFORMANCE: Map<&'static str, (f64, f64)> = phf_map! {
    "scna" => (1.27, 0.75),
    "scnw" => (0.89, 0.64),
    "stna" => (1.27, 0.64),
    "stnw" => (0.89, 0.54),
    "dcaa" => (0.81, 0.67),
    "dcab" => (0.60, 0.67),
    "dcaw" => (0.51, 0.56),
    "dtaa" => (0.81, 0.55),
    "dtab" => (0.60, 0.55),
    "dtaw" => (0.51, 0.46),
    "dpeab" => (0.46, 0.60),
    "dpeaw" => (0.42, 0.52),
    "dpegb" => (0.44, 0.60),
    "dpegw" => (0.39, 0.52),
    "dseaa" => (0.67, 0.37),
    "dseab" => (0.47, 0.37),
    "dseaw" => (0.39, 0.31),
    "dsegw" => (0.36, 0.31),
    "tpegw" => (0.27, 0.31),
};

static SKYLIGHT_PERFORMANCE: Map<&'static str, (f64, f64)> = phf_map! {
    "scna" => (1.98, 0.75),
    "scnw" => (1.47, 0.64),
    "stna" => (1.98, 0.64),
    "stnw" => (1.47, 0.54),
    "dcaa" => (1.30, 0.67),
    "dcab" => (1.10, 0.67),
    "dcaw" => (0.84, 0.56),
    "dtaa" => (1.30, 0.55),
    "dtab" => (1.10, 0.55),
    "dtaw" => (0.84, 0.46),
    "dpeab" => (1.03, 0.60),
    "dpeaw" => (0.74, 0.52),
    "dpegb" => (0.95, 0.60),
    "dpegw" => (0.68, 0.52),
    "dseaa" => (1.17, 0.37),
    "dseab" => (0.98, 0.37),
    "dseaw" => (0.71, 0.31),
    "dsegw" => (0.65, 0.31),
    "tpegw" => (0.47, 0.31),
};

/// Builds the performance code for a glazing description. Single-pane glazing has no gas
/// gap and no thermally broken aluminum variant.
pub fn performance_code(description: &GlazingDescription) -> String {
    let layers = match description.layers {
        GlassLayers::SinglePane => "s",
        GlassLayers::DoublePane => "d",
        GlassLayers::TriplePane => "t",
    };
    let glass = match description.glass {
        None => "c",
        Some(GlassType::TintedReflective) => "t",
        Some(GlassType::LowE) => "pe",
        Some(GlassType::SolarControlLowE) => "se",
    };
    let single = description.layers == GlassLayers::SinglePane;
    let gas = match description.gas_fill {
        _ if single => "n",
        Some(GasFill::Argon) => "g",
        Some(GasFill::Air) | None => "a",
    };
    let frame = match description.frame {
        FrameType::Aluminum if description.thermal_break && !single => "b",
        FrameType::Aluminum => "a",
        _ => "w",
    };
    format!("{layers}{glass}{gas}{frame}")
}

pub fn lookup(
    kind: FenestrationKind,
    description: &GlazingDescription,
) -> Result<FenestrationPerformance, LookupError> {
    let code = performance_code(description);
    let table = match kind {
        FenestrationKind::Window => &WINDOW_PERFORMANCE,
        FenestrationKind::Skylight => &SKYLIGHT_PERFORMANCE,
    };
    match table.get(code.as_str()) {
        Some(&(u_factor, shgc)) => Ok(FenestrationPerformance { u_factor, shgc }),
        None => Err(LookupError::Fenestration {
            kind,
            frame: description.frame,
            thermal_break: description.thermal_break,
            layers: description.layers,
            glass: description.glass.map_or("none", |g| g.as_str()).to_string(),
            gas_fill: description.gas_fill.map_or("none", |g| g.as_str()).to_string(),
            code,
        }),
    }
}
