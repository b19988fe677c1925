use super::categories::{AtticType, LeakageUnit, RoofType, Siding, SpaceLocation, WallType};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Enclosure {
    pub air_infiltration: Option<AirInfiltration>,
    pub attics: Vec<Attic>,
    pub roofs: Vec<Roof>,
    pub walls: Vec<Wall>,
    pub foundation_walls: Vec<FoundationWall>,
    pub frame_floors: Vec<FrameFloor>,
    pub slabs: Vec<Slab>,
    pub windows: Vec<Window>,
    pub skylights: Vec<Skylight>,
    pub doors: Vec<Door>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AirInfiltration {
    #[serde(rename = "SystemIdentifier")]
    pub id: String,
    pub house_pressure: f64,
    pub unit_of_measure: LeakageUnit,
    pub air_leakage: f64,
    pub infiltration_volume: f64,
}

/// Effective whole-assembly insulation of an opaque surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Insulation {
    #[serde(rename = "SystemIdentifier")]
    pub id: String,
    pub assembly_effective_r_value: f64,
}

impl Insulation {
    pub fn for_surface(surface_id: &str, r_value: f64) -> Self {
        Self {
            id: format!("{surface_id}_insulation"),
            assembly_effective_r_value: r_value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Attic {
    #[serde(rename = "SystemIdentifier")]
    pub id: String,
    pub attic_type: AtticType,
    pub attached_to_roofs: Vec<String>,
    pub attached_to_frame_floor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Roof {
    #[serde(rename = "SystemIdentifier")]
    pub id: String,
    pub interior_adjacent_to: SpaceLocation,
    pub area: f64,
    pub azimuth: f64,
    pub roof_type: RoofType,
    pub solar_absorptance: f64,
    pub emittance: f64,
    pub pitch: f64,
    pub radiant_barrier: bool,
    pub insulation: Insulation,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Wall {
    #[serde(rename = "SystemIdentifier")]
    pub id: String,
    pub exterior_adjacent_to: SpaceLocation,
    pub interior_adjacent_to: SpaceLocation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wall_type: Option<WallType>,
    pub area: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub azimuth: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub siding: Option<Siding>,
    pub solar_absorptance: f64,
    pub emittance: f64,
    pub insulation: Insulation,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct FoundationWall {
    #[serde(rename = "SystemIdentifier")]
    pub id: String,
    pub exterior_adjacent_to: SpaceLocation,
    pub interior_adjacent_to: SpaceLocation,
    pub height: f64,
    pub area: f64,
    pub depth_below_grade: f64,
    pub insulation_exterior_r_value: f64,
    pub insulation_exterior_distance_to_bottom: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct FrameFloor {
    #[serde(rename = "SystemIdentifier")]
    pub id: String,
    pub exterior_adjacent_to: SpaceLocation,
    pub interior_adjacent_to: SpaceLocation,
    pub area: f64,
    pub insulation: Insulation,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Slab {
    #[serde(rename = "SystemIdentifier")]
    pub id: String,
    pub interior_adjacent_to: SpaceLocation,
    pub area: f64,
    pub exposed_perimeter: f64,
    pub depth_below_grade: f64,
    pub perimeter_insulation_depth: f64,
    pub perimeter_insulation_r_value: f64,
    pub under_slab_insulation_width: f64,
    pub under_slab_insulation_r_value: f64,
    pub carpet_fraction: f64,
    pub carpet_r_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Window {
    #[serde(rename = "SystemIdentifier")]
    pub id: String,
    pub area: f64,
    pub azimuth: f64,
    pub u_factor: f64,
    #[serde(rename = "SHGC")]
    pub shgc: f64,
    pub fraction_operable: f64,
    /// Above-grade story this share of the glazing sits on, counting from one.
    pub story: u32,
    pub attached_to_wall: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Skylight {
    #[serde(rename = "SystemIdentifier")]
    pub id: String,
    pub area: f64,
    pub azimuth: f64,
    pub u_factor: f64,
    #[serde(rename = "SHGC")]
    pub shgc: f64,
    pub attached_to_roof: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Door {
    #[serde(rename = "SystemIdentifier")]
    pub id: String,
    pub attached_to_wall: String,
    pub area: f64,
    pub azimuth: f64,
    #[serde(rename = "RValue")]
    pub r_value: f64,
}
