use super::categories::FuelType;
use super::enclosure::Enclosure;
use super::loads::{Appliances, Lighting, PlugLoad};
use super::systems::Systems;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BuildingDescription {
    pub schema_version: String,
    #[serde(rename = "BuildingID")]
    pub building_id: String,
    pub event_type: String,
    pub site: Site,
    pub building_summary: BuildingSummary,
    pub climate_zone: ClimateZone,
    pub enclosure: Enclosure,
    pub systems: Systems,
    pub appliances: Appliances,
    pub lighting: Lighting,
    pub misc_loads: Vec<PlugLoad>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Site {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    pub site_type: String,
    pub shielding_of_home: String,
    /// Every fuel used by at least one emitted system, in first-use order.
    pub fuels: Vec<FuelType>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BuildingSummary {
    pub year_built: u32,
    pub residential_facility_type: String,
    pub number_of_occupants: f64,
    pub number_of_bedrooms: u32,
    pub number_of_bathrooms: u32,
    pub number_of_conditioned_floors: u32,
    pub number_of_conditioned_floors_above_grade: u32,
    pub average_ceiling_height: f64,
    pub conditioned_floor_area: f64,
    pub conditioned_building_volume: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ClimateZone {
    #[serde(rename = "Year")]
    pub iecc_year: u32,
    pub climate_zone: String,
}
