use super::categories::{FuelType, SpaceLocation};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ApplianceKind {
    ClothesWasher,
    ClothesDryer,
    Dishwasher,
    Refrigerator,
    CookingRange,
    Oven,
}

impl ApplianceKind {
    pub const ALL: [ApplianceKind; 6] = [
        ApplianceKind::ClothesWasher,
        ApplianceKind::ClothesDryer,
        ApplianceKind::Dishwasher,
        ApplianceKind::Refrigerator,
        ApplianceKind::CookingRange,
        ApplianceKind::Oven,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ApplianceKind::ClothesWasher => "ClothesWasher",
            ApplianceKind::ClothesDryer => "ClothesDryer",
            ApplianceKind::Dishwasher => "Dishwasher",
            ApplianceKind::Refrigerator => "Refrigerator",
            ApplianceKind::CookingRange => "CookingRange",
            ApplianceKind::Oven => "Oven",
        }
    }

    /// Fuel-burning appliance kinds; the rest are always electric.
    pub fn uses_fuel(self) -> bool {
        matches!(self, ApplianceKind::ClothesDryer | ApplianceKind::CookingRange)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Appliance {
    #[serde(rename = "SystemIdentifier")]
    pub id: String,
    pub kind: ApplianceKind,
    pub location: SpaceLocation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuel_type: Option<FuelType>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Appliances(pub Vec<Appliance>);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LightingLocation {
    Interior,
    Exterior,
    Garage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LightingType {
    CompactFluorescent,
    FluorescentTube,
    LightEmittingDiode,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct LightingGroup {
    #[serde(rename = "SystemIdentifier")]
    pub id: String,
    pub location: LightingLocation,
    pub lighting_type: LightingType,
    pub fraction_of_units_in_location: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Lighting {
    pub lighting_groups: Vec<LightingGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PlugLoad {
    #[serde(rename = "SystemIdentifier")]
    pub id: String,
    pub plug_load_type: String,
    #[serde(rename = "kWhPerYear")]
    pub kwh_per_year: f64,
}
