use super::categories::{
    CoolingSystemType, EfficiencyUnit, FuelType, HeatPumpType, HeatingSystemType, SpaceLocation,
    WaterHeaterType,
};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Systems {
    pub heating_systems: Vec<HeatingSystem>,
    pub cooling_systems: Vec<CoolingSystem>,
    pub heat_pumps: Vec<HeatPump>,
    #[serde(rename = "HVACDistributions")]
    pub hvac_distributions: Vec<HvacDistribution>,
    pub water_heaters: Vec<WaterHeater>,
    pub hot_water_distribution: Option<HotWaterDistribution>,
    pub water_fixtures: Vec<WaterFixture>,
    pub photovoltaics: Vec<PvSystem>,
}

/// Equipment capacity. Capacities are always deferred to the simulation's sizing routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Capacity {
    #[serde(rename = "autosize")]
    Autosize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Efficiency {
    pub units: EfficiencyUnit,
    pub value: f64,
}

impl Efficiency {
    pub fn new(units: EfficiencyUnit, value: f64) -> Self {
        Self { units, value }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct HeatingSystem {
    #[serde(rename = "SystemIdentifier")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distribution_system: Option<String>,
    pub heating_system_type: HeatingSystemType,
    pub heating_system_fuel: FuelType,
    pub heating_capacity: Capacity,
    pub annual_heating_efficiency: Efficiency,
    pub fraction_heat_load_served: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CoolingSystem {
    #[serde(rename = "SystemIdentifier")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distribution_system: Option<String>,
    pub cooling_system_type: CoolingSystemType,
    pub cooling_system_fuel: FuelType,
    pub cooling_capacity: Capacity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annual_cooling_efficiency: Option<Efficiency>,
    pub fraction_cool_load_served: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct HeatPump {
    #[serde(rename = "SystemIdentifier")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distribution_system: Option<String>,
    pub heat_pump_type: HeatPumpType,
    pub heat_pump_fuel: FuelType,
    pub heating_capacity: Capacity,
    pub cooling_capacity: Capacity,
    pub annual_cooling_efficiency: Efficiency,
    pub annual_heating_efficiency: Efficiency,
    pub fraction_heat_load_served: f64,
    pub fraction_cool_load_served: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct HvacDistribution {
    #[serde(rename = "SystemIdentifier")]
    pub id: String,
    pub distribution_system_type: DistributionSystemType,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DistributionSystemType {
    AirDistribution(AirDistribution),
    HydronicDistribution { hydronic_distribution_type: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DuctType {
    Supply,
    Return,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AirDistribution {
    pub duct_leakage_measurements: Vec<DuctLeakage>,
    pub ducts: Vec<Duct>,
}

/// Duct leakage to outside at 25 Pa, in CFM25.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DuctLeakage {
    pub duct_type: DuctType,
    pub value: f64,
    pub total_or_to_outside: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Duct {
    pub duct_type: DuctType,
    pub duct_location: SpaceLocation,
    pub fraction_duct_area: f64,
    pub duct_surface_area: f64,
    pub duct_insulation_r_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct WaterHeater {
    #[serde(rename = "SystemIdentifier")]
    pub id: String,
    pub water_heater_type: WaterHeaterType,
    pub fuel_type: FuelType,
    pub location: SpaceLocation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tank_volume: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub efficiency: Option<Efficiency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_hvac_system: Option<String>,
    pub fraction_dhw_load_served: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct HotWaterDistribution {
    #[serde(rename = "SystemIdentifier")]
    pub id: String,
    pub system_type: String,
    pub pipe_insulation_r_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct WaterFixture {
    #[serde(rename = "SystemIdentifier")]
    pub id: String,
    pub water_fixture_type: String,
    pub low_flow: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PvSystem {
    #[serde(rename = "SystemIdentifier")]
    pub id: String,
    pub location: String,
    pub module_type: String,
    pub tracking: String,
    pub array_azimuth: f64,
    pub array_tilt: f64,
    pub max_power_output: f64,
    pub inverter_efficiency: f64,
    pub system_losses_fraction: f64,
}
