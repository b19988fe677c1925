use super::hvac::HEATING_SYSTEMS;
use super::read::{category, count, id, idref, label, optional_number, selected};
use crate::core::document::Element;
use crate::core::model::categories::{
    EfficiencyUnit, FuelType, HeatingSystemType, SpaceLocation, WaterHeaterType,
};
use crate::core::model::systems::{Efficiency, HotWaterDistribution, WaterFixture, WaterHeater};
use crate::core::tables::efficiency::STORAGE_WATER_HEATER_EF;
use crate::engine::context::TranslationContext;
use crate::engine::error::TranslationError;
use crate::engine::progress::Progress;
use tracing::{debug, instrument};

pub const WATER_HEATERS: &str = "Systems/WaterHeating/WaterHeatingSystem";

#[derive(Debug, Clone, PartialEq)]
pub struct HotWater {
    pub water_heaters: Vec<WaterHeater>,
    pub distribution: HotWaterDistribution,
    pub fixtures: Vec<WaterFixture>,
}

/// Default storage tank volume in gallons: electric and heat pump tanks are larger than
/// combustion tanks.
pub fn default_tank_volume(heater_type: WaterHeaterType, fuel: FuelType) -> Option<f64> {
    match heater_type {
        WaterHeaterType::Instantaneous | WaterHeaterType::TanklessCoil => None,
        WaterHeaterType::HeatPump | WaterHeaterType::IndirectStorage => Some(50.0),
        WaterHeaterType::Storage => match fuel {
            FuelType::Electricity => Some(50.0),
            _ => Some(40.0),
        },
    }
}

/// Energy factor or uniform energy factor stated on the element, in that order.
fn rated(heater: &Element) -> Result<Option<Efficiency>, TranslationError> {
    if let Some(ef) = optional_number(heater, "EnergyFactor")? {
        return Ok(Some(Efficiency::new(EfficiencyUnit::EnergyFactor, ef)));
    }
    Ok(optional_number(heater, "UniformEnergyFactor")?
        .map(|uef| Efficiency::new(EfficiencyUnit::UniformEnergyFactor, uef)))
}

fn required_rating(heater: &Element) -> Result<Efficiency, TranslationError> {
    rated(heater)?.ok_or_else(|| TranslationError::MissingElement {
        context: label(heater),
        path: "EnergyFactor | UniformEnergyFactor".to_string(),
    })
}

/// The boiler a combination water heater draws on, with its fuel.
fn related_boiler(
    context: &TranslationContext,
    heater: &Element,
) -> Result<(String, FuelType), TranslationError> {
    let boiler_id = idref(heater, "RelatedHVACSystem")?;
    let not_a_boiler = || {
        TranslationError::StructuralReference(format!(
            "{} is related to '{}', which is not a boiler",
            label(heater),
            boiler_id
        ))
    };
    let system = context
        .elements(HEATING_SYSTEMS)
        .into_iter()
        .find(|system| id(system).ok() == Some(boiler_id))
        .ok_or_else(not_a_boiler)?;
    let (heating_type, _) = selected::<HeatingSystemType>(system, "HeatingSystemType")?;
    if heating_type != HeatingSystemType::Boiler {
        return Err(not_a_boiler());
    }
    Ok((boiler_id.to_string(), category(system, "HeatingSystemFuel")?))
}

fn water_heater(
    context: &TranslationContext,
    heater: &Element,
) -> Result<WaterHeater, TranslationError> {
    let heater_id = id(heater)?;
    let heater_type: WaterHeaterType = category(heater, "WaterHeaterType")?;
    let (fuel, efficiency, related) = match heater_type {
        WaterHeaterType::Storage => {
            let fuel: FuelType = category(heater, "FuelType")?;
            let efficiency = match rated(heater)? {
                Some(efficiency) => efficiency,
                None => Efficiency::new(
                    STORAGE_WATER_HEATER_EF.unit,
                    STORAGE_WATER_HEATER_EF.lookup(Some(fuel), count(heater, "YearInstalled")?)?,
                ),
            };
            (fuel, Some(efficiency), None)
        }
        WaterHeaterType::HeatPump => (FuelType::Electricity, Some(required_rating(heater)?), None),
        WaterHeaterType::Instantaneous => (
            category(heater, "FuelType")?,
            Some(required_rating(heater)?),
            None,
        ),
        WaterHeaterType::IndirectStorage | WaterHeaterType::TanklessCoil => {
            let (boiler_id, fuel) = related_boiler(context, heater)?;
            (fuel, None, Some(boiler_id))
        }
    };
    debug!(
        heater = heater_id,
        heater_type = %heater_type,
        fuel = %fuel,
        "Expanded water heater."
    );

    Ok(WaterHeater {
        id: heater_id.to_string(),
        water_heater_type: heater_type,
        fuel_type: fuel,
        location: SpaceLocation::LivingSpace,
        tank_volume: default_tank_volume(heater_type, fuel),
        efficiency,
        related_hvac_system: related,
        fraction_dhw_load_served: 1.0,
    })
}

#[instrument(skip_all, name = "water_heating_step")]
pub fn run(context: &TranslationContext) -> Result<HotWater, TranslationError> {
    context.reporter.report(Progress::StepStart {
        name: "water_heating",
    });

    let water_heaters = context
        .elements(WATER_HEATERS)
        .into_iter()
        .map(|heater| water_heater(context, heater))
        .collect::<Result<Vec<_>, _>>()?;

    let distribution = HotWaterDistribution {
        id: "HotWaterDistribution".to_string(),
        system_type: "Standard".to_string(),
        pipe_insulation_r_value: 0.0,
    };
    let fixtures = ["ShowerHead", "Faucet"]
        .into_iter()
        .map(|fixture| WaterFixture {
            id: fixture.to_string(),
            water_fixture_type: fixture.to_string(),
            low_flow: false,
        })
        .collect();

    context.reporter.report(Progress::StepFinish);
    Ok(HotWater {
        water_heaters,
        distribution,
        fixtures,
    })
}
