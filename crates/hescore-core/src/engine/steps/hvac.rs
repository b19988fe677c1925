use super::read::{category, count, id, number, optional_idref, selected};
use crate::core::document::Element;
use crate::core::model::categories::{
    CoolingSystemType, EfficiencyUnit, FuelType, HeatPumpType, HeatingSystemType,
};
use crate::core::model::systems::{
    Capacity, CoolingSystem, DistributionSystemType, Efficiency, HeatPump, HeatingSystem,
    HvacDistribution,
};
use crate::core::tables::efficiency::{
    AIR_SOURCE_HEAT_PUMP_HSPF, AIR_SOURCE_HEAT_PUMP_SEER, BOILER_AFUE, CENTRAL_AC_SEER,
    FURNACE_AFUE, GROUND_SOURCE_HEAT_PUMP_COP, GROUND_SOURCE_HEAT_PUMP_EER, ROOM_AC_EER,
    VintageTable, stove_efficiency,
};
use crate::engine::context::TranslationContext;
use crate::engine::error::TranslationError;
use crate::engine::progress::Progress;
use tracing::{debug, instrument, warn};

pub const HEATING_SYSTEMS: &str = "Systems/HVAC/HVACPlant/HeatingSystem";
pub const COOLING_SYSTEMS: &str = "Systems/HVAC/HVACPlant/CoolingSystem";
pub const HEAT_PUMPS: &str = "Systems/HVAC/HVACPlant/HeatPump";

const HEATING_EFFICIENCY: &str = "AnnualHeatingEfficiency";
const COOLING_EFFICIENCY: &str = "AnnualCoolingEfficiency";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HvacPlant {
    pub heating_systems: Vec<HeatingSystem>,
    pub cooling_systems: Vec<CoolingSystem>,
    pub heat_pumps: Vec<HeatPump>,
    /// Hydronic distributions emitted for boilers.
    pub hydronic_distributions: Vec<HvacDistribution>,
}

/// Efficiency stated on the element in `units`, if any.
fn rated(
    system: &Element,
    name: &str,
    units: EfficiencyUnit,
) -> Result<Option<f64>, TranslationError> {
    system
        .children_named(name)
        .find(|efficiency| efficiency.text_at("Units") == Some(units.as_str()))
        .map(|efficiency| number(efficiency, "Value"))
        .transpose()
}

/// Stated efficiency, or the vintage default for the installation year.
fn rated_or_vintage(
    system: &Element,
    name: &str,
    table: &VintageTable,
    fuel: Option<FuelType>,
) -> Result<Efficiency, TranslationError> {
    let value = match rated(system, name, table.unit)? {
        Some(value) => value,
        None => table.lookup(fuel, count(system, "YearInstalled")?)?,
    };
    Ok(Efficiency::new(table.unit, value))
}

fn heating_system(
    system: &Element,
    hydronic: &mut Vec<HvacDistribution>,
) -> Result<HeatingSystem, TranslationError> {
    let system_id = id(system)?;
    let (heating_type, _) = selected::<HeatingSystemType>(system, "HeatingSystemType")?;
    let fuel = match heating_type {
        HeatingSystemType::ElectricResistance => FuelType::Electricity,
        _ => category(system, "HeatingSystemFuel")?,
    };
    let efficiency = match heating_type {
        HeatingSystemType::Furnace | HeatingSystemType::WallFurnace => {
            rated_or_vintage(system, HEATING_EFFICIENCY, &FURNACE_AFUE, Some(fuel))?
        }
        HeatingSystemType::Boiler => {
            rated_or_vintage(system, HEATING_EFFICIENCY, &BOILER_AFUE, Some(fuel))?
        }
        HeatingSystemType::ElectricResistance => Efficiency::new(EfficiencyUnit::Percent, 1.0),
        HeatingSystemType::Stove => {
            let value = match rated(system, HEATING_EFFICIENCY, EfficiencyUnit::Percent)? {
                Some(value) => value,
                None => stove_efficiency(fuel)?,
            };
            Efficiency::new(EfficiencyUnit::Percent, value)
        }
    };
    let distribution_system = if heating_type == HeatingSystemType::Boiler {
        let distribution_id = format!("{system_id}_distribution");
        hydronic.push(HvacDistribution {
            id: distribution_id.clone(),
            distribution_system_type: DistributionSystemType::HydronicDistribution {
                hydronic_distribution_type: "radiator".to_string(),
            },
        });
        Some(distribution_id)
    } else {
        optional_idref(system, "DistributionSystem").map(str::to_string)
    };
    debug!(
        system = system_id,
        heating_type = %heating_type,
        fuel = %fuel,
        efficiency = efficiency.value,
        "Expanded heating system."
    );

    Ok(HeatingSystem {
        id: system_id.to_string(),
        distribution_system,
        heating_system_type: heating_type,
        heating_system_fuel: fuel,
        heating_capacity: Capacity::Autosize,
        annual_heating_efficiency: efficiency,
        fraction_heat_load_served: number(system, "FractionHeatLoadServed")?,
    })
}

fn cooling_system(system: &Element) -> Result<CoolingSystem, TranslationError> {
    let cooling_type: CoolingSystemType = category(system, "CoolingSystemType")?;
    let efficiency = match cooling_type {
        CoolingSystemType::CentralAirConditioner => Some(rated_or_vintage(
            system,
            COOLING_EFFICIENCY,
            &CENTRAL_AC_SEER,
            None,
        )?),
        CoolingSystemType::RoomAirConditioner => Some(rated_or_vintage(
            system,
            COOLING_EFFICIENCY,
            &ROOM_AC_EER,
            None,
        )?),
        CoolingSystemType::EvaporativeCooler => None,
    };
    Ok(CoolingSystem {
        id: id(system)?.to_string(),
        distribution_system: optional_idref(system, "DistributionSystem").map(str::to_string),
        cooling_system_type: cooling_type,
        cooling_system_fuel: FuelType::Electricity,
        cooling_capacity: Capacity::Autosize,
        annual_cooling_efficiency: efficiency,
        fraction_cool_load_served: number(system, "FractionCoolLoadServed")?,
    })
}

fn heat_pump(system: &Element) -> Result<HeatPump, TranslationError> {
    let heat_pump_type: HeatPumpType = category(system, "HeatPumpType")?;
    let (cooling, heating) = match heat_pump_type {
        HeatPumpType::AirToAir | HeatPumpType::MiniSplit => {
            (&AIR_SOURCE_HEAT_PUMP_SEER, &AIR_SOURCE_HEAT_PUMP_HSPF)
        }
        HeatPumpType::GroundToAir => (&GROUND_SOURCE_HEAT_PUMP_EER, &GROUND_SOURCE_HEAT_PUMP_COP),
    };
    Ok(HeatPump {
        id: id(system)?.to_string(),
        distribution_system: optional_idref(system, "DistributionSystem").map(str::to_string),
        heat_pump_type,
        heat_pump_fuel: FuelType::Electricity,
        heating_capacity: Capacity::Autosize,
        cooling_capacity: Capacity::Autosize,
        annual_cooling_efficiency: rated_or_vintage(system, COOLING_EFFICIENCY, cooling, None)?,
        annual_heating_efficiency: rated_or_vintage(system, HEATING_EFFICIENCY, heating, None)?,
        fraction_heat_load_served: number(system, "FractionHeatLoadServed")?,
        fraction_cool_load_served: number(system, "FractionCoolLoadServed")?,
    })
}

#[instrument(skip_all, name = "hvac_step")]
pub fn run(context: &TranslationContext) -> Result<HvacPlant, TranslationError> {
    context.reporter.report(Progress::StepStart { name: "hvac" });

    let mut plant = HvacPlant::default();
    for system in context.elements(HEATING_SYSTEMS) {
        let heating = heating_system(system, &mut plant.hydronic_distributions)?;
        plant.heating_systems.push(heating);
    }
    for system in context.elements(COOLING_SYSTEMS) {
        plant.cooling_systems.push(cooling_system(system)?);
    }
    for system in context.elements(HEAT_PUMPS) {
        plant.heat_pumps.push(heat_pump(system)?);
    }

    let heat_served: f64 = plant
        .heating_systems
        .iter()
        .map(|s| s.fraction_heat_load_served)
        .chain(plant.heat_pumps.iter().map(|s| s.fraction_heat_load_served))
        .sum();
    let cool_served: f64 = plant
        .cooling_systems
        .iter()
        .map(|s| s.fraction_cool_load_served)
        .chain(plant.heat_pumps.iter().map(|s| s.fraction_cool_load_served))
        .sum();
    if heat_served > 1.0 + 1e-6 || cool_served > 1.0 + 1e-6 {
        warn!(
            heat_served,
            cool_served, "HVAC systems serve more than the whole load."
        );
        context.reporter.report(Progress::Message(format!(
            "HVAC systems serve {heat_served:.2} of the heating load and {cool_served:.2} of \
             the cooling load."
        )));
    }

    context.reporter.report(Progress::StepFinish);
    Ok(plant)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::progress::ProgressReporter;
    use crate::test_support::{edit_first, sample_document, with_context, with_reporter};
    use std::sync::Mutex;

    const HEATING_PATH: &str = "Building/BuildingDetails/Systems/HVAC/HVACPlant/HeatingSystem";

    #[test]
    fn gas_furnace_from_1975_defaults_to_72_percent_afue() {
        let doc = sample_document();
        let plant = with_context(&doc, run).unwrap();
        let furnace = &plant.heating_systems[0];
        assert_eq!(furnace.heating_system_type, HeatingSystemType::Furnace);
        assert_eq!(furnace.heating_system_fuel, FuelType::NaturalGas);
        assert_eq!(
            furnace.annual_heating_efficiency,
            Efficiency::new(EfficiencyUnit::Afue, 0.72)
        );
        assert_eq!(furnace.heating_capacity, Capacity::Autosize);
        assert_eq!(furnace.distribution_system.as_deref(), Some("dist1"));
        assert!(plant.hydronic_distributions.is_empty());
    }

    #[test]
    fn stated_efficiencies_take_precedence_over_vintage_defaults() {
        let doc = sample_document();
        let plant = with_context(&doc, run).unwrap();
        let ac = &plant.cooling_systems[0];
        assert_eq!(
            ac.annual_cooling_efficiency,
            Some(Efficiency::new(EfficiencyUnit::Seer, 13.0))
        );
        assert_eq!(ac.cooling_capacity, Capacity::Autosize);
    }

    #[test]
    fn boilers_get_a_hydronic_distribution() {
        let mut doc = sample_document();
        edit_first(&mut doc, HEATING_PATH, |system| {
            system.children.retain(|c| c.name != "DistributionSystem");
            if let Some(kind) = system.find_mut("HeatingSystemType") {
                kind.children = vec![Element::new("Boiler")];
            }
        });
        let plant = with_context(&doc, run).unwrap();
        let boiler = &plant.heating_systems[0];
        assert_eq!(boiler.distribution_system.as_deref(), Some("heat1_distribution"));
        assert_eq!(boiler.annual_heating_efficiency.value, 0.65);
        assert_eq!(plant.hydronic_distributions.len(), 1);
        assert_eq!(plant.hydronic_distributions[0].id, "heat1_distribution");
    }

    #[test]
    fn electric_stoves_have_no_default_efficiency() {
        let mut doc = sample_document();
        edit_first(&mut doc, HEATING_PATH, |system| {
            if let Some(kind) = system.find_mut("HeatingSystemType") {
                kind.children = vec![Element::new("Stove")];
            }
            if let Some(fuel) = system.find_mut("HeatingSystemFuel") {
                fuel.text = Some("electricity".to_string());
            }
        });
        assert!(matches!(
            with_context(&doc, run),
            Err(TranslationError::Lookup(_))
        ));
    }

    #[test]
    fn unknown_heating_types_are_unrecognized() {
        let mut doc = sample_document();
        edit_first(&mut doc, HEATING_PATH, |system| {
            if let Some(kind) = system.find_mut("HeatingSystemType") {
                kind.children = vec![Element::new("Fireplace")];
            }
        });
        let err = with_context(&doc, run).unwrap_err();
        assert_eq!(err.to_string(), "Unexpected heating system type 'Fireplace'");
    }

    #[test]
    fn overserved_heating_load_is_reported() {
        let mut doc = sample_document();
        edit_first(
            &mut doc,
            &format!("{HEATING_PATH}/FractionHeatLoadServed"),
            |fraction| fraction.text = Some("1.5".to_string()),
        );
        let messages = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            if let Progress::Message(text) = event {
                messages.lock().unwrap().push(text);
            }
        }));
        let plant = with_reporter(&doc, &reporter, run).unwrap();
        drop(reporter);
        assert_eq!(plant.heating_systems[0].fraction_heat_load_served, 1.5);
        assert_eq!(
            messages.into_inner().unwrap(),
            vec!["HVAC systems serve 1.50 of the heating load and 1.00 of the cooling load."]
        );
    }

    #[test]
    fn fully_served_loads_report_no_message() {
        let messages = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            if let Progress::Message(text) = event {
                messages.lock().unwrap().push(text);
            }
        }));
        with_reporter(&sample_document(), &reporter, run).unwrap();
        drop(reporter);
        assert!(messages.into_inner().unwrap().is_empty());
    }
}
