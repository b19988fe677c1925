use super::read::{category, count, id, label, number, text};
use super::{foundations, hvac_distribution};
use crate::core::model::categories::{LeakageUnit, LeakinessDescription};
use crate::core::model::enclosure::AirInfiltration;
use crate::core::tables::infiltration::{LeakageInputs, estimated_ach50};
use crate::engine::context::TranslationContext;
use crate::engine::error::TranslationError;
use crate::engine::progress::Progress;
use tracing::{info, instrument};

const MEASUREMENT: &str = "Enclosure/AirInfiltration/AirInfiltrationMeasurement";
const BLOWER_DOOR_PRESSURE_PA: f64 = 50.0;

#[instrument(skip_all, name = "air_infiltration_step")]
pub fn run(context: &TranslationContext) -> Result<AirInfiltration, TranslationError> {
    context.reporter.report(Progress::StepStart {
        name: "air_infiltration",
    });

    let measurement = context
        .elements(MEASUREMENT)
        .into_iter()
        .next()
        .ok_or_else(|| TranslationError::MissingElement {
            context: "BuildingDetails".to_string(),
            path: MEASUREMENT.to_string(),
        })?;
    let volume = context.shape.conditioned_volume;

    let ach50 = if measurement.find("BuildingAirLeakage").is_some() {
        let pressure = number(measurement, "HousePressure")?;
        if (pressure - BLOWER_DOOR_PRESSURE_PA).abs() > 1e-9 {
            return Err(TranslationError::InvalidValue {
                context: label(measurement),
                path: "HousePressure".to_string(),
                value: pressure.to_string(),
                reason: "blower door tests must be reported at 50 Pa".to_string(),
            });
        }
        let leakage = number(measurement, "BuildingAirLeakage/AirLeakage")?;
        match category::<LeakageUnit>(measurement, "BuildingAirLeakage/UnitofMeasure")? {
            LeakageUnit::Ach => leakage,
            LeakageUnit::Cfm => leakage * 60.0 / volume,
        }
    } else {
        let leakiness: LeakinessDescription = category(measurement, "LeakinessDescription")?;
        let construction = context
            .details
            .find("BuildingSummary/BuildingConstruction")
            .ok_or_else(|| TranslationError::MissingElement {
                context: "BuildingDetails".to_string(),
                path: "BuildingSummary/BuildingConstruction".to_string(),
            })?;
        let climate_zone = text(
            context.details,
            "ClimateandRiskZones/ClimateZoneIECC/ClimateZone",
        )?;
        let foundations = foundations::kinds_and_areas(context.details)?;
        let ducts = hvac_distribution::duct_fractions(context.details)?;
        let inputs = LeakageInputs {
            floor_area_ft2: context.shape.conditioned_floor_area,
            height_ft: context.shape.height,
            stories: context.shape.stories_above_grade,
            leakiness,
            year_built: count(construction, "YearBuilt")?,
            climate_zone,
            foundations: &foundations,
            ducts: &ducts,
        };
        estimated_ach50(&inputs, volume, context.collaborators)?
    };

    info!(ach50, volume, "Resolved building air leakage.");
    context.reporter.report(Progress::StepFinish);
    Ok(AirInfiltration {
        id: id(measurement)?.to_string(),
        house_pressure: BLOWER_DOOR_PRESSURE_PA,
        unit_of_measure: LeakageUnit::Ach,
        air_leakage: ach50,
        infiltration_volume: volume,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::document::Element;
    use crate::test_support::{edit_first, sample_document, with_context};

    const MEASUREMENT_PATH: &str =
        "Building/BuildingDetails/Enclosure/AirInfiltration/AirInfiltrationMeasurement";

    fn blower_door(unit: &str, value: f64, pressure: f64) -> crate::core::document::Document {
        let mut doc = sample_document();
        edit_first(&mut doc, MEASUREMENT_PATH, |measurement| {
            measurement.children.retain(|c| c.name == "SystemIdentifier");
            measurement.push(Element::leaf("HousePressure", pressure));
            measurement.push(
                Element::new("BuildingAirLeakage")
                    .with_leaf("UnitofMeasure", unit)
                    .with_leaf("AirLeakage", value),
            );
        });
        doc
    }

    #[test]
    fn cfm50_is_converted_to_ach50_over_the_conditioned_volume() {
        let doc = blower_door("CFM", 2400.0, 50.0);
        let infiltration = with_context(&doc, run).unwrap();
        assert_eq!(infiltration.unit_of_measure, LeakageUnit::Ach);
        assert!((infiltration.air_leakage - 2400.0 * 60.0 / 16000.0).abs() < 1e-9);
        assert_eq!(infiltration.infiltration_volume, 16000.0);
    }

    #[test]
    fn ach50_is_used_directly() {
        let doc = blower_door("ACH", 7.5, 50.0);
        assert_eq!(with_context(&doc, run).unwrap().air_leakage, 7.5);
    }

    #[test]
    fn blower_door_tests_at_other_pressures_are_rejected() {
        let doc = blower_door("ACH", 7.5, 25.0);
        assert!(matches!(
            with_context(&doc, run),
            Err(TranslationError::InvalidValue { .. })
        ));
    }

    #[test]
    fn leakiness_description_falls_back_to_the_regression() {
        let doc = sample_document();
        let average = with_context(&doc, run).unwrap();
        assert_eq!(average.id, "air1");
        assert!(average.air_leakage > 0.0);

        let mut tight_doc = sample_document();
        edit_first(&mut tight_doc, MEASUREMENT_PATH, |measurement| {
            if let Some(description) = measurement.find_mut("LeakinessDescription") {
                description.text = Some("tight".to_string());
            }
        });
        let tight = with_context(&tight_doc, run).unwrap();
        assert!(tight.air_leakage < average.air_leakage);
    }
}
