use crate::core::collaborators::Collaborators;
use crate::core::document::Document;
use crate::core::geometry::{Orientation, Shape, ShapeInputs};
use crate::core::model::categories::FuelType;
use crate::core::model::loads::Appliance;
use crate::core::model::{BuildingDescription, Enclosure, Systems};
use crate::core::tables::LookupTables;
use crate::engine::config::TranslationConfig;
use crate::engine::context::{TranslationContext, building_details};
use crate::engine::error::TranslationError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::steps::{
    self, air_infiltration, attics, doors, foundations, hvac, hvac_distribution, loads,
    photovoltaics, skylights, summary, walls, water_heating, windows,
};
use crate::validation::{Validator, Violation};
use tracing::{info, instrument, warn};

/// Checks the document against the home energy score content model and returns every
/// violation found.
pub fn validate(document: &Document) -> Result<Vec<Violation>, TranslationError> {
    Ok(Validator::hescore()?.validate(document))
}

/// Derives the rectangular building shape from the building summary and any conditioned
/// basement.
pub fn derive_shape(document: &Document) -> Result<Shape, TranslationError> {
    let details = building_details(document)?;
    let construction = details
        .find("BuildingSummary/BuildingConstruction")
        .ok_or_else(|| TranslationError::MissingElement {
            context: "BuildingDetails".to_string(),
            path: "BuildingSummary/BuildingConstruction".to_string(),
        })?;
    let basement = foundations::conditioned_basement_area(details)?;
    let inputs = ShapeInputs {
        conditioned_floor_area: steps::read::number(construction, "ConditionedFloorArea")?,
        stories_above_grade: steps::read::count(
            construction,
            "NumberofConditionedFloorsAboveGrade",
        )?,
        has_conditioned_basement: basement.is_some(),
        conditioned_basement_area: basement.unwrap_or(0.0),
        ceiling_height: steps::read::number(construction, "AverageCeilingHeight")?,
        front_orientation: steps::read::category::<Orientation>(
            details,
            "BuildingSummary/Site/OrientationOfFrontOfHome",
        )?,
    };
    Ok(Shape::derive(&inputs)?)
}

/// Translates a sparse building characterization into a fully specified building
/// description.
///
/// The document is validated first (unless disabled in `config`); any violation aborts
/// the run with [`TranslationError::Validation`] carrying every violation. The building
/// shape is then derived once and shared read-only with the transformation steps, which
/// run in a fixed order. Any fatal error aborts the run and no partial output is
/// returned.
#[instrument(skip_all, name = "translation_workflow")]
pub fn run(
    document: &Document,
    config: &TranslationConfig,
    tables: &LookupTables,
    collaborators: &dyn Collaborators,
    reporter: &ProgressReporter,
) -> Result<BuildingDescription, TranslationError> {
    // === Phase 0: Structural validation ===
    if config.skip_validation {
        warn!("Structural validation is disabled; translating the input as given.");
        reporter.report(Progress::Message(
            "Structural validation skipped.".to_string(),
        ));
    } else {
        reporter.report(Progress::StepStart { name: "validation" });
        let violations = validate(document)?;
        reporter.report(Progress::StepFinish);
        if !violations.is_empty() {
            info!(
                violations = violations.len(),
                "Input failed structural validation."
            );
            return Err(TranslationError::Validation(violations));
        }
    }

    // === Phase 1: Geometry ===
    let shape = derive_shape(document)?;
    info!(
        cfa = shape.conditioned_floor_area,
        stories = shape.stories_above_grade,
        footprint = shape.footprint,
        front = %shape.front_orientation,
        "Derived building shape."
    );
    let context =
        TranslationContext::new(document, &shape, tables, collaborators, config, reporter)?;

    // === Phase 2: Building summary and enclosure ===
    let summary = summary::run(&context)?;
    let air_infiltration = air_infiltration::run(&context)?;
    let attic_surfaces = attics::run(&context)?;
    let foundation_surfaces = foundations::run(&context)?;
    let above_grade_walls = walls::run(&context)?;
    let windows = windows::run(&context, &above_grade_walls)?;
    let skylights = skylights::run(&context, &attic_surfaces.roofs)?;
    let doors = doors::run(&context, &above_grade_walls)?;

    // === Phase 3: Mechanical systems ===
    let plant = hvac::run(&context)?;
    let air_distributions = hvac_distribution::run(&context)?;
    let hot_water = water_heating::run(&context)?;
    let photovoltaics = photovoltaics::run(&context)?;

    // === Phase 4: Default loads ===
    let appliances = loads::appliances(&context);
    let lighting = loads::lighting(&context);
    let misc_loads = loads::misc_loads(&context)?;

    // === Phase 5: Assemble the building description ===
    let mut walls = above_grade_walls;
    walls.extend(attic_surfaces.walls);
    let mut frame_floors = attic_surfaces.frame_floors;
    frame_floors.extend(foundation_surfaces.frame_floors);
    let enclosure = Enclosure {
        air_infiltration: Some(air_infiltration),
        attics: attic_surfaces.attics,
        roofs: attic_surfaces.roofs,
        walls,
        foundation_walls: foundation_surfaces.foundation_walls,
        frame_floors,
        slabs: foundation_surfaces.slabs,
        windows,
        skylights,
        doors,
    };

    let mut hvac_distributions = air_distributions;
    hvac_distributions.extend(plant.hydronic_distributions);
    let systems = Systems {
        heating_systems: plant.heating_systems,
        cooling_systems: plant.cooling_systems,
        heat_pumps: plant.heat_pumps,
        hvac_distributions,
        water_heaters: hot_water.water_heaters,
        hot_water_distribution: Some(hot_water.distribution),
        water_fixtures: hot_water.fixtures,
        photovoltaics,
    };

    let mut site = summary.site;
    site.fuels = fuels_in_use(&systems, &appliances.0);

    let description = BuildingDescription {
        schema_version: config.schema_version.clone(),
        building_id: summary.building_id,
        event_type: summary.event_type,
        site,
        building_summary: summary.building_summary,
        climate_zone: summary.climate_zone,
        enclosure,
        systems,
        appliances,
        lighting,
        misc_loads,
    };
    info!(
        building = %description.building_id,
        walls = description.enclosure.walls.len(),
        windows = description.enclosure.windows.len(),
        "Translation complete."
    );
    Ok(description)
}

/// Every fuel consumed by a system or appliance, in order of first use.
fn fuels_in_use(systems: &Systems, appliances: &[Appliance]) -> Vec<FuelType> {
    let fuels = systems
        .heating_systems
        .iter()
        .map(|s| s.heating_system_fuel)
        .chain(systems.cooling_systems.iter().map(|s| s.cooling_system_fuel))
        .chain(systems.heat_pumps.iter().map(|s| s.heat_pump_fuel))
        .chain(systems.water_heaters.iter().map(|s| s.fuel_type))
        .chain(appliances.iter().filter_map(|a| a.fuel_type));
    let mut unique = Vec::new();
    for fuel in fuels {
        if !unique.contains(&fuel) {
            unique.push(fuel);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::collaborators::StandardCollaborators;
    use crate::core::document::Element;
    use crate::engine::config::TranslationConfigBuilder;
    use crate::test_support::{edit_first, remove_all, sample_document};
    use std::sync::Mutex;

    fn translate(
        document: &Document,
        config: &TranslationConfig,
    ) -> Result<BuildingDescription, TranslationError> {
        let tables = LookupTables::load_default().unwrap();
        run(
            document,
            config,
            &tables,
            &StandardCollaborators,
            &ProgressReporter::new(),
        )
    }

    #[test]
    fn sample_home_translates_end_to_end() {
        let description = translate(&sample_document(), &TranslationConfig::default()).unwrap();
        assert_eq!(description.schema_version, "3.0");
        assert_eq!(description.building_id, "bldg1");

        let enclosure = &description.enclosure;
        assert_eq!(enclosure.roofs.len(), 2);
        // Four above-grade walls followed by two gable walls.
        assert_eq!(enclosure.walls.len(), 6);
        assert_eq!(enclosure.windows.len(), 4);
        assert_eq!(enclosure.skylights[0].attached_to_roof, "roof1_front");
        assert_eq!(enclosure.doors[0].attached_to_wall, "wall_front");
        assert_eq!(enclosure.frame_floors[0].id, "attic1_floor");
        assert_eq!(enclosure.slabs.len(), 1);

        let systems = &description.systems;
        assert_eq!(systems.heating_systems.len(), 1);
        assert_eq!(systems.hvac_distributions.len(), 1);
        assert_eq!(systems.water_heaters.len(), 1);
        assert_eq!(systems.photovoltaics.len(), 1);
        assert_eq!(
            description.site.fuels,
            vec![FuelType::NaturalGas, FuelType::Electricity]
        );
        assert_eq!(description.misc_loads.len(), 2);
    }

    #[test]
    fn geometry_is_derived_from_the_building_summary() {
        let shape = derive_shape(&sample_document()).unwrap();
        assert!((shape.footprint - 1000.0).abs() < 1e-9);
        assert!((shape.side_length - 24.4949).abs() < 1e-3);
        assert!((shape.front_length - 40.8248).abs() < 1e-3);
        assert_eq!(shape.front_orientation, Orientation::South);
    }

    #[test]
    fn invalid_documents_report_every_violation() {
        let mut doc = sample_document();
        remove_all(&mut doc, "Building/BuildingDetails/Enclosure/Walls", "Wall");
        match translate(&doc, &TranslationConfig::default()) {
            Err(TranslationError::Validation(violations)) => {
                assert_eq!(violations.len(), 1);
                assert!(violations[0].to_string().ends_with("/Enclosure/Walls/Wall"));
            }
            other => panic!("expected validation failure, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn skipping_validation_surfaces_the_structural_failure() {
        let mut doc = sample_document();
        remove_all(&mut doc, "Building/BuildingDetails/Enclosure/Walls", "Wall");
        let config = TranslationConfigBuilder::new()
            .skip_validation(true)
            .build()
            .unwrap();
        assert!(matches!(
            translate(&doc, &config),
            Err(TranslationError::StructuralReference(_))
        ));
    }

    #[test]
    fn skipped_validation_is_announced_to_the_reporter() {
        let messages = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            if let Progress::Message(text) = event {
                messages.lock().unwrap().push(text);
            }
        }));
        let config = TranslationConfigBuilder::new()
            .skip_validation(true)
            .build()
            .unwrap();
        let tables = LookupTables::load_default().unwrap();
        run(
            &sample_document(),
            &config,
            &tables,
            &StandardCollaborators,
            &reporter,
        )
        .unwrap();
        drop(reporter);
        assert_eq!(
            messages.into_inner().unwrap(),
            vec!["Structural validation skipped."]
        );
    }

    #[test]
    fn unrecognized_wall_type_aborts_the_translation() {
        let mut doc = sample_document();
        edit_first(
            &mut doc,
            "Building/BuildingDetails/Enclosure/Walls/Wall/WallType",
            |wall_type| wall_type.children = vec![Element::new("LogCabin")],
        );
        let err = translate(&doc, &TranslationConfig::default()).unwrap_err();
        assert!(matches!(err, TranslationError::UnrecognizedVariant(_)));
        assert!(err.to_string().contains("LogCabin"));
    }

    #[test]
    fn progress_is_reported_for_every_step_in_order() {
        let names = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            if let Progress::StepStart { name } = event {
                names.lock().unwrap().push(name);
            }
        }));
        let tables = LookupTables::load_default().unwrap();
        run(
            &sample_document(),
            &TranslationConfig::default(),
            &tables,
            &StandardCollaborators,
            &reporter,
        )
        .unwrap();
        drop(reporter);
        assert_eq!(
            names.into_inner().unwrap(),
            vec![
                "validation",
                "summary",
                "air_infiltration",
                "attics",
                "foundations",
                "walls",
                "windows",
                "skylights",
                "doors",
                "hvac",
                "hvac_distribution",
                "water_heating",
                "photovoltaics",
                "appliances",
                "lighting",
                "misc_loads",
            ]
        );
    }
}
