use super::read::{category, flag, id, number};
use crate::core::document::Element;
use crate::core::model::categories::DuctLocation;
use crate::core::model::systems::{
    AirDistribution, DistributionSystemType, Duct, DuctLeakage, DuctType, HvacDistribution,
};
use crate::engine::context::TranslationContext;
use crate::engine::error::TranslationError;
use crate::engine::progress::Progress;
use tracing::{debug, instrument};

pub const DISTRIBUTIONS: &str = "Systems/HVAC/HVACDistribution";
const DUCTS: &str = "DistributionSystemType/AirDistribution/Ducts";

// Duct surface area per ft² of conditioned floor area.
const SUPPLY_AREA_PER_FT2: f64 = 0.27;
const RETURN_AREA_PER_FT2_PER_STORY: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq)]
struct DuctRun {
    location: DuctLocation,
    fraction: f64,
    insulated: bool,
}

fn duct_runs(distribution: &Element) -> Result<Vec<DuctRun>, TranslationError> {
    distribution
        .find_all(DUCTS)
        .into_iter()
        .map(|duct| {
            Ok(DuctRun {
                location: category(duct, "DuctLocation")?,
                fraction: number(duct, "FractionDuctArea")?,
                insulated: flag(duct, "DuctInsulationPresent")?,
            })
        })
        .collect()
}

/// Duct locations with their area fractions across every air distribution system.
pub fn duct_fractions(details: &Element) -> Result<Vec<(DuctLocation, f64)>, TranslationError> {
    let mut fractions = Vec::new();
    for distribution in details.find_all(DISTRIBUTIONS) {
        fractions.extend(
            duct_runs(distribution)?
                .into_iter()
                .map(|run| (run.location, run.fraction)),
        );
    }
    Ok(fractions)
}

#[instrument(skip_all, name = "hvac_distribution_step")]
pub fn run(context: &TranslationContext) -> Result<Vec<HvacDistribution>, TranslationError> {
    context.reporter.report(Progress::StepStart {
        name: "hvac_distribution",
    });

    let cfa = context.shape.conditioned_floor_area;
    let stories = context.shape.stories_above_grade as f64;
    let defaults = &context.config.ducts;

    let mut distributions = Vec::new();
    for distribution in context.elements(DISTRIBUTIONS) {
        let runs = duct_runs(distribution)?;
        let sealed = flag(distribution, "HVACDistributionImprovement/DuctSystemSealed")?;

        let mut ducts = Vec::with_capacity(runs.len() * 2);
        for run in &runs {
            let location = run.location.to_space_location();
            let r_value = if run.insulated {
                defaults.insulated_r_value
            } else {
                0.0
            };
            ducts.push(Duct {
                duct_type: DuctType::Supply,
                duct_location: location,
                fraction_duct_area: run.fraction,
                duct_surface_area: SUPPLY_AREA_PER_FT2 * cfa * run.fraction,
                duct_insulation_r_value: r_value,
            });
            ducts.push(Duct {
                duct_type: DuctType::Return,
                duct_location: location,
                fraction_duct_area: run.fraction,
                duct_surface_area: RETURN_AREA_PER_FT2_PER_STORY * stories * cfa * run.fraction,
                duct_insulation_r_value: r_value,
            });
        }

        // Only ducts outside conditioned space leak to outside.
        let outside_fraction: f64 = runs
            .iter()
            .filter(|run| !run.location.is_conditioned())
            .map(|run| run.fraction)
            .sum();
        let rate = if sealed {
            defaults.leakage_cfm25_per_ft2_sealed
        } else {
            defaults.leakage_cfm25_per_ft2_unsealed
        };
        let to_outside = rate * cfa * outside_fraction;
        let dist_id = id(distribution)?;
        debug!(
            distribution = dist_id,
            sealed, outside_fraction, to_outside, "Defaulted duct leakage."
        );

        distributions.push(HvacDistribution {
            id: dist_id.to_string(),
            distribution_system_type: DistributionSystemType::AirDistribution(AirDistribution {
                duct_leakage_measurements: [DuctType::Supply, DuctType::Return]
                    .into_iter()
                    .map(|duct_type| DuctLeakage {
                        duct_type,
                        value: to_outside / 2.0,
                        total_or_to_outside: "to outside".to_string(),
                    })
                    .collect(),
                ducts,
            }),
        });
    }

    context.reporter.report(Progress::StepFinish);
    Ok(distributions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::categories::SpaceLocation;
    use crate::test_support::{edit_first, sample_document, with_context};

    fn air(distribution: &HvacDistribution) -> &AirDistribution {
        match &distribution.distribution_system_type {
            DistributionSystemType::AirDistribution(air) => air,
            other => panic!("expected an air distribution, got {:?}", other),
        }
    }

    #[test]
    fn ducts_split_into_supply_and_return_runs() {
        let doc = sample_document();
        let distributions = with_context(&doc, run).unwrap();
        assert_eq!(distributions.len(), 1);
        let air = air(&distributions[0]);
        assert_eq!(air.ducts.len(), 4);

        let attic_supply = &air.ducts[0];
        assert_eq!(attic_supply.duct_type, DuctType::Supply);
        assert_eq!(attic_supply.duct_location, SpaceLocation::AtticVented);
        assert!((attic_supply.duct_surface_area - 0.27 * 2000.0 * 0.7).abs() < 1e-9);
        assert_eq!(attic_supply.duct_insulation_r_value, 6.0);

        let living_return = &air.ducts[3];
        assert_eq!(living_return.duct_type, DuctType::Return);
        assert_eq!(living_return.duct_location, SpaceLocation::LivingSpace);
        assert!((living_return.duct_surface_area - 0.05 * 2.0 * 2000.0 * 0.3).abs() < 1e-9);
        assert_eq!(living_return.duct_insulation_r_value, 0.0);
    }

    #[test]
    fn leakage_to_outside_scales_with_unconditioned_fraction_and_sealing() {
        let doc = sample_document();
        let unsealed = with_context(&doc, run).unwrap();
        let leakage = &air(&unsealed[0]).duct_leakage_measurements;
        assert_eq!(leakage.len(), 2);
        assert!((leakage[0].value - 0.12 * 2000.0 * 0.7 / 2.0).abs() < 1e-9);
        assert_eq!(leakage[0].value, leakage[1].value);

        let mut sealed_doc = sample_document();
        edit_first(
            &mut sealed_doc,
            "Building/BuildingDetails/Systems/HVAC/HVACDistribution/HVACDistributionImprovement/DuctSystemSealed",
            |sealed| sealed.text = Some("true".to_string()),
        );
        let sealed = with_context(&sealed_doc, run).unwrap();
        assert!(
            (air(&sealed[0]).duct_leakage_measurements[0].value - 0.06 * 2000.0 * 0.7 / 2.0).abs()
                < 1e-9
        );
    }

    #[test]
    fn duct_fractions_cover_every_distribution() {
        let doc = sample_document();
        let details = crate::engine::context::building_details(&doc).unwrap();
        assert_eq!(
            duct_fractions(details).unwrap(),
            vec![
                (DuctLocation::UnconditionedAttic, 0.7),
                (DuctLocation::ConditionedSpace, 0.3)
            ]
        );
    }
}
