//! Default appliances, lighting and plug loads. None of these are characterized in the
//! sparse input; every home receives the same reference set, with plug loads scaled by
//! floor area and bedroom count.

use super::read::count;
use crate::core::model::categories::{FuelType, SpaceLocation};
use crate::core::model::loads::{
    Appliance, ApplianceKind, Appliances, Lighting, LightingGroup, LightingLocation,
    LightingType, PlugLoad,
};
use crate::engine::context::TranslationContext;
use crate::engine::error::TranslationError;
use crate::engine::progress::Progress;
use tracing::instrument;

// Annual plug-load energy in kWh.
const OTHER_KWH_PER_FT2: f64 = 0.91;
const TELEVISION_BASE_KWH: f64 = 413.0;
const TELEVISION_KWH_PER_BEDROOM: f64 = 69.0;

#[instrument(skip_all, name = "appliances_step")]
pub fn appliances(context: &TranslationContext) -> Appliances {
    context.reporter.report(Progress::StepStart { name: "appliances" });
    let appliances = ApplianceKind::ALL
        .into_iter()
        .map(|kind| Appliance {
            id: kind.as_str().to_string(),
            kind,
            location: SpaceLocation::LivingSpace,
            fuel_type: kind.uses_fuel().then_some(FuelType::Electricity),
        })
        .collect();
    context.reporter.report(Progress::StepFinish);
    Appliances(appliances)
}

#[instrument(skip_all, name = "lighting_step")]
pub fn lighting(context: &TranslationContext) -> Lighting {
    context.reporter.report(Progress::StepStart { name: "lighting" });
    let mut lighting_groups = Vec::with_capacity(9);
    for location in [
        LightingLocation::Interior,
        LightingLocation::Exterior,
        LightingLocation::Garage,
    ] {
        for lighting_type in [
            LightingType::CompactFluorescent,
            LightingType::FluorescentTube,
            LightingType::LightEmittingDiode,
        ] {
            lighting_groups.push(LightingGroup {
                id: format!("LightingGroup{}", lighting_groups.len() + 1),
                location,
                lighting_type,
                fraction_of_units_in_location: 0.0,
            });
        }
    }
    context.reporter.report(Progress::StepFinish);
    Lighting { lighting_groups }
}

#[instrument(skip_all, name = "misc_loads_step")]
pub fn misc_loads(context: &TranslationContext) -> Result<Vec<PlugLoad>, TranslationError> {
    context.reporter.report(Progress::StepStart { name: "misc_loads" });
    let bedrooms = context
        .details
        .find("BuildingSummary/BuildingConstruction")
        .map(|construction| count(construction, "NumberofBedrooms"))
        .transpose()?
        .unwrap_or(0);
    let loads = vec![
        PlugLoad {
            id: "PlugLoadOther".to_string(),
            plug_load_type: "other".to_string(),
            kwh_per_year: OTHER_KWH_PER_FT2 * context.shape.conditioned_floor_area,
        },
        PlugLoad {
            id: "PlugLoadTelevision".to_string(),
            plug_load_type: "TV other".to_string(),
            kwh_per_year: TELEVISION_BASE_KWH + TELEVISION_KWH_PER_BEDROOM * bedrooms as f64,
        },
    ];
    context.reporter.report(Progress::StepFinish);
    Ok(loads)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{sample_document, with_context};

    #[test]
    fn every_home_gets_the_reference_appliances() {
        let doc = sample_document();
        let Appliances(appliances) = with_context(&doc, appliances);
        assert_eq!(appliances.len(), 6);
        let fueled: Vec<_> = appliances
            .iter()
            .filter(|a| a.fuel_type.is_some())
            .map(|a| a.kind)
            .collect();
        assert_eq!(
            fueled,
            vec![ApplianceKind::ClothesDryer, ApplianceKind::CookingRange]
        );
    }

    #[test]
    fn lighting_covers_every_location_and_type() {
        let doc = sample_document();
        let lighting = with_context(&doc, lighting);
        assert_eq!(lighting.lighting_groups.len(), 9);
        assert_eq!(lighting.lighting_groups[8].id, "LightingGroup9");
        assert_eq!(lighting.lighting_groups[8].location, LightingLocation::Garage);
    }

    #[test]
    fn plug_loads_scale_with_floor_area_and_bedrooms() {
        let doc = sample_document();
        let loads = with_context(&doc, misc_loads).unwrap();
        assert!((loads[0].kwh_per_year - 0.91 * 2000.0).abs() < 1e-9);
        assert!((loads[1].kwh_per_year - (413.0 + 69.0 * 3.0)).abs() < 1e-9);
    }
}
