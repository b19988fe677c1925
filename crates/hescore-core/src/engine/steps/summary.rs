use super::read::{count, text};
use crate::core::model::{BuildingSummary, ClimateZone, Site};
use crate::engine::context::TranslationContext;
use crate::engine::error::TranslationError;
use crate::engine::progress::Progress;
use tracing::{info, instrument};

/// IECC edition the climate zone designations refer to.
pub const IECC_YEAR: u32 = 2006;

const CONSTRUCTION: &str = "BuildingSummary/BuildingConstruction";

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryOutput {
    pub building_id: String,
    pub event_type: String,
    pub site: Site,
    pub building_summary: BuildingSummary,
    pub climate_zone: ClimateZone,
}

#[instrument(skip_all, name = "summary_step")]
pub fn run(context: &TranslationContext) -> Result<SummaryOutput, TranslationError> {
    context.reporter.report(Progress::StepStart { name: "summary" });

    let building = context.building()?;
    let building_id = building
        .find("BuildingID")
        .and_then(|e| e.attr("id"))
        .ok_or_else(|| TranslationError::MissingElement {
            context: "Building".to_string(),
            path: "BuildingID/@id".to_string(),
        })?
        .to_string();
    let event_type = text(building, "ProjectStatus/EventType")?.to_string();
    let site = Site {
        zip_code: building.text_at("Site/Address/ZipCode").map(str::to_string),
        site_type: "suburban".to_string(),
        shielding_of_home: "normal".to_string(),
        // Filled in by the workflow once every fuel-consuming system is known.
        fuels: Vec::new(),
    };

    let details = context.details;
    let construction = details.find(CONSTRUCTION).ok_or_else(|| {
        TranslationError::MissingElement {
            context: "BuildingDetails".to_string(),
            path: CONSTRUCTION.to_string(),
        }
    })?;
    let bedrooms = count(construction, "NumberofBedrooms")?;
    let shape = context.shape;
    let building_summary = BuildingSummary {
        year_built: count(construction, "YearBuilt")?,
        residential_facility_type: text(construction, "ResidentialFacilityType")?.to_string(),
        number_of_occupants: context.collaborators.default_occupants(bedrooms),
        number_of_bedrooms: bedrooms,
        number_of_bathrooms: default_bathrooms(bedrooms),
        number_of_conditioned_floors: shape.floors_including_basement,
        number_of_conditioned_floors_above_grade: shape.stories_above_grade,
        average_ceiling_height: shape.ceiling_height,
        conditioned_floor_area: shape.conditioned_floor_area,
        conditioned_building_volume: shape.conditioned_volume,
    };

    let zone_element = details
        .find("ClimateandRiskZones/ClimateZoneIECC")
        .ok_or_else(|| TranslationError::MissingElement {
            context: "BuildingDetails".to_string(),
            path: "ClimateandRiskZones/ClimateZoneIECC".to_string(),
        })?;
    let climate_zone = ClimateZone {
        iecc_year: IECC_YEAR,
        climate_zone: text(zone_element, "ClimateZone")?.to_string(),
    };

    info!(
        building = %building_id,
        year_built = building_summary.year_built,
        bedrooms,
        climate_zone = %climate_zone.climate_zone,
        "Summarized building."
    );

    context.reporter.report(Progress::StepFinish);
    Ok(SummaryOutput {
        building_id,
        event_type,
        site,
        building_summary,
        climate_zone,
    })
}

/// Bathroom count implied by the bedroom count (one bath per two bedrooms, rounded up
/// from a half bath).
pub fn default_bathrooms(bedrooms: u32) -> u32 {
    bedrooms / 2 + 1
}
