use super::read::{flag, id, label, number, selected, total_r_value};
use crate::core::document::Element;
use crate::core::model::categories::{FoundationKind, FoundationType, SpaceLocation};
use crate::core::model::enclosure::{FoundationWall, FrameFloor, Insulation, Slab};
use crate::engine::context::TranslationContext;
use crate::engine::error::TranslationError;
use crate::engine::progress::Progress;
use tracing::{debug, instrument};

pub const FOUNDATIONS: &str = "Enclosure/Foundations/Foundation";

const BASEMENT_WALL_HEIGHT_FT: f64 = 8.0;
const BASEMENT_DEPTH_BELOW_GRADE_FT: f64 = 6.0;
const CRAWLSPACE_WALL_HEIGHT_FT: f64 = 2.5;
const CRAWLSPACE_DEPTH_BELOW_GRADE_FT: f64 = 0.0;
const SLAB_PERIMETER_INSULATION_DEPTH_FT: f64 = 2.0;
const CARPET_FRACTION: f64 = 0.8;
const CARPET_R_VALUE: f64 = 2.0;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FoundationSurfaces {
    pub foundation_walls: Vec<FoundationWall>,
    pub frame_floors: Vec<FrameFloor>,
    pub slabs: Vec<Slab>,
}

/// Resolves the foundation type selector and its qualifier (conditioned basement, vented
/// crawlspace) into a single foundation kind.
pub fn classify(foundation: &Element) -> Result<FoundationKind, TranslationError> {
    let (foundation_type, selector) = selected::<FoundationType>(foundation, "FoundationType")?;
    Ok(match foundation_type {
        FoundationType::Basement if flag(selector, "Conditioned")? => {
            FoundationKind::ConditionedBasement
        }
        FoundationType::Basement => FoundationKind::UnconditionedBasement,
        FoundationType::Crawlspace if flag(selector, "Vented")? => FoundationKind::VentedCrawlspace,
        FoundationType::Crawlspace => FoundationKind::UnventedCrawlspace,
        FoundationType::SlabOnGrade => FoundationKind::SlabOnGrade,
    })
}

/// Foundation kinds with their floor areas, in document order.
pub fn kinds_and_areas(details: &Element) -> Result<Vec<(FoundationKind, f64)>, TranslationError> {
    details
        .find_all(FOUNDATIONS)
        .into_iter()
        .map(|foundation| Ok((classify(foundation)?, number(foundation, "Area")?)))
        .collect()
}

/// Floor area of every conditioned basement, or `None` when the home has none.
pub fn conditioned_basement_area(details: &Element) -> Result<Option<f64>, TranslationError> {
    let areas: Vec<f64> = kinds_and_areas(details)?
        .into_iter()
        .filter(|(kind, _)| *kind == FoundationKind::ConditionedBasement)
        .map(|(_, area)| area)
        .collect();
    Ok((!areas.is_empty()).then(|| areas.iter().sum()))
}

fn space(kind: FoundationKind) -> SpaceLocation {
    match kind {
        FoundationKind::ConditionedBasement => SpaceLocation::BasementConditioned,
        FoundationKind::UnconditionedBasement => SpaceLocation::BasementUnconditioned,
        FoundationKind::VentedCrawlspace => SpaceLocation::CrawlspaceVented,
        FoundationKind::UnventedCrawlspace => SpaceLocation::CrawlspaceUnvented,
        FoundationKind::SlabOnGrade => SpaceLocation::LivingSpace,
    }
}

#[instrument(skip_all, name = "foundations_step")]
pub fn run(context: &TranslationContext) -> Result<FoundationSurfaces, TranslationError> {
    context.reporter.report(Progress::StepStart {
        name: "foundations",
    });

    let foundations = context.elements(FOUNDATIONS);
    let kinds = kinds_and_areas(context.details)?;
    let total_area: f64 = kinds.iter().map(|(_, area)| area).sum();
    if total_area <= 0.0 {
        return Err(TranslationError::InvalidValue {
            context: "Foundations".to_string(),
            path: "Foundation/Area".to_string(),
            value: total_area.to_string(),
            reason: "total foundation area must be positive".to_string(),
        });
    }

    let mut surfaces = FoundationSurfaces::default();
    for (foundation, &(kind, area)) in foundations.into_iter().zip(kinds.iter()) {
        let fnd_id = id(foundation)?;
        // Exposed perimeter is shared among foundations in proportion to their area.
        let perimeter = context.shape.perimeter * area / total_area;
        let interior = space(kind);
        debug!(foundation = fnd_id, kind = %kind, area, perimeter, "Expanding foundation.");

        let wall_geometry = match kind {
            FoundationKind::ConditionedBasement | FoundationKind::UnconditionedBasement => {
                Some((BASEMENT_WALL_HEIGHT_FT, BASEMENT_DEPTH_BELOW_GRADE_FT))
            }
            FoundationKind::VentedCrawlspace | FoundationKind::UnventedCrawlspace => {
                Some((CRAWLSPACE_WALL_HEIGHT_FT, CRAWLSPACE_DEPTH_BELOW_GRADE_FT))
            }
            FoundationKind::SlabOnGrade => None,
        };
        if let Some((height, depth)) = wall_geometry {
            surfaces.foundation_walls.push(FoundationWall {
                id: format!("{fnd_id}_foundation_wall"),
                exterior_adjacent_to: SpaceLocation::Ground,
                interior_adjacent_to: interior,
                height,
                area: height * perimeter,
                depth_below_grade: depth,
                insulation_exterior_r_value: total_r_value(
                    foundation,
                    "FoundationWall/Insulation",
                )?,
                insulation_exterior_distance_to_bottom: height,
            });
        }

        if !matches!(
            kind,
            FoundationKind::ConditionedBasement | FoundationKind::SlabOnGrade
        ) {
            let floor_id = format!("{fnd_id}_frame_floor");
            let cavity_r = total_r_value(foundation, "FrameFloor/Insulation")?;
            let r_value = context.tables.assemblies.floor_r_value(cavity_r)?;
            surfaces.frame_floors.push(FrameFloor {
                insulation: Insulation::for_surface(&floor_id, r_value),
                id: floor_id,
                exterior_adjacent_to: interior,
                interior_adjacent_to: SpaceLocation::LivingSpace,
                area,
            });
        }

        surfaces.slabs.push(slab(foundation, fnd_id, kind, area, perimeter)?);
    }

    context.reporter.report(Progress::StepFinish);
    Ok(surfaces)
}

fn slab(
    foundation: &Element,
    fnd_id: &str,
    kind: FoundationKind,
    area: f64,
    perimeter: f64,
) -> Result<Slab, TranslationError> {
    let (depth_below_grade, carpeted) = match kind {
        FoundationKind::ConditionedBasement => (BASEMENT_DEPTH_BELOW_GRADE_FT, true),
        FoundationKind::UnconditionedBasement => (BASEMENT_DEPTH_BELOW_GRADE_FT, false),
        FoundationKind::VentedCrawlspace | FoundationKind::UnventedCrawlspace => {
            (CRAWLSPACE_DEPTH_BELOW_GRADE_FT, false)
        }
        FoundationKind::SlabOnGrade => (0.0, true),
    };
    let perimeter_r = if kind == FoundationKind::SlabOnGrade {
        total_r_value(foundation, "Slab/PerimeterInsulation")?
    } else {
        0.0
    };
    if perimeter_r < 0.0 {
        return Err(TranslationError::InvalidValue {
            context: label(foundation),
            path: "Slab/PerimeterInsulation/Layer/NominalRValue".to_string(),
            value: perimeter_r.to_string(),
            reason: "R-value must not be negative".to_string(),
        });
    }
    Ok(Slab {
        id: format!("{fnd_id}_slab"),
        interior_adjacent_to: space(kind),
        area,
        exposed_perimeter: perimeter,
        depth_below_grade,
        perimeter_insulation_depth: if perimeter_r > 0.0 {
            SLAB_PERIMETER_INSULATION_DEPTH_FT
        } else {
            0.0
        },
        perimeter_insulation_r_value: perimeter_r,
        under_slab_insulation_width: 0.0,
        under_slab_insulation_r_value: 0.0,
        carpet_fraction: if carpeted { CARPET_FRACTION } else { 0.0 },
        carpet_r_value: if carpeted { CARPET_R_VALUE } else { 0.0 },
    })
}
