use super::read::{category, id, layer_r_value, optional_flag, selected};
use crate::core::geometry::{Orientation, sanitize_azimuth};
use crate::core::model::categories::{Siding, SpaceLocation, WallType};
use crate::core::model::enclosure::{Insulation, Wall};
use crate::engine::context::TranslationContext;
use crate::engine::error::TranslationError;
use crate::engine::progress::Progress;
use tracing::{debug, instrument};

pub const WALLS: &str = "Enclosure/Walls/Wall";

const SOLAR_ABSORPTANCE: f64 = 0.75;
const EMITTANCE: f64 = 0.90;

#[instrument(skip_all, name = "walls_step")]
pub fn run(context: &TranslationContext) -> Result<Vec<Wall>, TranslationError> {
    context.reporter.report(Progress::StepStart { name: "walls" });

    let shape = context.shape;
    let mut walls = Vec::new();
    for wall in context.elements(WALLS) {
        let wall_id = id(wall)?;
        let orientation: Orientation = category(wall, "Orientation")?;
        let (wall_type, selector) = selected::<WallType>(wall, "WallType")?;
        let siding: Siding = category(wall, "Siding")?;
        let cavity_r = layer_r_value(wall, "Insulation", "cavity")?;
        let continuous_r = layer_r_value(wall, "Insulation", "continuous")?;
        let ove = match wall_type {
            WallType::WoodStud => {
                optional_flag(selector, "OptimumValueEngineering")?.unwrap_or(false)
            }
            WallType::StructuralBrick | WallType::ConcreteMasonryUnit | WallType::StrawBale => {
                false
            }
        };
        let r_value = context.tables.assemblies.wall_r_value(
            wall_type,
            cavity_r,
            continuous_r,
            siding,
            ove,
        )?;
        let area = shape.wall_length_facing(orientation) * shape.height;
        debug!(wall = wall_id, %orientation, %wall_type, area, r_value, "Expanding wall.");

        walls.push(Wall {
            insulation: Insulation::for_surface(wall_id, r_value),
            id: wall_id.to_string(),
            exterior_adjacent_to: SpaceLocation::Outside,
            interior_adjacent_to: SpaceLocation::LivingSpace,
            wall_type: Some(wall_type),
            area,
            azimuth: Some(sanitize_azimuth(orientation.azimuth())),
            siding: Some(siding),
            solar_absorptance: SOLAR_ABSORPTANCE,
            emittance: EMITTANCE,
        });
    }

    context.reporter.report(Progress::StepFinish);
    Ok(walls)
}
