use crate::core::model::categories::SpaceLocation;
use crate::core::model::enclosure::{Door, Wall};
use crate::engine::context::TranslationContext;
use crate::engine::error::TranslationError;
use crate::engine::progress::Progress;
use tracing::{info, instrument};

pub const DOOR_ID: &str = "Door";

const AZIMUTH_TOLERANCE_DEG: f64 = 1e-6;

/// Places the single default door on the emitted wall facing the front of the home.
#[instrument(skip_all, name = "doors_step")]
pub fn run(context: &TranslationContext, walls: &[Wall]) -> Result<Vec<Door>, TranslationError> {
    context.reporter.report(Progress::StepStart { name: "doors" });

    let front = context.shape.front_azimuth;
    let wall = walls
        .iter()
        .filter(|wall| wall.exterior_adjacent_to == SpaceLocation::Outside)
        .find(|wall| {
            wall.azimuth
                .is_some_and(|azimuth| (azimuth - front).abs() < AZIMUTH_TOLERANCE_DEG)
        })
        .ok_or_else(|| {
            TranslationError::StructuralReference(format!(
                "No wall faces the front of the home ({})",
                context.shape.front_orientation
            ))
        })?;
    info!(wall = %wall.id, "Placed front door.");

    context.reporter.report(Progress::StepFinish);
    Ok(vec![Door {
        id: DOOR_ID.to_string(),
        attached_to_wall: wall.id.clone(),
        area: context.config.door.area_ft2,
        azimuth: front,
        r_value: context.config.door.r_value,
    }])
}
