use super::read::{category, id, idref, label, number, optional_category, optional_flag, selected};
use crate::core::document::Element;
use crate::core::model::categories::FrameType;
use crate::core::model::enclosure::{Wall, Window};
use crate::core::tables::FenestrationKind;
use crate::core::tables::fenestration::{self, FenestrationPerformance, GlazingDescription};
use crate::engine::context::TranslationContext;
use crate::engine::error::TranslationError;
use crate::engine::progress::Progress;
use tracing::{debug, instrument};

pub const WINDOWS: &str = "Enclosure/Windows/Window";

const FRACTION_OPERABLE: f64 = 0.67;

/// Rated performance when the element carries a U-factor, otherwise the tabulated
/// performance of its frame and glazing description.
pub fn performance(
    element: &Element,
    kind: FenestrationKind,
) -> Result<FenestrationPerformance, TranslationError> {
    if element.find("UFactor").is_some() {
        return Ok(FenestrationPerformance {
            u_factor: number(element, "UFactor")?,
            shgc: number(element, "SHGC")?,
        });
    }
    let (frame, selector) = selected::<FrameType>(element, "FrameType")?;
    let description = GlazingDescription {
        frame,
        thermal_break: optional_flag(selector, "ThermalBreak")?.unwrap_or(false),
        layers: category(element, "GlassLayers")?,
        glass: optional_category(element, "GlassType")?,
        gas_fill: optional_category(element, "GasFill")?,
    };
    Ok(fenestration::lookup(kind, &description)?)
}

/// Expands every source window into one window per above-grade story on the emitted wall
/// it is attached to.
#[instrument(skip_all, name = "windows_step")]
pub fn run(context: &TranslationContext, walls: &[Wall]) -> Result<Vec<Window>, TranslationError> {
    context.reporter.report(Progress::StepStart { name: "windows" });

    let stories = context.shape.stories_above_grade;
    let mut windows = Vec::new();
    for window in context.elements(WINDOWS) {
        let window_id = id(window)?;
        let wall_id = idref(window, "AttachedToWall")?;
        let wall = walls.iter().find(|w| w.id == wall_id).ok_or_else(|| {
            TranslationError::StructuralReference(format!(
                "{} is attached to wall '{}', which does not exist",
                label(window),
                wall_id
            ))
        })?;
        let azimuth = wall.azimuth.ok_or_else(|| {
            TranslationError::StructuralReference(format!(
                "{} is attached to wall '{}', which has no orientation",
                label(window),
                wall_id
            ))
        })?;
        let performance = performance(window, FenestrationKind::Window)?;
        let area = number(window, "Area")?;
        debug!(
            window = window_id,
            area,
            u_factor = performance.u_factor,
            shgc = performance.shgc,
            "Expanding window."
        );

        for story in 1..=stories {
            windows.push(Window {
                id: format!("{window_id}_story{story}"),
                area: area / stories as f64,
                azimuth,
                u_factor: performance.u_factor,
                shgc: performance.shgc,
                fraction_operable: FRACTION_OPERABLE,
                story,
                attached_to_wall: wall.id.clone(),
            });
        }
    }

    context.reporter.report(Progress::StepFinish);
    Ok(windows)
}
