use super::read::{category, count, id, label, optional_number};
use crate::core::geometry::{Orientation, sanitize_azimuth};
use crate::core::model::systems::PvSystem;
use crate::engine::context::TranslationContext;
use crate::engine::error::TranslationError;
use crate::engine::progress::Progress;
use tracing::{info, instrument};

pub const PV_SYSTEMS: &str = "Systems/Photovoltaics/PVSystem";

/// Rated DC output of a single panel, in watts.
pub const PANEL_RATING_W: f64 = 300.0;

const INVERTER_EFFICIENCY: f64 = 0.96;
const SYSTEM_LOSSES_FRACTION: f64 = 0.14;

#[instrument(skip_all, name = "photovoltaics_step")]
pub fn run(context: &TranslationContext) -> Result<Vec<PvSystem>, TranslationError> {
    context.reporter.report(Progress::StepStart {
        name: "photovoltaics",
    });

    let mut systems = Vec::new();
    for pv in context.elements(PV_SYSTEMS) {
        let azimuth = match optional_number(pv, "ArrayAzimuth")? {
            Some(azimuth) => sanitize_azimuth(azimuth),
            None => category::<Orientation>(pv, "ArrayOrientation")?.azimuth(),
        };
        let max_power_output = match optional_number(pv, "MaxPowerOutput")? {
            Some(watts) => watts,
            None if pv.find("NumberOfPanels").is_some() => {
                count(pv, "NumberOfPanels")? as f64 * PANEL_RATING_W
            }
            None => {
                return Err(TranslationError::MissingElement {
                    context: label(pv),
                    path: "MaxPowerOutput | NumberOfPanels".to_string(),
                });
            }
        };
        let pv_id = id(pv)?;
        info!(pv = pv_id, azimuth, max_power_output, "Sized PV array.");

        systems.push(PvSystem {
            id: pv_id.to_string(),
            location: "roof".to_string(),
            module_type: "standard".to_string(),
            tracking: "fixed".to_string(),
            array_azimuth: azimuth,
            array_tilt: context.shape.roof_pitch_degrees,
            max_power_output,
            inverter_efficiency: INVERTER_EFFICIENCY,
            system_losses_fraction: SYSTEM_LOSSES_FRACTION,
        });
    }

    context.reporter.report(Progress::StepFinish);
    Ok(systems)
}
