use super::read::{
    category, id, idref, label, layer_r_value, number, optional_flag, optional_number,
    total_r_value,
};
use crate::core::document::Element;
use crate::core::geometry::ROOF_PITCH_DEGREES;
use crate::core::model::categories::{
    AtticType, RoofColor, RoofType, Siding, SpaceLocation, WallType,
};
use crate::core::model::enclosure::{Attic, FrameFloor, Insulation, Roof, Wall};
use crate::core::tables::assembly::{knee_wall_r_value, roof_solar_absorptance};
use crate::engine::context::TranslationContext;
use crate::engine::error::TranslationError;
use crate::engine::progress::Progress;
use tracing::{debug, instrument};

pub const ROOFS: &str = "Enclosure/AtticAndRoof/Roofs/Roof";
pub const ATTICS: &str = "Enclosure/AtticAndRoof/Attics/Attic";

const ROOF_EMITTANCE: f64 = 0.90;
const WALL_EMITTANCE: f64 = 0.90;
const WALL_SOLAR_ABSORPTANCE: f64 = 0.75;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AtticSurfaces {
    pub attics: Vec<Attic>,
    pub roofs: Vec<Roof>,
    /// Gable walls and knee walls.
    pub walls: Vec<Wall>,
    /// Attic floors.
    pub frame_floors: Vec<FrameFloor>,
}

struct RoofDeck<'a> {
    roof_id: &'a str,
    roof_type: RoofType,
    solar_absorptance: f64,
    radiant_barrier: bool,
    r_value: f64,
}

fn roof_deck<'a>(
    context: &TranslationContext,
    roof: &'a Element,
) -> Result<RoofDeck<'a>, TranslationError> {
    let roof_type: RoofType = category(roof, "RoofType")?;
    let color: RoofColor = category(roof, "RoofColor")?;
    let radiant_barrier = optional_flag(roof, "RadiantBarrier")?.unwrap_or(false);
    let cavity_r = layer_r_value(roof, "Insulation", "cavity")?;
    let continuous_r = layer_r_value(roof, "Insulation", "continuous")?;
    Ok(RoofDeck {
        roof_id: id(roof)?,
        roof_type,
        solar_absorptance: roof_solar_absorptance(
            color,
            optional_number(roof, "SolarAbsorptance")?,
        )?,
        radiant_barrier,
        r_value: context.tables.assemblies.roof_r_value(
            roof_type,
            cavity_r,
            continuous_r,
            radiant_barrier,
        )?,
    })
}

fn roof_surface(
    id: String,
    deck: &RoofDeck,
    interior: SpaceLocation,
    area: f64,
    azimuth: f64,
    pitch: f64,
) -> Roof {
    Roof {
        insulation: Insulation::for_surface(&id, deck.r_value),
        id,
        interior_adjacent_to: interior,
        area,
        azimuth,
        roof_type: deck.roof_type,
        solar_absorptance: deck.solar_absorptance,
        emittance: ROOF_EMITTANCE,
        pitch,
        radiant_barrier: deck.radiant_barrier,
    }
}

fn attic_wall(
    id: String,
    exterior: SpaceLocation,
    area: f64,
    azimuth: Option<f64>,
    r_value: f64,
) -> Wall {
    Wall {
        insulation: Insulation::for_surface(&id, r_value),
        id,
        exterior_adjacent_to: exterior,
        interior_adjacent_to: SpaceLocation::LivingSpace,
        wall_type: Some(WallType::WoodStud),
        area,
        azimuth,
        siding: None,
        solar_absorptance: WALL_SOLAR_ABSORPTANCE,
        emittance: WALL_EMITTANCE,
    }
}

#[instrument(skip_all, name = "attics_step")]
pub fn run(context: &TranslationContext) -> Result<AtticSurfaces, TranslationError> {
    context.reporter.report(Progress::StepStart { name: "attics" });

    let shape = context.shape;
    let roofs = context.elements(ROOFS);
    let mut surfaces = AtticSurfaces::default();

    for attic in context.elements(ATTICS) {
        let attic_id = id(attic)?;
        let roof_ref = idref(attic, "AttachedToRoof")?;
        let roof = roofs
            .iter()
            .find(|roof| id(roof).ok() == Some(roof_ref))
            .ok_or_else(|| {
                TranslationError::StructuralReference(format!(
                    "{} is attached to roof '{}', which does not exist",
                    label(attic),
                    roof_ref
                ))
            })?;
        let attic_type: AtticType = category(attic, "AtticType")?;
        let area = optional_number(attic, "Area")?.unwrap_or(shape.footprint);
        let deck = roof_deck(context, roof)?;
        debug!(attic = attic_id, attic_type = %attic_type, area, "Expanding attic.");

        let space = match attic_type {
            AtticType::VentedAttic => SpaceLocation::AtticVented,
            AtticType::UnventedAttic => SpaceLocation::AtticUnvented,
            AtticType::CathedralCeiling | AtticType::FlatRoof => SpaceLocation::LivingSpace,
        };

        let mut roof_ids = Vec::new();
        match attic_type {
            AtticType::FlatRoof => {
                let surface_id = deck.roof_id.to_string();
                roof_ids.push(surface_id.clone());
                surfaces.roofs.push(roof_surface(
                    surface_id,
                    &deck,
                    space,
                    area,
                    shape.front_azimuth,
                    0.0,
                ));
            }
            AtticType::VentedAttic | AtticType::UnventedAttic | AtticType::CathedralCeiling => {
                // Each slope of the gable covers half the footprint at the roof pitch.
                let slope_area = area / ROOF_PITCH_DEGREES.to_radians().cos() / 2.0;
                for (suffix, offset) in [("front", 0.0), ("back", 180.0)] {
                    let surface_id = format!("{}_{suffix}", deck.roof_id);
                    roof_ids.push(surface_id.clone());
                    surfaces.roofs.push(roof_surface(
                        surface_id,
                        &deck,
                        space,
                        slope_area,
                        shape.azimuth_from_front(offset),
                        shape.roof_pitch_rise_per_12(),
                    ));
                }
            }
        }

        let mut floor_id = None;
        if matches!(attic_type, AtticType::VentedAttic | AtticType::UnventedAttic) {
            // Gable ends are triangles under the pitched roof, scaled by this attic's share
            // of the footprint.
            let gable_area = shape.side_length.powi(2) * ROOF_PITCH_DEGREES.to_radians().tan()
                / 4.0
                * (area / shape.footprint);
            let gable_r = context.tables.assemblies.wall_r_value(
                WallType::WoodStud,
                0.0,
                0.0,
                Siding::WoodSiding,
                false,
            )?;
            for (suffix, offset) in [("gable_left", 90.0), ("gable_right", 270.0)] {
                let mut gable = attic_wall(
                    format!("{attic_id}_{suffix}"),
                    SpaceLocation::Outside,
                    gable_area,
                    Some(shape.azimuth_from_front(offset)),
                    gable_r,
                );
                gable.interior_adjacent_to = space;
                gable.siding = Some(Siding::WoodSiding);
                surfaces.walls.push(gable);
            }

            let id = format!("{attic_id}_floor");
            let floor_r = total_r_value(attic, "AtticFloorInsulation")?;
            surfaces.frame_floors.push(FrameFloor {
                insulation: Insulation::for_surface(
                    &id,
                    context.tables.assemblies.ceiling_r_value(floor_r)?,
                ),
                id: id.clone(),
                exterior_adjacent_to: space,
                interior_adjacent_to: SpaceLocation::LivingSpace,
                area,
            });
            floor_id = Some(id);

            if let Some(knee_wall) = attic.find("KneeWall") {
                surfaces.walls.push(attic_wall(
                    format!("{attic_id}_knee_wall"),
                    space,
                    number(knee_wall, "Area")?,
                    None,
                    knee_wall_r_value(total_r_value(knee_wall, "Insulation")?),
                ));
            }
        }

        surfaces.attics.push(Attic {
            id: attic_id.to_string(),
            attic_type,
            attached_to_roofs: roof_ids,
            attached_to_frame_floor: floor_id,
        });
    }

    context.reporter.report(Progress::StepFinish);
    Ok(surfaces)
}
