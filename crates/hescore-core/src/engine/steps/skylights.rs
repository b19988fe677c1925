use super::read::{id, idref, label, number};
use super::windows::performance;
use crate::core::model::enclosure::{Roof, Skylight};
use crate::core::tables::FenestrationKind;
use crate::engine::context::TranslationContext;
use crate::engine::error::TranslationError;
use crate::engine::progress::Progress;
use tracing::instrument;

pub const SKYLIGHTS: &str = "Enclosure/Skylights/Skylight";

/// The first emitted surface expanded from source roof `roof_id`.
fn first_surface<'a>(roofs: &'a [Roof], roof_id: &str) -> Option<&'a Roof> {
    roofs.iter().find(|roof| {
        roof.id == roof_id
            || roof
                .id
                .strip_prefix(roof_id)
                .is_some_and(|suffix| suffix.starts_with('_'))
    })
}

#[instrument(skip_all, name = "skylights_step")]
pub fn run(
    context: &TranslationContext,
    roofs: &[Roof],
) -> Result<Vec<Skylight>, TranslationError> {
    context.reporter.report(Progress::StepStart { name: "skylights" });

    let mut skylights = Vec::new();
    for skylight in context.elements(SKYLIGHTS) {
        let roof_id = idref(skylight, "AttachedToRoof")?;
        let roof = first_surface(roofs, roof_id).ok_or_else(|| {
            TranslationError::StructuralReference(format!(
                "{} is attached to roof '{}', which has no emitted surface",
                label(skylight),
                roof_id
            ))
        })?;
        let performance = performance(skylight, FenestrationKind::Skylight)?;
        skylights.push(Skylight {
            id: id(skylight)?.to_string(),
            area: number(skylight, "Area")?,
            azimuth: roof.azimuth,
            u_factor: performance.u_factor,
            shgc: performance.shgc,
            attached_to_roof: roof.id.clone(),
        });
    }

    context.reporter.report(Progress::StepFinish);
    Ok(skylights)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::steps::attics;
    use crate::test_support::{edit_first, sample_document, with_context};

    #[test]
    fn skylights_attach_to_the_first_roof_surface() {
        let doc = sample_document();
        let skylights =
            with_context(&doc, |ctx| run(ctx, &attics::run(ctx)?.roofs)).unwrap();
        assert_eq!(skylights.len(), 1);
        let skylight = &skylights[0];
        assert_eq!(skylight.id, "sky1");
        assert_eq!(skylight.attached_to_roof, "roof1_front");
        assert_eq!(skylight.azimuth, 180.0);
        assert_eq!((skylight.u_factor, skylight.shgc), (0.5, 0.3));
    }

    #[test]
    fn roof_prefixes_do_not_match_other_roofs() {
        let doc = sample_document();
        let roofs = with_context(&doc, attics::run).unwrap().roofs;
        assert!(first_surface(&roofs, "roof").is_none());
        assert_eq!(first_surface(&roofs, "roof1").unwrap().id, "roof1_front");
    }

    #[test]
    fn skylights_on_unknown_roofs_are_structural_failures() {
        let mut doc = sample_document();
        edit_first(
            &mut doc,
            "Building/BuildingDetails/Enclosure/Skylights/Skylight/AttachedToRoof",
            |reference| {
                reference.attributes.insert("idref".to_string(), "roof2".to_string());
            },
        );
        let result = with_context(&doc, |ctx| run(ctx, &attics::run(ctx)?.roofs));
        assert!(matches!(
            result,
            Err(TranslationError::StructuralReference(_))
        ));
    }
}
