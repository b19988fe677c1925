use super::LookupError;
use crate::core::collaborators::{Collaborators, UnitError};
use crate::core::model::categories::{DuctLocation, FoundationKind, LeakinessDescription};
use phf::{Map, phf_map};

pub const FLOW_EXPONENT: f64 = 0.65;

const INTERCEPT_FLOOR_AREA_PER_M2: f64 = -0.002078;
const INTERCEPT_HEIGHT_PER_M: f64 = 0.06375;

// (last year of the decade band, coefficient); the final band is open-ended.
const VINTAGE_COEFFICIENTS: [(Option<u32>, f64); 6] = [
    (Some(1959), -0.2498),
    (Some(1969), -0.4327),
    (Some(1979), -0.4521),
    (Some(1989), -0.6536),
    (Some(1999), -0.9152),
    (None, -1.058),
];

static CLIMATE_ZONE_COEFFICIENTS: Map<&'static str, f64> = phf_map! {
    "1A" => 0.4727,
    "2A" => 0.4727,
    "3A" => 0.2529,
    "4A" => 0.3261,
    "5A" => 0.1118,
    "6A" => 0.0,
    "7" => 0.0,
    "8" => 0.0,
    "2B" => -0.03755,
    "3B" => -0.03755,
    "4B" => -0.008774,
    "5B" => -0.008774,
    "6B" => 0.01944,
    "3C" => 0.04829,
    "4C" => 0.04829,
};

/// Whole-building inputs to the normalized-leakage regression. Floor area and height are
/// in feet-based units and converted to metric through the collaborator.
#[derive(Debug, Clone)]
pub struct LeakageInputs<'a> {
    pub floor_area_ft2: f64,
    pub height_ft: f64,
    pub stories: u32,
    pub leakiness: LeakinessDescription,
    pub year_built: u32,
    pub climate_zone: &'a str,
    /// Foundation kinds with their floor areas.
    pub foundations: &'a [(FoundationKind, f64)],
    /// Duct locations with their fraction of total duct length.
    pub ducts: &'a [(DuctLocation, f64)],
}

#[derive(Debug, thiserror::Error)]
pub enum LeakageError {
    #[error(transparent)]
    Lookup(#[from] LookupError),
    #[error(transparent)]
    Units(#[from] UnitError),
}

fn vintage_coefficient(year_built: u32) -> Result<f64, LookupError> {
    VINTAGE_COEFFICIENTS
        .iter()
        .find(|(last, _)| last.is_none_or(|last| year_built <= last))
        .map(|&(_, c)| c)
        .ok_or_else(|| LookupError::Infiltration {
            coefficient: "vintage",
            key: year_built.to_string(),
        })
}

fn climate_zone_coefficient(zone: &str) -> Result<f64, LookupError> {
    CLIMATE_ZONE_COEFFICIENTS
        .get(zone.trim())
        .copied()
        .ok_or_else(|| LookupError::Infiltration {
            coefficient: "climate zone",
            key: zone.to_string(),
        })
}

fn leakiness_coefficient(leakiness: LeakinessDescription) -> f64 {
    match leakiness {
        LeakinessDescription::Tight => -0.288,
        LeakinessDescription::Average => 0.0,
    }
}

fn foundation_coefficient(kind: FoundationKind) -> f64 {
    match kind {
        FoundationKind::SlabOnGrade => -0.036992,
        FoundationKind::ConditionedBasement | FoundationKind::UnconditionedBasement => 0.0,
        FoundationKind::VentedCrawlspace | FoundationKind::UnventedCrawlspace => 0.1224,
    }
}

fn duct_coefficient(location: DuctLocation) -> f64 {
    if location.is_conditioned() {
        -0.12381
    } else {
        0.0
    }
}

/// Weighted mean of per-case coefficients. An empty or zero-weight set has no defined
/// coefficient.
fn weighted<T: Copy>(
    cases: &[(T, f64)],
    coefficient: impl Fn(T) -> f64,
    name: &'static str,
) -> Result<f64, LookupError> {
    let total: f64 = cases.iter().map(|&(_, weight)| weight).sum();
    if cases.is_empty() || total <= 0.0 {
        return Err(LookupError::Infiltration {
            coefficient: name,
            key: "no weighted cases".to_string(),
        });
    }
    Ok(cases
        .iter()
        .map(|&(case, weight)| coefficient(case) * weight / total)
        .sum())
}

/// Normalized leakage from the log-linear regression.
pub fn normalized_leakage(
    inputs: &LeakageInputs<'_>,
    collaborators: &dyn Collaborators,
) -> Result<f64, LeakageError> {
    let floor_area_m2 = collaborators.convert_units(inputs.floor_area_ft2, "ft^2", "m^2")?;
    let height_m = collaborators.convert_units(inputs.height_ft, "ft", "m")?;

    // Homes without ducts leak as if their ducts were inside conditioned space.
    let ducts: &[(DuctLocation, f64)] = if inputs.ducts.is_empty() {
        &[(DuctLocation::ConditionedSpace, 1.0)]
    } else {
        inputs.ducts
    };

    let exponent = INTERCEPT_FLOOR_AREA_PER_M2 * floor_area_m2
        + INTERCEPT_HEIGHT_PER_M * height_m
        + leakiness_coefficient(inputs.leakiness)
        + vintage_coefficient(inputs.year_built)?
        + climate_zone_coefficient(inputs.climate_zone)?
        + weighted(inputs.foundations, foundation_coefficient, "foundation")?
        + weighted(ducts, duct_coefficient, "duct location")?;
    Ok(exponent.exp())
}

pub fn sla_from_normalized_leakage(normalized_leakage: f64, stories: u32) -> f64 {
    normalized_leakage / (1000.0 * (stories.max(1) as f64).powf(0.3))
}

/// ACH50 estimated by the regression for a home without a blower-door measurement.
pub fn estimated_ach50(
    inputs: &LeakageInputs<'_>,
    volume_ft3: f64,
    collaborators: &dyn Collaborators,
) -> Result<f64, LeakageError> {
    let nl = normalized_leakage(inputs, collaborators)?;
    let sla = sla_from_normalized_leakage(nl, inputs.stories);
    Ok(collaborators.ach50_from_sla(sla, FLOW_EXPONENT, inputs.floor_area_ft2, volume_ft3))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::collaborators::StandardCollaborators;

    fn inputs<'a>(
        leakiness: LeakinessDescription,
        year_built: u32,
        climate_zone: &'a str,
        foundations: &'a [(FoundationKind, f64)],
        ducts: &'a [(DuctLocation, f64)],
    ) -> LeakageInputs<'a> {
        LeakageInputs {
            floor_area_ft2: 2000.0,
            height_ft: 16.0,
            stories: 2,
            leakiness,
            year_built,
            climate_zone,
            foundations,
            ducts,
        }
    }

    #[test]
    fn vintage_bands_are_decades() {
        assert_eq!(vintage_coefficient(1959).unwrap(), -0.2498);
        assert_eq!(vintage_coefficient(1960).unwrap(), -0.4327);
        assert_eq!(vintage_coefficient(1995).unwrap(), -0.9152);
        assert_eq!(vintage_coefficient(2020).unwrap(), -1.058);
    }

    #[test]
    fn normalized_leakage_matches_hand_computation() {
        let foundations = [(FoundationKind::SlabOnGrade, 1000.0)];
        let ducts = [(DuctLocation::UnconditionedAttic, 1.0)];
        let i = inputs(LeakinessDescription::Average, 1975, "4A", &foundations, &ducts);
        let nl = normalized_leakage(&i, &StandardCollaborators).unwrap();
        let expected = (-0.002078_f64 * 2000.0 * 0.09290304
            + 0.06375 * 16.0 * 0.3048
            + -0.4521
            + 0.3261
            + -0.036992)
            .exp();
        assert!((nl - expected).abs() < 1e-9);
    }

    #[test]
    fn tight_homes_leak_less() {
        let foundations = [(FoundationKind::VentedCrawlspace, 1000.0)];
        let ducts = [(DuctLocation::VentedCrawlspace, 1.0)];
        let c = StandardCollaborators;
        let tight = estimated_ach50(
            &inputs(LeakinessDescription::Tight, 1985, "3B", &foundations, &ducts),
            16000.0,
            &c,
        )
        .unwrap();
        let average = estimated_ach50(
            &inputs(LeakinessDescription::Average, 1985, "3B", &foundations, &ducts),
            16000.0,
            &c,
        )
        .unwrap();
        assert!(tight < average);
    }

    #[test]
    fn mixed_foundations_are_area_weighted() {
        let mixed = [
            (FoundationKind::SlabOnGrade, 500.0),
            (FoundationKind::VentedCrawlspace, 1500.0),
        ];
        let c = weighted(&mixed, foundation_coefficient, "foundation").unwrap();
        assert!((c - (0.25 * -0.036992 + 0.75 * 0.1224)).abs() < 1e-12);
    }

    #[test]
    fn unknown_climate_zones_and_missing_foundations_fail() {
        let foundations = [(FoundationKind::SlabOnGrade, 1000.0)];
        let err = normalized_leakage(
            &inputs(LeakinessDescription::Average, 2000, "9Z", &foundations, &[]),
            &StandardCollaborators,
        )
        .unwrap_err();
        assert!(err.to_string().contains("9Z"));

        let err = normalized_leakage(
            &inputs(LeakinessDescription::Average, 2000, "4A", &[], &[]),
            &StandardCollaborators,
        )
        .unwrap_err();
        assert!(err.to_string().contains("foundation"));
    }

    #[test]
    fn ductless_homes_use_the_conditioned_space_coefficient() {
        let foundations = [(FoundationKind::SlabOnGrade, 1000.0)];
        let conditioned = [(DuctLocation::ConditionedSpace, 1.0)];
        let a = normalized_leakage(
            &inputs(LeakinessDescription::Average, 2000, "4A", &foundations, &[]),
            &StandardCollaborators,
        )
        .unwrap();
        let b = normalized_leakage(
            &inputs(LeakinessDescription::Average, 2000, "4A", &foundations, &conditioned),
            &StandardCollaborators,
        )
        .unwrap();
        assert_eq!(a, b);
    }
}
