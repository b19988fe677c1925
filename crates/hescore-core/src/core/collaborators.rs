//! Routines the ruleset consumes but does not own: airflow conversion, unit conversion,
//! and occupancy defaults. [`StandardCollaborators`] provides the reference relations;
//! callers may substitute their own implementation of [`Collaborators`].

use phf::{Map, phf_map};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum UnitError {
    #[error("Unknown unit '{0}'")]
    UnknownUnit(String),
    #[error("Cannot convert '{from}' ({from_dimension}) to '{to}' ({to_dimension})")]
    Incompatible {
        from: String,
        from_dimension: &'static str,
        to: String,
        to_dimension: &'static str,
    },
}

pub trait Collaborators {
    /// Air changes per hour at 50 Pa for a specific leakage area, given the flow exponent,
    /// conditioned floor area (ft²), and conditioned volume (ft³).
    fn ach50_from_sla(&self, sla: f64, flow_exponent: f64, floor_area: f64, volume: f64) -> f64;

    fn convert_units(&self, value: f64, from: &str, to: &str) -> Result<f64, UnitError>;

    fn default_occupants(&self, bedrooms: u32) -> f64;
}

// Unit -> (dimension, factor to the SI base unit of that dimension).
static UNIT_FACTORS: Map<&'static str, (&'static str, f64)> = phf_map! {
    "in" => ("length", 0.0254),
    "ft" => ("length", 0.3048),
    "m" => ("length", 1.0),
    "in^2" => ("area", 0.00064516),
    "ft^2" => ("area", 0.09290304),
    "m^2" => ("area", 1.0),
    "ft^3" => ("volume", 0.028316846592),
    "gal" => ("volume", 0.003785411784),
    "m^3" => ("volume", 1.0),
    "deg" => ("angle", std::f64::consts::PI / 180.0),
    "rad" => ("angle", 1.0),
    "W" => ("power", 1.0),
    "kW" => ("power", 1000.0),
    "Btu/hr" => ("power", 0.29307107),
    "cfm" => ("flow", 0.00047194745),
    "m^3/s" => ("flow", 1.0),
};

#[derive(Debug, Clone, Copy, Default)]
pub struct StandardCollaborators;

impl Collaborators for StandardCollaborators {
    fn ach50_from_sla(&self, sla: f64, flow_exponent: f64, floor_area: f64, volume: f64) -> f64 {
        // Effective leakage area at 4 Pa scaled to 50 Pa, in ft² of leakage per ft² of floor.
        let ela_in2 = sla * floor_area * 144.0;
        let cfm50 = ela_in2 * 50f64.powf(flow_exponent) / (0.283 * 4f64.powf(flow_exponent));
        cfm50 * 60.0 / volume
    }

    fn convert_units(&self, value: f64, from: &str, to: &str) -> Result<f64, UnitError> {
        let &(from_dimension, from_factor) = UNIT_FACTORS
            .get(from)
            .ok_or_else(|| UnitError::UnknownUnit(from.to_string()))?;
        let &(to_dimension, to_factor) = UNIT_FACTORS
            .get(to)
            .ok_or_else(|| UnitError::UnknownUnit(to.to_string()))?;
        if from_dimension != to_dimension {
            return Err(UnitError::Incompatible {
                from: from.to_string(),
                from_dimension,
                to: to.to_string(),
                to_dimension,
            });
        }
        Ok(value * from_factor / to_factor)
    }

    fn default_occupants(&self, bedrooms: u32) -> f64 {
        0.87 + 0.59 * bedrooms as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_between_units_of_the_same_dimension() {
        let c = StandardCollaborators;
        assert!((c.convert_units(1.0, "ft^2", "m^2").unwrap() - 0.09290304).abs() < 1e-12);
        assert!((c.convert_units(10.0, "m", "ft").unwrap() - 32.8084).abs() < 1e-4);
        assert!(
            (c.convert_units(180.0, "deg", "rad").unwrap() - std::f64::consts::PI).abs() < 1e-12
        );
    }

    #[test]
    fn rejects_unknown_and_incompatible_units() {
        let c = StandardCollaborators;
        assert_eq!(
            c.convert_units(1.0, "furlong", "m"),
            Err(UnitError::UnknownUnit("furlong".to_string()))
        );
        assert!(matches!(
            c.convert_units(1.0, "ft", "kW"),
            Err(UnitError::Incompatible { .. })
        ));
    }

    #[test]
    fn occupancy_follows_bedroom_count() {
        let c = StandardCollaborators;
        assert!((c.default_occupants(3) - 2.64).abs() < 1e-9);
        assert!((c.default_occupants(0) - 0.87).abs() < 1e-9);
    }

    #[test]
    fn ach50_scales_linearly_with_sla() {
        let c = StandardCollaborators;
        let low = c.ach50_from_sla(0.0005, 0.65, 2000.0, 16000.0);
        let high = c.ach50_from_sla(0.0010, 0.65, 2000.0, 16000.0);
        assert!(low > 0.0);
        assert!((high - 2.0 * low).abs() < 1e-9);
    }
}
