//! # Lookup Tables
//!
//! Static engineering defaults keyed by categorical and numeric inputs. Every lookup is a
//! pure function: a key combination without an entry is an explicitly unsupported input
//! and fails with [`LookupError`] naming every key component, never with a silent default.
//!
//! ## Families
//!
//! - [`efficiency`] - Vintage-banded equipment efficiencies
//! - [`assembly`] - Wall, roof, ceiling and floor assembly R-values (CSV backed)
//! - [`fenestration`] - Window and skylight U-factor / SHGC pairs
//! - [`infiltration`] - Normalized-leakage regression coefficients

pub mod assembly;
pub mod efficiency;
pub mod fenestration;
pub mod infiltration;

use crate::core::model::categories::{
    EfficiencyUnit, FrameType, FuelType, GlassLayers, RoofColor, RoofType, Siding, WallType,
};
use std::path::Path;
use thiserror::Error;

pub use assembly::AssemblyTables;
pub use fenestration::FenestrationKind;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LookupError {
    #[error("No default {unit} for {equipment} with fuel '{fuel}' installed in {year}")]
    Vintage {
        equipment: &'static str,
        unit: EfficiencyUnit,
        fuel: String,
        year: u32,
    },
    #[error("No default stove efficiency for fuel '{fuel}'")]
    Stove { fuel: FuelType },
    #[error(
        "No wall assembly R-value for wall type '{wall_type}', cavity R-{cavity_r}, continuous R-{continuous_r}, siding '{siding}', optimum value engineering {ove}"
    )]
    WallAssembly {
        wall_type: WallType,
        cavity_r: f64,
        continuous_r: f64,
        siding: Siding,
        ove: bool,
    },
    #[error(
        "No roof assembly R-value for roof type '{roof_type}', cavity R-{cavity_r}, continuous R-{continuous_r}, radiant barrier {radiant_barrier}"
    )]
    RoofAssembly {
        roof_type: RoofType,
        cavity_r: f64,
        continuous_r: f64,
        radiant_barrier: bool,
    },
    #[error("No ceiling assembly R-value for cavity R-{cavity_r}")]
    CeilingAssembly { cavity_r: f64 },
    #[error("No floor assembly R-value for cavity R-{cavity_r}")]
    FloorAssembly { cavity_r: f64 },
    #[error(
        "No {kind} performance for code '{code}' (frame '{frame}', thermal break {thermal_break}, layers '{layers}', glass '{glass}', gas fill '{gas_fill}')"
    )]
    Fenestration {
        kind: FenestrationKind,
        code: String,
        frame: FrameType,
        thermal_break: bool,
        layers: GlassLayers,
        glass: String,
        gas_fill: String,
    },
    #[error("No infiltration {coefficient} coefficient for '{key}'")]
    Infiltration {
        coefficient: &'static str,
        key: String,
    },
    #[error("Roof color '{color}' requires an explicit solar absorptance")]
    RoofAbsorptance { color: RoofColor },
}

#[derive(Debug, Error)]
pub enum TableLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("CSV parsing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("Invalid record in '{path}': {message}")]
    InvalidRecord { path: String, message: String },
}

/// Every data-driven table a translation consults. The statically compiled tables
/// (efficiency, fenestration, infiltration) need no loading and are reached through
/// their modules directly.
#[derive(Debug, Clone)]
pub struct LookupTables {
    pub assemblies: AssemblyTables,
}

impl LookupTables {
    /// Tables compiled into the library from `data/`.
    pub fn load_default() -> Result<Self, TableLoadError> {
        Ok(Self {
            assemblies: AssemblyTables::builtin()?,
        })
    }

    /// Replacement tables read from `dir`, using the same file names and schema as the
    /// compiled-in defaults.
    pub fn load(dir: &Path) -> Result<Self, TableLoadError> {
        Ok(Self {
            assemblies: AssemblyTables::load(dir)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_tables_load() {
        let tables = LookupTables::load_default().unwrap();
        assert!(tables.assemblies.len() > 100);
    }

    #[test]
    fn loading_from_an_empty_directory_reports_the_missing_file() {
        let dir = tempdir().unwrap();
        let err = LookupTables::load(dir.path()).unwrap_err();
        match err {
            TableLoadError::Io { path, .. } => assert!(path.ends_with(".csv"), "{}", path),
            other => panic!("expected I/O error, got {other:?}"),
        }
    }

    #[test]
    fn lookup_errors_name_every_key_component() {
        let err = LookupError::WallAssembly {
            wall_type: WallType::StrawBale,
            cavity_r: 0.0,
            continuous_r: 0.0,
            siding: Siding::VinylSiding,
            ove: false,
        };
        let message = err.to_string();
        for part in ["StrawBale", "R-0", "vinyl siding", "false"] {
            assert!(message.contains(part), "{} missing {}", message, part);
        }
    }
}
