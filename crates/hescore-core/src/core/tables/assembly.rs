use super::{LookupError, TableLoadError};
use crate::core::model::categories::{RoofColor, RoofType, Siding, WallType};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

pub const WALL_TABLE_FILE: &str = "wall_eff_rvalue.csv";
pub const ROOF_TABLE_FILE: &str = "roof_eff_rvalue.csv";
pub const CEILING_TABLE_FILE: &str = "ceiling_eff_rvalue.csv";
pub const FLOOR_TABLE_FILE: &str = "floor_eff_rvalue.csv";

const BUILTIN_WALLS: &str = include_str!("../../../data/wall_eff_rvalue.csv");
const BUILTIN_ROOFS: &str = include_str!("../../../data/roof_eff_rvalue.csv");
const BUILTIN_CEILINGS: &str = include_str!("../../../data/ceiling_eff_rvalue.csv");
const BUILTIN_FLOORS: &str = include_str!("../../../data/floor_eff_rvalue.csv");

const AIR_FILM_R: f64 = 0.68;
const GYPSUM_R: f64 = 0.45;
const STUD_WIDTH_IN: f64 = 3.5;
const STUD_SPACING_IN: f64 = 16.0;
const STUD_R: f64 = 4.38;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct WallKey {
    wall_type: WallType,
    cavity_r: u32,
    continuous_r: u32,
    siding: Siding,
    ove: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct RoofKey {
    roof_type: RoofType,
    cavity_r: u32,
    continuous_r: u32,
    radiant_barrier: bool,
}

#[derive(Debug, Deserialize)]
struct WallRecord {
    wall_type: String,
    cavity_r: u32,
    continuous_r: u32,
    siding: String,
    ove: bool,
    assembly_r: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RoofRecord {
    cavity_r: u32,
    continuous_r: u32,
    roof_type: String,
    radiant_barrier: bool,
    assembly_r: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct CavityRecord {
    cavity_r: u32,
    assembly_r: Option<f64>,
}

/// Assembly R-value tables. An entry holding `None` is a combination the tables list
/// as unmodeled; it fails exactly like a missing key.
#[derive(Debug, Clone, Default)]
pub struct AssemblyTables {
    walls: HashMap<WallKey, Option<f64>>,
    roofs: HashMap<RoofKey, Option<f64>>,
    ceilings: HashMap<u32, Option<f64>>,
    floors: HashMap<u32, Option<f64>>,
}

impl AssemblyTables {
    pub fn builtin() -> Result<Self, TableLoadError> {
        Self::from_sources(
            (WALL_TABLE_FILE, BUILTIN_WALLS),
            (ROOF_TABLE_FILE, BUILTIN_ROOFS),
            (CEILING_TABLE_FILE, BUILTIN_CEILINGS),
            (FLOOR_TABLE_FILE, BUILTIN_FLOORS),
        )
    }

    pub fn load(dir: &Path) -> Result<Self, TableLoadError> {
        let walls = read_file(&dir.join(WALL_TABLE_FILE))?;
        let roofs = read_file(&dir.join(ROOF_TABLE_FILE))?;
        let ceilings = read_file(&dir.join(CEILING_TABLE_FILE))?;
        let floors = read_file(&dir.join(FLOOR_TABLE_FILE))?;
        Self::from_sources(
            (WALL_TABLE_FILE, &walls),
            (ROOF_TABLE_FILE, &roofs),
            (CEILING_TABLE_FILE, &ceilings),
            (FLOOR_TABLE_FILE, &floors),
        )
    }

    fn from_sources(
        walls: (&str, &str),
        roofs: (&str, &str),
        ceilings: (&str, &str),
        floors: (&str, &str),
    ) -> Result<Self, TableLoadError> {
        let mut tables = Self::default();

        for record in parse_records::<WallRecord>(walls.0, walls.1)? {
            let key = WallKey {
                wall_type: parse_field(walls.0, &record.wall_type)?,
                cavity_r: record.cavity_r,
                continuous_r: record.continuous_r,
                siding: parse_field(walls.0, &record.siding)?,
                ove: record.ove,
            };
            tables.walls.insert(key, record.assembly_r);
        }

        for record in parse_records::<RoofRecord>(roofs.0, roofs.1)? {
            let key = RoofKey {
                roof_type: parse_field(roofs.0, &record.roof_type)?,
                cavity_r: record.cavity_r,
                continuous_r: record.continuous_r,
                radiant_barrier: record.radiant_barrier,
            };
            tables.roofs.insert(key, record.assembly_r);
        }

        for record in parse_records::<CavityRecord>(ceilings.0, ceilings.1)? {
            tables.ceilings.insert(record.cavity_r, record.assembly_r);
        }
        for record in parse_records::<CavityRecord>(floors.0, floors.1)? {
            tables.floors.insert(record.cavity_r, record.assembly_r);
        }

        Ok(tables)
    }

    /// Total number of entries across the four tables, unmodeled entries included.
    pub fn len(&self) -> usize {
        self.walls.len() + self.roofs.len() + self.ceilings.len() + self.floors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn wall_r_value(
        &self,
        wall_type: WallType,
        cavity_r: f64,
        continuous_r: f64,
        siding: Siding,
        ove: bool,
    ) -> Result<f64, LookupError> {
        let not_found = || LookupError::WallAssembly {
            wall_type,
            cavity_r,
            continuous_r,
            siding,
            ove,
        };
        let key = WallKey {
            wall_type,
            cavity_r: nominal(cavity_r).ok_or_else(not_found)?,
            continuous_r: nominal(continuous_r).ok_or_else(not_found)?,
            siding,
            ove,
        };
        self.walls.get(&key).copied().flatten().ok_or_else(not_found)
    }

    pub fn roof_r_value(
        &self,
        roof_type: RoofType,
        cavity_r: f64,
        continuous_r: f64,
        radiant_barrier: bool,
    ) -> Result<f64, LookupError> {
        let not_found = || LookupError::RoofAssembly {
            roof_type,
            cavity_r,
            continuous_r,
            radiant_barrier,
        };
        let key = RoofKey {
            roof_type,
            cavity_r: nominal(cavity_r).ok_or_else(not_found)?,
            continuous_r: nominal(continuous_r).ok_or_else(not_found)?,
            radiant_barrier,
        };
        self.roofs.get(&key).copied().flatten().ok_or_else(not_found)
    }

    pub fn ceiling_r_value(&self, cavity_r: f64) -> Result<f64, LookupError> {
        let not_found = || LookupError::CeilingAssembly { cavity_r };
        let key = nominal(cavity_r).ok_or_else(not_found)?;
        self.ceilings.get(&key).copied().flatten().ok_or_else(not_found)
    }

    pub fn floor_r_value(&self, cavity_r: f64) -> Result<f64, LookupError> {
        let not_found = || LookupError::FloorAssembly { cavity_r };
        let key = nominal(cavity_r).ok_or_else(not_found)?;
        self.floors.get(&key).copied().flatten().ok_or_else(not_found)
    }
}

/// Effective R-value of a 2x4 knee wall at 16" on center, rounded to 0.1: two air films
/// and a gypsum layer, plus a parallel stud/cavity path when the cavity is insulated.
pub fn knee_wall_r_value(cavity_r: f64) -> f64 {
    let framing_fraction = STUD_WIDTH_IN / STUD_SPACING_IN;
    let mut r_value = 2.0 * AIR_FILM_R + GYPSUM_R;
    if cavity_r > 0.0 {
        r_value += 1.0 / (framing_fraction / STUD_R + (1.0 - framing_fraction) / cavity_r);
    }
    (r_value * 10.0).round() / 10.0
}

/// Solar absorptance by roof color. Reflective roofs have no default and must carry a
/// measured absorptance.
pub fn roof_solar_absorptance(
    color: RoofColor,
    measured: Option<f64>,
) -> Result<f64, LookupError> {
    match color {
        RoofColor::White => Ok(0.50),
        RoofColor::Light => Ok(0.75),
        RoofColor::Medium => Ok(0.85),
        RoofColor::MediumDark => Ok(0.89),
        RoofColor::Dark => Ok(0.95),
        RoofColor::Reflective => measured.ok_or(LookupError::RoofAbsorptance { color }),
    }
}

/// Nominal R-values key the tables and must be non-negative whole numbers.
fn nominal(r_value: f64) -> Option<u32> {
    (r_value >= 0.0 && r_value.fract() == 0.0 && r_value <= u32::MAX as f64)
        .then_some(r_value as u32)
}

fn read_file(path: &Path) -> Result<String, TableLoadError> {
    std::fs::read_to_string(path).map_err(|e| TableLoadError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })
}

fn parse_records<T: DeserializeOwned>(path: &str, content: &str) -> Result<Vec<T>, TableLoadError> {
    let mut reader = csv::Reader::from_reader(content.as_bytes());
    reader
        .deserialize::<T>()
        .map(|result| {
            result.map_err(|e| TableLoadError::Csv {
                path: path.to_string(),
                source: e,
            })
        })
        .collect()
}

fn parse_field<T>(path: &str, value: &str) -> Result<T, TableLoadError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| TableLoadError::InvalidRecord {
        path: path.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn tables() -> AssemblyTables {
        AssemblyTables::builtin().unwrap()
    }

    #[test]
    fn wood_stud_r13_with_vinyl_siding_is_r11_6() {
        let r = tables()
            .wall_r_value(WallType::WoodStud, 13.0, 0.0, Siding::VinylSiding, false)
            .unwrap();
        assert!((r - 11.6).abs() < 1e-9);
    }

    #[test]
    fn unmodeled_wall_combinations_fail_with_their_key() {
        let err = tables()
            .wall_r_value(WallType::StrawBale, 0.0, 0.0, Siding::VinylSiding, false)
            .unwrap_err();
        assert!(matches!(
            err,
            LookupError::WallAssembly {
                wall_type: WallType::StrawBale,
                siding: Siding::VinylSiding,
                ..
            }
        ));
        assert!(
            tables()
                .wall_r_value(WallType::StrawBale, 0.0, 0.0, Siding::Stucco, false)
                .is_ok()
        );
    }

    #[test]
    fn fractional_nominal_r_values_are_rejected() {
        assert!(
            tables()
                .wall_r_value(WallType::WoodStud, 13.5, 0.0, Siding::VinylSiding, false)
                .is_err()
        );
        assert!(tables().ceiling_r_value(-3.0).is_err());
    }

    #[test]
    fn radiant_barriers_are_modeled_only_on_uninsulated_roofs() {
        let t = tables();
        let bare = t
            .roof_r_value(RoofType::AsphaltShingles, 0.0, 0.0, false)
            .unwrap();
        let barrier = t
            .roof_r_value(RoofType::AsphaltShingles, 0.0, 0.0, true)
            .unwrap();
        assert!((bare - 3.4).abs() < 1e-9);
        assert!((barrier - 5.4).abs() < 1e-9);
        assert!(
            t.roof_r_value(RoofType::AsphaltShingles, 19.0, 0.0, true)
                .is_err()
        );
    }

    #[test]
    fn ceiling_and_floor_lookups_follow_cavity_r() {
        let t = tables();
        assert!((t.ceiling_r_value(30.0).unwrap() - 28.6).abs() < 1e-9);
        assert!((t.floor_r_value(19.0).unwrap() - 21.5).abs() < 1e-9);
        assert!(matches!(
            t.floor_r_value(17.0),
            Err(LookupError::FloorAssembly { .. })
        ));
    }

    #[test]
    fn knee_wall_r_value_is_rounded_to_a_tenth() {
        assert_eq!(knee_wall_r_value(0.0), 1.8);
        assert_eq!(knee_wall_r_value(11.0), 10.1);
        assert_eq!(knee_wall_r_value(19.0), 12.8);
    }

    #[test]
    fn reflective_roofs_require_a_measured_absorptance() {
        assert_eq!(roof_solar_absorptance(RoofColor::Dark, None).unwrap(), 0.95);
        assert_eq!(
            roof_solar_absorptance(RoofColor::Reflective, Some(0.35)).unwrap(),
            0.35
        );
        assert!(roof_solar_absorptance(RoofColor::Reflective, None).is_err());
    }

    #[test]
    fn replacement_tables_load_from_a_directory() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(WALL_TABLE_FILE),
            "wall_type,cavity_r,continuous_r,siding,ove,assembly_r\nWoodStud,13,0,vinyl siding,false,12.0\nWoodStud,0,0,none,false,\n",
        )
        .unwrap();
        fs::write(
            dir.path().join(ROOF_TABLE_FILE),
            "cavity_r,continuous_r,roof_type,radiant_barrier,assembly_r\n0,0,concrete,false,3.0\n",
        )
        .unwrap();
        fs::write(dir.path().join(CEILING_TABLE_FILE), "cavity_r,assembly_r\n0,2.0\n").unwrap();
        fs::write(dir.path().join(FLOOR_TABLE_FILE), "cavity_r,assembly_r\n0,4.0\n").unwrap();

        let t = AssemblyTables::load(dir.path()).unwrap();
        assert_eq!(t.len(), 5);
        assert_eq!(
            t.wall_r_value(WallType::WoodStud, 13.0, 0.0, Siding::VinylSiding, false)
                .unwrap(),
            12.0
        );
        assert!(
            t.wall_r_value(WallType::WoodStud, 0.0, 0.0, Siding::None, false)
                .is_err()
        );
    }

    #[test]
    fn unknown_categories_in_a_table_file_are_invalid_records() {
        let result = AssemblyTables::from_sources(
            (
                WALL_TABLE_FILE,
                "wall_type,cavity_r,continuous_r,siding,ove,assembly_r\n\
                 LogWall,0,0,none,false,1.0\n",
            ),
            (ROOF_TABLE_FILE, "cavity_r,continuous_r,roof_type,radiant_barrier,assembly_r\n"),
            (CEILING_TABLE_FILE, "cavity_r,assembly_r\n"),
            (FLOOR_TABLE_FILE, "cavity_r,assembly_r\n"),
        );
        assert!(matches!(result, Err(TableLoadError::InvalidRecord { .. })));
    }

    #[test]
    fn malformed_rows_are_csv_errors() {
        let result = AssemblyTables::from_sources(
            (
                WALL_TABLE_FILE,
                "wall_type,cavity_r,continuous_r,siding,ove,assembly_r\nWoodStud,x\n",
            ),
            (ROOF_TABLE_FILE, "cavity_r,continuous_r,roof_type,radiant_barrier,assembly_r\n"),
            (CEILING_TABLE_FILE, "cavity_r,assembly_r\n"),
            (FLOOR_TABLE_FILE, "cavity_r,assembly_r\n"),
        );
        assert!(matches!(result, Err(TableLoadError::Csv { .. })));
    }
}
