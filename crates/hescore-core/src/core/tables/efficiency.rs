use super::LookupError;
use crate::core::model::categories::{EfficiencyUnit, FuelType};

/// Upper bound of a vintage band, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearBound {
    Through(u32),
    Unbounded,
}

impl YearBound {
    fn admits(self, year: u32) -> bool {
        match self {
            YearBound::Through(last) => year <= last,
            YearBound::Unbounded => true,
        }
    }
}

/// Ending years of the age-based default bands, in ascending order.
pub const VINTAGE_BANDS: [YearBound; 8] = [
    YearBound::Through(1959),
    YearBound::Through(1969),
    YearBound::Through(1974),
    YearBound::Through(1983),
    YearBound::Through(1987),
    YearBound::Through(1991),
    YearBound::Through(2005),
    YearBound::Unbounded,
];

/// Index of the first band whose upper bound admits `year`.
pub fn band_index(year: u32) -> Option<usize> {
    VINTAGE_BANDS.iter().position(|bound| bound.admits(year))
}

#[derive(Debug)]
pub struct VintageTable {
    pub equipment: &'static str,
    pub unit: EfficiencyUnit,
    rows: &'static [(Option<FuelType>, [f64; 8])],
}

impl VintageTable {
    /// Default efficiency for equipment installed in `year`. Tables that do not vary by
    /// fuel are keyed by `None`.
    pub fn lookup(&self, fuel: Option<FuelType>, year: u32) -> Result<f64, LookupError> {
        let not_found = || LookupError::Vintage {
            equipment: self.equipment,
            unit: self.unit,
            fuel: fuel.map_or_else(|| "none".to_string(), |f| f.to_string()),
            year,
        };
        let (_, values) = self
            .rows
            .iter()
            .find(|(row_fuel, _)| *row_fuel == fuel)
            .ok_or_else(not_found)?;
        let band = band_index(year).ok_or_else(not_found)?;
        Ok(values[band])
    }
}

pub static FURNACE_AFUE: VintageTable = VintageTable {
    equipment: "furnace",
    unit: EfficiencyUnit::Afue,
    rows: &[
        (Some(FuelType::Electricity), [0.98, 0.98, 0.98, 0.98, 0.98, 0.98, 0.98, 0.98]),
        (Some(FuelType::NaturalGas), [0.72, 0.72, 0.72, 0.72, 0.72, 0.76, 0.78, 0.78]),
        (Some(FuelType::Propane), [0.72, 0.72, 0.72, 0.72, 0.72, 0.76, 0.78, 0.78]),
        (Some(FuelType::FuelOil), [0.60, 0.65, 0.72, 0.75, 0.80, 0.80, 0.80, 0.80]),
    ],
};

pub static BOILER_AFUE: VintageTable = VintageTable {
    equipment: "boiler",
    unit: EfficiencyUnit::Afue,
    rows: &[
        (Some(FuelType::Electricity), [0.98, 0.98, 0.98, 0.98, 0.98, 0.98, 0.98, 0.98]),
        (Some(FuelType::NaturalGas), [0.60, 0.60, 0.65, 0.65, 0.70, 0.77, 0.80, 0.80]),
        (Some(FuelType::Propane), [0.60, 0.60, 0.65, 0.65, 0.70, 0.77, 0.80, 0.80]),
        (Some(FuelType::FuelOil), [0.60, 0.65, 0.72, 0.75, 0.80, 0.80, 0.80, 0.80]),
    ],
};

pub static CENTRAL_AC_SEER: VintageTable = VintageTable {
    equipment: "central air conditioner",
    unit: EfficiencyUnit::Seer,
    rows: &[(None, [9.0, 9.0, 9.0, 9.0, 9.0, 9.40, 10.0, 13.0])],
};

pub static ROOM_AC_EER: VintageTable = VintageTable {
    equipment: "room air conditioner",
    unit: EfficiencyUnit::Eer,
    rows: &[(None, [8.0, 8.0, 8.0, 8.0, 8.0, 8.10, 8.5, 8.5])],
};

pub static AIR_SOURCE_HEAT_PUMP_SEER: VintageTable = VintageTable {
    equipment: "air-source heat pump",
    unit: EfficiencyUnit::Seer,
    rows: &[(None, [9.0, 9.0, 9.0, 9.0, 9.0, 9.40, 10.0, 13.0])],
};

pub static AIR_SOURCE_HEAT_PUMP_HSPF: VintageTable = VintageTable {
    equipment: "air-source heat pump",
    unit: EfficiencyUnit::Hspf,
    rows: &[(None, [6.5, 6.5, 6.5, 6.5, 6.5, 6.80, 6.80, 7.7])],
};

pub static GROUND_SOURCE_HEAT_PUMP_EER: VintageTable = VintageTable {
    equipment: "ground-source heat pump",
    unit: EfficiencyUnit::Eer,
    rows: &[(None, [8.0, 8.0, 8.0, 11.0, 11.0, 12.0, 14.0, 13.4])],
};

pub static GROUND_SOURCE_HEAT_PUMP_COP: VintageTable = VintageTable {
    equipment: "ground-source heat pump",
    unit: EfficiencyUnit::Cop,
    rows: &[(None, [2.3, 2.3, 2.3, 2.5, 2.6, 2.7, 3.0, 3.1])],
};

pub static STORAGE_WATER_HEATER_EF: VintageTable = VintageTable {
    equipment: "storage water heater",
    unit: EfficiencyUnit::EnergyFactor,
    rows: &[
        (Some(FuelType::Electricity), [0.86, 0.86, 0.86, 0.86, 0.86, 0.87, 0.88, 0.92]),
        (Some(FuelType::NaturalGas), [0.50, 0.50, 0.50, 0.50, 0.55, 0.56, 0.56, 0.59]),
        (Some(FuelType::Propane), [0.50, 0.50, 0.50, 0.50, 0.55, 0.56, 0.56, 0.59]),
        (Some(FuelType::FuelOil), [0.47, 0.47, 0.47, 0.48, 0.49, 0.54, 0.56, 0.51]),
    ],
};

/// Stoves carry a single default efficiency per fuel regardless of age.
pub fn stove_efficiency(fuel: FuelType) -> Result<f64, LookupError> {
    match fuel {
        FuelType::Wood => Ok(0.60),
        FuelType::WoodPellets => Ok(0.78),
        FuelType::NaturalGas | FuelType::Propane => Ok(0.78),
        FuelType::FuelOil => Ok(0.75),
        FuelType::Electricity => Err(LookupError::Stove { fuel }),
    }
}
