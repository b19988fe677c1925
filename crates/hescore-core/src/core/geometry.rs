//! Building shape derivation.
//!
//! Every home is approximated as a rectangular box with a fixed 3:5 side-to-front aspect
//! ratio and a 30° gable roof. The derived [`Shape`] is computed once per translation and
//! shared read-only by every transformation step.

use super::model::categories::ParseCategoryError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const ASPECT_RATIO_SIDE_TO_FRONT: f64 = 3.0 / 5.0;
pub const ROOF_PITCH_DEGREES: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    North,
    Northeast,
    East,
    Southeast,
    South,
    Southwest,
    West,
    Northwest,
}

impl Orientation {
    /// Compass points in clockwise order starting from north, 45° apart.
    pub const ALL: [Orientation; 8] = [
        Orientation::North,
        Orientation::Northeast,
        Orientation::East,
        Orientation::Southeast,
        Orientation::South,
        Orientation::Southwest,
        Orientation::West,
        Orientation::Northwest,
    ];

    fn index(self) -> usize {
        self as usize
    }

    pub fn azimuth(self) -> f64 {
        self.index() as f64 * 45.0
    }

    pub fn reverse(self) -> Orientation {
        Self::ALL[(self.index() + 4) % 8]
    }

    /// The compass point at `degrees` clockwise from this one, snapped to 45° steps.
    pub fn rotate(self, degrees: f64) -> Orientation {
        let steps = (degrees / 45.0).round() as i64;
        Self::ALL[(self.index() as i64 + steps).rem_euclid(8) as usize]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Orientation::North => "north",
            Orientation::Northeast => "northeast",
            Orientation::East => "east",
            Orientation::Southeast => "southeast",
            Orientation::South => "south",
            Orientation::Southwest => "southwest",
            Orientation::West => "west",
            Orientation::Northwest => "northwest",
        }
    }
}

impl FromStr for Orientation {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|o| o.as_str() == s.trim())
            .ok_or_else(|| ParseCategoryError::new("orientation", s.trim()))
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalizes any finite azimuth into `[0, 360)`.
pub fn sanitize_azimuth(azimuth: f64) -> f64 {
    let normalized = azimuth.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360.0.
    if normalized >= 360.0 { 0.0 } else { normalized }
}

#[derive(Debug, Error, PartialEq)]
pub enum ShapeError {
    #[error("Conditioned floor area must be positive (got {0})")]
    NonPositiveFloorArea(f64),
    #[error("Number of above-grade stories must be at least one (got {0})")]
    NoStories(u32),
    #[error("Average ceiling height must be positive (got {0})")]
    NonPositiveCeilingHeight(f64),
    #[error(
        "Conditioned basement area ({basement}) must be smaller than the conditioned floor area ({floor_area})"
    )]
    BasementTooLarge { basement: f64, floor_area: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeInputs {
    pub conditioned_floor_area: f64,
    pub stories_above_grade: u32,
    pub has_conditioned_basement: bool,
    pub conditioned_basement_area: f64,
    pub ceiling_height: f64,
    pub front_orientation: Orientation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub conditioned_floor_area: f64,
    pub basement_floor_area: f64,
    pub stories_above_grade: u32,
    pub floors_including_basement: u32,
    pub ceiling_height: f64,
    pub footprint: f64,
    pub side_length: f64,
    pub front_length: f64,
    pub perimeter: f64,
    pub conditioned_volume: f64,
    pub height: f64,
    pub front_orientation: Orientation,
    pub front_azimuth: f64,
    pub roof_pitch_degrees: f64,
}

impl Shape {
    pub fn derive(inputs: &ShapeInputs) -> Result<Self, ShapeError> {
        let cfa = inputs.conditioned_floor_area;
        if cfa.is_nan() || cfa <= 0.0 {
            return Err(ShapeError::NonPositiveFloorArea(cfa));
        }
        if inputs.stories_above_grade == 0 {
            return Err(ShapeError::NoStories(inputs.stories_above_grade));
        }
        if inputs.ceiling_height.is_nan() || inputs.ceiling_height <= 0.0 {
            return Err(ShapeError::NonPositiveCeilingHeight(inputs.ceiling_height));
        }
        let basement = if inputs.has_conditioned_basement {
            inputs.conditioned_basement_area
        } else {
            0.0
        };
        if basement >= cfa || basement < 0.0 {
            return Err(ShapeError::BasementTooLarge {
                basement,
                floor_area: cfa,
            });
        }

        let stories = inputs.stories_above_grade;
        let footprint = (cfa - basement) / stories as f64;
        let side_length = (footprint * ASPECT_RATIO_SIDE_TO_FRONT).sqrt();
        let front_length = side_length / ASPECT_RATIO_SIDE_TO_FRONT;

        Ok(Self {
            conditioned_floor_area: cfa,
            basement_floor_area: basement,
            stories_above_grade: stories,
            floors_including_basement: stories + u32::from(inputs.has_conditioned_basement),
            ceiling_height: inputs.ceiling_height,
            footprint,
            side_length,
            front_length,
            perimeter: 2.0 * (front_length + side_length),
            conditioned_volume: cfa * inputs.ceiling_height,
            height: inputs.ceiling_height * stories as f64,
            front_orientation: inputs.front_orientation,
            front_azimuth: inputs.front_orientation.azimuth(),
            roof_pitch_degrees: ROOF_PITCH_DEGREES,
        })
    }

    /// Azimuth of a surface facing `offset` degrees clockwise from the front of the home.
    pub fn azimuth_from_front(&self, offset: f64) -> f64 {
        sanitize_azimuth(self.front_azimuth + offset)
    }

    /// Roof pitch expressed as rise over a 12-unit run.
    pub fn roof_pitch_rise_per_12(&self) -> f64 {
        self.roof_pitch_degrees.to_radians().tan() * 12.0
    }

    /// Length of the exterior wall facing `orientation`: front and back walls span the front
    /// length, every other wall spans the side length.
    pub fn wall_length_facing(&self, orientation: Orientation) -> f64 {
        if orientation == self.front_orientation || orientation == self.front_orientation.reverse()
        {
            self.front_length
        } else {
            self.side_length
        }
    }
}
