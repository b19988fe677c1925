use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unexpected {category} '{value}'")]
pub struct ParseCategoryError {
    pub category: &'static str,
    pub value: String,
}

impl ParseCategoryError {
    pub fn new(category: &'static str, value: &str) -> Self {
        Self {
            category,
            value: value.to_string(),
        }
    }
}

/// Declares a closed categorical vocabulary: each variant maps to exactly one document
/// string, parsing anything else fails with [`ParseCategoryError`].
macro_rules! categorical {
    (
        $(#[$meta:meta])*
        pub enum $name:ident as $category:literal {
            $($variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
        pub enum $name {
            $(#[serde(rename = $text)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl FromStr for $name {
            type Err = ParseCategoryError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $($text => Ok($name::$variant),)+
                    other => Err(ParseCategoryError::new($category, other)),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

categorical! {
    pub enum FuelType as "fuel type" {
        Electricity => "electricity",
        NaturalGas => "natural gas",
        FuelOil => "fuel oil",
        Propane => "propane",
        Wood => "wood",
        WoodPellets => "wood pellets",
    }
}

categorical! {
    /// Above-grade wall construction, named by the element that selects it under `WallType`.
    pub enum WallType as "wall type" {
        WoodStud => "WoodStud",
        StructuralBrick => "StructuralBrick",
        ConcreteMasonryUnit => "ConcreteMasonryUnit",
        StrawBale => "StrawBale",
    }
}

categorical! {
    pub enum Siding as "siding" {
        WoodSiding => "wood siding",
        Stucco => "stucco",
        VinylSiding => "vinyl siding",
        AluminumSiding => "aluminum siding",
        BrickVeneer => "brick veneer",
        None => "none",
    }
}

categorical! {
    pub enum RoofType as "roof type" {
        AsphaltShingles => "asphalt or fiberglass shingles",
        WoodShingles => "wood shingles or shakes",
        SlateOrTile => "slate or tile shingles",
        Concrete => "concrete",
        SyntheticSheeting => "plastic/rubber/synthetic sheeting",
    }
}

categorical! {
    pub enum RoofColor as "roof color" {
        White => "white",
        Light => "light",
        Medium => "medium",
        MediumDark => "medium dark",
        Dark => "dark",
        Reflective => "reflective",
    }
}

categorical! {
    pub enum AtticType as "attic type" {
        VentedAttic => "vented attic",
        UnventedAttic => "unvented attic",
        CathedralCeiling => "cathedral ceiling",
        FlatRoof => "flat roof",
    }
}

categorical! {
    /// Foundation construction, named by the element that selects it under `FoundationType`.
    pub enum FoundationType as "foundation type" {
        Basement => "Basement",
        Crawlspace => "Crawlspace",
        SlabOnGrade => "SlabOnGrade",
    }
}

categorical! {
    /// Foundation classification once basement conditioning and crawlspace venting are
    /// resolved.
    pub enum FoundationKind as "foundation kind" {
        ConditionedBasement => "conditioned basement",
        UnconditionedBasement => "unconditioned basement",
        VentedCrawlspace => "vented crawlspace",
        UnventedCrawlspace => "unvented crawlspace",
        SlabOnGrade => "slab",
    }
}

categorical! {
    /// Window frame material, named by the element that selects it under `FrameType`.
    pub enum FrameType as "frame type" {
        Aluminum => "Aluminum",
        Wood => "Wood",
        Vinyl => "Vinyl",
        Fiberglass => "Fiberglass",
        Composite => "Composite",
    }
}

categorical! {
    pub enum GlassLayers as "glass layers" {
        SinglePane => "single-pane",
        DoublePane => "double-pane",
        TriplePane => "triple-pane",
    }
}

categorical! {
    pub enum GlassType as "glass type" {
        LowE => "low-e",
        TintedReflective => "tinted/reflective",
        SolarControlLowE => "solar-control low-e",
    }
}

categorical! {
    pub enum GasFill as "gas fill" {
        Air => "air",
        Argon => "argon",
    }
}

categorical! {
    /// Heating equipment, named by the element that selects it under `HeatingSystemType`.
    pub enum HeatingSystemType as "heating system type" {
        Furnace => "Furnace",
        WallFurnace => "WallFurnace",
        Boiler => "Boiler",
        ElectricResistance => "ElectricResistance",
        Stove => "Stove",
    }
}

categorical! {
    pub enum CoolingSystemType as "cooling system type" {
        CentralAirConditioner => "central air conditioning",
        RoomAirConditioner => "room air conditioner",
        EvaporativeCooler => "evaporative cooler",
    }
}

categorical! {
    pub enum HeatPumpType as "heat pump type" {
        AirToAir => "air-to-air",
        MiniSplit => "mini-split",
        GroundToAir => "ground-to-air",
    }
}

categorical! {
    pub enum WaterHeaterType as "water heater type" {
        Storage => "storage water heater",
        Instantaneous => "instantaneous water heater",
        HeatPump => "heat pump water heater",
        IndirectStorage => "space-heating boiler with storage tank",
        TanklessCoil => "space-heating boiler with tankless coil",
    }
}

categorical! {
    pub enum LeakinessDescription as "leakiness description" {
        Tight => "tight",
        Average => "average",
    }
}

categorical! {
    pub enum LeakageUnit as "air leakage unit" {
        Cfm => "CFM",
        Ach => "ACH",
    }
}

categorical! {
    pub enum EfficiencyUnit as "efficiency unit" {
        Afue => "AFUE",
        Percent => "Percent",
        Seer => "SEER",
        Eer => "EER",
        Hspf => "HSPF",
        Cop => "COP",
        EnergyFactor => "EF",
        UniformEnergyFactor => "UEF",
    }
}

categorical! {
    /// Duct location vocabulary of the sparse characterization.
    pub enum DuctLocation as "duct location" {
        ConditionedSpace => "conditioned space",
        UnconditionedBasement => "unconditioned basement",
        UnventedCrawlspace => "unvented crawlspace",
        VentedCrawlspace => "vented crawlspace",
        UnconditionedAttic => "unconditioned attic",
        UnderSlab => "under slab",
        ExteriorWall => "exterior wall",
        Outside => "outside",
    }
}

categorical! {
    /// Space vocabulary of the fully specified description.
    pub enum SpaceLocation as "space location" {
        LivingSpace => "living space",
        BasementConditioned => "basement - conditioned",
        BasementUnconditioned => "basement - unconditioned",
        CrawlspaceVented => "crawlspace - vented",
        CrawlspaceUnvented => "crawlspace - unvented",
        AtticVented => "attic - vented",
        AtticUnvented => "attic - unvented",
        UnderSlab => "under slab",
        ExteriorWall => "exterior wall",
        Outside => "outside",
        Ground => "ground",
    }
}

impl DuctLocation {
    /// Translates the sparse duct location into the fully specified space vocabulary.
    pub fn to_space_location(self) -> SpaceLocation {
        match self {
            DuctLocation::ConditionedSpace => SpaceLocation::LivingSpace,
            DuctLocation::UnconditionedBasement => SpaceLocation::BasementUnconditioned,
            DuctLocation::UnventedCrawlspace => SpaceLocation::CrawlspaceUnvented,
            DuctLocation::VentedCrawlspace => SpaceLocation::CrawlspaceVented,
            DuctLocation::UnconditionedAttic => SpaceLocation::AtticVented,
            DuctLocation::UnderSlab => SpaceLocation::UnderSlab,
            DuctLocation::ExteriorWall => SpaceLocation::ExteriorWall,
            DuctLocation::Outside => SpaceLocation::Outside,
        }
    }

    pub fn is_conditioned(self) -> bool {
        matches!(self, DuctLocation::ConditionedSpace)
    }
}

impl FrameType {
    /// Metal frames conduct heat unless a thermal break is present; every other material
    /// performs as a non-metal frame.
    pub fn is_metal(self) -> bool {
        matches!(self, FrameType::Aluminum)
    }
}
