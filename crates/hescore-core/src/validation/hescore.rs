//! The home-energy-score content model.
//!
//! Layered over the general building-description schema, these requirements pin down the
//! reduced set of inputs a score assessment collects. Mutually exclusive construction and
//! equipment choices are expressed as conditional blocks keyed on the selecting element.

use super::{Cardinality, Requirement};

pub const BUILDING_DETAILS: &str = "/HPXML/Building/BuildingDetails";

const ONE: Cardinality = Cardinality::ONE;
const ZERO_OR_ONE: Cardinality = Cardinality::ZERO_OR_ONE;
const NONE: Cardinality = Cardinality::NONE;
const ONE_OR_MORE: Cardinality = Cardinality::OneOrMore;

fn details(path: &str) -> String {
    format!("{BUILDING_DETAILS}/{path}")
}

fn each(path: &str) -> Requirement {
    Requirement::each(&details(path))
}

pub fn requirements() -> Vec<Requirement> {
    let mut table = vec![root()];
    table.extend(air_infiltration());
    table.extend(attics_and_roofs());
    table.extend(foundations());
    table.extend(walls());
    table.extend(fenestration("Enclosure/Windows/Window", "AttachedToWall[@idref]"));
    table.extend(fenestration("Enclosure/Skylights/Skylight", "AttachedToRoof[@idref]"));
    table.extend(hvac());
    table.extend(water_heating());
    table.extend(photovoltaics());
    table
}

fn root() -> Requirement {
    let construction = "BuildingSummary/BuildingConstruction";
    Requirement::root()
        .require("/HPXML/Building/BuildingID[@id]", ONE)
        .require("/HPXML/Building/Site/Address/ZipCode", ONE)
        .require("/HPXML/Building/ProjectStatus/EventType", ONE)
        .require(&details("BuildingSummary/Site/OrientationOfFrontOfHome"), ONE)
        .require(&details(&format!("{construction}/YearBuilt")), ONE)
        .require(&details(&format!("{construction}/ResidentialFacilityType")), ONE)
        .require(
            &details(&format!("{construction}/NumberofConditionedFloorsAboveGrade")),
            ONE,
        )
        .require(&details(&format!("{construction}/AverageCeilingHeight")), ONE)
        .require(&details(&format!("{construction}/NumberofBedrooms")), ONE)
        .require(&details(&format!("{construction}/ConditionedFloorArea")), ONE)
        .require(&details("ClimateandRiskZones/ClimateZoneIECC/ClimateZone"), ONE)
        .require(
            &details("Enclosure/AirInfiltration/AirInfiltrationMeasurement"),
            ONE,
        )
        .require(&details("Enclosure/AtticAndRoof/Roofs/Roof"), ONE_OR_MORE)
        .require(&details("Enclosure/AtticAndRoof/Attics/Attic"), ONE_OR_MORE)
        .require(&details("Enclosure/Foundations/Foundation"), ONE_OR_MORE)
        .require(&details("Enclosure/Walls/Wall"), ONE_OR_MORE)
        .require(&details("Systems/HVAC/HVACPlant/HeatingSystem"), ZERO_OR_ONE)
        .require(&details("Systems/HVAC/HVACPlant/CoolingSystem"), ZERO_OR_ONE)
        .require(&details("Systems/HVAC/HVACPlant/HeatPump"), ZERO_OR_ONE)
        .require(&details("Systems/WaterHeating/WaterHeatingSystem"), ONE)
        .require(&details("Systems/Photovoltaics/PVSystem"), ZERO_OR_ONE)
}

fn air_infiltration() -> Vec<Requirement> {
    let measurement = "Enclosure/AirInfiltration/AirInfiltrationMeasurement";
    vec![
        each(measurement)
            .require("SystemIdentifier[@id]", ONE)
            .require("BuildingAirLeakage | LeakinessDescription", ONE),
        each(&format!("{measurement}[BuildingAirLeakage]"))
            .require("HousePressure", ONE)
            .require(
                "BuildingAirLeakage/UnitofMeasure[.=\"CFM\" or .=\"ACH\"]",
                ONE,
            )
            .require("BuildingAirLeakage/AirLeakage", ONE),
    ]
}

fn attics_and_roofs() -> Vec<Requirement> {
    let roof = "Enclosure/AtticAndRoof/Roofs/Roof";
    let attic = "Enclosure/AtticAndRoof/Attics/Attic";
    vec![
        each(roof)
            .require("SystemIdentifier[@id]", ONE)
            .require("RoofType", ONE)
            .require("RoofColor", ONE)
            .require("RadiantBarrier", ZERO_OR_ONE)
            .require(
                "Insulation/Layer[InstallationType=\"cavity\"]/NominalRValue",
                ONE,
            )
            .require(
                "Insulation/Layer[InstallationType=\"continuous\"]/NominalRValue",
                ZERO_OR_ONE,
            ),
        each(&format!("{roof}[RoofColor=\"reflective\"]")).require("SolarAbsorptance", ONE),
        each(attic)
            .require("SystemIdentifier[@id]", ONE)
            .require("AttachedToRoof[@idref]", ONE)
            .require("AtticType", ONE)
            .require("Area", ZERO_OR_ONE),
        each(&format!(
            "{attic}[AtticType=\"vented attic\" or AtticType=\"unvented attic\"]"
        ))
        .require("AtticFloorInsulation/Layer/NominalRValue", ONE)
        .require("KneeWall", ZERO_OR_ONE),
        each(&format!("{attic}/KneeWall"))
            .require("Area", ONE)
            .require("Insulation/Layer/NominalRValue", ONE),
    ]
}

fn foundations() -> Vec<Requirement> {
    let foundation = "Enclosure/Foundations/Foundation";
    vec![
        each(foundation)
            .require("SystemIdentifier[@id]", ONE)
            .require("FoundationType/*", ONE)
            .require("Area", ONE),
        each(&format!("{foundation}[FoundationType/Basement]"))
            .require("FoundationType/Basement/Conditioned", ONE)
            .require("FoundationWall/Insulation/Layer/NominalRValue", ONE),
        each(&format!(
            "{foundation}[FoundationType/Basement/Conditioned=\"false\"]"
        ))
        .require("FrameFloor/Insulation/Layer/NominalRValue", ONE),
        each(&format!("{foundation}[FoundationType/Crawlspace]"))
            .require("FoundationType/Crawlspace/Vented", ONE)
            .require("FrameFloor/Insulation/Layer/NominalRValue", ONE)
            .require("FoundationWall/Insulation/Layer/NominalRValue", ONE),
        each(&format!("{foundation}[FoundationType/SlabOnGrade]"))
            .require("Slab/PerimeterInsulation/Layer/NominalRValue", ONE),
    ]
}

fn walls() -> Vec<Requirement> {
    let wall = "Enclosure/Walls/Wall";
    let cavity = "Insulation/Layer[InstallationType=\"cavity\"]";
    let continuous = "Insulation/Layer[InstallationType=\"continuous\"]";
    let mut table = vec![
        each(wall)
            .require("SystemIdentifier[@id]", ONE)
            .require("Orientation", ONE)
            .require("WallType", ONE)
            .require("Siding", ONE),
        each(&format!("{wall}[WallType/WoodStud]"))
            .require(cavity, ONE)
            .require(continuous, ONE)
            .require("WallType/WoodStud/OptimumValueEngineering", ZERO_OR_ONE),
        each(&format!("{wall}[WallType/WoodStud]/Insulation/Layer")).require("NominalRValue", ONE),
        each(&format!("{wall}[WallType/StrawBale]")).require("Insulation/Layer", NONE),
    ];
    for masonry in ["StructuralBrick", "ConcreteMasonryUnit"] {
        table.push(
            each(&format!("{wall}[WallType/{masonry}]"))
                .require(&format!("{continuous}/NominalRValue"), ONE)
                .require(cavity, NONE),
        );
    }
    table
}

fn fenestration(element: &str, attachment: &str) -> Vec<Requirement> {
    vec![
        each(element)
            .require("SystemIdentifier[@id]", ONE)
            .require("Area", ONE)
            .require(attachment, ONE)
            .require("FrameType | UFactor", ONE),
        each(&format!("{element}[FrameType]"))
            .require("FrameType/*", ONE)
            .require("GlassLayers", ONE)
            .require("GlassType", ZERO_OR_ONE)
            .require("GasFill", ZERO_OR_ONE),
        each(&format!("{element}[UFactor]")).require("SHGC", ONE),
    ]
}

fn hvac() -> Vec<Requirement> {
    let plant = "Systems/HVAC/HVACPlant";
    let heating = format!("{plant}/HeatingSystem");
    let cooling = format!("{plant}/CoolingSystem");
    let heat_pump = format!("{plant}/HeatPump");
    let distribution = "Systems/HVAC/HVACDistribution";
    let ducts = format!("{distribution}/DistributionSystemType/AirDistribution/Ducts");
    vec![
        each(&heating)
            .require("SystemIdentifier[@id]", ONE)
            .require("HeatingSystemType/*", ONE)
            .require("FractionHeatLoadServed", ONE)
            .require("DistributionSystem[@idref]", ZERO_OR_ONE),
        each(&format!("{heating}[not(HeatingSystemType/ElectricResistance)]"))
            .require("HeatingSystemFuel", ONE),
        each(&format!(
            "{heating}[HeatingSystemType/Furnace or HeatingSystemType/WallFurnace or HeatingSystemType/Boiler]"
        ))
        .require(
            "YearInstalled | AnnualHeatingEfficiency[Units=\"AFUE\"]/Value",
            ONE,
        ),
        each(&format!("{heating}[HeatingSystemType/Furnace]"))
            .require("DistributionSystem[@idref]", ONE),
        each(&format!("{heating}[HeatingSystemType/Stove]")).require(
            "AnnualHeatingEfficiency[Units=\"Percent\"]/Value",
            ZERO_OR_ONE,
        ),
        each(&cooling)
            .require("SystemIdentifier[@id]", ONE)
            .require("CoolingSystemType", ONE)
            .require("FractionCoolLoadServed", ONE)
            .require("DistributionSystem[@idref]", ZERO_OR_ONE),
        each(&format!("{cooling}[CoolingSystemType=\"central air conditioning\"]"))
            .require(
                "YearInstalled | AnnualCoolingEfficiency[Units=\"SEER\"]/Value",
                ONE,
            )
            .require("DistributionSystem[@idref]", ONE),
        each(&format!("{cooling}[CoolingSystemType=\"room air conditioner\"]")).require(
            "YearInstalled | AnnualCoolingEfficiency[Units=\"EER\"]/Value",
            ONE,
        ),
        each(&heat_pump)
            .require("SystemIdentifier[@id]", ONE)
            .require("HeatPumpType", ONE)
            .require("FractionHeatLoadServed", ONE)
            .require("FractionCoolLoadServed", ONE)
            .require("DistributionSystem[@idref]", ZERO_OR_ONE),
        each(&format!(
            "{heat_pump}[HeatPumpType=\"air-to-air\" or HeatPumpType=\"mini-split\"]"
        ))
        .require(
            "YearInstalled | AnnualCoolingEfficiency[Units=\"SEER\"]/Value",
            ONE,
        )
        .require(
            "YearInstalled | AnnualHeatingEfficiency[Units=\"HSPF\"]/Value",
            ONE,
        ),
        each(&format!("{heat_pump}[HeatPumpType=\"ground-to-air\"]"))
            .require(
                "YearInstalled | AnnualCoolingEfficiency[Units=\"EER\"]/Value",
                ONE,
            )
            .require(
                "YearInstalled | AnnualHeatingEfficiency[Units=\"COP\"]/Value",
                ONE,
            ),
        each(&format!(
            "{heat_pump}[HeatPumpType=\"air-to-air\" or HeatPumpType=\"ground-to-air\"]"
        ))
        .require("DistributionSystem[@idref]", ONE),
        each(distribution)
            .require("SystemIdentifier[@id]", ONE)
            .require("DistributionSystemType/AirDistribution", ONE)
            .require("DistributionSystemType/AirDistribution/Ducts", ONE_OR_MORE)
            .require("HVACDistributionImprovement/DuctSystemSealed", ONE),
        each(&ducts)
            .require("DuctLocation", ONE)
            .require("FractionDuctArea", ONE)
            .require("DuctInsulationPresent", ONE),
    ]
}

fn water_heating() -> Vec<Requirement> {
    let system = "Systems/WaterHeating/WaterHeatingSystem";
    vec![
        each(system)
            .require("SystemIdentifier[@id]", ONE)
            .require("WaterHeaterType", ONE),
        each(&format!("{system}[WaterHeaterType=\"storage water heater\"]"))
            .require("FuelType", ONE)
            .require("YearInstalled | EnergyFactor | UniformEnergyFactor", ONE),
        each(&format!(
            "{system}[WaterHeaterType=\"heat pump water heater\" or WaterHeaterType=\"instantaneous water heater\"]"
        ))
        .require("EnergyFactor | UniformEnergyFactor", ONE),
        each(&format!(
            "{system}[WaterHeaterType=\"instantaneous water heater\"]"
        ))
        .require("FuelType", ONE),
        each(&format!(
            "{system}[WaterHeaterType=\"space-heating boiler with storage tank\" or WaterHeaterType=\"space-heating boiler with tankless coil\"]"
        ))
        .require("RelatedHVACSystem[@idref]", ONE),
    ]
}

fn photovoltaics() -> Vec<Requirement> {
    vec![
        each("Systems/Photovoltaics/PVSystem")
            .require("SystemIdentifier[@id]", ONE)
            .require("ArrayOrientation | ArrayAzimuth", ONE)
            .require("MaxPowerOutput | NumberOfPanels", ONE),
    ]
}
