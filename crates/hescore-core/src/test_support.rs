use crate::core::collaborators::StandardCollaborators;
use crate::core::document::{Document, Element};
use crate::core::tables::LookupTables;
use crate::engine::config::TranslationConfig;
use crate::engine::context::TranslationContext;
use crate::engine::progress::ProgressReporter;
use crate::workflows::translate::derive_shape;

fn system_id(id: &str) -> Element {
    Element::new("SystemIdentifier").with_attr("id", id)
}

fn reference(name: &str, idref: &str) -> Element {
    Element::new(name).with_attr("idref", idref)
}

fn layer(installation_type: &str, r_value: f64) -> Element {
    Element::new("Layer")
        .with_leaf("InstallationType", installation_type)
        .with_leaf("NominalRValue", r_value)
}

fn wall(id: &str, orientation: &str) -> Element {
    Element::new("Wall")
        .with_child(system_id(id))
        .with_leaf("Orientation", orientation)
        .with_child(Element::new("WallType").with_child(Element::new("WoodStud")))
        .with_leaf("Siding", "vinyl siding")
        .with_child(
            Element::new("Insulation")
                .with_child(layer("cavity", 13.0))
                .with_child(layer("continuous", 0.0)),
        )
}

fn duct(location: &str, fraction: f64, insulated: bool) -> Element {
    Element::new("Ducts")
        .with_leaf("DuctLocation", location)
        .with_leaf("FractionDuctArea", fraction)
        .with_leaf("DuctInsulationPresent", insulated)
}

fn enclosure() -> Element {
    let air_infiltration = Element::new("AirInfiltration").with_child(
        Element::new("AirInfiltrationMeasurement")
            .with_child(system_id("air1"))
            .with_leaf("LeakinessDescription", "average"),
    );
    let roof = Element::new("Roof")
        .with_child(system_id("roof1"))
        .with_leaf("RoofType", "asphalt or fiberglass shingles")
        .with_leaf("RoofColor", "medium")
        .with_child(Element::new("Insulation").with_child(layer("cavity", 0.0)));
    let attic = Element::new("Attic")
        .with_child(system_id("attic1"))
        .with_child(reference("AttachedToRoof", "roof1"))
        .with_leaf("AtticType", "vented attic")
        .with_child(
            Element::new("AtticFloorInsulation")
                .with_child(Element::new("Layer").with_leaf("NominalRValue", 30)),
        );
    let foundation = Element::new("Foundation")
        .with_child(system_id("fnd1"))
        .with_child(Element::new("FoundationType").with_child(Element::new("SlabOnGrade")))
        .with_leaf("Area", 1000)
        .with_child(
            Element::new("Slab").with_child(
                Element::new("PerimeterInsulation")
                    .with_child(Element::new("Layer").with_leaf("NominalRValue", 5)),
            ),
        );
    let described_window = Element::new("Window")
        .with_child(system_id("win1"))
        .with_leaf("Area", 60)
        .with_child(reference("AttachedToWall", "wall_front"))
        .with_child(Element::new("FrameType").with_child(Element::new("Wood")))
        .with_leaf("GlassLayers", "double-pane")
        .with_leaf("GasFill", "air");
    let rated_window = Element::new("Window")
        .with_child(system_id("win2"))
        .with_leaf("Area", 40)
        .with_child(reference("AttachedToWall", "wall_back"))
        .with_leaf("UFactor", 0.3)
        .with_leaf("SHGC", 0.4);
    let skylight = Element::new("Skylight")
        .with_child(system_id("sky1"))
        .with_leaf("Area", 15)
        .with_child(reference("AttachedToRoof", "roof1"))
        .with_leaf("UFactor", 0.5)
        .with_leaf("SHGC", 0.3);

    Element::new("Enclosure")
        .with_child(air_infiltration)
        .with_child(
            Element::new("AtticAndRoof")
                .with_child(Element::new("Roofs").with_child(roof))
                .with_child(Element::new("Attics").with_child(attic)),
        )
        .with_child(Element::new("Foundations").with_child(foundation))
        .with_child(
            Element::new("Walls")
                .with_child(wall("wall_front", "south"))
                .with_child(wall("wall_back", "north"))
                .with_child(wall("wall_east", "east"))
                .with_child(wall("wall_west", "west")),
        )
        .with_child(
            Element::new("Windows")
                .with_child(described_window)
                .with_child(rated_window),
        )
        .with_child(Element::new("Skylights").with_child(skylight))
}

fn systems() -> Element {
    let furnace = Element::new("HeatingSystem")
        .with_child(system_id("heat1"))
        .with_leaf("YearInstalled", 1975)
        .with_child(reference("DistributionSystem", "dist1"))
        .with_child(Element::new("HeatingSystemType").with_child(Element::new("Furnace")))
        .with_leaf("HeatingSystemFuel", "natural gas")
        .with_leaf("FractionHeatLoadServed", 1);
    let air_conditioner = Element::new("CoolingSystem")
        .with_child(system_id("cool1"))
        .with_child(reference("DistributionSystem", "dist1"))
        .with_leaf("CoolingSystemType", "central air conditioning")
        .with_leaf("FractionCoolLoadServed", 1)
        .with_child(
            Element::new("AnnualCoolingEfficiency")
                .with_leaf("Units", "SEER")
                .with_leaf("Value", 13),
        );
    let distribution = Element::new("HVACDistribution")
        .with_child(system_id("dist1"))
        .with_child(
            Element::new("DistributionSystemType").with_child(
                Element::new("AirDistribution")
                    .with_child(duct("unconditioned attic", 0.7, true))
                    .with_child(duct("conditioned space", 0.3, false)),
            ),
        )
        .with_child(
            Element::new("HVACDistributionImprovement").with_leaf("DuctSystemSealed", false),
        );
    let water_heater = Element::new("WaterHeatingSystem")
        .with_child(system_id("dhw1"))
        .with_leaf("FuelType", "natural gas")
        .with_leaf("WaterHeaterType", "storage water heater")
        .with_leaf("YearInstalled", 1995);
    let pv = Element::new("PVSystem")
        .with_child(system_id("pv1"))
        .with_leaf("ArrayOrientation", "south")
        .with_leaf("NumberOfPanels", 10);

    Element::new("Systems")
        .with_child(
            Element::new("HVAC")
                .with_child(
                    Element::new("HVACPlant")
                        .with_child(furnace)
                        .with_child(air_conditioner),
                )
                .with_child(distribution),
        )
        .with_child(Element::new("WaterHeating").with_child(water_heater))
        .with_child(Element::new("Photovoltaics").with_child(pv))
}

/// A complete two-story, slab-on-grade home facing south with a vented attic, a gas
/// furnace, central air and a gas storage water heater. It passes structural validation
/// and translates without error.
pub fn sample_document() -> Document {
    let summary = Element::new("BuildingSummary")
        .with_child(Element::new("Site").with_leaf("OrientationOfFrontOfHome", "south"))
        .with_child(
            Element::new("BuildingConstruction")
                .with_leaf("YearBuilt", 1975)
                .with_leaf("ResidentialFacilityType", "single-family detached")
                .with_leaf("NumberofConditionedFloorsAboveGrade", 2)
                .with_leaf("AverageCeilingHeight", 8)
                .with_leaf("NumberofBedrooms", 3)
                .with_leaf("ConditionedFloorArea", 2000),
        );
    let climate = Element::new("ClimateandRiskZones").with_child(
        Element::new("ClimateZoneIECC")
            .with_leaf("Year", 2006)
            .with_leaf("ClimateZone", "5B"),
    );
    let building = Element::new("Building")
        .with_child(Element::new("BuildingID").with_attr("id", "bldg1"))
        .with_child(
            Element::new("Site").with_child(Element::new("Address").with_leaf("ZipCode", "80401")),
        )
        .with_child(Element::new("ProjectStatus").with_leaf("EventType", "audit"))
        .with_child(
            Element::new("BuildingDetails")
                .with_child(summary)
                .with_child(climate)
                .with_child(enclosure())
                .with_child(systems()),
        );
    Document::new(Element::new("HPXML").with_child(building))
}

/// Removes every `child_name` child of the element at `parent_path` (relative to the
/// document root).
pub fn remove_all(document: &mut Document, parent_path: &str, child_name: &str) {
    if let Some(parent) = document.root_mut().find_mut(parent_path) {
        parent.children.retain(|c| c.name != child_name);
    }
}

/// Applies `edit` to the first element at `path` (relative to the document root).
pub fn edit_first(document: &mut Document, path: &str, edit: impl FnOnce(&mut Element)) {
    let element = document
        .root_mut()
        .find_mut(path)
        .unwrap_or_else(|| panic!("sample document has no element at {path}"));
    edit(element);
}

/// Runs `f` with a translation context over `document` using the shipped tables, the
/// standard collaborators and the default configuration.
pub fn with_context<R>(document: &Document, f: impl FnOnce(&TranslationContext) -> R) -> R {
    with_reporter(document, &ProgressReporter::new(), f)
}

/// Like [`with_context`], but progress events go to `reporter`.
pub fn with_reporter<R>(
    document: &Document,
    reporter: &ProgressReporter,
    f: impl FnOnce(&TranslationContext) -> R,
) -> R {
    let shape = derive_shape(document).expect("sample geometry should derive");
    let tables = LookupTables::load_default().expect("shipped tables should load");
    let config = TranslationConfig::default();
    let context = TranslationContext::new(
        document,
        &shape,
        &tables,
        &StandardCollaborators,
        &config,
        reporter,
    )
    .expect("sample document should have building details");
    f(&context)
}
