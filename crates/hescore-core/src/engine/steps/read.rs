//! Typed accessors over validated source elements.

use crate::core::document::Element;
use crate::core::model::ParseCategoryError;
use crate::engine::error::TranslationError;
use std::str::FromStr;

/// Human-readable label of a source element for error messages, e.g. `Wall 'wall1'`.
pub fn label(element: &Element) -> String {
    match element.find("SystemIdentifier").and_then(|s| s.attr("id")) {
        Some(id) => format!("{} '{}'", element.name, id),
        None => element.name.clone(),
    }
}

fn missing(element: &Element, path: &str) -> TranslationError {
    TranslationError::MissingElement {
        context: label(element),
        path: path.to_string(),
    }
}

fn invalid(element: &Element, path: &str, value: &str, reason: &str) -> TranslationError {
    TranslationError::InvalidValue {
        context: label(element),
        path: path.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

pub fn id(element: &Element) -> Result<&str, TranslationError> {
    element
        .find("SystemIdentifier")
        .and_then(|s| s.attr("id"))
        .ok_or_else(|| missing(element, "SystemIdentifier/@id"))
}

pub fn idref<'a>(element: &'a Element, path: &str) -> Result<&'a str, TranslationError> {
    optional_idref(element, path).ok_or_else(|| missing(element, &format!("{path}/@idref")))
}

pub fn optional_idref<'a>(element: &'a Element, path: &str) -> Option<&'a str> {
    element.find(path).and_then(|e| e.attr("idref"))
}

pub fn text<'a>(element: &'a Element, path: &str) -> Result<&'a str, TranslationError> {
    element.text_at(path).ok_or_else(|| missing(element, path))
}

pub fn number(element: &Element, path: &str) -> Result<f64, TranslationError> {
    optional_number(element, path)?.ok_or_else(|| missing(element, path))
}

pub fn optional_number(element: &Element, path: &str) -> Result<Option<f64>, TranslationError> {
    match element.text_at(path) {
        None => Ok(None),
        Some(raw) => match raw.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(Some(value)),
            _ => Err(invalid(element, path, raw, "expected a finite number")),
        },
    }
}

pub fn count(element: &Element, path: &str) -> Result<u32, TranslationError> {
    optional_count(element, path)?.ok_or_else(|| missing(element, path))
}

pub fn optional_count(element: &Element, path: &str) -> Result<Option<u32>, TranslationError> {
    match element.text_at(path) {
        None => Ok(None),
        Some(raw) => raw
            .parse::<u32>()
            .map(Some)
            .map_err(|_| invalid(element, path, raw, "expected a non-negative integer")),
    }
}

pub fn optional_flag(element: &Element, path: &str) -> Result<Option<bool>, TranslationError> {
    match element.text_at(path) {
        None => Ok(None),
        Some("true") | Some("1") => Ok(Some(true)),
        Some("false") | Some("0") => Ok(Some(false)),
        Some(raw) => Err(invalid(element, path, raw, "expected a boolean")),
    }
}

pub fn flag(element: &Element, path: &str) -> Result<bool, TranslationError> {
    optional_flag(element, path)?.ok_or_else(|| missing(element, path))
}

pub fn category<T>(element: &Element, path: &str) -> Result<T, TranslationError>
where
    T: FromStr<Err = ParseCategoryError>,
{
    Ok(text(element, path)?.parse()?)
}

pub fn optional_category<T>(element: &Element, path: &str) -> Result<Option<T>, TranslationError>
where
    T: FromStr<Err = ParseCategoryError>,
{
    element
        .text_at(path)
        .map(str::parse::<T>)
        .transpose()
        .map_err(TranslationError::from)
}

/// A category selected by the name of the single child element under `path`, as in
/// `WallType/WoodStud`.
pub fn selected<'a, T>(
    element: &'a Element,
    path: &str,
) -> Result<(T, &'a Element), TranslationError>
where
    T: FromStr<Err = ParseCategoryError>,
{
    let selector = element
        .find(path)
        .and_then(|e| e.children.first())
        .ok_or_else(|| missing(element, &format!("{path}/*")))?;
    Ok((selector.name.parse()?, selector))
}

/// Nominal R-value of the insulation layer with the given installation type, treating an
/// absent layer as uninsulated.
pub fn layer_r_value(
    element: &Element,
    insulation_path: &str,
    installation_type: &str,
) -> Result<f64, TranslationError> {
    let layer = element
        .find_all(&format!("{insulation_path}/Layer"))
        .into_iter()
        .find(|layer| layer.text_at("InstallationType") == Some(installation_type));
    match layer {
        Some(layer) => Ok(optional_number(layer, "NominalRValue")?.unwrap_or(0.0)),
        None => Ok(0.0),
    }
}

/// Total nominal R-value across every layer under `insulation_path`.
pub fn total_r_value(element: &Element, insulation_path: &str) -> Result<f64, TranslationError> {
    element
        .find_all(&format!("{insulation_path}/Layer"))
        .into_iter()
        .map(|layer| -> Result<f64, TranslationError> {
            Ok(optional_number(layer, "NominalRValue")?.unwrap_or(0.0))
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wall() -> Element {
        Element::new("Wall")
            .with_child(Element::new("SystemIdentifier").with_attr("id", "wall1"))
            .with_child(Element::new("WallType").with_child(Element::new("LogCabin")))
            .with_leaf("Siding", "vinyl siding")
            .with_leaf("Area", "abc")
            .with_child(
                Element::new("Insulation")
                    .with_child(
                        Element::new("Layer")
                            .with_leaf("InstallationType", "cavity")
                            .with_leaf("NominalRValue", "13"),
                    )
                    .with_child(
                        Element::new("Layer")
                            .with_leaf("InstallationType", "continuous")
                            .with_leaf("NominalRValue", "5"),
                    ),
            )
    }

    #[test]
    fn missing_elements_name_their_context() {
        let err = number(&wall(), "Height").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing required element 'Height' in Wall 'wall1'"
        );
    }

    #[test]
    fn malformed_numbers_are_invalid_values() {
        assert!(matches!(
            number(&wall(), "Area"),
            Err(TranslationError::InvalidValue { .. })
        ));
    }

    #[test]
    fn categories_parse_or_name_the_unexpected_value() {
        use crate::core::model::categories::{Siding, WallType};
        assert_eq!(
            category::<Siding>(&wall(), "Siding").unwrap(),
            Siding::VinylSiding
        );
        let err = selected::<WallType>(&wall(), "WallType").unwrap_err();
        assert!(matches!(err, TranslationError::UnrecognizedVariant(_)));
        assert!(err.to_string().contains("LogCabin"));
    }

    #[test]
    fn layer_r_values_default_to_zero() {
        let w = wall();
        assert_eq!(layer_r_value(&w, "Insulation", "cavity").unwrap(), 13.0);
        assert_eq!(layer_r_value(&w, "Insulation", "continuous").unwrap(), 5.0);
        assert_eq!(layer_r_value(&w, "Missing", "cavity").unwrap(), 0.0);
        assert_eq!(total_r_value(&w, "Insulation").unwrap(), 18.0);
    }
}
