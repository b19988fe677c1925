//! # Document Module
//!
//! A minimal, ordered element tree used to carry the sparse building characterization
//! into the ruleset. The tree is format-agnostic: XML, JSON, or any other wire format is a
//! boundary concern, and this module only requires that the boundary produces [`Element`]s.
//!
//! ## Key Components
//!
//! - [`Element`] - A named node with ordered attributes, optional text, and ordered children
//! - [`Document`] - A whole building characterization rooted at a single element
//! - [`path`] - A compact path-expression language used by the structural validator

pub mod path;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Element {
    pub name: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn leaf(name: &str, text: impl ToString) -> Self {
        Self {
            name: name.to_string(),
            text: Some(text.to_string()),
            ..Self::default()
        }
    }

    pub fn with_attr(mut self, key: &str, value: &str) -> Self {
        self.attributes.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_leaf(self, name: &str, text: impl ToString) -> Self {
        self.with_child(Element::leaf(name, text))
    }

    pub fn push(&mut self, child: Element) {
        self.children.push(child);
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Trimmed text content, treating whitespace-only text as absent.
    pub fn text(&self) -> Option<&str> {
        self.text
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }

    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn children_named<'a, 'n>(
        &'a self,
        name: &'n str,
    ) -> impl Iterator<Item = &'a Element> + use<'a, 'n> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Follows a plain slash-separated path of element names (no predicates) and returns
    /// the first match.
    pub fn find(&self, path: &str) -> Option<&Element> {
        path.split('/')
            .filter(|step| !step.is_empty())
            .try_fold(self, |node, step| node.child(step))
    }

    /// Follows a plain slash-separated path of element names and returns every match in
    /// document order.
    pub fn find_all(&self, path: &str) -> Vec<&Element> {
        let mut current = vec![self];
        for step in path.split('/').filter(|step| !step.is_empty()) {
            current = current
                .into_iter()
                .flat_map(|node| node.children_named(step))
                .collect();
        }
        current
    }

    pub fn find_mut(&mut self, path: &str) -> Option<&mut Element> {
        path.split('/')
            .filter(|step| !step.is_empty())
            .try_fold(self, |node, step| node.children.iter_mut().find(|c| c.name == step))
    }

    pub fn text_at(&self, path: &str) -> Option<&str> {
        self.find(path).and_then(Element::text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    root: Element,
}

impl Document {
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    /// Follows an absolute plain path whose first step names the root element.
    pub fn find(&self, absolute_path: &str) -> Option<&Element> {
        let mut steps = absolute_path.trim_start_matches('/').splitn(2, '/');
        match (steps.next(), steps.next()) {
            (Some(first), rest) if first == self.root.name => match rest {
                Some(rest) => self.root.find(rest),
                None => Some(&self.root),
            },
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Element {
        Element::new("Enclosure").with_child(
            Element::new("Walls")
                .with_child(
                    Element::new("Wall")
                        .with_child(Element::new("SystemIdentifier").with_attr("id", "wall1"))
                        .with_leaf("Orientation", "north"),
                )
                .with_child(
                    Element::new("Wall")
                        .with_child(Element::new("SystemIdentifier").with_attr("id", "wall2"))
                        .with_leaf("Orientation", "  south \n"),
                ),
        )
    }

    #[test]
    fn find_follows_plain_paths_to_first_match() {
        let enclosure = sample();
        let wall = enclosure.find("Walls/Wall").unwrap();
        assert_eq!(wall.text_at("Orientation"), Some("north"));
        assert!(enclosure.find("Walls/Window").is_none());
    }

    #[test]
    fn selected_children_outlive_the_name_used_to_select_them() {
        let enclosure = sample();
        let walls = enclosure.find("Walls").unwrap();
        let selected: Vec<&Element> = {
            let name = String::from("Wall");
            walls.children_named(&name).collect()
        };
        assert_eq!(selected.len(), 2);
        assert_eq!(selected[1].text_at("Orientation"), Some("south"));
    }

    #[test]
    fn find_all_returns_every_match_in_document_order() {
        let enclosure = sample();
        let ids: Vec<_> = enclosure
            .find_all("Walls/Wall/SystemIdentifier")
            .into_iter()
            .filter_map(|e| e.attr("id"))
            .collect();
        assert_eq!(ids, vec!["wall1", "wall2"]);
    }

    #[test]
    fn text_is_trimmed_and_blank_text_is_absent() {
        let enclosure = sample();
        let walls = enclosure.find_all("Walls/Wall");
        assert_eq!(walls[1].text_at("Orientation"), Some("south"));
        assert_eq!(Element::leaf("Empty", "   ").text(), None);
    }

    #[test]
    fn document_find_requires_matching_root_name() {
        let doc = Document::new(Element::new("HPXML").with_child(sample()));
        assert!(doc.find("/HPXML/Enclosure/Walls").is_some());
        assert!(doc.find("/HPXML").is_some());
        assert!(doc.find("/Other/Enclosure").is_none());
    }
}
