//! The detached scratch element shared by presentation probes.
//!
//! Probes that need to mutate an element and observe the result work on a
//! single reusable node instead of touching the live document. A probe that
//! mutates it is expected to leave it empty and attribute-clean before
//! returning; the store can only recycle children.

use std::collections::BTreeMap;

use super::object::HostObject;
use super::value::HostValue;

/// A child node appended to the scratch element.
#[derive(Debug, Clone, PartialEq)]
pub enum ScratchNode {
    Element { tag: String, children: Vec<ScratchNode> },
    Text(String),
    Comment(String),
}

/// A detached element created from the host document.
#[derive(Debug, Clone, PartialEq)]
pub struct ScratchElement {
    tag: String,
    properties: HostObject,
    style: HostObject,
    attributes: BTreeMap<String, String>,
    children: Vec<ScratchNode>,
}

impl ScratchElement {
    /// Create an element exposing the given host properties and style slots.
    pub fn new(tag: impl Into<String>, properties: HostObject, style: HostObject) -> Self {
        Self {
            tag: tag.into(),
            properties,
            style,
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Host properties (methods and fields) of the element.
    pub fn properties(&self) -> &HostObject {
        &self.properties
    }

    /// The element's style declaration.
    pub fn style(&self) -> &HostObject {
        &self.style
    }

    pub fn style_mut(&mut self) -> &mut HostObject {
        &mut self.style
    }

    /// Read a property, treating `style` as the style declaration.
    pub fn get(&self, key: &str) -> HostValue {
        if key == "style" && !self.properties.contains("style") {
            return HostValue::Object(self.style.clone());
        }
        self.properties.get(key).clone()
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        self.attributes.remove(name)
    }

    pub fn append_child(&mut self, node: ScratchNode) {
        self.children.push(node);
    }

    pub fn children(&self) -> &[ScratchNode] {
        &self.children
    }

    pub fn last_child(&self) -> Option<&ScratchNode> {
        self.children.last()
    }

    /// Remove every child node. Attributes and style are kept.
    pub fn clear_children(&mut self) -> &mut Self {
        self.children.clear();
        self
    }

    /// Whether the element has no children and no attributes.
    pub fn is_pristine(&self) -> bool {
        self.children.is_empty() && self.attributes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::TypeCategory;

    fn element() -> ScratchElement {
        ScratchElement::new(
            "div",
            HostObject::new().with_function("appendChild"),
            HostObject::new().with("cssText", ""),
        )
    }

    #[test]
    fn new_element_is_pristine() {
        let el = element();
        assert!(el.is_pristine());
        assert_eq!(el.tag(), "div");
    }

    #[test]
    fn clear_children_keeps_attributes() {
        let mut el = element();
        el.append_child(ScratchNode::Text("a".into()));
        el.append_child(ScratchNode::Comment("b".into()));
        el.set_attribute("id", "probe");

        el.clear_children();

        assert!(el.children().is_empty());
        assert_eq!(el.get_attribute("id"), Some("probe"));
        assert!(!el.is_pristine());
    }

    #[test]
    fn style_property_reads_style_declaration() {
        let el = element();
        let style = el.get("style");
        assert_eq!(style.category(), TypeCategory::Object);
        assert_eq!(
            style.as_object().map(|s| s.category_of("cssText")),
            Some(TypeCategory::String)
        );
    }

    #[test]
    fn attributes_round_trip() {
        let mut el = element();
        el.set_attribute("name", "x");
        assert_eq!(el.remove_attribute("name"), Some("x".to_string()));
        assert!(el.is_pristine());
    }

    #[test]
    fn last_child_tracks_appends() {
        let mut el = element();
        assert!(el.last_child().is_none());
        el.append_child(ScratchNode::Element {
            tag: "span".into(),
            children: vec![],
        });
        assert!(matches!(el.last_child(), Some(ScratchNode::Element { .. })));
    }
}
