//! The host environment handed to probes.

use super::detection::is_host_type;
use super::element::ScratchElement;
use super::object::HostObject;

/// Description of the host a store probes: its global object, an optional
/// document, and what a freshly created element looks like.
#[derive(Debug, Clone, Default)]
pub struct HostEnvironment {
    /// The global object.
    pub global: HostObject,
    /// The document, absent in non-presentational hosts.
    pub document: Option<HostObject>,
    /// Host properties of elements the document creates.
    pub element: HostObject,
    /// Style slots of elements the document creates.
    pub style: HostObject,
}

impl HostEnvironment {
    /// A host without any document, such as a server-side runtime.
    pub fn headless(global: HostObject) -> Self {
        Self {
            global,
            ..Self::default()
        }
    }

    /// A host with a document.
    pub fn presentational(global: HostObject, document: HostObject) -> Self {
        Self {
            global,
            document: Some(document),
            ..Self::default()
        }
    }

    /// Set the element surface (properties and style) created elements expose.
    pub fn with_element(mut self, element: HostObject, style: HostObject) -> Self {
        self.element = element;
        self.style = style;
        self
    }

    /// Whether probes can rely on a document.
    pub fn is_presentational(&self) -> bool {
        self.document.is_some()
    }

    /// Create the scratch element, if the document can create elements.
    pub fn create_scratch_element(&self) -> Option<ScratchElement> {
        let document = self.document.as_ref()?;
        if !is_host_type(document, "createElement") {
            return None;
        }
        Some(ScratchElement::new(
            "div",
            self.element.clone(),
            self.style.clone(),
        ))
    }
}
