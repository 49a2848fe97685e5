//! Host object property bags.

use std::collections::BTreeMap;

use super::value::{HostValue, TypeCategory};

static UNDEFINED: HostValue = HostValue::Undefined;

/// An object exposed by the host environment, modelled as named properties.
///
/// Reading a property that is not present yields [`HostValue::Undefined`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostObject {
    properties: BTreeMap<String, HostValue>,
}

impl HostObject {
    /// Create an empty object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style property setter.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<HostValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Builder-style setter for a callable property.
    pub fn with_function(self, key: &str) -> Self {
        let name = key.to_string();
        self.with(key, HostValue::Function(name))
    }

    /// Set a property, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<HostValue>) {
        self.properties.insert(key.into(), value.into());
    }

    /// Remove a property, returning its previous value.
    pub fn remove(&mut self, key: &str) -> Option<HostValue> {
        self.properties.remove(key)
    }

    /// Read a property.
    pub fn get(&self, key: &str) -> &HostValue {
        self.properties.get(key).unwrap_or(&UNDEFINED)
    }

    /// Whether the key exists at all, regardless of its value.
    pub fn contains(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    /// Type category of a property; `undefined` when absent.
    pub fn category_of(&self, key: &str) -> TypeCategory {
        self.get(key).category()
    }

    /// Iterate over property names in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, HostValue)> for HostObject {
    fn from_iter<I: IntoIterator<Item = (K, HostValue)>>(iter: I) -> Self {
        Self {
            properties: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
