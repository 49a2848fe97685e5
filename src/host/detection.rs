//! Host-type detection and the capability check abstraction.
//!
//! [`is_host_type`] answers "is this property plausibly a working host
//! feature?" A property whose category is `object` counts only when truthy
//! (so `null` is rejected); any other non-primitive category counts, since
//! platform objects sometimes report categories like `unknown` while being
//! fully functional.

use super::object::HostObject;
use super::value::{HostValue, TypeCategory};

/// Whether a value looks like a present host feature.
pub fn is_host_like(value: &HostValue) -> bool {
    match value.category() {
        TypeCategory::Object => value.is_truthy(),
        category => !category.is_primitive(),
    }
}

/// Whether `object[property]` looks like a present host feature.
pub fn is_host_type(object: &HostObject, property: &str) -> bool {
    is_host_like(object.get(property))
}

/// How to check a host object for a capability.
///
/// Checks are plain data so probes can be described declaratively and
/// evaluated against any [`HostObject`].
#[derive(Debug, Clone)]
pub enum HostCheck {
    /// The property key exists, whatever its value.
    Present(String),

    /// The property reports exactly the expected category.
    Category {
        property: String,
        expected: TypeCategory,
    },

    /// The property passes [`is_host_type`].
    HostType(String),

    /// Invoking the function succeeds and reports support.
    /// An error counts as unsupported.
    Invokes(fn(&HostObject) -> anyhow::Result<bool>),

    /// Every sub-check must pass.
    All(Vec<HostCheck>),

    /// Any of the sub-checks passing is sufficient.
    Any(Vec<HostCheck>),
}

impl HostCheck {
    pub fn present(property: impl Into<String>) -> Self {
        HostCheck::Present(property.into())
    }

    pub fn category(property: impl Into<String>, expected: TypeCategory) -> Self {
        HostCheck::Category {
            property: property.into(),
            expected,
        }
    }

    pub fn host_type(property: impl Into<String>) -> Self {
        HostCheck::HostType(property.into())
    }

    /// All of the given properties must pass [`is_host_type`].
    pub fn host_types(properties: &[&str]) -> Self {
        HostCheck::All(properties.iter().map(|p| HostCheck::host_type(*p)).collect())
    }

    /// Evaluate the check against an object.
    pub fn evaluate(&self, object: &HostObject) -> bool {
        match self {
            HostCheck::Present(property) => object.contains(property),
            HostCheck::Category { property, expected } => {
                object.category_of(property) == *expected
            }
            HostCheck::HostType(property) => is_host_type(object, property),
            HostCheck::Invokes(call) => match call(object) {
                Ok(supported) => supported,
                Err(e) => {
                    tracing::trace!("Invocation check failed: {:#}", e);
                    false
                }
            },
            HostCheck::All(checks) => checks.iter().all(|c| c.evaluate(object)),
            HostCheck::Any(checks) => checks.iter().any(|c| c.evaluate(object)),
        }
    }
}
