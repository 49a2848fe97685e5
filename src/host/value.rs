//! Host values and their type categories.
//!
//! Platform-provided objects do not always report one of the primitive
//! categories. [`HostValue`] makes every shape explicit so that presence
//! checks are plain functions of a value instead of runtime introspection.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::object::HostObject;

/// The runtime type category a host reports for a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TypeCategory {
    Undefined,
    Boolean,
    Number,
    String,
    Object,
    Function,
    /// Reported by some platform objects that are fully functional.
    Unknown,
}

impl TypeCategory {
    /// Whether this is one of the primitive categories
    /// (`boolean`, `number`, `string`, `undefined`).
    pub fn is_primitive(self) -> bool {
        matches!(
            self,
            TypeCategory::Boolean
                | TypeCategory::Number
                | TypeCategory::String
                | TypeCategory::Undefined
        )
    }
}

impl std::fmt::Display for TypeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TypeCategory::Undefined => "undefined",
            TypeCategory::Boolean => "boolean",
            TypeCategory::Number => "number",
            TypeCategory::String => "string",
            TypeCategory::Object => "object",
            TypeCategory::Function => "function",
            TypeCategory::Unknown => "unknown",
        };
        write!(f, "{}", name)
    }
}

/// A value read from a host object.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum HostValue {
    /// The key is not present (or explicitly undefined).
    #[default]
    Undefined,
    /// A null reference. Categorized as `object`, but falsy.
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Object(HostObject),
    /// A callable, identified by name.
    Function(String),
    /// A platform value whose category is not reported as a known type.
    Unknown,
}

impl HostValue {
    /// The type category the host reports for this value.
    pub fn category(&self) -> TypeCategory {
        match self {
            HostValue::Undefined => TypeCategory::Undefined,
            HostValue::Null | HostValue::Object(_) => TypeCategory::Object,
            HostValue::Bool(_) => TypeCategory::Boolean,
            HostValue::Number(_) => TypeCategory::Number,
            HostValue::String(_) => TypeCategory::String,
            HostValue::Function(_) => TypeCategory::Function,
            HostValue::Unknown => TypeCategory::Unknown,
        }
    }

    /// Boolean coercion of the value.
    pub fn is_truthy(&self) -> bool {
        match self {
            HostValue::Undefined | HostValue::Null => false,
            HostValue::Bool(b) => *b,
            HostValue::Number(n) => *n != 0.0 && !n.is_nan(),
            HostValue::String(s) => !s.is_empty(),
            HostValue::Object(_) | HostValue::Function(_) | HostValue::Unknown => true,
        }
    }

    /// Build a representative value for a declared category.
    ///
    /// Used when a host is described by category only (e.g. from config).
    /// `name` labels functions.
    pub fn placeholder(category: TypeCategory, name: &str) -> Self {
        match category {
            TypeCategory::Undefined => HostValue::Undefined,
            TypeCategory::Boolean => HostValue::Bool(true),
            TypeCategory::Number => HostValue::Number(0.0),
            TypeCategory::String => HostValue::String(String::new()),
            TypeCategory::Object => HostValue::Object(HostObject::new()),
            TypeCategory::Function => HostValue::Function(name.to_string()),
            TypeCategory::Unknown => HostValue::Unknown,
        }
    }

    /// Borrow the inner object, if this is one.
    pub fn as_object(&self) -> Option<&HostObject> {
        match self {
            HostValue::Object(obj) => Some(obj),
            _ => None,
        }
    }
}

impl From<bool> for HostValue {
    fn from(b: bool) -> Self {
        HostValue::Bool(b)
    }
}

impl From<f64> for HostValue {
    fn from(n: f64) -> Self {
        HostValue::Number(n)
    }
}

impl From<&str> for HostValue {
    fn from(s: &str) -> Self {
        HostValue::String(s.to_string())
    }
}

impl From<String> for HostValue {
    fn from(s: String) -> Self {
        HostValue::String(s)
    }
}

impl From<HostObject> for HostValue {
    fn from(obj: HostObject) -> Self {
        HostValue::Object(obj)
    }
}
