//! Capability values.
//!
//! Most probes answer with a boolean, but a probe may return any value
//! (for example an object carrying auxiliary detail) as long as callers
//! can coerce it to a boolean.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The memoized result of a capability probe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapValue(Value);

impl CapValue {
    /// Wrap an arbitrary JSON value.
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Boolean coercion: `null`, `false`, zero and `""` are falsy.
    pub fn is_truthy(&self) -> bool {
        match &self.0 {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
            Value::String(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) => true,
        }
    }

    /// The value if it is a plain boolean.
    pub fn as_bool(&self) -> Option<bool> {
        self.0.as_bool()
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_inner(self) -> Value {
        self.0
    }
}

impl From<bool> for CapValue {
    fn from(b: bool) -> Self {
        Self(Value::Bool(b))
    }
}

impl From<&str> for CapValue {
    fn from(s: &str) -> Self {
        Self(Value::String(s.to_string()))
    }
}

impl From<String> for CapValue {
    fn from(s: String) -> Self {
        Self(Value::String(s))
    }
}

impl From<i64> for CapValue {
    fn from(n: i64) -> Self {
        Self(Value::from(n))
    }
}

/// JSON has no infinities, so `±inf` is kept as the string `"Infinity"` or
/// `"-Infinity"` (truthy) and `NaN` becomes `null` (falsy).
impl From<f64> for CapValue {
    fn from(n: f64) -> Self {
        match serde_json::Number::from_f64(n) {
            Some(number) => Self(Value::Number(number)),
            None if n.is_nan() => Self(Value::Null),
            None if n > 0.0 => Self(Value::String("Infinity".to_string())),
            None => Self(Value::String("-Infinity".to_string())),
        }
    }
}

impl From<Value> for CapValue {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for CapValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
