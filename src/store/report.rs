//! Enumeration outcomes and audit reports.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::value::CapValue;
use crate::error::HasprobeError;

/// The result of forcing one capability during enumeration.
///
/// Serializes as `{"value": <value>}`, or as `{"error": "<message>"}` for a
/// probe that failed. An object-valued capability never reads back as the
/// error marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Value(CapValue),
    Error(String),
}

impl Outcome {
    pub(crate) fn from_error(err: &HasprobeError) -> Self {
        let message = match err {
            HasprobeError::ProbeFailed { message, .. } => message.clone(),
            other => other.to_string(),
        };
        Outcome::Error(message)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Outcome::Error(_))
    }

    pub fn value(&self) -> Option<&CapValue> {
        match self {
            Outcome::Value(value) => Some(value),
            Outcome::Error(_) => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Outcome::Error(message) => Some(message),
            Outcome::Value(_) => None,
        }
    }
}

/// A timestamped snapshot of every registered capability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditReport {
    pub generated_at: DateTime<Utc>,
    pub results: BTreeMap<String, Outcome>,
}

impl AuditReport {
    pub fn new(results: BTreeMap<String, Outcome>) -> Self {
        Self {
            generated_at: Utc::now(),
            results,
        }
    }

    /// Names whose probe failed.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &str)> {
        self.results
            .iter()
            .filter_map(|(name, outcome)| Some((name.as_str(), outcome.error_message()?)))
    }

    /// Names whose value is truthy.
    pub fn supported(&self) -> impl Iterator<Item = &str> {
        self.results.iter().filter_map(|(name, outcome)| {
            outcome
                .value()
                .filter(|v| v.is_truthy())
                .map(|_| name.as_str())
        })
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
