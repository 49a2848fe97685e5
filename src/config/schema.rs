//! Configuration schema definitions for hasprobe.
//!
//! This module contains the struct definitions that map to the YAML
//! configuration file format.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::Result;
use crate::host::{HostEnvironment, HostObject, HostValue, TypeCategory};
use crate::store::ProbeStore;

/// Root configuration structure for `hasprobe.yml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct StoreConfig {
    /// Description of the host environment to probe
    pub host: HostConfig,

    /// Literal capability values registered after the probe catalogue
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub overrides: BTreeMap<String, serde_json::Value>,

    /// Capabilities evaluated as soon as the config is applied
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub eager: Vec<String>,

    /// Log filter directive (e.g. "hasprobe=debug")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
}

/// Host surfaces, each described as property name -> type category.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct HostConfig {
    /// Properties of the global object
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub global: BTreeMap<String, TypeCategory>,

    /// Properties of the document; omit for non-presentational hosts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<BTreeMap<String, TypeCategory>>,

    /// Properties of created elements
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub element: BTreeMap<String, TypeCategory>,

    /// Style slots of created elements
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub style: BTreeMap<String, TypeCategory>,
}

fn build_object(properties: &BTreeMap<String, TypeCategory>) -> HostObject {
    properties
        .iter()
        .map(|(name, category)| (name.as_str(), HostValue::placeholder(*category, name)))
        .collect()
}

impl HostConfig {
    /// Build the host environment this config describes.
    pub fn build(&self) -> HostEnvironment {
        HostEnvironment {
            global: build_object(&self.global),
            document: self.document.as_ref().map(build_object),
            element: build_object(&self.element),
            style: build_object(&self.style),
        }
    }
}

impl StoreConfig {
    /// Create a store for the configured host.
    ///
    /// Probes still need registering; call [`apply`](Self::apply) once the
    /// catalogue is in place.
    pub fn build_store(&self) -> ProbeStore {
        ProbeStore::new(self.host.build())
    }

    /// Install the global tracing subscriber using `log_filter`.
    ///
    /// Returns `false` if a subscriber was already installed.
    pub fn init_logging(&self, debug: bool) -> bool {
        crate::logging::init_tracing(self.log_filter.as_deref(), debug)
    }

    /// Register overrides (replacing catalogue entries) and evaluate the
    /// eager list.
    ///
    /// # Errors
    ///
    /// Returns the first eager probe failure.
    pub fn apply(&self, store: &ProbeStore) -> Result<()> {
        for (name, value) in &self.overrides {
            store.register(name.as_str(), value.clone(), false);
        }
        for name in &self.eager {
            if store.query(name)?.is_none() {
                tracing::warn!("Eager capability '{}' is not registered", name);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::RecordState;

    #[test]
    fn default_config_is_headless() {
        let env = StoreConfig::default().host.build();
        assert!(!env.is_presentational());
        assert!(env.global.is_empty());
    }

    #[test]
    fn host_config_builds_categories() {
        let host = HostConfig {
            global: BTreeMap::from([("location".to_string(), TypeCategory::Object)]),
            document: Some(BTreeMap::from([(
                "createElement".to_string(),
                TypeCategory::Function,
            )])),
            element: BTreeMap::new(),
            style: BTreeMap::from([("WebkitTransform".to_string(), TypeCategory::String)]),
        };

        let env = host.build();
        assert_eq!(env.global.category_of("location"), TypeCategory::Object);
        assert!(env.create_scratch_element().is_some());
        assert_eq!(
            env.style.category_of("WebkitTransform"),
            TypeCategory::String
        );
    }

    #[test]
    fn apply_overrides_replace_registered_probes() {
        let config = StoreConfig {
            overrides: BTreeMap::from([("canvas".to_string(), serde_json::json!(false))]),
            ..Default::default()
        };
        let store = config.build_store();
        store.add("canvas", |_| Ok(true));

        config.apply(&store).unwrap();
        assert!(!store.has("canvas").unwrap());
    }

    #[test]
    fn apply_evaluates_eager_names() {
        let config = StoreConfig {
            eager: vec!["json".to_string(), "missing".to_string()],
            ..Default::default()
        };
        let store = config.build_store();
        store.add("json", |_| Ok(true));

        config.apply(&store).unwrap();
        assert_eq!(store.state("json"), Some(RecordState::Resolved));
    }

    #[test]
    fn apply_propagates_eager_failure() {
        let config = StoreConfig {
            eager: vec!["broken".to_string()],
            ..Default::default()
        };
        let store = config.build_store();
        store.add("broken", |_| -> anyhow::Result<bool> { anyhow::bail!("nope") });

        assert!(config.apply(&store).is_err());
    }
}
