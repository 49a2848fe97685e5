//! Configuration loading and schema for hasprobe.
//!
//! A config file describes the host environment to probe, literal
//! capability overrides, and which capabilities to evaluate eagerly.
//!
//! # Example
//!
//! ```
//! use hasprobe::config::parse_config;
//! use std::path::Path;
//!
//! let config = parse_config(
//!     "host:\n  global:\n    JSON: object\noverrides:\n  canvas: false\n",
//!     Path::new("hasprobe.yml"),
//! )
//! .unwrap();
//! let store = config.build_store();
//! config.apply(&store).unwrap();
//! assert!(!store.has("canvas").unwrap());
//! ```
//!
//! # Configuration File Locations
//!
//! 1. The file named by `HASPROBE_CONFIG`
//! 2. `hasprobe.yml` under the project root
//! 3. `.hasprobe/config.yml` under the project root

pub mod loader;
pub mod schema;

pub use loader::{discover, load, load_config_file, load_with_env, parse_config, CONFIG_ENV_VAR};
pub use schema::{HostConfig, StoreConfig};

/// JSON schema of the configuration file format.
pub fn json_schema() -> serde_json::Value {
    serde_json::to_value(schemars::schema_for!(StoreConfig)).unwrap_or_default()
}
