//! Configuration file discovery and loading.

use crate::config::schema::StoreConfig;
use crate::error::{HasprobeError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "HASPROBE_CONFIG";

/// Candidate config locations relative to a root, in priority order.
const CONFIG_CANDIDATES: &[&str] = &["hasprobe.yml", ".hasprobe/config.yml"];

/// Find a config file under `root`.
pub fn discover(root: &Path) -> Option<PathBuf> {
    CONFIG_CANDIDATES
        .iter()
        .map(|candidate| root.join(candidate))
        .find(|path| path.is_file())
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<StoreConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            HasprobeError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            HasprobeError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into a [`StoreConfig`].
///
/// `source_path` is only used for error reporting.
pub fn parse_config(content: &str, source_path: &Path) -> Result<StoreConfig> {
    if content.trim().is_empty() {
        return Ok(StoreConfig::default());
    }
    serde_yaml::from_str(content).map_err(|e| HasprobeError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load the config for a project root.
///
/// `HASPROBE_CONFIG` wins when set; otherwise the first discovered file
/// under `root` is used, falling back to the defaults.
pub fn load(root: &Path) -> Result<StoreConfig> {
    load_with_env(root, |key| std::env::var(key))
}

/// [`load`] with a custom env var lookup function.
///
/// This allows testing without modifying actual environment variables.
pub fn load_with_env<F>(root: &Path, env_fn: F) -> Result<StoreConfig>
where
    F: Fn(&str) -> std::result::Result<String, std::env::VarError>,
{
    if let Ok(path) = env_fn(CONFIG_ENV_VAR) {
        if !path.is_empty() {
            tracing::debug!("Loading config from {} ({})", path, CONFIG_ENV_VAR);
            return load_config_file(Path::new(&path));
        }
    }
    match discover(root) {
        Some(path) => {
            tracing::debug!("Loading config from {}", path.display());
            load_config_file(&path)
        }
        None => Ok(StoreConfig::default()),
    }
}
