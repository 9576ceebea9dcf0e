//! User run configuration loaded from YAML

use crate::core::recipe::RecipeConfig;
use anyhow::{Context, Result};
use std::path::Path;

/// Load a user configuration from a YAML file
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<RecipeConfig> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file {}", path.as_ref().display()))?;
    from_yaml(&content)
}

/// Parse a user configuration from a YAML string
///
/// The document must be a mapping of option name to value; an empty document
/// yields an empty configuration.
pub fn from_yaml(yaml: &str) -> Result<RecipeConfig> {
    if yaml.trim().is_empty() {
        return Ok(RecipeConfig::new());
    }
    let config: RecipeConfig =
        serde_yaml::from_str(yaml).context("Failed to parse run config YAML")?;
    Ok(config)
}
