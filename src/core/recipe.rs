//! Recipe descriptor - the reusable definition of a multi-step training job

use crate::core::step::Step;
use anyhow::Result;
use serde_json::Value;
use std::collections::HashMap;

/// Option name → value mapping used for defaults, user config, and the merge
pub type RecipeConfig = HashMap<String, Value>;

/// Descriptor interface every recipe exposes
///
/// Recipes are stateless, passive descriptors: they name the capabilities a
/// run must (or may) bind, supply baseline configuration, validate the merged
/// configuration, and hand their workflow to the interpreter unmodified. One
/// recipe value may back many concurrent runs.
pub trait Recipe: Send + Sync {
    /// Recipe name
    fn name(&self) -> &str;

    /// Human-readable description
    fn description(&self) -> &str {
        ""
    }

    /// Baseline option values; user config overrides these key by key
    fn default_config(&self) -> RecipeConfig {
        RecipeConfig::new()
    }

    /// Capability names that must resolve before the run starts
    fn required_adapters(&self) -> Vec<String>;

    /// Capability names that are bound when present, skipped when absent
    fn optional_adapters(&self) -> Vec<String> {
        Vec::new()
    }

    /// The ordered workflow interpreted by the runner
    fn workflow(&self) -> Vec<Step>;

    /// Domain-specific checks over the merged configuration
    ///
    /// Called by the orchestrator after merging and before any adapter is
    /// resolved or any stage executes.
    fn validate_config(&self, _config: &RecipeConfig) -> Result<()> {
        Ok(())
    }
}

/// Merge recipe defaults with user configuration; user values win
pub fn merge_config(defaults: RecipeConfig, user: &RecipeConfig) -> RecipeConfig {
    let mut merged = defaults;
    for (key, value) in user {
        merged.insert(key.clone(), value.clone());
    }
    merged
}
