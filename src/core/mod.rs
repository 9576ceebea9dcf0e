//! Core domain models: context, recipe, and step

pub mod config;
pub mod context;
pub mod recipe;
pub mod step;

pub use context::{MetricEvent, RunContext, RunMetadata};
pub use recipe::{merge_config, Recipe, RecipeConfig};
pub use step::{
    ConfigCount, FixedValues, FnSource, IterationSource, StageHandler, StageOptions, Step,
};
