//! trainflow - declarative orchestration for multi-step ML training recipes
//!
//! Recipes describe a job declaratively: default configuration, the
//! capabilities it needs (bound to concrete adapters at runtime), and an
//! ordered workflow of stages and bounded loops. The runner validates the
//! adapter map against the recipe's requirements before anything executes,
//! then interprets the workflow against an immutable-per-step run context.

pub mod core;
pub mod execution;
pub mod history;
pub mod ports;

// Re-export commonly used types
pub use crate::core::{
    MetricEvent, Recipe, RecipeConfig, RunContext, RunMetadata, StageHandler, StageOptions, Step,
};
pub use crate::execution::{
    FnStage, NoopStage, RecipeRunner, RunError, RunEvent, RunStatus, WorkflowInterpreter,
};
pub use crate::history::{InMemoryRunStore, RunStore, RunSummary};
pub use crate::ports::{Adapter, AdapterBinding, AdapterEntry, AdapterMap, ValidationError};
