//! Workflow interpretation and run orchestration

pub mod handlers;
pub mod interpreter;
pub mod orchestrator;

pub use handlers::{FnStage, NoopStage};
pub use interpreter::{EventHandler, RunEvent, WorkflowInterpreter};
pub use orchestrator::{RecipeRunner, RunIdGenerator, UuidRunIds};

use crate::ports::ValidationError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Terminal state of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    /// All steps executed; the final context was returned
    Completed,
    /// The run halted at its first failing step
    Failed,
}

/// Errors a run can terminate with
///
/// Validation-time errors (`InvalidConfig`, `Validation`) are reported before
/// any stage executes; `Stage` and `IterationSource` halt the run immediately
/// when detected. Nothing is retried and nothing is downgraded to a log line.
#[derive(Debug, Error)]
pub enum RunError {
    /// Recipe-level config validation failed
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The adapter map does not satisfy the recipe's requirements
    #[error("adapter validation failed with {} error(s): {}", .0.len(), format_validation_errors(.0))]
    Validation(Vec<ValidationError>),

    /// A stage handler reported failure
    #[error("stage '{stage}' failed: {reason}")]
    Stage { stage: String, reason: String },

    /// A loop's iteration source could not be evaluated
    #[error("loop '{name}' iteration source failed: {reason}")]
    IterationSource { name: String, reason: String },
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
