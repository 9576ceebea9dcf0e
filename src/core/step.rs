//! Step domain model - stages, loops, and their handler seams

use crate::core::context::RunContext;
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Options passed to a stage handler alongside the context
pub type StageOptions = HashMap<String, Value>;

/// Trait for stage handlers - every `Step::Stage` points at one
///
/// A handler receives the current context and the stage's options and returns
/// either an updated context or a failure. Handlers may block on backend
/// calls; the interpreter awaits them strictly sequentially and imposes no
/// timeout or retry of its own.
#[async_trait]
pub trait StageHandler: Send + Sync {
    /// Execute one unit of work against the current context
    async fn execute(&self, ctx: RunContext, options: &StageOptions) -> Result<RunContext>;
}

/// Trait for loop iteration sources
///
/// Evaluated against the context as it stands when the loop is reached; must
/// produce a finite, ordered sequence of iteration values.
pub trait IterationSource: Send + Sync {
    fn iterations(&self, ctx: &RunContext) -> Result<Vec<Value>>;
}

/// Adapts a plain closure to the iteration-source seam
pub struct FnSource<F>(pub F);

impl<F> IterationSource for FnSource<F>
where
    F: Fn(&RunContext) -> Result<Vec<Value>> + Send + Sync,
{
    fn iterations(&self, ctx: &RunContext) -> Result<Vec<Value>> {
        (self.0)(ctx)
    }
}

/// Iteration source that counts `0..n`, with `n` read from a config field
#[derive(Debug, Clone)]
pub struct ConfigCount {
    key: String,
}

impl ConfigCount {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl IterationSource for ConfigCount {
    fn iterations(&self, ctx: &RunContext) -> Result<Vec<Value>> {
        let count = ctx
            .config_value(&self.key)
            .ok_or_else(|| anyhow::anyhow!("config field '{}' not set", self.key))?
            .as_u64()
            .ok_or_else(|| {
                anyhow::anyhow!("config field '{}' is not a non-negative integer", self.key)
            })?;

        Ok((0..count).map(Value::from).collect())
    }
}

/// Iteration source over a fixed list of values
#[derive(Debug, Clone)]
pub struct FixedValues(pub Vec<Value>);

impl IterationSource for FixedValues {
    fn iterations(&self, _ctx: &RunContext) -> Result<Vec<Value>> {
        Ok(self.0.clone())
    }
}

/// A single step in a recipe workflow
///
/// Steps are immutable and nest only through `Loop::body`; the structure is a
/// tree built once from the recipe definition, so no cycles are possible.
#[derive(Clone)]
pub enum Step {
    /// A single unit of work
    Stage {
        name: String,
        handler: Arc<dyn StageHandler>,
        options: StageOptions,
    },

    /// Bounded repetition of a sub-sequence of steps
    ///
    /// The body runs once per value produced by `source`. While iterating,
    /// the interpreter publishes the current iteration value into run state
    /// under the loop's name.
    Loop {
        name: String,
        source: Arc<dyn IterationSource>,
        body: Vec<Step>,
    },
}

impl Step {
    /// Create a stage with empty options
    pub fn stage(name: impl Into<String>, handler: Arc<dyn StageHandler>) -> Self {
        Self::stage_with(name, handler, StageOptions::new())
    }

    /// Create a stage with options
    pub fn stage_with(
        name: impl Into<String>,
        handler: Arc<dyn StageHandler>,
        options: StageOptions,
    ) -> Self {
        Step::Stage {
            name: name.into(),
            handler,
            options,
        }
    }

    /// Create a loop over an iteration source
    pub fn loop_over(
        name: impl Into<String>,
        source: Arc<dyn IterationSource>,
        body: Vec<Step>,
    ) -> Self {
        Step::Loop {
            name: name.into(),
            source,
            body,
        }
    }

    /// The step's name
    pub fn name(&self) -> &str {
        match self {
            Step::Stage { name, .. } => name,
            Step::Loop { name, .. } => name,
        }
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Stage { name, options, .. } => f
                .debug_struct("Stage")
                .field("name", name)
                .field("options", options)
                .finish_non_exhaustive(),
            Step::Loop { name, body, .. } => f
                .debug_struct("Loop")
                .field("name", name)
                .field("body", body)
                .finish_non_exhaustive(),
        }
    }
}
