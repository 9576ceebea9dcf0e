//! Recipe runner - the orchestrating caller around the interpreter

use crate::core::context::RunMetadata;
use crate::core::{merge_config, Recipe, RecipeConfig, RunContext};
use crate::execution::{RunError, RunStatus, WorkflowInterpreter};
use crate::history::{RunStore, RunSummary};
use crate::ports::{resolve, resolve_or_fail, validate, AdapterBinding, AdapterMap};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Run-identifier generation seam
///
/// Injected so tests can substitute deterministic ids; the default generator
/// uses random UUIDs.
pub trait RunIdGenerator: Send + Sync {
    fn next_id(&self) -> Uuid;
}

/// Default generator: random (v4) UUIDs
pub struct UuidRunIds;

impl RunIdGenerator for UuidRunIds {
    fn next_id(&self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Runs recipes end to end
///
/// Merges the recipe's defaults with user config, validates the merged
/// config, validates the adapter map against the recipe's requirements,
/// resolves the bindings, builds the initial context, and hands the workflow
/// to the interpreter. All validation happens before any stage executes; a
/// run never starts in a known-bad configuration.
pub struct RecipeRunner {
    interpreter: WorkflowInterpreter,
    id_gen: Arc<dyn RunIdGenerator>,
    history: Option<Arc<dyn RunStore>>,
}

impl Default for RecipeRunner {
    fn default() -> Self {
        Self::new(WorkflowInterpreter::new())
    }
}

impl RecipeRunner {
    pub fn new(interpreter: WorkflowInterpreter) -> Self {
        Self {
            interpreter,
            id_gen: Arc::new(UuidRunIds),
            history: None,
        }
    }

    /// Substitute the run-identifier generator
    pub fn with_id_generator(mut self, id_gen: Arc<dyn RunIdGenerator>) -> Self {
        self.id_gen = id_gen;
        self
    }

    /// Record a summary into `store` whenever a run terminates
    pub fn with_history(mut self, store: Arc<dyn RunStore>) -> Self {
        self.history = Some(store);
        self
    }

    /// Execute one run of `recipe`
    pub async fn run(
        &self,
        recipe: &dyn Recipe,
        user_config: &RecipeConfig,
        adapters: &AdapterMap,
    ) -> Result<RunContext, RunError> {
        let config = merge_config(recipe.default_config(), user_config);
        recipe
            .validate_config(&config)
            .map_err(|e| RunError::InvalidConfig(e.to_string()))?;

        let required = recipe.required_adapters();
        if let Err(errors) = validate(adapters, &required) {
            warn!(
                "Recipe '{}' rejected: {} adapter validation error(s)",
                recipe.name(),
                errors.len()
            );
            return Err(RunError::Validation(errors));
        }

        let mut bindings: HashMap<String, AdapterBinding> = HashMap::new();
        for capability in &required {
            let binding = resolve_or_fail(adapters, capability)
                .map_err(|e| RunError::Validation(vec![e]))?;
            bindings.insert(capability.clone(), binding);
        }
        for capability in recipe.optional_adapters() {
            if let Some(binding) = resolve(adapters, &capability) {
                bindings.insert(capability, binding);
            }
        }

        let metadata = RunMetadata::new(self.id_gen.next_id());
        let run_id = metadata.run_id;
        let started_at = metadata.started_at;
        info!("Run {} of '{}' validated, starting", run_id, recipe.name());

        let ctx = RunContext::new(config, bindings, metadata);
        let result = self.interpreter.run(recipe, ctx).await;

        if let Some(store) = &self.history {
            let summary = match &result {
                Ok(ctx) => RunSummary {
                    run_id,
                    recipe_name: recipe.name().to_string(),
                    status: RunStatus::Completed,
                    started_at,
                    finished_at: Utc::now(),
                    metric_count: ctx.metrics().len(),
                    error: None,
                },
                Err(e) => RunSummary {
                    run_id,
                    recipe_name: recipe.name().to_string(),
                    status: RunStatus::Failed,
                    started_at,
                    finished_at: Utc::now(),
                    metric_count: 0,
                    error: Some(e.to_string()),
                },
            };
            store.record(summary);
        }

        result
    }
}
