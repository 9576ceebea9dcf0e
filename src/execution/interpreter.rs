//! Workflow interpreter - walks a recipe's step tree against a run context

use crate::core::{Recipe, RunContext, Step};
use crate::execution::{RunError, RunStatus};
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tracing::{debug, error, info};
use uuid::Uuid;

/// Events emitted while a workflow is interpreted
///
/// Observational only: handlers cannot influence execution.
#[derive(Debug, Clone)]
pub enum RunEvent {
    RunStarted {
        run_id: Uuid,
        recipe: String,
    },
    StageStarted {
        stage: String,
    },
    StageCompleted {
        stage: String,
    },
    StageFailed {
        stage: String,
        error: String,
    },
    LoopStarted {
        name: String,
        iterations: usize,
    },
    LoopIteration {
        name: String,
        index: usize,
        value: Value,
    },
    RunCompleted {
        run_id: Uuid,
        status: RunStatus,
    },
}

/// Type for event handlers
pub type EventHandler = Arc<dyn Fn(&RunEvent) + Send + Sync>;

/// Interprets a recipe's workflow: depth-first, strictly sequential
///
/// The interpreter assumes a well-formed context: the orchestrating caller
/// has already merged defaults, validated the config, and validated the
/// adapter map. Stages and loop bodies execute one at a time; the first
/// failure halts the run and the failed run's context is discarded.
#[derive(Default)]
pub struct WorkflowInterpreter {
    event_handlers: Vec<EventHandler>,
}

impl WorkflowInterpreter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an event handler
    pub fn on_event<F>(mut self, handler: F) -> Self
    where
        F: Fn(&RunEvent) + Send + Sync + 'static,
    {
        self.event_handlers.push(Arc::new(handler));
        self
    }

    fn emit(&self, event: RunEvent) {
        for handler in &self.event_handlers {
            handler(&event);
        }
    }

    /// Execute the recipe's workflow top-to-bottom, threading the context
    pub async fn run(
        &self,
        recipe: &dyn Recipe,
        ctx: RunContext,
    ) -> Result<RunContext, RunError> {
        let run_id = ctx.metadata().run_id;
        info!("Starting run {} of recipe '{}'", run_id, recipe.name());
        self.emit(RunEvent::RunStarted {
            run_id,
            recipe: recipe.name().to_string(),
        });

        let workflow = recipe.workflow();
        let result = self.run_steps(&workflow, ctx).await;

        let status = match &result {
            Ok(_) => RunStatus::Completed,
            Err(_) => RunStatus::Failed,
        };
        info!("Run {} finished: {:?}", run_id, status);
        self.emit(RunEvent::RunCompleted { run_id, status });

        result
    }

    /// Execute a step list in order, threading the context forward
    ///
    /// Boxed future because loop bodies recurse into this function.
    fn run_steps<'a>(
        &'a self,
        steps: &'a [Step],
        ctx: RunContext,
    ) -> Pin<Box<dyn Future<Output = Result<RunContext, RunError>> + Send + 'a>> {
        Box::pin(async move {
            let mut ctx = ctx;
            for step in steps {
                ctx = match step {
                    Step::Stage {
                        name,
                        handler,
                        options,
                    } => {
                        debug!("Executing stage '{}'", name);
                        self.emit(RunEvent::StageStarted {
                            stage: name.clone(),
                        });

                        let staged = ctx.enter_stage(name.clone(), options);
                        match handler.execute(staged, options).await {
                            Ok(next) => {
                                self.emit(RunEvent::StageCompleted {
                                    stage: name.clone(),
                                });
                                next.leave_stage()
                            }
                            Err(e) => {
                                error!("Stage '{}' failed: {}", name, e);
                                self.emit(RunEvent::StageFailed {
                                    stage: name.clone(),
                                    error: e.to_string(),
                                });
                                return Err(RunError::Stage {
                                    stage: name.clone(),
                                    reason: e.to_string(),
                                });
                            }
                        }
                    }
                    Step::Loop { name, source, body } => {
                        // Evaluated against the context as it stands now
                        let values =
                            source
                                .iterations(&ctx)
                                .map_err(|e| RunError::IterationSource {
                                    name: name.clone(),
                                    reason: e.to_string(),
                                })?;

                        debug!("Loop '{}' over {} iteration(s)", name, values.len());
                        self.emit(RunEvent::LoopStarted {
                            name: name.clone(),
                            iterations: values.len(),
                        });

                        let mut loop_ctx = ctx;
                        for (index, value) in values.into_iter().enumerate() {
                            self.emit(RunEvent::LoopIteration {
                                name: name.clone(),
                                index,
                                value: value.clone(),
                            });
                            // State accumulates across iterations; the current
                            // iteration value is published under the loop name.
                            loop_ctx = loop_ctx.put_state(name.clone(), value);
                            loop_ctx = self.run_steps(body, loop_ctx).await?;
                        }
                        loop_ctx
                    }
                };
            }
            Ok(ctx)
        })
    }
}
