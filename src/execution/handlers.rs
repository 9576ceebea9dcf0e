//! Built-in stage handlers

use crate::core::{RunContext, StageHandler, StageOptions};
use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

/// Stage handler that passes the context through unchanged
///
/// Useful as a placeholder while sketching a recipe's workflow.
pub struct NoopStage;

#[async_trait]
impl StageHandler for NoopStage {
    async fn execute(&self, ctx: RunContext, _options: &StageOptions) -> Result<RunContext> {
        debug!(
            "Noop stage '{}'",
            ctx.current_stage().unwrap_or("<unnamed>")
        );
        Ok(ctx)
    }
}

/// Adapts a plain closure to the stage handler seam
pub struct FnStage<F>(pub F);

#[async_trait]
impl<F> StageHandler for FnStage<F>
where
    F: Fn(RunContext, &StageOptions) -> Result<RunContext> + Send + Sync,
{
    async fn execute(&self, ctx: RunContext, options: &StageOptions) -> Result<RunContext> {
        (self.0)(ctx, options)
    }
}
