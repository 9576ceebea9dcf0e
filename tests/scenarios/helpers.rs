//! Test utility functions for trainflow scenarios

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::{Arc, Mutex};

use trainflow::core::step::StageOptions;
use trainflow::ports::registry::{
    Operation, DATASET_STORE, METRICS_STORE, TRAINING_CLIENT,
};
use trainflow::{Adapter, Recipe, RecipeConfig, RunContext, StageHandler, Step};

/// Initialize test logging; safe to call from every test
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Mock training client that fully conforms to its interface
pub struct MockTrainingClient;

impl Adapter for MockTrainingClient {
    fn identity(&self) -> &str {
        "MockTrainingClient"
    }

    fn declared_capabilities(&self) -> &[&str] {
        &[TRAINING_CLIENT]
    }

    fn operations(&self) -> &[Operation] {
        const OPS: &[Operation] = &[
            Operation::new("start_session", 1),
            Operation::new("forward_backward", 2),
            Operation::new("optim_step", 2),
            Operation::new("save_state", 2),
            Operation::new("sample", 2),
        ];
        OPS
    }
}

/// Mock dataset store that fully conforms to its interface
pub struct MockDatasetStore;

impl Adapter for MockDatasetStore {
    fn identity(&self) -> &str {
        "MockDatasetStore"
    }

    fn declared_capabilities(&self) -> &[&str] {
        &[DATASET_STORE]
    }

    fn operations(&self) -> &[Operation] {
        const OPS: &[Operation] = &[
            Operation::new("get_dataset", 1),
            Operation::new("list_datasets", 0),
            Operation::new("put_dataset", 2),
        ];
        OPS
    }
}

/// Mock metrics store that fully conforms to its interface
pub struct MockMetricsStore;

impl Adapter for MockMetricsStore {
    fn identity(&self) -> &str {
        "MockMetricsStore"
    }

    fn declared_capabilities(&self) -> &[&str] {
        &[METRICS_STORE]
    }

    fn operations(&self) -> &[Operation] {
        const OPS: &[Operation] = &[Operation::new("record", 3), Operation::new("flush", 0)];
        OPS
    }
}

/// Training client missing part of its interface (declares, under-exports)
pub struct PartialTrainingClient;

impl Adapter for PartialTrainingClient {
    fn identity(&self) -> &str {
        "PartialTrainingClient"
    }

    fn declared_capabilities(&self) -> &[&str] {
        &[TRAINING_CLIENT]
    }

    fn operations(&self) -> &[Operation] {
        const OPS: &[Operation] = &[
            Operation::new("start_session", 1),
            Operation::new("forward_backward", 2),
        ];
        OPS
    }
}

/// Stage handler that appends its stage name to a shared trace
pub struct RecordingStage {
    trace: Arc<Mutex<Vec<String>>>,
}

impl RecordingStage {
    pub fn new(trace: Arc<Mutex<Vec<String>>>) -> Self {
        Self { trace }
    }
}

#[async_trait]
impl StageHandler for RecordingStage {
    async fn execute(&self, ctx: RunContext, _options: &StageOptions) -> Result<RunContext> {
        let stage = ctx.current_stage().unwrap_or("<unnamed>").to_string();
        self.trace.lock().unwrap().push(stage);
        Ok(ctx)
    }
}

/// Stage handler that always fails with the given reason
pub struct FailingStage {
    pub reason: &'static str,
}

#[async_trait]
impl StageHandler for FailingStage {
    async fn execute(&self, _ctx: RunContext, _options: &StageOptions) -> Result<RunContext> {
        anyhow::bail!("{}", self.reason)
    }
}

/// Configurable recipe for scenario tests
pub struct TestRecipe {
    pub name: String,
    pub defaults: RecipeConfig,
    pub required: Vec<String>,
    pub optional: Vec<String>,
    pub workflow: Vec<Step>,
}

impl TestRecipe {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            defaults: RecipeConfig::new(),
            required: Vec::new(),
            optional: Vec::new(),
            workflow: Vec::new(),
        }
    }

    pub fn with_default(mut self, key: &str, value: Value) -> Self {
        self.defaults.insert(key.to_string(), value);
        self
    }

    pub fn requires(mut self, capability: &str) -> Self {
        self.required.push(capability.to_string());
        self
    }

    pub fn optionally(mut self, capability: &str) -> Self {
        self.optional.push(capability.to_string());
        self
    }

    pub fn with_workflow(mut self, workflow: Vec<Step>) -> Self {
        self.workflow = workflow;
        self
    }
}

impl Recipe for TestRecipe {
    fn name(&self) -> &str {
        &self.name
    }

    fn default_config(&self) -> RecipeConfig {
        self.defaults.clone()
    }

    fn required_adapters(&self) -> Vec<String> {
        self.required.clone()
    }

    fn optional_adapters(&self) -> Vec<String> {
        self.optional.clone()
    }

    fn workflow(&self) -> Vec<Step> {
        self.workflow.clone()
    }
}
