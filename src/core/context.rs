//! Run context - configuration, adapters, state, and metrics for one run

use crate::core::step::StageOptions;
use crate::ports::AdapterBinding;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Execution context for a single recipe run
///
/// Carries the merged configuration, the resolved adapter bindings, the
/// accumulated run state, and the ordered metric log. A `RunContext` is never
/// mutated in place: every update operation returns a new value with exactly
/// the targeted field changed. The configuration and adapter maps are shared
/// structurally (`Arc`), so snapshots are cheap to retain for replay/audit.
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Merged, validated configuration (read-only for the run's duration)
    config: Arc<HashMap<String, Value>>,

    /// Resolved capability bindings, fixed at creation
    adapters: Arc<HashMap<String, AdapterBinding>>,

    /// Accumulated run state, updated only through `put_state`
    state: HashMap<String, Value>,

    /// Ordered metric log, appended in chronological (recording) order
    metrics: Vec<MetricEvent>,

    /// Run-identifying metadata
    metadata: RunMetadata,

    /// Name of the stage currently executing (set by the interpreter)
    current_stage: Option<String>,

    /// Options of the stage currently executing
    stage_opts: StageOptions,
}

/// A single recorded metric event
///
/// Events are append-only and ordered by insertion; `step` is the event's
/// ordinal position in the log at recording time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricEvent {
    /// Metric name (e.g. "loss", "eval/accuracy")
    pub name: String,

    /// Recorded value
    pub value: f64,

    /// Ordinal position in the metric log
    pub step: usize,

    /// Stage that was executing when the metric was recorded (if any)
    pub stage: Option<String>,

    /// When the metric was recorded
    pub timestamp: DateTime<Utc>,

    /// Free-form metric metadata
    pub metadata: HashMap<String, String>,
}

/// Run-identifying metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMetadata {
    /// Unique run identifier
    pub run_id: Uuid,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// Free-form extension fields
    pub extra: HashMap<String, String>,
}

impl RunMetadata {
    /// Create metadata for a run starting now
    pub fn new(run_id: Uuid) -> Self {
        Self {
            run_id,
            started_at: Utc::now(),
            extra: HashMap::new(),
        }
    }
}

impl RunContext {
    /// Create a context for a new run
    pub fn new(
        config: HashMap<String, Value>,
        adapters: HashMap<String, AdapterBinding>,
        metadata: RunMetadata,
    ) -> Self {
        Self {
            config: Arc::new(config),
            adapters: Arc::new(adapters),
            state: HashMap::new(),
            metrics: Vec::new(),
            metadata,
            current_stage: None,
            stage_opts: StageOptions::new(),
        }
    }

    /// Get a configuration value
    pub fn config_value(&self, key: &str) -> Option<&Value> {
        self.config.get(key)
    }

    /// The full merged configuration
    pub fn config(&self) -> &HashMap<String, Value> {
        &self.config
    }

    /// Get the binding resolved for a capability, if any
    pub fn adapter(&self, capability: &str) -> Option<&AdapterBinding> {
        self.adapters.get(capability)
    }

    /// All resolved capability bindings
    pub fn adapters(&self) -> &HashMap<String, AdapterBinding> {
        &self.adapters
    }

    /// Get a state value
    pub fn state(&self, key: &str) -> Option<&Value> {
        self.state.get(key)
    }

    /// All accumulated state
    pub fn state_map(&self) -> &HashMap<String, Value> {
        &self.state
    }

    /// Return a new context with `key` mapped to `value` in state
    ///
    /// `self` is left untouched; the returned context shares `config` and
    /// `adapters` with it.
    pub fn put_state(&self, key: impl Into<String>, value: Value) -> Self {
        let mut next = self.clone();
        next.state.insert(key.into(), value);
        next
    }

    /// Return a new context with a metric appended to the log
    pub fn record_metric(&self, name: impl Into<String>, value: f64) -> Self {
        self.record_metric_with(name, value, HashMap::new())
    }

    /// Return a new context with a metric (and its metadata) appended
    pub fn record_metric_with(
        &self,
        name: impl Into<String>,
        value: f64,
        metadata: HashMap<String, String>,
    ) -> Self {
        let mut next = self.clone();
        next.metrics.push(MetricEvent {
            name: name.into(),
            value,
            step: self.metrics.len(),
            stage: self.current_stage.clone(),
            timestamp: Utc::now(),
            metadata,
        });
        next
    }

    /// The metric log, in recording order
    pub fn metrics(&self) -> &[MetricEvent] {
        &self.metrics
    }

    /// Run metadata
    pub fn metadata(&self) -> &RunMetadata {
        &self.metadata
    }

    /// Return a new context with an extension metadata field set
    pub fn with_meta(&self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.metadata.extra.insert(key.into(), value.into());
        next
    }

    /// Name of the stage currently executing, if any
    pub fn current_stage(&self) -> Option<&str> {
        self.current_stage.as_deref()
    }

    /// Options of the stage currently executing
    pub fn stage_options(&self) -> &StageOptions {
        &self.stage_opts
    }

    /// Return a new context with stage bookkeeping set (interpreter use)
    pub fn enter_stage(&self, name: impl Into<String>, options: &StageOptions) -> Self {
        let mut next = self.clone();
        next.current_stage = Some(name.into());
        next.stage_opts = options.clone();
        next
    }

    /// Return a new context with stage bookkeeping cleared (interpreter use)
    pub fn leave_stage(&self) -> Self {
        let mut next = self.clone();
        next.current_stage = None;
        next.stage_opts = StageOptions::new();
        next
    }
}
