//! Test: end-to-end runs through the recipe runner

use crate::helpers::*;
use serde_json::json;
use std::sync::{Arc, Mutex};
use trainflow::ports::registry::{DATASET_STORE, METRICS_STORE, TRAINING_CLIENT};
use trainflow::{
    AdapterMap, InMemoryRunStore, RecipeConfig, RecipeRunner, RunError, RunStatus, RunStore,
    Step, ValidationError, WorkflowInterpreter,
};

fn training_recipe(trace: Arc<Mutex<Vec<String>>>) -> TestRecipe {
    TestRecipe::new("sl-basic")
        .with_default("learning_rate", json!(0.001))
        .requires(TRAINING_CLIENT)
        .requires(DATASET_STORE)
        .optionally(METRICS_STORE)
        .with_workflow(vec![
            Step::stage("load_data", Arc::new(RecordingStage::new(trace.clone()))),
            Step::stage("train", Arc::new(RecordingStage::new(trace.clone()))),
            Step::stage("save", Arc::new(RecordingStage::new(trace))),
        ])
}

#[tokio::test]
async fn test_missing_required_adapter_blocks_interpretation() {
    let trace: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let recipe = training_recipe(trace.clone());

    // Only training_client is provided; dataset_store is absent
    let adapters = AdapterMap::new().bind(TRAINING_CLIENT, Arc::new(MockTrainingClient));

    let runner = RecipeRunner::default();
    let err = runner
        .run(&recipe, &RecipeConfig::new(), &adapters)
        .await
        .unwrap_err();

    match err {
        RunError::Validation(errors) => {
            assert_eq!(
                errors,
                vec![ValidationError::Missing {
                    capability: DATASET_STORE.to_string()
                }]
            );
        }
        other => panic!("expected validation failure, got {other}"),
    }

    // Interpretation never started
    assert!(trace.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_full_run_with_optional_adapter_present() {
    init_logging();
    let trace: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let recipe = training_recipe(trace.clone());

    let adapters = AdapterMap::new()
        .bind(TRAINING_CLIENT, Arc::new(MockTrainingClient))
        .bind(DATASET_STORE, Arc::new(MockDatasetStore))
        .bind(METRICS_STORE, Arc::new(MockMetricsStore));

    let runner = RecipeRunner::default();
    let ctx = runner
        .run(&recipe, &RecipeConfig::new(), &adapters)
        .await
        .unwrap();

    assert_eq!(
        *trace.lock().unwrap(),
        vec!["load_data".to_string(), "train".to_string(), "save".to_string()]
    );
    assert!(ctx.adapter(METRICS_STORE).is_some());
    assert_eq!(ctx.config_value("learning_rate"), Some(&json!(0.001)));
}

#[tokio::test]
async fn test_absent_optional_adapter_is_skipped() {
    let trace: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let recipe = training_recipe(trace);

    let adapters = AdapterMap::new()
        .bind(TRAINING_CLIENT, Arc::new(MockTrainingClient))
        .bind(DATASET_STORE, Arc::new(MockDatasetStore));

    let runner = RecipeRunner::default();
    let ctx = runner
        .run(&recipe, &RecipeConfig::new(), &adapters)
        .await
        .unwrap();

    assert!(ctx.adapter(METRICS_STORE).is_none());
    assert!(ctx.adapter(TRAINING_CLIENT).is_some());
}

#[tokio::test]
async fn test_user_config_overrides_recipe_default() {
    let trace: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let recipe = training_recipe(trace);

    let adapters = AdapterMap::new()
        .bind(TRAINING_CLIENT, Arc::new(MockTrainingClient))
        .bind(DATASET_STORE, Arc::new(MockDatasetStore));
    let user = RecipeConfig::from([("learning_rate".to_string(), json!(0.01))]);

    let runner = RecipeRunner::default();
    let ctx = runner.run(&recipe, &user, &adapters).await.unwrap();

    assert_eq!(ctx.config_value("learning_rate"), Some(&json!(0.01)));
}

#[tokio::test]
async fn test_events_and_history_observe_the_run() {
    let trace: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let recipe = training_recipe(trace);

    let adapters = AdapterMap::new()
        .bind(TRAINING_CLIENT, Arc::new(MockTrainingClient))
        .bind(DATASET_STORE, Arc::new(MockDatasetStore));

    let completed: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = completed.clone();
    let interpreter = WorkflowInterpreter::new().on_event(move |event| {
        if let trainflow::RunEvent::StageCompleted { stage } = event {
            sink.lock().unwrap().push(stage.clone());
        }
    });

    let store = Arc::new(InMemoryRunStore::new());
    let runner = RecipeRunner::new(interpreter).with_history(store.clone());
    runner
        .run(&recipe, &RecipeConfig::new(), &adapters)
        .await
        .unwrap();

    assert_eq!(
        *completed.lock().unwrap(),
        vec!["load_data".to_string(), "train".to_string(), "save".to_string()]
    );

    let summaries = store.recent(1);
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].status, RunStatus::Completed);
    assert_eq!(summaries[0].recipe_name, "sl-basic");
}
