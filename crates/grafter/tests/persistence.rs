//! Integration tests for the JSON Lines operation store.
//!
//! # Test Coverage
//!
//! - Round trip through save and load
//! - Rehydration of legacy `{ "id": ... }` records
//! - Unrecognized records are dropped without failing the load
//! - Saves leave no temporary file behind

use grafter::domain::Graph;
use grafter::operations::Operation;
use grafter::persistence::{JsonlOperationStore, OperationStore};
use grafter::pipeline::{OperationList, Pipeline};
use grafter::sources::SourceRef;
use std::path::PathBuf;
use tempfile::TempDir;

// =============================================================================
// Test Helpers
// =============================================================================

fn store_in(dir: &TempDir) -> JsonlOperationStore {
    JsonlOperationStore::new(dir.path().join("operations.jsonl"))
}

fn sample_operations() -> Vec<Operation> {
    vec![
        Operation::source(SourceRef::Example),
        Operation::source(SourceRef::File(PathBuf::from("graphs/team.json"))),
        Operation::add_all(),
        Operation::group_collapse("etl"),
        Operation::start_filter("A"),
        Operation::remove_group("security"),
    ]
}

// =============================================================================
// Round Trip
// =============================================================================

#[tokio::test]
async fn test_missing_file_loads_empty() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    assert!(store.load().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_save_and_load_preserves_order() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    store.save(&sample_operations()).await.unwrap();

    assert_eq!(store.load().await.unwrap(), sample_operations());
}

#[tokio::test]
async fn test_saved_records_use_kind_and_target() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    store
        .save(&[Operation::add_all(), Operation::grow_in("B")])
        .await
        .unwrap();

    let content = std::fs::read_to_string(store.path()).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(
        lines,
        vec![
            r#"{"kind":"add-all"}"#,
            r#"{"kind":"grow-in","targetId":"B"}"#,
        ]
    );
}

#[tokio::test]
async fn test_save_replaces_previous_list() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    store.save(&sample_operations()).await.unwrap();
    store.save(&[Operation::add_all()]).await.unwrap();

    assert_eq!(store.load().await.unwrap(), vec![Operation::add_all()]);
}

#[tokio::test]
async fn test_save_leaves_no_temp_file() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    store.save(&sample_operations()).await.unwrap();

    let names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["operations.jsonl".to_string()]);
}

// =============================================================================
// Legacy and Corrupted Records
// =============================================================================

#[tokio::test]
async fn test_legacy_records_are_rehydrated() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    std::fs::write(
        store.path(),
        concat!(
            "{\"id\":\"example-source\"}\n",
            "{\"id\":\"all-nodes\"}\n",
            "{\"id\":\"add-group-constructive-etl\"}\n",
            "{\"id\":\"filter-connected-F\"}\n",
            "{\"id\":\"remove-node-A\"}\n",
        ),
    )
    .unwrap();

    assert_eq!(
        store.load().await.unwrap(),
        vec![
            Operation::source(SourceRef::Example),
            Operation::add_all(),
            Operation::add_group("etl"),
            Operation::connected_filter("F"),
            Operation::remove_node("A"),
        ]
    );
}

#[tokio::test]
async fn test_unrecognized_records_are_dropped() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    std::fs::write(
        store.path(),
        concat!(
            "{\"kind\":\"add-all\"}\n",
            "\n",
            "{\"id\":\"teleport-node-A\"}\n",
            "{\"kind\":\"explode\",\"targetId\":\"A\"}\n",
            "this is not json\n",
            "{\"kind\":\"end-filter\",\"targetId\":\"Z\"}\n",
        ),
    )
    .unwrap();

    assert_eq!(
        store.load().await.unwrap(),
        vec![Operation::add_all(), Operation::end_filter("Z")]
    );
}

#[tokio::test]
async fn test_duplicate_records_collapse_in_list() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    std::fs::write(
        store.path(),
        concat!(
            "{\"kind\":\"add-all\"}\n",
            "{\"id\":\"all-nodes\"}\n",
            "{\"kind\":\"start-filter\",\"targetId\":\"A\"}\n",
        ),
    )
    .unwrap();

    let list = OperationList::from_ordered(store.load().await.unwrap());
    assert_eq!(list.len(), 2);
}

#[tokio::test]
async fn test_reloaded_list_runs_like_original() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let operations = vec![
        Operation::source(SourceRef::Example),
        Operation::add_all(),
        Operation::group_collapse("etl"),
        Operation::end_filter("Z"),
    ];

    store.save(&operations).await.unwrap();
    let reloaded = store.load().await.unwrap();

    let pipeline = Pipeline::default();
    let original = pipeline.run(Graph::empty(), &operations).await.unwrap();
    let replayed = pipeline.run(Graph::empty(), &reloaded).await.unwrap();

    assert_eq!(
        original.state.result.fingerprint().unwrap(),
        replayed.state.result.fingerprint().unwrap()
    );
}
