//! Feature records on disk feeding the evaluator.

mod common;

use common::fixtures::PairSetBuilder;
use tempfile::TempDir;
use verifold::storage::{self, FeatureRecord, FeatureStore, JsonFeatureRecord};
use verifold::{CheckpointTracker, EvalSettings, Evaluator};

#[test]
fn test_stored_record_evaluates_identically() {
    let dir = TempDir::new().expect("temp dir");
    let store = FeatureStore::new(dir.path().to_path_buf());
    let pairs = PairSetBuilder::new().dim(16).noise(1.2).build();

    store.store("epoch-001", &pairs).expect("store");
    let loaded = store.load("epoch-001").expect("load");

    let evaluator = Evaluator::new(EvalSettings::new(10, 1_000)).expect("evaluator");
    assert_eq!(
        evaluator.evaluate(&pairs).expect("original"),
        evaluator.evaluate(&loaded).expect("loaded")
    );
}

#[test]
fn test_json_import_then_record_roundtrip() {
    let dir = TempDir::new().expect("temp dir");
    let pairs = PairSetBuilder::new().dim(4).pairs_per_fold(4).build();
    let record = FeatureRecord::from_pair_set(&pairs).expect("record");

    let json_path = dir.path().join("features.json");
    let json = serde_json::to_string(&JsonFeatureRecord::from(&record)).expect("serialize");
    std::fs::write(&json_path, json).expect("write json");

    let from_json = storage::read_json_pair_set(&json_path).expect("read json");
    assert_eq!(from_json, pairs);

    let rkyv_path = dir.path().join("features.rkyv");
    let imported = JsonFeatureRecord::from_reader(std::fs::File::open(&json_path).expect("open"))
        .expect("parse")
        .into_record()
        .expect("record");
    storage::write_record(&rkyv_path, &imported).expect("write");

    assert_eq!(storage::read_pair_set(&rkyv_path).expect("read"), pairs);
}

#[test]
fn test_best_checkpoint_across_stored_epochs() {
    let dir = TempDir::new().expect("temp dir");
    let store = FeatureStore::new(dir.path().to_path_buf());

    // Later epochs have cleaner genuine pairs.
    for (epoch, noise) in [(1, 3.0f32), (2, 0.05), (3, 1.5)] {
        let pairs = PairSetBuilder::new()
            .dim(8)
            .noise(noise)
            .seed(epoch as u64)
            .build();
        store
            .store(&format!("epoch-{epoch:03}"), &pairs)
            .expect("store");
    }

    let evaluator = Evaluator::new(EvalSettings::new(10, 1_000)).expect("evaluator");
    let mut tracker = CheckpointTracker::new();
    for name in store.list().expect("list") {
        let pairs = store.load(&name).expect("load");
        let result = evaluator.evaluate(&pairs).expect("evaluation");
        tracker.observe(name, &result);
    }

    assert_eq!(tracker.observed(), 3);
    assert_eq!(tracker.best().expect("best").label, "epoch-002");
}
