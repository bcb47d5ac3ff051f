//! Snapshot persistence of an editing session.
mod common;
use common::*;
use keiro::prelude::*;

#[test]
fn snapshot_round_trips_through_bytes() {
    let model = GraphModel::import(pipeline_topology());
    let snapshot = model.snapshot(&sample_catalog());

    let bytes = snapshot.to_bytes().unwrap();
    let restored = GraphSnapshot::from_bytes(&bytes).unwrap();
    assert_eq!(restored, snapshot);
}

#[test]
fn restore_keeps_ids_and_coordinates() {
    let model = GraphModel::import(pipeline_topology());
    let snapshot = model.snapshot(&sample_catalog());

    let restored = GraphModel::restore(snapshot.clone());
    for (kept, original) in restored.store().nodes().iter().zip(model.store().nodes()) {
        assert_eq!(kept.id, original.id);
        assert_eq!(kept.x, original.x);
        assert_eq!(kept.y, original.y);
    }
    assert_eq!(restored.store().edges(), model.store().edges());
    assert_eq!(restored.name(), "evaluation");
}

#[test]
fn snapshot_carries_the_exported_topology() {
    let model = GraphModel::import(pipeline_topology());
    let snapshot = model.snapshot(&sample_catalog());

    let direct = serde_json::to_value(model.export(&sample_catalog())).unwrap();
    let captured = serde_json::to_value(&snapshot.topology).unwrap();
    assert_eq!(captured, direct);
}
