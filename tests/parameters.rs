//! Parameter store behavior: declarations, usage scanning and substitution.
mod common;
use common::*;
use keiro::params::{placeholder, references_placeholder, strip_placeholder};
use keiro::prelude::*;
use serde_json::json;

#[test]
fn placeholder_uses_the_template_literal_form() {
    assert_eq!(placeholder("password"), "${password}");
}

#[test]
fn scan_matches_whole_string_leaves_only() {
    let tree = json!({
        "endpoint": {
            "url": "rtsp://${host}/stream",
            "credentials": {"password": "${password}"}
        },
        "retries": [1, 2, {"backoff": "${password}"}],
        "enabled": true
    });

    assert!(references_placeholder(&tree, "password"));
    // Partial interpolation is not part of the format.
    assert!(!references_placeholder(&tree, "host"));
    assert!(!references_placeholder(&tree, "enabled"));
}

#[test]
fn scan_recurses_through_arrays_and_objects() {
    let tree = json!([[{"deep": {"deeper": "${p}"}}]]);
    assert!(references_placeholder(&tree, "p"));
    assert!(!references_placeholder(&tree, "q"));
}

#[test]
fn strip_rebuilds_without_touching_the_source() {
    let tree = json!({
        "credentials": {"username": "admin", "password": "${password}"},
        "attempts": ["${password}", "keep"]
    });
    let original = tree.clone();

    let stripped = strip_placeholder(&tree, "password");
    assert_eq!(tree, original);
    assert_eq!(
        stripped,
        json!({
            "credentials": {"username": "admin", "password": ""},
            "attempts": ["", "keep"]
        })
    );
}

#[test]
fn strip_is_idempotent() {
    let tree = json!({"password": "${password}"});
    let once = strip_placeholder(&tree, "password");
    let twice = strip_placeholder(&once, "password");
    assert_eq!(once, twice);
    assert!(!references_placeholder(&once, "password"));
}

#[test]
fn declare_replaces_in_place_and_preserves_order() {
    let mut store = ParameterStore::new();
    store.declare(ParameterDeclaration::new("a", "String"));
    store.declare(ParameterDeclaration::new("b", "Int"));
    store.declare(ParameterDeclaration::new("a", "SecretString").with_default("hunter2"));

    let names: Vec<&str> = store
        .declarations()
        .iter()
        .map(|declaration| declaration.name.as_str())
        .collect();
    assert_eq!(names, vec!["a", "b"]);
    assert_eq!(store.get("a").unwrap().kind, "SecretString");
}

#[test]
fn remove_returns_the_declaration() {
    let mut store = ParameterStore::new();
    store.declare(ParameterDeclaration::new("a", "String"));
    assert!(store.is_declared("a"));
    assert_eq!(store.len(), 1);

    let removed = store.remove("a").unwrap();
    assert_eq!(removed.name, "a");
    assert!(store.remove("a").is_none());
    assert!(store.is_empty());
}

#[test]
fn stores_round_trip_their_declarations() {
    let declarations = vec![
        ParameterDeclaration::new("a", "String"),
        ParameterDeclaration::new("b", "Int"),
    ];
    let store = ParameterStore::from_declarations(declarations.clone());
    assert_eq!(store.into_declarations(), declarations);
}

#[test]
fn model_tracks_parameter_usage_across_nodes() {
    let model = GraphModel::import(pipeline_topology());
    assert!(model.parameter_in_use("password"));
    assert!(!model.parameter_in_use("user"));
    assert_eq!(model.parameters().len(), 1);
}

#[test]
fn removing_a_parameter_blanks_its_occurrences() {
    let mut model = GraphModel::import(pipeline_topology());

    let removed = model.remove_parameter("password").unwrap();
    assert_eq!(removed.name, "password");
    assert!(!model.parameter_in_use("password"));
    assert!(model.parameters().is_empty());

    let exported = serde_json::to_value(model.export(&sample_catalog())).unwrap();
    assert_eq!(
        exported["properties"]["sources"][0]["endpoint"]["credentials"]["password"],
        json!("")
    );
    assert!(exported["properties"].get("parameters").is_none());

    // Removing again is a no-op.
    assert!(model.remove_parameter("password").is_none());
}

#[test]
fn declared_parameters_survive_a_round_trip() {
    let mut model = GraphModel::import(simple_topology());
    model.declare_parameter(ParameterDeclaration::new("recordingPath", "String").with_value("/tmp"));

    let exported = model.export(&sample_catalog());
    assert_eq!(exported.properties.parameters.len(), 1);
    assert_eq!(exported.properties.parameters[0].name, "recordingPath");

    let reimported = GraphModel::import(exported);
    assert_eq!(reimported.parameters().len(), 1);
}
