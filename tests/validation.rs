//! Validation engine rules over the visual graph.
mod common;
use common::*;
use keiro::prelude::*;
use serde_json::json;

#[test]
fn valid_pipeline_reports_no_errors() {
    let model = GraphModel::import(pipeline_topology());
    assert!(model.validate(&sample_catalog()).is_empty());
}

#[test]
fn minimal_camera_to_file_graph_is_valid() {
    let model = GraphModel::import(simple_topology());
    assert!(model.validate(&sample_catalog()).is_empty());
}

#[test]
fn dangling_reference_surfaces_as_not_connected() {
    let model = GraphModel::import(topology(json!({
        "name": "g",
        "properties": {
            "sources": [{"@type": RTSP, "name": "cam1"}],
            "sinks": [{"@type": FILE_SINK, "name": "out", "inputs": [{"nodeName": "camX"}]}]
        }
    })));

    let errors = model.validate(&sample_catalog());
    assert_eq!(errors.len(), 2);
    assert!(errors.iter().all(|e| e.kind == ValidationKind::NotConnected));
    let names: Vec<&str> = errors
        .iter()
        .filter_map(|e| e.node_name.as_deref())
        .collect();
    assert!(names.contains(&"cam1"));
    assert!(names.contains(&"out"));
}

#[test]
fn sink_with_outgoing_edge_is_prohibited() {
    // The processor pulls its input from the sink, which gives the sink an
    // outgoing edge in the visual graph.
    let model = GraphModel::import(topology(json!({
        "name": "g",
        "properties": {
            "sources": [{"@type": RTSP, "name": "cam1"}],
            "processors": [{
                "@type": MOTION,
                "name": "motion",
                "sensitivity": "high",
                "inputs": [{"nodeName": "cam1"}, {"nodeName": "out"}]
            }],
            "sinks": [{"@type": FILE_SINK, "name": "out", "inputs": [{"nodeName": "motion"}]}]
        }
    })));

    let errors = model.validate(&sample_catalog());
    assert!(errors.iter().any(|e| {
        e.kind == ValidationKind::ProhibitedAnyDownstream && e.node_name.as_deref() == Some("out")
    }));
}

#[test]
fn missing_required_property_reports_the_dotted_path() {
    let catalog = StaticCatalog::builder()
        .definition(
            NodeDefinition::new(RTSP)
                .with_kind(NodeKind::Source)
                .with_schema(
                    PropertySchema::object([(
                        "endpoint",
                        PropertySchema::object([
                            ("url", PropertySchema::scalar("string")),
                            ("protocol", PropertySchema::scalar("string")),
                        ])
                        .with_required(["url"]),
                    )])
                    .with_required(["endpoint"]),
                ),
        )
        .definition(NodeDefinition::new(FILE_SINK).with_kind(NodeKind::Sink))
        .build();

    let model = GraphModel::import(topology(json!({
        "name": "g",
        "properties": {
            "sources": [{
                "@type": RTSP,
                "name": "cam1",
                "endpoint": {"protocol": "tcp", "url": ""}
            }],
            "sinks": [{"@type": FILE_SINK, "name": "out", "inputs": [{"nodeName": "cam1"}]}]
        }
    })));

    let errors = model.validate(&catalog);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ValidationKind::MissingProperty);
    assert_eq!(errors[0].property.as_deref(), Some("endpoint.url"));
    assert_eq!(errors[0].node_name.as_deref(), Some("cam1"));
}

#[test]
fn absent_required_object_is_reported_without_descending() {
    let catalog = StaticCatalog::builder()
        .definition(
            NodeDefinition::new(RTSP)
                .with_kind(NodeKind::Source)
                .with_schema(
                    PropertySchema::object([(
                        "endpoint",
                        PropertySchema::object([("url", PropertySchema::scalar("string"))])
                            .with_required(["url"]),
                    )])
                    .with_required(["endpoint"]),
                ),
        )
        .definition(NodeDefinition::new(FILE_SINK).with_kind(NodeKind::Sink))
        .build();

    let model = GraphModel::import(topology(json!({
        "name": "g",
        "properties": {
            "sources": [{"@type": RTSP, "name": "cam1"}],
            "sinks": [{"@type": FILE_SINK, "name": "out", "inputs": [{"nodeName": "cam1"}]}]
        }
    })));

    let errors = model.validate(&catalog);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].property.as_deref(), Some("endpoint"));
}

#[test]
fn node_count_limit_is_enforced_per_discriminator() {
    let model = GraphModel::import(topology(json!({
        "name": "g",
        "properties": {
            "sources": [{"@type": RTSP, "name": "cam1"}],
            "processors": [
                {"@type": MOTION, "name": "m1", "sensitivity": "low", "inputs": [{"nodeName": "cam1"}]},
                {"@type": MOTION, "name": "m2", "sensitivity": "high", "inputs": [{"nodeName": "m1"}]}
            ],
            "sinks": [{"@type": FILE_SINK, "name": "out", "inputs": [{"nodeName": "m2"}]}]
        }
    })));

    let errors = model.validate(&sample_catalog());
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ValidationKind::NodeCountLimit);
    assert_eq!(errors[0].node_type.as_deref(), Some(MOTION));
}

#[test]
fn required_direct_downstream_relation_is_checked() {
    let model = GraphModel::import(topology(json!({
        "name": "g",
        "properties": {
            "sources": [{"@type": RTSP, "name": "cam1"}],
            "processors": [
                {"@type": SIGNAL_GATE, "name": "gate", "inputs": [{"nodeName": "cam1"}]},
                {"@type": MOTION, "name": "motion", "sensitivity": "low", "inputs": [{"nodeName": "gate"}]}
            ],
            "sinks": [{"@type": FILE_SINK, "name": "out", "inputs": [{"nodeName": "motion"}]}]
        }
    })));

    let errors = model.validate(&sample_catalog());
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ValidationKind::RequiredDirectlyDownstream);
    assert_eq!(errors[0].node_name.as_deref(), Some("gate"));
    assert_eq!(errors[0].node_type.as_deref(), Some(FILE_SINK));
    assert_eq!(errors[0].parent_type.as_deref(), Some(SIGNAL_GATE));
    assert_eq!(
        errors[0].help_link.as_deref(),
        Some("https://example.invalid/signal-gate")
    );
}

#[test]
fn prohibited_downstream_distinguishes_direct_from_transitive() {
    let direct = GraphModel::import(topology(json!({
        "name": "g",
        "properties": {
            "sources": [{"@type": IOT_SOURCE, "name": "hub"}],
            "sinks": [{"@type": FILE_SINK, "name": "out", "inputs": [{"nodeName": "hub"}]}]
        }
    })));
    let errors = direct.validate(&sample_catalog());
    assert!(errors.iter().any(|e| {
        e.kind == ValidationKind::ProhibitedDirectlyDownstream
            && e.node_name.as_deref() == Some("hub")
            && e.node_type.as_deref() == Some(FILE_SINK)
    }));

    let transitive = GraphModel::import(topology(json!({
        "name": "g",
        "properties": {
            "sources": [{"@type": IOT_SOURCE, "name": "hub"}],
            "processors": [{
                "@type": MOTION,
                "name": "motion",
                "sensitivity": "low",
                "inputs": [{"nodeName": "hub"}]
            }],
            "sinks": [{"@type": FILE_SINK, "name": "out", "inputs": [{"nodeName": "motion"}]}]
        }
    })));
    let errors = transitive.validate(&sample_catalog());
    assert!(errors.iter().any(|e| {
        e.kind == ValidationKind::ProhibitedAnyDownstream
            && e.node_name.as_deref() == Some("hub")
            && e.node_type.as_deref() == Some(FILE_SINK)
    }));
}

#[test]
fn unknown_discriminators_only_get_structural_rules() {
    let model = GraphModel::import(topology(json!({
        "name": "g",
        "properties": {
            "sources": [{"@type": "#Type.Mystery", "name": "a"}],
            "sinks": [{"@type": "#Type.Enigma", "name": "b", "inputs": [{"nodeName": "a"}]}]
        }
    })));
    assert!(model.validate(&sample_catalog()).is_empty());
}

#[test]
fn catalog_documents_load_from_json() {
    let catalog = StaticCatalog::from_json(
        r##"{
            "#Type.Rtsp": {
                "nodeKind": "source",
                "schema": {
                    "type": "object",
                    "properties": {"endpoint": {"type": "object", "properties": {"url": {"type": "string"}}}},
                    "required": ["endpoint"]
                }
            },
            "#Type.FileSink": {
                "nodeKind": "sink",
                "constraints": {"maxCount": 1},
                "helpLink": "https://example.invalid/file-sink"
            }
        }"##,
    )
    .unwrap();
    assert_eq!(catalog.len(), 2);

    let rtsp = catalog.definition("#Type.Rtsp").unwrap();
    assert_eq!(rtsp.discriminator, "#Type.Rtsp");
    assert_eq!(rtsp.node_kind, Some(NodeKind::Source));
    assert!(rtsp.schema.requires("endpoint"));
    assert!(rtsp.schema.property("endpoint").unwrap().is_object());

    let sink = catalog.definition("#Type.FileSink").unwrap();
    assert_eq!(sink.constraints.max_count, Some(1));

    let model = GraphModel::import(topology(serde_json::json!({
        "name": "g",
        "properties": {
            "sources": [{"@type": "#Type.Rtsp", "name": "cam1"}],
            "sinks": [{"@type": "#Type.FileSink", "name": "out", "inputs": [{"nodeName": "cam1"}]}]
        }
    })));
    let errors = model.validate(&catalog);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ValidationKind::MissingProperty);
    assert_eq!(errors[0].property.as_deref(), Some("endpoint"));
}

#[test]
fn validation_never_mutates_the_graph() {
    let model = GraphModel::import(pipeline_topology());
    let before = serde_json::to_value(model.export(&sample_catalog())).unwrap();
    let _ = model.validate(&sample_catalog());
    let after = serde_json::to_value(model.export(&sample_catalog())).unwrap();
    assert_eq!(before, after);
}
