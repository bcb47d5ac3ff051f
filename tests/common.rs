//! Common test utilities for building topologies and schema catalogs.
use keiro::prelude::*;
use serde_json::json;

#[allow(dead_code)]
pub const RTSP: &str = "#Type.Rtsp";
#[allow(dead_code)]
pub const IOT_SOURCE: &str = "#Type.IotMessageSource";
#[allow(dead_code)]
pub const MOTION: &str = "#Type.MotionDetection";
#[allow(dead_code)]
pub const SIGNAL_GATE: &str = "#Type.SignalGate";
#[allow(dead_code)]
pub const FILE_SINK: &str = "#Type.FileSink";

/// Parses a `json!` literal into a topology.
#[allow(dead_code)]
pub fn topology(value: serde_json::Value) -> Topology {
    serde_json::from_value(value).expect("test topology must deserialize")
}

/// A catalog covering the node types the tests exchange with the fake
/// pipeline service.
#[allow(dead_code)]
pub fn sample_catalog() -> StaticCatalog {
    StaticCatalog::builder()
        .definition(
            NodeDefinition::new(RTSP)
                .with_kind(NodeKind::Source)
                .with_schema(PropertySchema::object([
                    (
                        "endpoint",
                        PropertySchema::object([
                            ("url", PropertySchema::scalar("string")),
                            (
                                "credentials",
                                PropertySchema::object([
                                    ("username", PropertySchema::scalar("string")),
                                    ("password", PropertySchema::scalar("string")),
                                ]),
                            ),
                        ]),
                    ),
                    (
                        "transport",
                        PropertySchema::scalar("string").with_allowed_values(["tcp", "http"]),
                    ),
                ])),
        )
        .definition(
            NodeDefinition::new(IOT_SOURCE)
                .with_kind(NodeKind::Source)
                .with_schema(PropertySchema::object([(
                    "hubInputName",
                    PropertySchema::scalar("string"),
                )]))
                .with_constraints(NodeConstraints {
                    prohibited_downstream: vec![FILE_SINK.to_string()],
                    ..NodeConstraints::default()
                }),
        )
        .definition(
            NodeDefinition::new(MOTION)
                .with_kind(NodeKind::Processor)
                .with_schema(
                    PropertySchema::object([("sensitivity", PropertySchema::scalar("string"))])
                        .with_required(["sensitivity"]),
                )
                .with_constraints(NodeConstraints {
                    max_count: Some(1),
                    ..NodeConstraints::default()
                }),
        )
        .definition(
            NodeDefinition::new(SIGNAL_GATE)
                .with_kind(NodeKind::Processor)
                .with_schema(PropertySchema::object([(
                    "activationWindow",
                    PropertySchema::scalar("string"),
                )]))
                .with_constraints(NodeConstraints {
                    required_directly_downstream: vec![FILE_SINK.to_string()],
                    ..NodeConstraints::default()
                })
                .with_help_link("https://example.invalid/signal-gate"),
        )
        .definition(
            NodeDefinition::new(FILE_SINK)
                .with_kind(NodeKind::Sink)
                .with_schema(PropertySchema::object([(
                    "filePathPattern",
                    PropertySchema::scalar("string"),
                )])),
        )
        .build()
}

/// The two-node camera-to-file topology.
#[allow(dead_code)]
pub fn simple_topology() -> Topology {
    topology(json!({
        "name": "g",
        "properties": {
            "sources": [{"@type": RTSP, "name": "cam1"}],
            "sinks": [{"@type": FILE_SINK, "name": "out", "inputs": [{"nodeName": "cam1"}]}]
        }
    }))
}

/// A camera -> motion detection -> file recording chain exercising nested
/// properties, parameters, a description and an api version.
#[allow(dead_code)]
pub fn pipeline_topology() -> Topology {
    topology(json!({
        "name": "evaluation",
        "properties": {
            "description": "motion gated recording",
            "sources": [{
                "@type": RTSP,
                "name": "cam1",
                "endpoint": {
                    "url": "rtsp://camera.local/stream",
                    "credentials": {"username": "admin", "password": "${password}"}
                },
                "transport": "tcp"
            }],
            "processors": [{
                "@type": MOTION,
                "name": "motion",
                "sensitivity": "medium",
                "inputs": [{"nodeName": "cam1"}]
            }],
            "sinks": [{
                "@type": FILE_SINK,
                "name": "out",
                "filePathPattern": "/video/recording.mp4",
                "inputs": [{"nodeName": "motion"}]
            }],
            "parameters": [{"name": "password", "type": "SecretString", "defaultValue": ""}]
        },
        "@apiVersion": "1.0"
    }))
}
