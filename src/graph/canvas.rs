use serde::{Deserialize, Serialize};

use crate::topology::NodeRecord;

/// Structural category of a node in the visual graph.
///
/// `Other` exists for forward compatibility of the canvas contract; import
/// never produces it, and export drops nodes carrying it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Source,
    Processor,
    Sink,
    Other,
}

impl NodeKind {
    pub fn is_source(self) -> bool {
        self == NodeKind::Source
    }

    pub fn is_processor(self) -> bool {
        self == NodeKind::Processor
    }

    pub fn is_sink(self) -> bool {
        self == NodeKind::Sink
    }
}

/// One connection point on a visual node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Port {
    pub id: String,
    pub is_input_disabled: bool,
    pub is_output_disabled: bool,
    pub name: String,
    pub aria_label: String,
}

impl Port {
    pub fn accepts_input(&self) -> bool {
        !self.is_input_disabled
    }

    pub fn emits_output(&self) -> bool {
        !self.is_output_disabled
    }
}

/// The payload the canvas attaches to each node: the raw declarative record,
/// the category, and the category-derived appearance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeData {
    pub node_properties: NodeRecord,
    #[serde(rename = "nodeType")]
    pub node_kind: NodeKind,
    pub color: String,
    pub color_alt: String,
    pub icon_name: String,
}

/// A node in the editable visual graph. The id is generated once at import
/// and is never persisted into the declarative format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualNode {
    pub id: String,
    pub name: String,
    pub aria_label: String,
    pub data: NodeData,
    pub ports: Vec<Port>,
    pub x: f64,
    pub y: f64,
}

impl VisualNode {
    pub fn kind(&self) -> NodeKind {
        self.data.node_kind
    }

    pub fn discriminator(&self) -> &str {
        &self.data.node_properties.discriminator
    }

    /// The node name as the declarative record spells it. Export resolves
    /// names through this field, so a host rename must update the record.
    pub fn record_name(&self) -> &str {
        &self.data.node_properties.name
    }

    pub fn input_port(&self) -> Option<&Port> {
        self.ports.iter().find(|port| port.accepts_input())
    }

    pub fn output_port(&self) -> Option<&Port> {
        self.ports.iter().find(|port| port.emits_output())
    }
}

/// An id-referenced edge between two ports. Exists only in the visual graph;
/// the declarative boundary decomposes it into `inputs` entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub source_port_id: String,
    pub target_port_id: String,
}
