use super::canvas::{NodeKind, Port, VisualNode};
use super::store::IdAllocator;

/// Display metadata derived from a node's category. Colors are host-theme
/// variable references; the crate makes no styling decisions of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Appearance {
    pub icon_name: &'static str,
    pub color: &'static str,
    pub color_alt: &'static str,
}

/// Category-to-appearance mapping, a pure function of the category.
pub fn appearance_for(kind: NodeKind) -> Appearance {
    match kind {
        NodeKind::Source => Appearance {
            icon_name: "SecurityCamera",
            color: "var(--node-color-source)",
            color_alt: "var(--node-color-source-alt)",
        },
        NodeKind::Processor => Appearance {
            icon_name: "Processing",
            color: "var(--node-color-processor)",
            color_alt: "var(--node-color-processor-alt)",
        },
        NodeKind::Sink => Appearance {
            icon_name: "CloudImportExport",
            color: "var(--node-color-sink)",
            color_alt: "var(--node-color-sink-alt)",
        },
        NodeKind::Other => Appearance {
            icon_name: "",
            color: "",
            color_alt: "",
        },
    }
}

/// The fixed port configuration for a category: a source gets one enabled
/// output, a sink one enabled input, a processor one of each. The output
/// port always comes first.
pub fn ports_for(kind: NodeKind, node_name: &str, ids: &mut IdAllocator) -> Vec<Port> {
    let mut ports = Vec::new();

    if matches!(kind, NodeKind::Source | NodeKind::Processor) {
        ports.push(Port {
            id: ids.allocate("port"),
            is_input_disabled: true,
            is_output_disabled: false,
            name: "output".to_string(),
            aria_label: format!("output of {}", node_name),
        });
    }

    if matches!(kind, NodeKind::Sink | NodeKind::Processor) {
        ports.push(Port {
            id: ids.allocate("port"),
            is_input_disabled: false,
            is_output_disabled: true,
            name: "input".to_string(),
            aria_label: format!("input of {}", node_name),
        });
    }

    ports
}

/// Maps a category to its array key in the topology document.
pub fn category_key(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Source => "sources",
        NodeKind::Processor => "processors",
        NodeKind::Sink => "sinks",
        NodeKind::Other => "",
    }
}

/// Maps a topology document array key back to a category.
pub fn kind_for_key(key: &str) -> NodeKind {
    match key {
        "sources" => NodeKind::Source,
        "processors" => NodeKind::Processor,
        "sinks" => NodeKind::Sink,
        _ => NodeKind::Other,
    }
}

/// Whether the host may draw an edge from `source` to `target`. Unknown
/// categories are allowed through; validation has the final word.
pub fn can_connect(source: &VisualNode, target: &VisualNode) -> bool {
    match source.kind() {
        NodeKind::Source | NodeKind::Processor => {
            matches!(target.kind(), NodeKind::Processor | NodeKind::Sink)
        }
        NodeKind::Sink => false,
        NodeKind::Other => true,
    }
}
