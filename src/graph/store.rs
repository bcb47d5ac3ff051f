use ahash::AHashMap;

use super::canvas::{Port, VisualEdge, VisualNode};
use crate::topology::NodeInput;

/// Allocates opaque element ids, unique for one visual graph's lifetime.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn allocate(&mut self, prefix: &str) -> String {
        self.next += 1;
        format!("{}-{}", prefix, self.next)
    }
}

/// The graph structure store: the visual node and edge collections plus a
/// name index rebuilt whenever the collections are replaced. On duplicate
/// names the index keeps the first occurrence.
#[derive(Debug, Clone, Default)]
pub struct GraphStore {
    nodes: Vec<VisualNode>,
    edges: Vec<VisualEdge>,
    name_index: AHashMap<String, usize>,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &[VisualNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[VisualEdge] {
        &self.edges
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.name_index.clear();
    }

    pub(crate) fn push_node(&mut self, node: VisualNode) {
        self.name_index
            .entry(node.name.clone())
            .or_insert(self.nodes.len());
        self.nodes.push(node);
    }

    pub(crate) fn push_edge(&mut self, edge: VisualEdge) {
        self.edges.push(edge);
    }

    pub(crate) fn replace(&mut self, nodes: Vec<VisualNode>, edges: Vec<VisualEdge>) {
        self.nodes = nodes;
        self.edges = edges;
        self.rebuild_index();
    }

    // In-place rewrites must not touch node names or the name index goes
    // stale; layout and parameter substitution only change x/y and the
    // property tree.
    pub(crate) fn nodes_mut(&mut self) -> &mut [VisualNode] {
        &mut self.nodes
    }

    fn rebuild_index(&mut self) {
        self.name_index.clear();
        for (position, node) in self.nodes.iter().enumerate() {
            self.name_index.entry(node.name.clone()).or_insert(position);
        }
    }

    pub fn node_by_name(&self, name: &str) -> Option<&VisualNode> {
        self.name_index
            .get(name)
            .and_then(|position| self.nodes.get(*position))
    }

    pub fn node_by_id(&self, id: &str) -> Option<&VisualNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// The named node's input or output port, as the edge-resolution step
    /// needs it.
    pub fn port_for(&self, node_name: &str, input: bool) -> Option<&Port> {
        let node = self.node_by_name(node_name)?;
        if input {
            node.input_port()
        } else {
            node.output_port()
        }
    }

    /// The declarative `inputs` list for the node with `id`: upstream record
    /// names in edge insertion order.
    pub fn inputs_for(&self, id: &str) -> Vec<NodeInput> {
        self.edges
            .iter()
            .filter(|edge| edge.target == id)
            .filter_map(|edge| self.node_by_id(&edge.source))
            .map(|node| NodeInput::new(node.record_name()))
            .collect()
    }

    pub fn contains_discriminator(&self, discriminator: &str) -> bool {
        self.nodes
            .iter()
            .any(|node| node.discriminator() == discriminator)
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.nodes.iter().any(|node| node.id == id)
    }
}
