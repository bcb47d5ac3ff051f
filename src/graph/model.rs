use serde_json::{Map, Value};
use tracing::debug;

use super::canvas::{NodeData, NodeKind, VisualEdge, VisualNode};
use super::factory;
use super::snapshot::GraphSnapshot;
use super::store::{GraphStore, IdAllocator};
use crate::layout::{self, LayoutOptions};
use crate::params::{self, ParameterStore};
use crate::schema::{PropertySchema, SchemaCatalog};
use crate::topology::{NodeRecord, ParameterDeclaration, Topology, TopologyProperties};
use crate::validate::{self, ValidationError};

/// The central translator between declarative topologies and the visual
/// graph.
///
/// The model exclusively owns the graph structure store and the parameter
/// declarations of the current topology. Import replaces everything
/// wholesale; export derives a fresh declarative document from the visual
/// state without mutating it. All operations are synchronous and none of
/// them suspend; a host must serialize its edit dispatch.
#[derive(Debug, Clone, Default)]
pub struct GraphModel {
    // name, description, systemData and apiVersion of the last import; the
    // node arrays in here are drained into the store and stay empty.
    meta: Topology,
    params: ParameterStore,
    store: GraphStore,
    ids: IdAllocator,
    layout_options: LayoutOptions,
}

impl GraphModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a model holding the visual graph for `topology`.
    pub fn import(topology: Topology) -> Self {
        let mut model = Self::new();
        model.replace_topology(topology);
        model
    }

    pub fn with_layout_options(mut self, options: LayoutOptions) -> Self {
        self.layout_options = options;
        self
    }

    /// Wholesale replacement: discards the current graph and rebuilds it
    /// from `topology`. Never a merge.
    ///
    /// Nodes are created per category array in source -> processor -> sink
    /// order; edges are then resolved by looking the referenced names up in
    /// the node set just built. An `inputs` entry naming an unknown node
    /// produces no edge and is dropped silently; the disconnection surfaces
    /// through validation. Finally every node position is computed from
    /// scratch by the layered layout.
    pub fn replace_topology(&mut self, mut topology: Topology) {
        self.store.clear();
        self.ids = IdAllocator::default();
        self.params =
            ParameterStore::from_declarations(std::mem::take(&mut topology.properties.parameters));

        let sources = std::mem::take(&mut topology.properties.sources);
        let processors = std::mem::take(&mut topology.properties.processors);
        let sinks = std::mem::take(&mut topology.properties.sinks);
        for (records, kind) in [
            (sources, NodeKind::Source),
            (processors, NodeKind::Processor),
            (sinks, NodeKind::Sink),
        ] {
            for record in records {
                self.add_node_from_record(record, kind);
            }
        }

        let mut references: Vec<(String, String)> = Vec::new();
        for node in self.store.nodes() {
            let record = &node.data.node_properties;
            for upstream in record.input_names() {
                references.push((upstream.to_string(), record.name.clone()));
            }
        }
        for (upstream, downstream) in references {
            self.connect_by_name(&upstream, &downstream);
        }

        self.meta = topology;
        self.relayout();
        debug!(
            nodes = self.store.nodes().len(),
            edges = self.store.edges().len(),
            "imported topology"
        );
    }

    fn add_node_from_record(&mut self, record: NodeRecord, kind: NodeKind) {
        let appearance = factory::appearance_for(kind);
        let ports = factory::ports_for(kind, &record.name, &mut self.ids);
        let name = record.name.clone();
        let aria_label = format!("pipeline node {}", name);
        self.store.push_node(VisualNode {
            id: self.ids.allocate("node"),
            name,
            aria_label,
            data: NodeData {
                node_properties: record,
                node_kind: kind,
                color: appearance.color.to_string(),
                color_alt: appearance.color_alt.to_string(),
                icon_name: appearance.icon_name.to_string(),
            },
            ports,
            x: 0.0,
            y: 0.0,
        });
    }

    /// Synthesizes an edge from `upstream`'s output port to `downstream`'s
    /// input port, if both nodes and both ports exist.
    fn connect_by_name(&mut self, upstream: &str, downstream: &str) {
        let resolved = (|| {
            let source = self.store.node_by_name(upstream)?;
            let target = self.store.node_by_name(downstream)?;
            let source_port = source.output_port()?;
            let target_port = target.input_port()?;
            Some((
                source.id.clone(),
                target.id.clone(),
                source_port.id.clone(),
                target_port.id.clone(),
            ))
        })();

        if let Some((source, target, source_port_id, target_port_id)) = resolved {
            let id = self.ids.allocate("edge");
            self.store.push_edge(VisualEdge {
                id,
                source,
                target,
                source_port_id,
                target_port_id,
            });
        }
    }

    /// Recomputes every node position from the current node/edge set,
    /// discarding previous coordinates.
    pub fn relayout(&mut self) {
        let node_ids: Vec<String> = self
            .store
            .nodes()
            .iter()
            .map(|node| node.id.clone())
            .collect();
        let edges: Vec<(String, String)> = self
            .store
            .edges()
            .iter()
            .map(|edge| (edge.source.clone(), edge.target.clone()))
            .collect();

        let positions = layout::assign_positions(&node_ids, &edges, &self.layout_options);
        for node in self.store.nodes_mut() {
            if let Some(point) = positions.get(&node.id) {
                node.x = point.x;
                node.y = point.y;
            }
        }
    }

    /// Converts the visual graph back into a declarative topology.
    ///
    /// Each node's `inputs` list is derived from the id-based edges (and
    /// omitted when empty), its record is trimmed to the schema-recognized
    /// properties for its discriminator, and the nodes are bucketed into the
    /// three category arrays. Metadata the backend assigned to the last
    /// import is preserved. Export never fails; unrecognized properties are
    /// simply dropped.
    pub fn export(&self, catalog: &dyn SchemaCatalog) -> Topology {
        let mut sources = Vec::new();
        let mut processors = Vec::new();
        let mut sinks = Vec::new();

        for node in self.store.nodes() {
            let mut record = trimmed_record(&node.data.node_properties, catalog);
            let inputs = self.store.inputs_for(&node.id);
            record.inputs = if inputs.is_empty() { None } else { Some(inputs) };

            match node.kind() {
                NodeKind::Source => sources.push(record),
                NodeKind::Processor => processors.push(record),
                NodeKind::Sink => sinks.push(record),
                NodeKind::Other => {}
            }
        }

        debug!(
            sources = sources.len(),
            processors = processors.len(),
            sinks = sinks.len(),
            "exported topology"
        );
        Topology {
            name: self.meta.name.clone(),
            properties: TopologyProperties {
                sources,
                processors,
                sinks,
                parameters: self.params.declarations().to_vec(),
                description: self.meta.properties.description.clone(),
            },
            system_data: self.meta.system_data.clone(),
            api_version: self.meta.api_version.clone(),
        }
    }

    /// Runs the full validation rule set over the current graph.
    pub fn validate(&self, catalog: &dyn SchemaCatalog) -> Vec<ValidationError> {
        validate::validate(&self.store, catalog)
    }

    /// Replaces the node and edge collections with edited canvas state from
    /// the host UI.
    pub fn set_canvas_data(&mut self, nodes: Vec<VisualNode>, edges: Vec<VisualEdge>) {
        self.store.replace(nodes, edges);
    }

    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    pub fn name(&self) -> &str {
        &self.meta.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.meta.name = name.into();
    }

    pub fn description(&self) -> Option<&str> {
        self.meta.properties.description.as_deref()
    }

    /// Sets the topology description; an empty string removes it.
    pub fn set_description(&mut self, description: &str) {
        self.meta.properties.description = if description.is_empty() {
            None
        } else {
            Some(description.to_string())
        };
    }

    pub fn parameters(&self) -> &[ParameterDeclaration] {
        self.params.declarations()
    }

    pub fn declare_parameter(&mut self, declaration: ParameterDeclaration) {
        self.params.declare(declaration);
    }

    /// Whether any node property leaf equals the `${name}` placeholder.
    pub fn parameter_in_use(&self, name: &str) -> bool {
        self.store.nodes().iter().any(|node| {
            node.data
                .node_properties
                .properties
                .values()
                .any(|value| params::references_placeholder(value, name))
        })
    }

    /// Removes the declaration and blanks out every exact placeholder
    /// occurrence across all node property trees. The trees are rebuilt
    /// immutably as the walk returns. Returns the removed declaration, or
    /// `None` if no such parameter was declared.
    pub fn remove_parameter(&mut self, name: &str) -> Option<ParameterDeclaration> {
        let removed = self.params.remove(name)?;
        for node in self.store.nodes_mut() {
            let properties = &node.data.node_properties.properties;
            let rebuilt: Map<String, Value> = properties
                .iter()
                .map(|(key, value)| (key.clone(), params::strip_placeholder(value, name)))
                .collect();
            node.data.node_properties.properties = rebuilt;
        }
        Some(removed)
    }

    /// Captures the current editing session for host-side persistence.
    pub fn snapshot(&self, catalog: &dyn SchemaCatalog) -> GraphSnapshot {
        GraphSnapshot {
            topology: self.export(catalog),
            nodes: self.store.nodes().to_vec(),
            edges: self.store.edges().to_vec(),
        }
    }

    /// Rebuilds a model from a persisted snapshot, keeping the captured
    /// canvas state (ids and coordinates included) instead of re-deriving it.
    pub fn restore(snapshot: GraphSnapshot) -> Self {
        let mut model = Self::import(snapshot.topology);
        model.set_canvas_data(snapshot.nodes, snapshot.edges);
        model
    }
}

/// Keeps only the schema-recognized properties for the record's
/// discriminator, recursing through `object`-typed slots. A discriminator
/// the catalog does not know is reduced to its `@type` and `name`, so
/// unrecognized future node kinds survive a round trip instead of being
/// destroyed.
fn trimmed_record(record: &NodeRecord, catalog: &dyn SchemaCatalog) -> NodeRecord {
    let Some(definition) = catalog.definition(&record.discriminator) else {
        return NodeRecord::new(record.discriminator.clone(), record.name.clone());
    };

    NodeRecord {
        discriminator: record.discriminator.clone(),
        name: record.name.clone(),
        inputs: None,
        properties: trimmed_properties(&record.properties, &definition.schema),
    }
}

fn trimmed_properties(values: &Map<String, Value>, schema: &PropertySchema) -> Map<String, Value> {
    let mut kept = Map::new();
    let Some(slots) = &schema.properties else {
        return kept;
    };

    for (name, slot) in slots {
        let Some(value) = values.get(name) else {
            continue;
        };
        if value.is_null() {
            continue;
        }
        if slot.is_object() {
            if let Value::Object(nested) = value {
                let trimmed = trimmed_properties(nested, slot);
                if !trimmed.is_empty() {
                    kept.insert(name.clone(), Value::Object(trimmed));
                }
            }
        } else {
            kept.insert(name.clone(), value.clone());
        }
    }

    kept
}
