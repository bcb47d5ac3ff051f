use std::collections::VecDeque;

use ahash::{AHashMap, AHashSet};
use itertools::Itertools;
use serde_json::{Map, Value};
use tracing::debug;

use super::report::{ValidationError, ValidationKind};
use crate::graph::{GraphStore, VisualNode};
use crate::schema::{PropertySchema, SchemaCatalog};

/// Runs every rule over the graph and collects all violations; rules never
/// short-circuit each other. The output order is stable: rule passes run in
/// a fixed sequence, and each pass walks nodes in store order. The graph is
/// never mutated, and an empty list is the sole success signal.
pub fn validate(graph: &GraphStore, catalog: &dyn SchemaCatalog) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    check_connectivity(graph, &mut errors);
    check_edge_compatibility(graph, &mut errors);
    check_relations(graph, catalog, &mut errors);
    check_cardinality(graph, catalog, &mut errors);
    check_required_properties(graph, catalog, &mut errors);

    debug!(violations = errors.len(), "validated graph");
    errors
}

/// Every non-sink needs at least one outgoing edge and every non-source at
/// least one incoming edge.
fn check_connectivity(graph: &GraphStore, errors: &mut Vec<ValidationError>) {
    let mut has_outgoing: AHashSet<&str> = AHashSet::new();
    let mut has_incoming: AHashSet<&str> = AHashSet::new();
    for edge in graph.edges() {
        has_outgoing.insert(&edge.source);
        has_incoming.insert(&edge.target);
    }

    for node in graph.nodes() {
        let missing_outgoing = !node.kind().is_sink() && !has_outgoing.contains(node.id.as_str());
        let missing_incoming = !node.kind().is_source() && !has_incoming.contains(node.id.as_str());
        if missing_outgoing || missing_incoming {
            let mut error = ValidationError::new(
                ValidationKind::NotConnected,
                format!(
                    "node \"{}\" is not connected to the rest of the pipeline",
                    node.name
                ),
            );
            error.node_name = Some(node.name.clone());
            error.node_type = Some(node.discriminator().to_string());
            errors.push(error);
        }
    }
}

/// An edge's upstream end must be a source or processor and its downstream
/// end a processor or sink.
fn check_edge_compatibility(graph: &GraphStore, errors: &mut Vec<ValidationError>) {
    for edge in graph.edges() {
        let (Some(source), Some(target)) = (
            graph.node_by_id(&edge.source),
            graph.node_by_id(&edge.target),
        ) else {
            continue;
        };

        if source.kind().is_sink() {
            let mut error = ValidationError::new(
                ValidationKind::ProhibitedAnyDownstream,
                format!("sink \"{}\" cannot have downstream nodes", source.name),
            );
            error.node_name = Some(source.name.clone());
            error.node_type = Some(source.discriminator().to_string());
            errors.push(error);
        }

        if target.kind().is_source() {
            let mut error = ValidationError::new(
                ValidationKind::ProhibitedDirectlyDownstream,
                format!(
                    "source \"{}\" cannot be downstream of \"{}\"",
                    target.name, source.name
                ),
            );
            error.node_name = Some(target.name.clone());
            error.node_type = Some(target.discriminator().to_string());
            error.parent_type = Some(source.discriminator().to_string());
            errors.push(error);
        }
    }
}

/// Schema-declared relation constraints: required direct neighbors and
/// prohibited downstream discriminators.
fn check_relations(
    graph: &GraphStore,
    catalog: &dyn SchemaCatalog,
    errors: &mut Vec<ValidationError>,
) {
    let mut successors: AHashMap<&str, Vec<&str>> = AHashMap::new();
    for edge in graph.edges() {
        successors
            .entry(edge.source.as_str())
            .or_default()
            .push(edge.target.as_str());
    }

    for node in graph.nodes() {
        let Some(definition) = catalog.definition(node.discriminator()) else {
            continue;
        };
        let constraints = &definition.constraints;

        let direct: Vec<&VisualNode> = successors
            .get(node.id.as_str())
            .into_iter()
            .flatten()
            .filter_map(|id| graph.node_by_id(id))
            .collect();

        for required in &constraints.required_directly_downstream {
            let satisfied = direct
                .iter()
                .any(|neighbor| neighbor.discriminator() == required);
            if !satisfied {
                let mut error = ValidationError::new(
                    ValidationKind::RequiredDirectlyDownstream,
                    format!(
                        "node \"{}\" requires a node of type \"{}\" directly downstream",
                        node.name, required
                    ),
                );
                error.node_name = Some(node.name.clone());
                error.node_type = Some(required.clone());
                error.parent_type = Some(node.discriminator().to_string());
                error.help_link = definition.help_link.clone();
                errors.push(error);
            }
        }

        if !constraints.prohibited_downstream.is_empty() {
            let reachable = downstream_distances(&node.id, &successors);
            for prohibited in &constraints.prohibited_downstream {
                let hit = graph
                    .nodes()
                    .iter()
                    .filter(|candidate| candidate.discriminator() == prohibited)
                    .filter_map(|candidate| reachable.get(candidate.id.as_str()))
                    .min();
                let Some(distance) = hit else {
                    continue;
                };
                let kind = if *distance == 1 {
                    ValidationKind::ProhibitedDirectlyDownstream
                } else {
                    ValidationKind::ProhibitedAnyDownstream
                };
                let mut error = ValidationError::new(
                    kind,
                    format!(
                        "node \"{}\" may not have a node of type \"{}\" downstream",
                        node.name, prohibited
                    ),
                );
                error.node_name = Some(node.name.clone());
                error.node_type = Some(prohibited.clone());
                error.parent_type = Some(node.discriminator().to_string());
                error.help_link = definition.help_link.clone();
                errors.push(error);
            }
        }
    }
}

/// Breadth-first distances from `start` over the successor relation,
/// excluding the start itself.
fn downstream_distances<'a>(
    start: &str,
    successors: &AHashMap<&'a str, Vec<&'a str>>,
) -> AHashMap<&'a str, usize> {
    let mut distances: AHashMap<&str, usize> = AHashMap::new();
    let mut queue: VecDeque<(&str, usize)> = VecDeque::new();

    for next in successors.get(start).into_iter().flatten() {
        if !distances.contains_key(next) {
            distances.insert(*next, 1);
            queue.push_back((*next, 1));
        }
    }
    while let Some((id, distance)) = queue.pop_front() {
        for next in successors.get(id).into_iter().flatten() {
            if !distances.contains_key(next) {
                distances.insert(*next, distance + 1);
                queue.push_back((*next, distance + 1));
            }
        }
    }

    distances
}

/// Schema-declared per-discriminator count limits.
fn check_cardinality(
    graph: &GraphStore,
    catalog: &dyn SchemaCatalog,
    errors: &mut Vec<ValidationError>,
) {
    let counts = graph
        .nodes()
        .iter()
        .counts_by(|node| node.discriminator().to_string());

    for node in graph.nodes().iter().unique_by(|node| node.discriminator()) {
        let Some(definition) = catalog.definition(node.discriminator()) else {
            continue;
        };
        let Some(max_count) = definition.constraints.max_count else {
            continue;
        };
        let count = counts
            .get(node.discriminator())
            .copied()
            .unwrap_or_default();
        if count > max_count {
            let mut error = ValidationError::new(
                ValidationKind::NodeCountLimit,
                format!(
                    "a topology may contain at most {} node(s) of type \"{}\", found {}",
                    max_count,
                    node.discriminator(),
                    count
                ),
            );
            error.node_type = Some(node.discriminator().to_string());
            error.help_link = definition.help_link.clone();
            errors.push(error);
        }
    }
}

/// Every schema-required property must be present and non-empty,
/// recursively through `object`-typed slots. Reported with the dotted path.
fn check_required_properties(
    graph: &GraphStore,
    catalog: &dyn SchemaCatalog,
    errors: &mut Vec<ValidationError>,
) {
    for node in graph.nodes() {
        let Some(definition) = catalog.definition(node.discriminator()) else {
            continue;
        };
        check_object(
            &definition.schema,
            &node.data.node_properties.properties,
            "",
            node,
            definition.help_link.as_deref(),
            errors,
        );
    }
}

fn check_object(
    schema: &PropertySchema,
    values: &Map<String, Value>,
    prefix: &str,
    node: &VisualNode,
    help_link: Option<&str>,
    errors: &mut Vec<ValidationError>,
) {
    let Some(slots) = &schema.properties else {
        return;
    };

    for (name, slot) in slots {
        let path = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{}.{}", prefix, name)
        };
        let value = values.get(name);
        let missing = match value {
            None | Some(Value::Null) => true,
            Some(Value::String(text)) => text.is_empty(),
            Some(Value::Object(map)) => map.is_empty(),
            Some(_) => false,
        };

        if schema.requires(name) && missing {
            let mut error = ValidationError::new(
                ValidationKind::MissingProperty,
                format!(
                    "required property \"{}\" on node \"{}\" is missing or empty",
                    path, node.name
                ),
            );
            error.property = Some(path);
            error.node_name = Some(node.name.clone());
            error.node_type = Some(node.discriminator().to_string());
            error.help_link = help_link.map(str::to_string);
            errors.push(error);
            continue;
        }

        if slot.is_object() {
            if let Some(Value::Object(nested)) = value {
                check_object(slot, nested, &path, node, help_link, errors);
            }
        }
    }
}
