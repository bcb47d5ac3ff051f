//! Deterministic layered placement for imported graphs.
//!
//! The node/edge set is treated as a DAG of uniform fixed-size boxes: back
//! edges found by a depth-first sweep are reversed (never rejected), layers
//! are assigned by the longest-path method, in-layer order is settled by a
//! few alternating barycenter passes, and coordinates are stacked
//! top-to-bottom with fixed margins. Everything is recomputed from scratch on
//! every call; no state is retained between invocations, and ties always
//! break on the lexicographically lowest node id.

use std::collections::BTreeSet;

use ahash::{AHashMap, AHashSet};
use tracing::debug;

/// Fixed geometry for the layered placement.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOptions {
    pub node_width: f64,
    pub node_height: f64,
    pub margin_x: f64,
    pub margin_y: f64,
    /// Horizontal gap between neighbors within one layer.
    pub node_separation: f64,
    /// Vertical gap between consecutive layers.
    pub rank_separation: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            node_width: 350.0,
            node_height: 70.0,
            margin_x: 30.0,
            margin_y: 30.0,
            node_separation: 50.0,
            rank_separation: 50.0,
        }
    }
}

/// A top-left node coordinate produced by the layout.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Assigns a coordinate to every node id. Pure function of its arguments:
/// identical input yields identical output. Unknown edge endpoints and
/// self-references are ignored; disconnected nodes land in the top layer.
pub fn assign_positions(
    node_ids: &[String],
    edges: &[(String, String)],
    options: &LayoutOptions,
) -> AHashMap<String, Point> {
    let mut ids: Vec<&str> = node_ids.iter().map(String::as_str).collect();
    ids.sort_unstable();
    ids.dedup();

    let known: AHashSet<&str> = ids.iter().copied().collect();
    let edges: Vec<(&str, &str)> = edges
        .iter()
        .map(|(source, target)| (source.as_str(), target.as_str()))
        .filter(|(source, target)| source != target && known.contains(source) && known.contains(target))
        .collect();

    let dag = break_cycles(&ids, &edges);
    let layers = assign_layers(&ids, &dag);
    let ordering = order_layers(&dag, &layers);

    let row_width = |count: usize| {
        count as f64 * options.node_width + count.saturating_sub(1) as f64 * options.node_separation
    };
    let widest = ordering
        .iter()
        .map(|row| row_width(row.len()))
        .fold(0.0, f64::max);

    let mut positions = AHashMap::with_capacity(ids.len());
    for (layer, row) in ordering.iter().enumerate() {
        let offset = (widest - row_width(row.len())) / 2.0;
        let y = options.margin_y + layer as f64 * (options.node_height + options.rank_separation);
        for (slot, id) in row.iter().enumerate() {
            let x = options.margin_x
                + offset
                + slot as f64 * (options.node_width + options.node_separation);
            positions.insert((*id).to_string(), Point { x, y });
        }
    }

    debug!(
        nodes = ids.len(),
        layers = ordering.len(),
        "assigned layered positions"
    );
    positions
}

fn successor_map<'a>(edges: &[(&'a str, &'a str)]) -> AHashMap<&'a str, Vec<&'a str>> {
    let mut successors: AHashMap<&str, Vec<&str>> = AHashMap::new();
    for (source, target) in edges {
        successors.entry(*source).or_default().push(*target);
    }
    for list in successors.values_mut() {
        list.sort_unstable();
        list.dedup();
    }
    successors
}

/// Finds back edges with a depth-first sweep (nodes visited in id order) and
/// returns the edge set with those reversed, so layering sees a DAG.
fn break_cycles<'a>(ids: &[&'a str], edges: &[(&'a str, &'a str)]) -> Vec<(&'a str, &'a str)> {
    let successors = successor_map(edges);
    let mut visited: AHashSet<&str> = AHashSet::new();
    let mut on_stack: AHashSet<&str> = AHashSet::new();
    let mut back: AHashSet<(&str, &str)> = AHashSet::new();

    fn sweep<'a>(
        node: &'a str,
        successors: &AHashMap<&'a str, Vec<&'a str>>,
        visited: &mut AHashSet<&'a str>,
        on_stack: &mut AHashSet<&'a str>,
        back: &mut AHashSet<(&'a str, &'a str)>,
    ) {
        visited.insert(node);
        on_stack.insert(node);
        if let Some(next) = successors.get(node) {
            for successor in next {
                if on_stack.contains(successor) {
                    back.insert((node, *successor));
                } else if !visited.contains(successor) {
                    sweep(*successor, successors, visited, on_stack, back);
                }
            }
        }
        on_stack.remove(node);
    }

    for id in ids {
        if !visited.contains(id) {
            sweep(*id, &successors, &mut visited, &mut on_stack, &mut back);
        }
    }

    edges
        .iter()
        .map(|(source, target)| {
            if back.contains(&(*source, *target)) {
                (*target, *source)
            } else {
                (*source, *target)
            }
        })
        .collect()
}

/// Longest-path layering over a topological order (Kahn's algorithm with an
/// id-ordered ready set).
fn assign_layers<'a>(
    ids: &[&'a str],
    edges: &[(&'a str, &'a str)],
) -> AHashMap<&'a str, usize> {
    let successors = successor_map(edges);
    let mut in_degree: AHashMap<&str, usize> = ids.iter().map(|id| (*id, 0)).collect();
    for (_, target) in edges {
        if let Some(degree) = in_degree.get_mut(target) {
            *degree += 1;
        }
    }

    let mut ready: BTreeSet<&str> = in_degree
        .iter()
        .filter(|(_, degree)| **degree == 0)
        .map(|(id, _)| *id)
        .collect();
    let mut topological: Vec<&str> = Vec::with_capacity(ids.len());

    while let Some(id) = ready.iter().next().copied() {
        ready.remove(id);
        topological.push(id);
        if let Some(next) = successors.get(id) {
            for successor in next {
                if let Some(degree) = in_degree.get_mut(successor) {
                    *degree -= 1;
                    if *degree == 0 {
                        ready.insert(*successor);
                    }
                }
            }
        }
    }

    // Cycle breaking guarantees a full order; anything left over would mean
    // an unexpected remnant, placed deterministically at the end.
    if topological.len() < ids.len() {
        let seen: AHashSet<&str> = topological.iter().copied().collect();
        topological.extend(ids.iter().filter(|id| !seen.contains(*id)));
    }

    let mut layers: AHashMap<&str, usize> = ids.iter().map(|id| (*id, 0)).collect();
    for id in &topological {
        let current = layers[id];
        if let Some(next) = successors.get(id) {
            for successor in next {
                if layers[successor] <= current {
                    layers.insert(*successor, current + 1);
                }
            }
        }
    }
    layers
}

/// Groups nodes by layer and settles the in-layer order with four
/// alternating barycenter passes over neighbor positions.
fn order_layers<'a>(
    edges: &[(&'a str, &'a str)],
    layers: &AHashMap<&'a str, usize>,
) -> Vec<Vec<&'a str>> {
    let depth = layers.values().max().map_or(0, |deepest| deepest + 1);
    let mut rows: Vec<Vec<&str>> = vec![Vec::new(); depth];
    for (id, layer) in layers {
        rows[*layer].push(*id);
    }
    for row in &mut rows {
        row.sort_unstable();
    }

    let mut predecessors: AHashMap<&str, Vec<&str>> = AHashMap::new();
    for (source, target) in edges {
        predecessors.entry(*target).or_default().push(*source);
    }
    let successors = successor_map(edges);

    for _pass in 0..4 {
        for layer in 1..rows.len() {
            let above = slot_map(&rows[layer - 1]);
            rows[layer] = reorder_by_barycenter(&rows[layer], &above, &predecessors);
        }
        for layer in (0..rows.len().saturating_sub(1)).rev() {
            let below = slot_map(&rows[layer + 1]);
            rows[layer] = reorder_by_barycenter(&rows[layer], &below, &successors);
        }
    }

    rows
}

fn slot_map<'a>(row: &[&'a str]) -> AHashMap<&'a str, f64> {
    row.iter()
        .enumerate()
        .map(|(slot, id)| (*id, slot as f64))
        .collect()
}

/// Sorts a row by the average slot of each node's neighbors in the adjacent
/// layer. Nodes without neighbors keep their current slot; the sort is
/// stable, so ties never reorder.
fn reorder_by_barycenter<'a>(
    row: &[&'a str],
    neighbor_slots: &AHashMap<&'a str, f64>,
    links: &AHashMap<&'a str, Vec<&'a str>>,
) -> Vec<&'a str> {
    let mut scored: Vec<(&str, f64)> = row
        .iter()
        .enumerate()
        .map(|(slot, id)| {
            let positions: Vec<f64> = links
                .get(id)
                .into_iter()
                .flatten()
                .filter_map(|neighbor| neighbor_slots.get(neighbor).copied())
                .collect();
            let score = if positions.is_empty() {
                slot as f64
            } else {
                positions.iter().sum::<f64>() / positions.len() as f64
            };
            (*id, score)
        })
        .collect();
    scored.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
    scored.into_iter().map(|(id, _)| id).collect()
}
