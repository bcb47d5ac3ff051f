use std::fs;

use serde::{Deserialize, Serialize};

use super::canvas::{VisualEdge, VisualNode};
use crate::error::SnapshotError;
use crate::topology::Topology;

/// A persistable capture of one editing session: the exported topology plus
/// the exact canvas state, so a host can restore ids and coordinates.
///
/// Stored as JSON: the node records embed arbitrary property trees, which
/// need a self-describing format to decode.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GraphSnapshot {
    pub topology: Topology,
    pub nodes: Vec<VisualNode>,
    pub edges: Vec<VisualEdge>,
}

impl GraphSnapshot {
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Saves the snapshot to a file.
    pub fn save(&self, path: &str) -> Result<(), SnapshotError> {
        fs::write(path, self.to_bytes()?)?;
        Ok(())
    }

    /// Loads a snapshot from a file.
    pub fn from_file(path: &str) -> Result<Self, SnapshotError> {
        Self::from_bytes(&fs::read(path)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
