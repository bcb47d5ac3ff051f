//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types from the keiro crate.
//! Import this module to get access to the core functionality without having
//! to import each type individually.
//!
//! # Example
//!
//! ```rust,no_run
//! use keiro::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let topology = Topology::from_json(&std::fs::read_to_string("topology.json")?)?;
//! let catalog = StaticCatalog::from_json(&std::fs::read_to_string("catalog.json")?)?;
//!
//! let model = GraphModel::import(topology);
//! println!("{} validation errors", model.validate(&catalog).len());
//! # Ok(())
//! # }
//! ```

// The central graph model and the canvas contract
pub use crate::graph::{
    GraphModel, GraphSnapshot, GraphStore, NodeData, NodeKind, Port, VisualEdge, VisualNode,
};

// Declarative topology types
pub use crate::topology::{
    NodeInput, NodeRecord, ParameterDeclaration, Topology, TopologyProperties,
};

// Schema catalog
pub use crate::schema::{
    NodeConstraints, NodeDefinition, PropertySchema, SchemaCatalog, StaticCatalog,
};

// Parameters and layout
pub use crate::layout::{LayoutOptions, Point};
pub use crate::params::ParameterStore;

// Validation results
pub use crate::validate::{ValidationError, ValidationKind};

// Error types
pub use crate::error::{CatalogError, SnapshotError, TopologyError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
