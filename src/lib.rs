//! # Keiro - Topology Graph Modeling and Validation Engine
//!
//! **Keiro** maintains a faithful, lossless, bidirectional mapping between
//! declarative media pipeline topologies (directed graphs of typed nodes
//! whose edges are expressed by name inside each node's `inputs` list) and
//! an interactive visual graph representation (nodes with ports and
//! id-referenced edges) that a host canvas can freely rearrange. On top of
//! the mapping it enforces the structural and schema rules that make a
//! topology valid before it is submitted to a downstream execution engine.
//!
//! ## Core Workflow
//!
//! 1.  **Import**: Parse a topology document with [`topology::Topology`] and
//!     hand it to [`graph::GraphModel::import`]. Ports and appearance are
//!     derived from each node's category, edges are resolved from the
//!     name-referenced `inputs` lists, and every node gets a coordinate from
//!     the deterministic layered layout.
//! 2.  **Edit**: The host canvas renders the visual graph and pushes edited
//!     state back through [`graph::GraphModel::set_canvas_data`].
//! 3.  **Validate**: [`graph::GraphModel::validate`] checks connectivity,
//!     type-pair compatibility, schema-declared relation and count
//!     constraints, and required properties against a [`schema::SchemaCatalog`].
//!     It returns a list of violations; empty means valid.
//! 4.  **Export**: [`graph::GraphModel::export`] derives `inputs` from the
//!     id-based edges, trims every record to its schema-recognized
//!     properties and buckets the nodes back into the three category arrays.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use keiro::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let json = std::fs::read_to_string("topology.json")?;
//!     let topology = Topology::from_json(&json)?;
//!
//!     // The catalog would normally be loaded from a service schema document.
//!     let catalog = StaticCatalog::builder()
//!         .definition(NodeDefinition::new("#Type.Rtsp"))
//!         .definition(NodeDefinition::new("#Type.FileSink"))
//!         .build();
//!
//!     let model = GraphModel::import(topology);
//!
//!     let errors = model.validate(&catalog);
//!     if errors.is_empty() {
//!         println!("{}", model.export(&catalog).to_json_pretty()?);
//!     } else {
//!         for error in &errors {
//!             println!("{}", error.description);
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod graph;
pub mod layout;
pub mod params;
pub mod prelude;
pub mod schema;
pub mod topology;
pub mod validate;
