use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::parameter::ParameterDeclaration;
use crate::error::TopologyError;

/// The declarative pipeline document exchanged with the execution backend.
///
/// Edges are not first-class here: each node lists the names of its upstream
/// nodes in its `inputs` array. `systemData` and `@apiVersion` are assigned by
/// the backend and round-trip untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Topology {
    pub name: String,
    #[serde(default)]
    pub properties: TopologyProperties,
    #[serde(rename = "systemData", default, skip_serializing_if = "Option::is_none")]
    pub system_data: Option<Value>,
    // AutoRest-style tooling rewrites `@apiVersion` to `apiVersion`; accept
    // both on input and always emit the `@`-prefixed spelling.
    #[serde(
        rename = "@apiVersion",
        alias = "apiVersion",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub api_version: Option<String>,
}

impl Topology {
    pub fn from_json(json: &str) -> Result<Self, TopologyError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, TopologyError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, TopologyError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// All node records, in source -> processor -> sink order.
    pub fn node_records(&self) -> impl Iterator<Item = &NodeRecord> {
        self.properties
            .sources
            .iter()
            .chain(self.properties.processors.iter())
            .chain(self.properties.sinks.iter())
    }
}

/// The `properties` envelope of a topology document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopologyProperties {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<NodeRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub processors: Vec<NodeRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sinks: Vec<NodeRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ParameterDeclaration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One declarative node: a `@type` discriminator, a name unique within the
/// topology, optional upstream references, and the discriminator-specific
/// property tree kept as raw JSON so unknown shapes survive a round trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    #[serde(rename = "@type")]
    pub discriminator: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inputs: Option<Vec<NodeInput>>,
    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

impl NodeRecord {
    pub fn new(discriminator: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            discriminator: discriminator.into(),
            name: name.into(),
            inputs: None,
            properties: Map::new(),
        }
    }

    /// Names of the upstream nodes this record declares.
    pub fn input_names(&self) -> impl Iterator<Item = &str> {
        self.inputs
            .iter()
            .flatten()
            .map(|input| input.node_name.as_str())
    }
}

/// One entry in a node's `inputs` array: an upstream reference by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeInput {
    #[serde(rename = "nodeName")]
    pub node_name: String,
}

impl NodeInput {
    pub fn new(node_name: impl Into<String>) -> Self {
        Self {
            node_name: node_name.into(),
        }
    }
}
