use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::graph::NodeKind;

/// One property slot in a node definition. Nested `object`-typed slots carry
/// their own `properties` map and `required` list, mirroring the shape of the
/// service schema documents this is loaded from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertySchema {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, PropertySchema>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub allowed_values: Option<Vec<String>>,
}

impl PropertySchema {
    /// A scalar slot of the given schema type, e.g. `"string"`.
    pub fn scalar(kind: impl Into<String>) -> Self {
        Self {
            kind: Some(kind.into()),
            ..Self::default()
        }
    }

    /// An `object`-typed slot with the given nested property slots.
    pub fn object<K, I>(properties: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, PropertySchema)>,
    {
        Self {
            kind: Some("object".to_string()),
            properties: Some(
                properties
                    .into_iter()
                    .map(|(name, slot)| (name.into(), slot))
                    .collect(),
            ),
            ..Self::default()
        }
    }

    pub fn with_required<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_allowed_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    pub fn is_object(&self) -> bool {
        self.kind.as_deref() == Some("object")
    }

    pub fn property(&self, name: &str) -> Option<&PropertySchema> {
        self.properties.as_ref().and_then(|slots| slots.get(name))
    }

    /// Whether this slot's `required` list names `name`.
    pub fn requires(&self, name: &str) -> bool {
        self.required
            .as_ref()
            .is_some_and(|names| names.iter().any(|required| required == name))
    }
}

/// Structural constraints a discriminator places on the surrounding graph,
/// consumed by the validation engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeConstraints {
    /// Maximum number of nodes of this discriminator in one topology.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_count: Option<usize>,
    /// Discriminators that must each appear directly downstream.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required_directly_downstream: Vec<String>,
    /// Discriminators that may not appear anywhere downstream. Violations at
    /// distance one are reported as direct, farther ones as transitive.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prohibited_downstream: Vec<String>,
}

/// Everything the catalog knows about one discriminator value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDefinition {
    #[serde(default)]
    pub discriminator: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_kind: Option<NodeKind>,
    #[serde(default)]
    pub schema: PropertySchema,
    #[serde(default)]
    pub constraints: NodeConstraints,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_link: Option<String>,
}

impl NodeDefinition {
    pub fn new(discriminator: impl Into<String>) -> Self {
        Self {
            discriminator: discriminator.into(),
            ..Self::default()
        }
    }

    pub fn with_kind(mut self, kind: NodeKind) -> Self {
        self.node_kind = Some(kind);
        self
    }

    pub fn with_schema(mut self, schema: PropertySchema) -> Self {
        self.schema = schema;
        self
    }

    pub fn with_constraints(mut self, constraints: NodeConstraints) -> Self {
        self.constraints = constraints;
        self
    }

    pub fn with_help_link(mut self, help_link: impl Into<String>) -> Self {
        self.help_link = Some(help_link.into());
        self
    }
}
