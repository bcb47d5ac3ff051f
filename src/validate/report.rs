use serde::{Deserialize, Serialize};

/// Classification of a validation finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidationKind {
    NotConnected,
    MissingProperty,
    NodeCountLimit,
    RequiredDirectlyDownstream,
    ProhibitedDirectlyDownstream,
    ProhibitedAnyDownstream,
}

/// One structural or schema violation. Produced fresh on every validate
/// call, never persisted; carries enough context for the host to highlight
/// the offending element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    #[serde(rename = "type")]
    pub kind: ValidationKind,
    pub description: String,
    /// Dotted path of the offending property, for `MissingProperty`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
    /// The discriminator the rule is about (the missing or prohibited type
    /// for relation rules, the node's own type otherwise).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,
    /// The discriminator of the node carrying the violated constraint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_link: Option<String>,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
            property: None,
            node_type: None,
            parent_type: None,
            node_name: None,
            help_link: None,
        }
    }
}
