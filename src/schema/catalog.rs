use ahash::AHashMap;

use super::definition::NodeDefinition;
use crate::error::CatalogError;

/// Lookup of node definitions by discriminator value.
///
/// The core never enumerates a catalog; it only asks which properties a
/// discriminator declares and which constraints it carries. A discriminator
/// the catalog does not know is handled leniently everywhere: kept opaque at
/// export, skipped by the schema-driven validation rules.
pub trait SchemaCatalog {
    fn definition(&self, discriminator: &str) -> Option<&NodeDefinition>;
}

/// An in-memory catalog, populated through [`CatalogBuilder`] or loaded from
/// a JSON document keyed by discriminator.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    definitions: AHashMap<String, NodeDefinition>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> CatalogBuilder {
        CatalogBuilder {
            definitions: Vec::new(),
        }
    }

    /// Loads a catalog document of the form
    /// `{"<discriminator>": {"schema": ..., "constraints": ...}, ...}`.
    /// The map key wins over any `discriminator` field inside the entry.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let raw: AHashMap<String, NodeDefinition> = serde_json::from_str(json)?;
        let mut catalog = Self::new();
        for (discriminator, mut definition) in raw {
            definition.discriminator = discriminator;
            catalog.insert(definition);
        }
        Ok(catalog)
    }

    pub fn insert(&mut self, definition: NodeDefinition) {
        self.definitions
            .insert(definition.discriminator.clone(), definition);
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl SchemaCatalog for StaticCatalog {
    fn definition(&self, discriminator: &str) -> Option<&NodeDefinition> {
        self.definitions.get(discriminator)
    }
}

/// Builds a [`StaticCatalog`] from individual definitions.
pub struct CatalogBuilder {
    definitions: Vec<NodeDefinition>,
}

impl CatalogBuilder {
    pub fn definition(mut self, definition: NodeDefinition) -> Self {
        self.definitions.push(definition);
        self
    }

    pub fn build(self) -> StaticCatalog {
        let mut catalog = StaticCatalog::new();
        for definition in self.definitions {
            catalog.insert(definition);
        }
        catalog
    }
}
