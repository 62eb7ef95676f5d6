// SPDX-License-Identifier: MIT

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::builtin;
use super::types::{AttributeDefinition, AttributeGroup};

static BUILTIN: Lazy<AttributeRegistry> =
    Lazy::new(|| AttributeRegistry::from_definitions(builtin::all_attributes()));

/// Read-only lookup table of attribute definitions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "Vec<AttributeDefinition>", into = "Vec<AttributeDefinition>")]
pub struct AttributeRegistry {
    attributes: Vec<AttributeDefinition>,
    index: HashMap<String, usize>,
}

impl AttributeRegistry {
    /// The process-wide built-in registry
    pub fn builtin() -> &'static AttributeRegistry {
        &BUILTIN
    }

    /// Build a registry; when ids repeat, the first definition wins.
    pub fn from_definitions(attributes: Vec<AttributeDefinition>) -> Self {
        let mut index = HashMap::new();
        for (i, attr) in attributes.iter().enumerate() {
            index.entry(attr.id.clone()).or_insert(i);
        }
        Self { attributes, index }
    }

    pub fn get(&self, id: &str) -> Option<&AttributeDefinition> {
        self.index.get(id).map(|&i| &self.attributes[i])
    }

    pub fn all(&self) -> &[AttributeDefinition] {
        &self.attributes
    }

    pub fn by_group(&self, group: &AttributeGroup) -> Vec<&AttributeDefinition> {
        self.attributes
            .iter()
            .filter(|a| &a.group == group)
            .collect()
    }

    pub fn featured(&self) -> Vec<&AttributeDefinition> {
        self.attributes.iter().filter(|a| a.featured).collect()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

impl Default for AttributeRegistry {
    fn default() -> Self {
        Self::builtin().clone()
    }
}

impl From<Vec<AttributeDefinition>> for AttributeRegistry {
    fn from(attributes: Vec<AttributeDefinition>) -> Self {
        Self::from_definitions(attributes)
    }
}

impl From<AttributeRegistry> for Vec<AttributeDefinition> {
    fn from(registry: AttributeRegistry) -> Self {
        registry.attributes
    }
}
