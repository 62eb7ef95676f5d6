// SPDX-License-Identifier: MIT

//! Sectioned user attribute records

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::audience::attributes::AttributeGroup;
use crate::audience::condition::AttributeValue;

/// Open mapping from attribute id to value; `None` records an explicit null.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeSection(BTreeMap<String, Option<AttributeValue>>);

impl AttributeSection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value for `key`, treating explicit nulls as absent
    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.0.get(key).and_then(Option::as_ref)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<AttributeValue>) {
        self.0.insert(key.into(), Some(value.into()));
    }

    pub fn insert_null(&mut self, key: impl Into<String>) {
        self.0.insert(key.into(), None);
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A user's attributes split by section
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub customer: AttributeSection,
    #[serde(default)]
    pub activity: AttributeSection,
    #[serde(default)]
    pub investment: AttributeSection,
    #[serde(default)]
    pub digital: AttributeSection,
    #[serde(default)]
    pub custom: AttributeSection,
}

impl UserRecord {
    pub fn new(user_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// Section backing `group`, or `None` when the record has no such section
    pub fn section(&self, group: &AttributeGroup) -> Option<&AttributeSection> {
        match group {
            AttributeGroup::Customer => Some(&self.customer),
            AttributeGroup::Activity => Some(&self.activity),
            AttributeGroup::Custom => Some(&self.custom),
            AttributeGroup::Investment => Some(&self.investment),
            AttributeGroup::Digital => Some(&self.digital),
            AttributeGroup::Other(_) => None,
        }
    }

    /// Whether the customer section flags an active targeted lead
    pub fn has_targeted_lead(&self) -> bool {
        matches!(
            self.customer.get("targeted_lead"),
            Some(AttributeValue::Bool(true))
        )
    }
}
