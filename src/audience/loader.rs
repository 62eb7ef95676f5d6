// SPDX-License-Identifier: MIT

//! Document loading for conditions, user rosters and attribute registries
//!
//! Files are YAML (`.yaml`, `.yml`) or JSON (`.json`), chosen by extension.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use super::attributes::AttributeRegistry;
use super::condition::{AudienceCondition, ConditionNode};
use super::user::UserRecord;
use crate::error::{Result, RulesError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Yaml,
    Json,
}

impl DocumentFormat {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Ok(DocumentFormat::Yaml),
            Some("json") => Ok(DocumentFormat::Json),
            _ => Err(RulesError::config(format!(
                "Unsupported document type: {}",
                path.display()
            ))),
        }
    }
}

/// A condition file holds either a bare root node or a named audience
#[derive(Deserialize)]
#[serde(untagged)]
enum ConditionDocument {
    Audience(AudienceCondition),
    Node(ConditionNode),
}

/// Parse a document from a string in the given format
pub fn parse_document<T: DeserializeOwned>(content: &str, format: DocumentFormat) -> Result<T> {
    let doc = match format {
        DocumentFormat::Yaml => serde_yaml::from_str(content)?,
        DocumentFormat::Json => serde_json::from_str(content)?,
    };
    Ok(doc)
}

/// Load a document, picking the format from the file extension
pub fn load_document<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let path = path.as_ref();
    let format = DocumentFormat::from_path(path)?;
    let content = fs::read_to_string(path)?;
    log::debug!("Loaded {:?} document from {}", format, path.display());
    parse_document(&content, format)
}

/// Parse a condition tree, unwrapping a named audience if present
pub fn parse_condition(content: &str, format: DocumentFormat) -> Result<ConditionNode> {
    let doc: ConditionDocument = parse_document(content, format)?;
    Ok(match doc {
        ConditionDocument::Audience(audience) => audience.root_node,
        ConditionDocument::Node(node) => node,
    })
}

pub fn load_condition<P: AsRef<Path>>(path: P) -> Result<ConditionNode> {
    let path = path.as_ref();
    let format = DocumentFormat::from_path(path)?;
    let content = fs::read_to_string(path)?;
    parse_condition(&content, format)
}

pub fn load_users<P: AsRef<Path>>(path: P) -> Result<Vec<UserRecord>> {
    load_document(path)
}

pub fn load_registry<P: AsRef<Path>>(path: P) -> Result<AttributeRegistry> {
    let registry: AttributeRegistry = load_document(path.as_ref())?;
    log::info!(
        "Loaded {} attribute definitions from {}",
        registry.len(),
        path.as_ref().display()
    );
    Ok(registry)
}
