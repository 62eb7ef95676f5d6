// SPDX-License-Identifier: MIT

//! Typed error handling for audience-rules
//!
//! Condition evaluation never fails; these errors cover the surrounding
//! plumbing: loading documents, editing trees and serving the API.

use thiserror::Error;

/// Top-level error type for audience-rules
#[derive(Debug, Error)]
pub enum RulesError {
    /// Configuration errors (bad env vars, unsupported file types)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Tree editing referenced a node id that does not exist
    #[error("Node '{id}' not found")]
    NodeNotFound { id: String },

    /// Tree editing targeted a node that cannot hold children
    #[error("Node '{id}' is not a group")]
    NotAGroup { id: String },

    /// Adding a node would exceed the authoring depth limit
    #[error("Maximum depth of {limit} exceeded")]
    DepthExceeded { limit: usize },

    /// Unrecognized content source type for template rendering
    #[error("Unknown content source type: {0}")]
    UnknownSourceType(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

impl RulesError {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a node not found error
    pub fn node_not_found(id: impl Into<String>) -> Self {
        Self::NodeNotFound { id: id.into() }
    }
}

pub type Result<T> = std::result::Result<T, RulesError>;
