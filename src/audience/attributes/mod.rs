// SPDX-License-Identifier: MIT

//! Attribute registry
//!
//! Maps attribute ids to the metadata the evaluator needs: which user-record
//! section holds the value and what type governs its comparisons.

mod builtin;
mod registry;
mod types;

pub use registry::AttributeRegistry;
pub use types::{AttributeDefinition, AttributeGroup, AttributeType};
