// SPDX-License-Identifier: MIT

//! Audience rule conditions: attribute registry, condition tree evaluation
//! with explanatory traces, authoring validation and an HTTP API.

pub mod audience;
pub mod error;

pub use audience::attributes::AttributeRegistry;
pub use audience::condition::{
    evaluate_node, test_condition, test_condition_against_users, ConditionNode, Evaluator,
};
pub use audience::user::UserRecord;
pub use error::{Result, RulesError};
