// SPDX-License-Identifier: MIT

//! Audience conditions
//!
//! A condition is a tree of AND/OR/NOT groups over attribute comparisons:
//! - `targeted_lead equals true`
//! - `aum_band in ["5–20M", "20M+"]`
//! - `AND(targeted_lead equals true, NOT(risk_band equals "Aggressive"))`

mod ast;
pub mod editor;
mod evaluator;
mod validator;
mod value;

pub use ast::{
    AudienceCondition, Comparison, ConditionLeaf, ConditionNode, GroupNode, GroupOperator,
    NodeKind,
};
pub use evaluator::{
    compare_values, evaluate_node, test_condition, test_condition_against_users, Evaluation,
    Evaluator, TestResult, TraceEntry,
};
pub use validator::{validate, ValidationResult};
pub use value::AttributeValue;

/// Deepest nesting level the authoring tools allow; evaluation ignores it.
pub const MAX_DEPTH: usize = 5;
