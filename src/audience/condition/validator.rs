// SPDX-License-Identifier: MIT

//! Authoring-time validation of condition trees

use serde::{Deserialize, Serialize};

use super::ast::{Comparison, ConditionLeaf, ConditionNode, GroupNode, GroupOperator, NodeKind};
use super::MAX_DEPTH;
use crate::audience::attributes::AttributeRegistry;

/// Errors block saving a rule; warnings do not
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Validate every node of `root`, depth first
pub fn validate(root: &ConditionNode, registry: &AttributeRegistry) -> ValidationResult {
    let mut result = ValidationResult::default();
    validate_node(root, registry, 0, &mut result);
    result.is_valid = result.errors.is_empty();
    result
}

fn validate_node(
    node: &ConditionNode,
    registry: &AttributeRegistry,
    depth: usize,
    out: &mut ValidationResult,
) {
    if depth > MAX_DEPTH {
        out.warnings.push(format!(
            "Node {}: exceeds maximum depth of {}",
            node.id, MAX_DEPTH
        ));
    }

    match &node.kind {
        NodeKind::Condition(leaf) => validate_leaf(&node.id, leaf, registry, out),
        NodeKind::Group(group) => {
            validate_group(&node.id, group, out);
            for child in node.children() {
                validate_node(child, registry, depth + 1, out);
            }
        }
        NodeKind::Invalid => out
            .errors
            .push(format!("Node {}: Invalid node configuration", node.id)),
    }
}

fn validate_leaf(
    id: &str,
    leaf: &ConditionLeaf,
    registry: &AttributeRegistry,
    out: &mut ValidationResult,
) {
    let attribute_id = leaf.attribute_id.as_deref().filter(|a| !a.is_empty());
    let comparison = leaf
        .comparison
        .as_ref()
        .filter(|c| !c.as_str().is_empty());

    if attribute_id.is_none() {
        out.errors
            .push(format!("Condition {}: No attribute selected", id));
    }
    match comparison {
        None => out
            .errors
            .push(format!("Condition {}: No comparison operator selected", id)),
        Some(Comparison::Unknown(name)) => out
            .errors
            .push(format!("Condition {}: Unknown comparison operator {}", id, name)),
        Some(_) => {}
    }
    if leaf.value.as_ref().map_or(true, |v| v.is_blank()) {
        out.errors.push(format!("Condition {}: No value specified", id));
    }

    let Some(attribute_id) = attribute_id else {
        return;
    };
    let Some(attribute) = registry.get(attribute_id) else {
        out.warnings.push(format!(
            "Condition {}: Unknown attribute {}",
            id, attribute_id
        ));
        return;
    };
    if let Some(comparison) = comparison {
        if !matches!(comparison, Comparison::Unknown(_))
            && !attribute.attribute_type.supports(comparison)
        {
            out.warnings.push(format!(
                "Condition {}: {} is not applicable to {} attribute {}",
                id, comparison, attribute.attribute_type, attribute.label
            ));
        }
    }
}

fn validate_group(id: &str, group: &GroupNode, out: &mut ValidationResult) {
    match &group.operator {
        None => out
            .errors
            .push(format!("Group {}: No operator selected", id)),
        Some(GroupOperator::Unknown(name)) if name.is_empty() => out
            .errors
            .push(format!("Group {}: No operator selected", id)),
        Some(GroupOperator::Unknown(name)) => out
            .errors
            .push(format!("Group {}: Unknown operator {}", id, name)),
        Some(_) => {}
    }

    let child_count = group.children.as_ref().map_or(0, Vec::len);
    if child_count == 0 {
        out.warnings
            .push(format!("Group {}: No child conditions", id));
    }
    if group.operator == Some(GroupOperator::Not) && child_count > 1 {
        out.errors
            .push(format!("Group {}: NOT operator can only have one child", id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> ConditionNode {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_valid_tree() {
        let root = ConditionNode::group(
            "root",
            GroupOperator::And,
            vec![
                ConditionNode::condition("a", "targeted_lead", Comparison::Equals, true),
                ConditionNode::condition("b", "aum_band", Comparison::In, vec!["20M+"]),
            ],
        );
        let result = validate(&root, AttributeRegistry::builtin());
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_incomplete_condition_errors() {
        let root = parse(json!({"id": "c1", "type": "condition", "value": ""}));
        let result = validate(&root, AttributeRegistry::builtin());
        assert!(!result.is_valid);
        assert_eq!(
            result.errors,
            vec![
                "Condition c1: No attribute selected",
                "Condition c1: No comparison operator selected",
                "Condition c1: No value specified",
            ]
        );
    }

    #[test]
    fn test_group_checks() {
        let root = parse(json!({
            "id": "g1",
            "type": "group",
            "operator": "NOT",
            "children": [
                {"id": "e1", "type": "group", "children": []},
                {"id": "c1", "type": "condition", "attributeId": "targeted_lead", "comparison": "equals", "value": true}
            ]
        }));
        let result = validate(&root, AttributeRegistry::builtin());
        assert!(!result.is_valid);
        assert_eq!(
            result.errors,
            vec![
                "Group g1: NOT operator can only have one child",
                "Group e1: No operator selected",
            ]
        );
        assert_eq!(result.warnings, vec!["Group e1: No child conditions"]);
    }

    #[test]
    fn test_reference_warnings() {
        let root = ConditionNode::group(
            "g",
            GroupOperator::Or,
            vec![
                ConditionNode::condition("a", "mystery", Comparison::Equals, 1i64),
                ConditionNode::condition("b", "targeted_lead", Comparison::GreaterThan, 1i64),
            ],
        );
        let result = validate(&root, AttributeRegistry::builtin());
        assert!(result.is_valid);
        assert_eq!(
            result.warnings,
            vec![
                "Condition a: Unknown attribute mystery",
                "Condition b: greater_than is not applicable to boolean attribute Has Targeted Lead",
            ]
        );
    }

    #[test]
    fn test_unknown_operators_are_errors() {
        let root = ConditionNode::group(
            "g",
            GroupOperator::Unknown("XOR".into()),
            vec![ConditionNode::condition(
                "a",
                "aum_band",
                Comparison::from("between"),
                "1–5M",
            )],
        );
        let result = validate(&root, AttributeRegistry::builtin());
        assert_eq!(
            result.errors,
            vec![
                "Group g: Unknown operator XOR",
                "Condition a: Unknown comparison operator between",
            ]
        );
    }

    #[test]
    fn test_depth_warning() {
        let mut node = ConditionNode::condition("leaf", "targeted_lead", Comparison::Equals, true);
        for level in 0..=MAX_DEPTH {
            node = ConditionNode::group(format!("g{}", level), GroupOperator::And, vec![node]);
        }
        let result = validate(&node, AttributeRegistry::builtin());
        assert!(result.is_valid);
        assert_eq!(
            result.warnings,
            vec![format!("Node leaf: exceeds maximum depth of {}", MAX_DEPTH)]
        );
    }

    #[test]
    fn test_invalid_node_type() {
        let root = parse(json!({"id": "w", "type": "widget"}));
        let result = validate(&root, AttributeRegistry::builtin());
        assert_eq!(result.errors, vec!["Node w: Invalid node configuration"]);
    }
}
