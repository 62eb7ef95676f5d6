// SPDX-License-Identifier: MIT

//! Condition tree evaluator
//!
//! Evaluation never fails: incomplete rules, unknown references and missing
//! data all resolve to `false` with a trace entry explaining why.

use serde::{Deserialize, Serialize};

use super::ast::{Comparison, ConditionLeaf, ConditionNode, GroupNode, GroupOperator, NodeKind};
use super::value::AttributeValue;
use crate::audience::attributes::{AttributeRegistry, AttributeType};
use crate::audience::user::UserRecord;

/// One step of an evaluation, recorded children-before-parent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceEntry {
    pub node_id: String,
    pub result: bool,
    pub reason: String,
}

impl TraceEntry {
    fn new(node_id: &str, result: bool, reason: impl Into<String>) -> Self {
        Self {
            node_id: node_id.to_string(),
            result,
            reason: reason.into(),
        }
    }
}

/// Result of evaluating a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub result: bool,
    pub trace: Vec<TraceEntry>,
}

/// Outcome of testing a root condition against one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    pub user: UserRecord,
    pub matches: bool,
    pub evaluation_trace: Vec<TraceEntry>,
}

/// Evaluates condition trees against user records using an attribute registry
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'a> {
    registry: &'a AttributeRegistry,
}

impl<'a> Evaluator<'a> {
    pub fn new(registry: &'a AttributeRegistry) -> Self {
        Self { registry }
    }

    /// Evaluate a tree, returning its result and post-order trace
    pub fn evaluate_node(&self, node: &ConditionNode, user: &UserRecord) -> Evaluation {
        let mut trace = Vec::new();
        let result = self.evaluate_into(node, user, &mut trace);
        Evaluation { result, trace }
    }

    /// Evaluate a single condition leaf, returning its result and reason
    pub fn evaluate_condition(&self, leaf: &ConditionLeaf, user: &UserRecord) -> (bool, String) {
        let (attribute_id, comparison, expected) =
            match (&leaf.attribute_id, &leaf.comparison, &leaf.value) {
                (Some(id), Some(cmp), Some(value))
                    if !id.is_empty() && !cmp.as_str().is_empty() && !value.is_blank() =>
                {
                    (id, cmp, value)
                }
                _ => return (false, "Incomplete condition configuration".to_string()),
            };

        let attribute = match self.registry.get(attribute_id) {
            Some(attribute) => attribute,
            None => return (false, format!("Unknown attribute: {}", attribute_id)),
        };

        let section = match user.section(&attribute.group) {
            Some(section) => section,
            None => {
                return (
                    false,
                    format!("Unknown attribute group: {}", attribute.group),
                )
            }
        };

        let actual = match section.get(attribute_id) {
            Some(actual) => actual,
            None => return (false, format!("Missing value for {}", attribute.label)),
        };

        let result = compare_values(actual, expected, comparison, attribute.attribute_type);
        let reason = format!(
            "{} ({}) {} {} → {}",
            attribute.label, actual, comparison, expected, result
        );
        (result, reason)
    }

    /// Evaluate `root` against one user
    pub fn test_condition(&self, root: &ConditionNode, user: &UserRecord) -> TestResult {
        let evaluation = self.evaluate_node(root, user);
        log::debug!(
            "Condition {} against {}: {}",
            root.id,
            user.user_id,
            evaluation.result
        );
        TestResult {
            user: user.clone(),
            matches: evaluation.result,
            evaluation_trace: evaluation.trace,
        }
    }

    /// Evaluate `root` against each user independently, preserving order
    pub fn test_condition_against_users(
        &self,
        root: &ConditionNode,
        users: &[UserRecord],
    ) -> Vec<TestResult> {
        users
            .iter()
            .map(|user| self.test_condition(root, user))
            .collect()
    }

    fn evaluate_into(
        &self,
        node: &ConditionNode,
        user: &UserRecord,
        trace: &mut Vec<TraceEntry>,
    ) -> bool {
        match &node.kind {
            NodeKind::Condition(leaf) => {
                let (result, reason) = self.evaluate_condition(leaf, user);
                trace.push(TraceEntry::new(&node.id, result, reason));
                result
            }
            NodeKind::Group(GroupNode {
                operator: Some(operator),
                children: Some(children),
            }) if !operator.as_str().is_empty() => {
                self.evaluate_group(&node.id, operator, children, user, trace)
            }
            _ => {
                trace.push(TraceEntry::new(
                    &node.id,
                    false,
                    "Invalid node configuration",
                ));
                false
            }
        }
    }

    fn evaluate_group(
        &self,
        node_id: &str,
        operator: &GroupOperator,
        children: &[ConditionNode],
        user: &UserRecord,
        trace: &mut Vec<TraceEntry>,
    ) -> bool {
        // Every child is evaluated so the trace stays complete.
        let result = match operator {
            GroupOperator::And => children
                .iter()
                .fold(true, |acc, child| self.evaluate_into(child, user, trace) && acc),
            GroupOperator::Or => children
                .iter()
                .fold(false, |acc, child| self.evaluate_into(child, user, trace) || acc),
            GroupOperator::Not => match children {
                [child] => !self.evaluate_into(child, user, trace),
                _ => {
                    trace.push(TraceEntry::new(
                        node_id,
                        false,
                        "NOT operator must have exactly one child",
                    ));
                    return false;
                }
            },
            GroupOperator::Unknown(name) => {
                trace.push(TraceEntry::new(
                    node_id,
                    false,
                    format!("Unknown operator: {}", name),
                ));
                false
            }
        };

        trace.push(TraceEntry::new(
            node_id,
            result,
            format!("{} group → {}", operator, result),
        ));
        result
    }
}

impl Default for Evaluator<'static> {
    fn default() -> Self {
        Self::new(AttributeRegistry::builtin())
    }
}

/// Compare an attribute value with a rule operand.
///
/// `in` and `not_in` read the candidate set from `expected`; both are `false`
/// when `expected` is not a list.
pub fn compare_values(
    actual: &AttributeValue,
    expected: &AttributeValue,
    comparison: &Comparison,
    field_type: AttributeType,
) -> bool {
    match comparison {
        Comparison::Equals => actual.strict_eq(expected),
        Comparison::NotEquals => !actual.strict_eq(expected),
        Comparison::GreaterThan => {
            field_type == AttributeType::Number && actual.to_number() > expected.to_number()
        }
        Comparison::LessThan => {
            field_type == AttributeType::Number && actual.to_number() < expected.to_number()
        }
        Comparison::Contains => match actual {
            AttributeValue::List(items) => items.iter().any(|item| item.same_value_zero(expected)),
            AttributeValue::String(haystack) => match expected.as_str() {
                Some(needle) => haystack.to_lowercase().contains(&needle.to_lowercase()),
                None => false,
            },
            _ => false,
        },
        Comparison::In => expected
            .as_list()
            .is_some_and(|set| set.iter().any(|item| item.same_value_zero(actual))),
        Comparison::NotIn => expected
            .as_list()
            .is_some_and(|set| !set.iter().any(|item| item.same_value_zero(actual))),
        Comparison::Unknown(_) => false,
    }
}

/// Evaluate a tree against the built-in attribute registry
pub fn evaluate_node(node: &ConditionNode, user: &UserRecord) -> Evaluation {
    Evaluator::default().evaluate_node(node, user)
}

/// Test a root condition against one user using the built-in registry
pub fn test_condition(root: &ConditionNode, user: &UserRecord) -> TestResult {
    Evaluator::default().test_condition(root, user)
}

/// Test a root condition against many users using the built-in registry
pub fn test_condition_against_users(root: &ConditionNode, users: &[UserRecord]) -> Vec<TestResult> {
    Evaluator::default().test_condition_against_users(root, users)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audience::attributes::{AttributeDefinition, AttributeGroup};
    use crate::audience::user::AttributeSection;
    use serde_json::json;

    fn lead_user() -> UserRecord {
        UserRecord {
            customer: AttributeSection::new()
                .with("targeted_lead", true)
                .with("aum_band", "5–20M")
                .with("offering_types", vec!["Investment", "Loan"])
                .with("account_age_months", 24i64),
            ..UserRecord::new("u1", "Lead")
        }
    }

    fn cond(id: &str, attr: &str, cmp: Comparison, value: impl Into<AttributeValue>) -> ConditionNode {
        ConditionNode::condition(id, attr, cmp, value)
    }

    fn reasons(evaluation: &Evaluation) -> Vec<&str> {
        evaluation.trace.iter().map(|t| t.reason.as_str()).collect()
    }

    #[test]
    fn test_full_example() {
        let root = ConditionNode::group(
            "root",
            GroupOperator::And,
            vec![
                cond("a", "targeted_lead", Comparison::Equals, true),
                cond("b", "aum_band", Comparison::In, vec!["5–20M", "20M+"]),
            ],
        );

        let evaluation = evaluate_node(&root, &lead_user());
        assert!(evaluation.result);
        assert_eq!(
            evaluation.trace,
            vec![
                TraceEntry::new("a", true, "Has Targeted Lead (true) equals true → true"),
                TraceEntry::new(
                    "b",
                    true,
                    "Assets Under Management (5–20M) in 5–20M,20M+ → true"
                ),
                TraceEntry::new("root", true, "AND group → true"),
            ]
        );
    }

    #[test]
    fn test_missing_attribute_value() {
        let user = UserRecord::new("u2", "Empty");
        let node = cond("c", "targeted_lead", Comparison::Equals, true);

        let evaluation = evaluate_node(&node, &user);
        assert!(!evaluation.result);
        assert_eq!(reasons(&evaluation), vec!["Missing value for Has Targeted Lead"]);
    }

    #[test]
    fn test_null_attribute_value_is_missing() {
        let mut user = UserRecord::new("u3", "Null");
        user.customer.insert_null("targeted_lead");
        let evaluation = evaluate_node(
            &cond("c", "targeted_lead", Comparison::Equals, true),
            &user,
        );
        assert_eq!(reasons(&evaluation), vec!["Missing value for Has Targeted Lead"]);
    }

    #[test]
    fn test_unknown_attribute() {
        let node = cond("c", "does_not_exist", Comparison::Equals, true);
        let evaluation = evaluate_node(&node, &lead_user());
        assert!(!evaluation.result);
        assert_eq!(reasons(&evaluation), vec!["Unknown attribute: does_not_exist"]);
    }

    #[test]
    fn test_unknown_attribute_group() {
        let registry = AttributeRegistry::from_definitions(vec![AttributeDefinition {
            id: "points".into(),
            label: "Loyalty Points".into(),
            attribute_type: AttributeType::Number,
            group: AttributeGroup::Other("loyalty".into()),
            options: vec![],
            featured: false,
            description: None,
        }]);
        let evaluator = Evaluator::new(&registry);

        let evaluation = evaluator.evaluate_node(
            &cond("c", "points", Comparison::GreaterThan, 10i64),
            &lead_user(),
        );
        assert!(!evaluation.result);
        assert_eq!(reasons(&evaluation), vec!["Unknown attribute group: loyalty"]);
    }

    #[test]
    fn test_incomplete_conditions() {
        let incomplete = [
            json!({"id": "c", "type": "condition"}),
            json!({"id": "c", "type": "condition", "attributeId": "targeted_lead", "comparison": "equals"}),
            json!({"id": "c", "type": "condition", "attributeId": "targeted_lead", "value": true}),
            json!({"id": "c", "type": "condition", "comparison": "equals", "value": true}),
            json!({"id": "c", "type": "condition", "attributeId": "", "comparison": "equals", "value": true}),
            json!({"id": "c", "type": "condition", "attributeId": "aum_band", "comparison": "equals", "value": ""}),
            json!({"id": "c", "type": "condition", "attributeId": "aum_band", "comparison": "equals", "value": null}),
        ];

        for raw in incomplete {
            let node: ConditionNode = serde_json::from_value(raw.clone()).unwrap();
            let evaluation = evaluate_node(&node, &lead_user());
            assert!(!evaluation.result, "{}", raw);
            assert_eq!(
                reasons(&evaluation),
                vec!["Incomplete condition configuration"],
                "{}",
                raw
            );
        }
    }

    #[test]
    fn test_empty_and_is_vacuously_true() {
        let root = ConditionNode::group("g", GroupOperator::And, vec![]);
        let evaluation = evaluate_node(&root, &lead_user());
        assert!(evaluation.result);
        assert_eq!(evaluation.trace, vec![TraceEntry::new("g", true, "AND group → true")]);
    }

    #[test]
    fn test_empty_or_is_false() {
        let root = ConditionNode::group("g", GroupOperator::Or, vec![]);
        let evaluation = evaluate_node(&root, &lead_user());
        assert!(!evaluation.result);
        assert_eq!(reasons(&evaluation), vec!["OR group → false"]);
    }

    #[test]
    fn test_and_evaluates_every_child() {
        let root = ConditionNode::group(
            "g",
            GroupOperator::And,
            vec![
                cond("a", "targeted_lead", Comparison::Equals, false),
                cond("b", "aum_band", Comparison::Equals, "5–20M"),
            ],
        );
        let evaluation = evaluate_node(&root, &lead_user());
        assert!(!evaluation.result);
        let results: Vec<(&str, bool)> = evaluation
            .trace
            .iter()
            .map(|t| (t.node_id.as_str(), t.result))
            .collect();
        assert_eq!(results, vec![("a", false), ("b", true), ("g", false)]);
    }

    #[test]
    fn test_or_evaluates_every_child() {
        let root = ConditionNode::group(
            "g",
            GroupOperator::Or,
            vec![
                cond("a", "targeted_lead", Comparison::Equals, true),
                cond("b", "does_not_exist", Comparison::Equals, "x"),
            ],
        );
        let evaluation = evaluate_node(&root, &lead_user());
        assert!(evaluation.result);
        assert_eq!(evaluation.trace.len(), 3);
        assert_eq!(evaluation.trace[2].reason, "OR group → true");
    }

    #[test]
    fn test_not_arity() {
        let child = || cond("a", "targeted_lead", Comparison::Equals, true);
        for children in [vec![], vec![child(), child()]] {
            let root = ConditionNode::group("n", GroupOperator::Not, children);
            let evaluation = evaluate_node(&root, &lead_user());
            assert!(!evaluation.result);
            assert_eq!(
                evaluation.trace,
                vec![TraceEntry::new(
                    "n",
                    false,
                    "NOT operator must have exactly one child"
                )]
            );
        }
    }

    #[test]
    fn test_double_negation() {
        let leaf = cond("a", "targeted_lead", Comparison::Equals, true);
        let wrapped = ConditionNode::group(
            "outer",
            GroupOperator::Not,
            vec![ConditionNode::group(
                "inner",
                GroupOperator::Not,
                vec![leaf.clone()],
            )],
        );

        let plain = evaluate_node(&leaf, &lead_user());
        let negated = evaluate_node(&wrapped, &lead_user());
        assert_eq!(plain.result, negated.result);
        assert_eq!(
            reasons(&negated)[1..],
            ["NOT group → false", "NOT group → true"]
        );
    }

    #[test]
    fn test_unknown_group_operator() {
        let root = ConditionNode::group(
            "x",
            GroupOperator::Unknown("XOR".into()),
            vec![cond("a", "targeted_lead", Comparison::Equals, true)],
        );
        let evaluation = evaluate_node(&root, &lead_user());
        assert!(!evaluation.result);
        assert_eq!(
            reasons(&evaluation),
            vec!["Unknown operator: XOR", "XOR group → false"]
        );
    }

    #[test]
    fn test_malformed_nodes() {
        for raw in [
            json!({"id": "m", "type": "group", "operator": "AND"}),
            json!({"id": "m", "type": "group", "children": []}),
            json!({"id": "m", "type": "group", "operator": "", "children": []}),
            json!({"id": "m", "type": "widget"}),
        ] {
            let node: ConditionNode = serde_json::from_value(raw.clone()).unwrap();
            let evaluation = evaluate_node(&node, &lead_user());
            assert!(!evaluation.result, "{}", raw);
            assert_eq!(
                evaluation.trace,
                vec![TraceEntry::new("m", false, "Invalid node configuration")],
                "{}",
                raw
            );
        }
    }

    #[test]
    fn test_malformed_child_keeps_siblings() {
        let root: ConditionNode = serde_json::from_value(json!({
            "id": "root",
            "type": "group",
            "operator": "OR",
            "children": [
                {"id": "ok", "type": "condition", "attributeId": "targeted_lead",
                 "comparison": "equals", "value": true},
                {"id": "m"}
            ]
        }))
        .unwrap();

        let evaluation = evaluate_node(&root, &lead_user());
        assert!(evaluation.result);
        assert_eq!(
            evaluation.trace,
            vec![
                TraceEntry::new("ok", true, "Has Targeted Lead (true) equals true → true"),
                TraceEntry::new("m", false, "Invalid node configuration"),
                TraceEntry::new("root", true, "OR group → true"),
            ]
        );
    }

    #[test]
    fn test_opaque_operands_still_evaluate() {
        let with_null: ConditionNode = serde_json::from_value(json!({
            "id": "c", "type": "condition", "attributeId": "aum_band",
            "comparison": "in", "value": ["5–20M", null]
        }))
        .unwrap();
        let evaluation = evaluate_node(&with_null, &lead_user());
        assert!(evaluation.result);
        assert_eq!(
            reasons(&evaluation),
            vec!["Assets Under Management (5–20M) in 5–20M, → true"]
        );

        let object: ConditionNode = serde_json::from_value(json!({
            "id": "c", "type": "condition", "attributeId": "aum_band",
            "comparison": "equals", "value": {"band": "5–20M"}
        }))
        .unwrap();
        let evaluation = evaluate_node(&object, &lead_user());
        assert!(!evaluation.result);
        assert_eq!(
            reasons(&evaluation),
            vec!["Assets Under Management (5–20M) equals [object Object] → false"]
        );
    }

    #[test]
    fn test_post_order_trace() {
        let root = ConditionNode::group(
            "root",
            GroupOperator::Or,
            vec![
                ConditionNode::group(
                    "left",
                    GroupOperator::And,
                    vec![
                        cond("a", "targeted_lead", Comparison::Equals, true),
                        cond("b", "aum_band", Comparison::Equals, "20M+"),
                    ],
                ),
                ConditionNode::group(
                    "right",
                    GroupOperator::Not,
                    vec![cond("c", "account_age_months", Comparison::LessThan, 12i64)],
                ),
            ],
        );

        let evaluation = evaluate_node(&root, &lead_user());
        let order: Vec<&str> = evaluation.trace.iter().map(|t| t.node_id.as_str()).collect();
        assert_eq!(order, vec!["a", "b", "left", "c", "right", "root"]);
        assert!(evaluation.result);
    }

    #[test]
    fn test_deterministic() {
        let root = ConditionNode::group(
            "g",
            GroupOperator::And,
            vec![cond("a", "offering_types", Comparison::Contains, "Loan")],
        );
        let first = evaluate_node(&root, &lead_user());
        let second = evaluate_node(&root, &lead_user());
        assert_eq!(first, second);
    }

    #[test]
    fn test_strict_equality() {
        let five_str = AttributeValue::from("5");
        let five = AttributeValue::from(5i64);
        assert!(!compare_values(&five_str, &five, &Comparison::Equals, AttributeType::Number));
        assert!(compare_values(&five, &five, &Comparison::Equals, AttributeType::Number));
        assert!(compare_values(&five_str, &five, &Comparison::NotEquals, AttributeType::Number));
    }

    #[test]
    fn test_ordering_requires_number_type() {
        let ten = AttributeValue::from(10i64);
        let five = AttributeValue::from("5");
        assert!(compare_values(&ten, &five, &Comparison::GreaterThan, AttributeType::Number));
        assert!(!compare_values(&ten, &five, &Comparison::GreaterThan, AttributeType::String));
        assert!(compare_values(&five, &ten, &Comparison::LessThan, AttributeType::Number));
        assert!(!compare_values(
            &AttributeValue::from("abc"),
            &ten,
            &Comparison::LessThan,
            AttributeType::Number
        ));
    }

    #[test]
    fn test_contains() {
        let products = AttributeValue::from(vec!["Investment", "Loan"]);
        assert!(compare_values(
            &products,
            &AttributeValue::from("Investment"),
            &Comparison::Contains,
            AttributeType::MultiSelect
        ));
        assert!(!compare_values(
            &products,
            &AttributeValue::from("investment"),
            &Comparison::Contains,
            AttributeType::MultiSelect
        ));

        let location = AttributeValue::from("Bangkok CBD");
        assert!(compare_values(
            &location,
            &AttributeValue::from("cbd"),
            &Comparison::Contains,
            AttributeType::String
        ));
        assert!(!compare_values(
            &location,
            &AttributeValue::from(5i64),
            &Comparison::Contains,
            AttributeType::String
        ));
        assert!(!compare_values(
            &AttributeValue::from(42i64),
            &AttributeValue::from("4"),
            &Comparison::Contains,
            AttributeType::Number
        ));
    }

    #[test]
    fn test_in_and_not_in() {
        let set = AttributeValue::from(vec!["Gold", "Platinum"]);
        let gold = AttributeValue::from("Gold");
        let silver = AttributeValue::from("Silver");

        for actual in [&gold, &silver] {
            assert_ne!(
                compare_values(actual, &set, &Comparison::In, AttributeType::Enum),
                compare_values(actual, &set, &Comparison::NotIn, AttributeType::Enum)
            );
        }
        assert!(compare_values(&gold, &set, &Comparison::In, AttributeType::Enum));
        assert!(compare_values(&silver, &set, &Comparison::NotIn, AttributeType::Enum));

        // A scalar candidate set satisfies neither operator.
        assert!(!compare_values(&gold, &gold, &Comparison::In, AttributeType::Enum));
        assert!(!compare_values(&silver, &gold, &Comparison::NotIn, AttributeType::Enum));
    }

    #[test]
    fn test_unknown_comparison_is_false() {
        let node = cond("c", "aum_band", Comparison::from("between"), "5–20M");
        let evaluation = evaluate_node(&node, &lead_user());
        assert!(!evaluation.result);
        assert_eq!(
            reasons(&evaluation),
            vec!["Assets Under Management (5–20M) between 5–20M → false"]
        );
    }

    #[test]
    fn test_condition_against_users_preserves_order() {
        let root = cond("c", "targeted_lead", Comparison::Equals, true);
        let users = vec![
            UserRecord::new("missing", "No data"),
            lead_user(),
        ];

        let results = test_condition_against_users(&root, &users);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].user.user_id, "missing");
        assert!(!results[0].matches);
        assert_eq!(results[1].user.user_id, "u1");
        assert!(results[1].matches);
        assert_eq!(results[1].evaluation_trace.len(), 1);
    }

    #[test]
    fn test_result_wire_shape() {
        let result = test_condition(
            &cond("c", "targeted_lead", Comparison::Equals, true),
            &lead_user(),
        );
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["matches"], json!(true));
        assert_eq!(value["evaluationTrace"][0]["nodeId"], json!("c"));
        assert_eq!(value["user"]["user_id"], json!("u1"));

        let evaluation = evaluate_node(&cond("c", "targeted_lead", Comparison::Equals, true), &lead_user());
        let value = serde_json::to_value(&evaluation).unwrap();
        assert_eq!(value["result"], json!(true));
        assert_eq!(value["trace"][0]["result"], json!(true));
    }
}
