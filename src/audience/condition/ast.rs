// SPDX-License-Identifier: MIT

//! Condition tree nodes
//!
//! Trees arrive from an authoring surface and are frequently incomplete, so
//! every field a user fills in is optional and operator names that are not
//! recognized are kept verbatim instead of being rejected at parse time.

use serde::{Deserialize, Serialize};

use super::value::AttributeValue;

/// A node in a condition tree.
///
/// Deserialization never fails for a single node: anything that does not fit
/// the `group` or `condition` shape becomes `NodeKind::Invalid`, so one bad
/// child does not reject the rest of the tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "NodeRepr")]
pub struct ConditionNode {
    #[serde(default)]
    pub id: String,
    #[serde(flatten)]
    pub kind: NodeKind,
    /// Informational nesting level written by the authoring surface
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<u32>,
}

#[derive(Deserialize)]
struct WireNode {
    #[serde(default)]
    id: String,
    #[serde(flatten)]
    kind: NodeKind,
    #[serde(default)]
    depth: Option<u32>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NodeRepr {
    Wire(WireNode),
    Malformed(serde_json::Value),
}

impl From<NodeRepr> for ConditionNode {
    fn from(repr: NodeRepr) -> Self {
        match repr {
            NodeRepr::Wire(node) => Self {
                id: node.id,
                kind: node.kind,
                depth: node.depth,
            },
            NodeRepr::Malformed(value) => {
                log::debug!("Malformed condition node: {}", value);
                Self {
                    id: value
                        .get("id")
                        .and_then(|id| id.as_str())
                        .unwrap_or_default()
                        .to_string(),
                    kind: NodeKind::Invalid,
                    depth: None,
                }
            }
        }
    }
}

/// Shape of a node, discriminated by its `type` field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeKind {
    Group(GroupNode),
    Condition(ConditionLeaf),
    /// Any `type` other than `group` or `condition`
    #[serde(other)]
    Invalid,
}

/// Logical combination of child nodes
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GroupNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<GroupOperator>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<ConditionNode>>,
}

/// A single attribute comparison
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionLeaf {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparison: Option<Comparison>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<AttributeValue>,
}

/// Group operators
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GroupOperator {
    And,
    Or,
    Not,
    Unknown(String),
}

impl GroupOperator {
    pub fn as_str(&self) -> &str {
        match self {
            GroupOperator::And => "AND",
            GroupOperator::Or => "OR",
            GroupOperator::Not => "NOT",
            GroupOperator::Unknown(s) => s,
        }
    }
}

impl From<String> for GroupOperator {
    fn from(s: String) -> Self {
        match s.as_str() {
            "AND" => GroupOperator::And,
            "OR" => GroupOperator::Or,
            "NOT" => GroupOperator::Not,
            _ => GroupOperator::Unknown(s),
        }
    }
}

impl From<GroupOperator> for String {
    fn from(op: GroupOperator) -> Self {
        op.as_str().to_string()
    }
}

impl std::fmt::Display for GroupOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Comparison operators for condition leaves
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Comparison {
    Equals,
    NotEquals,
    GreaterThan,
    LessThan,
    Contains,
    In,
    NotIn,
    Unknown(String),
}

impl Comparison {
    pub const ALL: [Comparison; 7] = [
        Comparison::Equals,
        Comparison::NotEquals,
        Comparison::GreaterThan,
        Comparison::LessThan,
        Comparison::Contains,
        Comparison::In,
        Comparison::NotIn,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Comparison::Equals => "equals",
            Comparison::NotEquals => "not_equals",
            Comparison::GreaterThan => "greater_than",
            Comparison::LessThan => "less_than",
            Comparison::Contains => "contains",
            Comparison::In => "in",
            Comparison::NotIn => "not_in",
            Comparison::Unknown(s) => s,
        }
    }

    /// Human-facing label used by the authoring surface
    pub fn label(&self) -> &str {
        match self {
            Comparison::Equals => "equals (=)",
            Comparison::NotEquals => "does not equal (≠)",
            Comparison::GreaterThan => "greater than (>)",
            Comparison::LessThan => "less than (<)",
            Comparison::Contains => "contains",
            Comparison::In => "is one of",
            Comparison::NotIn => "is not one of",
            Comparison::Unknown(s) => s,
        }
    }
}

impl From<String> for Comparison {
    fn from(s: String) -> Self {
        match s.as_str() {
            "equals" => Comparison::Equals,
            "not_equals" => Comparison::NotEquals,
            "greater_than" => Comparison::GreaterThan,
            "less_than" => Comparison::LessThan,
            "contains" => Comparison::Contains,
            "in" => Comparison::In,
            "not_in" => Comparison::NotIn,
            _ => Comparison::Unknown(s),
        }
    }
}

impl From<&str> for Comparison {
    fn from(s: &str) -> Self {
        Comparison::from(s.to_string())
    }
}

impl From<Comparison> for String {
    fn from(c: Comparison) -> Self {
        c.as_str().to_string()
    }
}

impl std::fmt::Display for Comparison {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ConditionNode {
    /// Build a complete condition leaf
    pub fn condition(
        id: impl Into<String>,
        attribute_id: impl Into<String>,
        comparison: Comparison,
        value: impl Into<AttributeValue>,
    ) -> Self {
        Self {
            id: id.into(),
            kind: NodeKind::Condition(ConditionLeaf {
                attribute_id: Some(attribute_id.into()),
                comparison: Some(comparison),
                value: Some(value.into()),
            }),
            depth: None,
        }
    }

    /// Build a group over the given children
    pub fn group(id: impl Into<String>, operator: GroupOperator, children: Vec<ConditionNode>) -> Self {
        Self {
            id: id.into(),
            kind: NodeKind::Group(GroupNode {
                operator: Some(operator),
                children: Some(children),
            }),
            depth: None,
        }
    }

    /// Child nodes, empty for leaves and malformed groups
    pub fn children(&self) -> &[ConditionNode] {
        match &self.kind {
            NodeKind::Group(GroupNode {
                children: Some(children),
                ..
            }) => children,
            _ => &[],
        }
    }
}

/// A named audience definition wrapping a root node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudienceCondition {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub root_node: ConditionNode,
}
