// SPDX-License-Identifier: MIT

//! Attribute metadata definitions

use serde::{Deserialize, Serialize};

use crate::audience::condition::Comparison;

/// Metadata for a targetable user attribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeDefinition {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub attribute_type: AttributeType,
    /// Section of the user record that holds the raw value
    pub group: AttributeGroup,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    /// Prominently offered in the authoring surface
    #[serde(default)]
    pub featured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Value type of an attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttributeType {
    Boolean,
    Enum,
    MultiSelect,
    Number,
    String,
}

impl AttributeType {
    /// Comparisons offered for this attribute type
    pub fn available_comparisons(self) -> Vec<Comparison> {
        Comparison::ALL
            .into_iter()
            .filter(|c| self.supports(c))
            .collect()
    }

    pub fn supports(self, comparison: &Comparison) -> bool {
        use AttributeType::*;
        match comparison {
            Comparison::Equals | Comparison::NotEquals => {
                matches!(self, Boolean | Enum | String | Number)
            }
            Comparison::GreaterThan | Comparison::LessThan => self == Number,
            Comparison::Contains => matches!(self, MultiSelect | String),
            Comparison::In | Comparison::NotIn => matches!(self, Enum | MultiSelect),
            Comparison::Unknown(_) => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AttributeType::Boolean => "boolean",
            AttributeType::Enum => "enum",
            AttributeType::MultiSelect => "multi-select",
            AttributeType::Number => "number",
            AttributeType::String => "string",
        }
    }
}

impl std::fmt::Display for AttributeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// User-record section an attribute lives in
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AttributeGroup {
    Customer,
    Activity,
    Custom,
    Investment,
    Digital,
    /// A group name with no matching user-record section
    Other(String),
}

impl AttributeGroup {
    pub fn as_str(&self) -> &str {
        match self {
            AttributeGroup::Customer => "customer",
            AttributeGroup::Activity => "activity",
            AttributeGroup::Custom => "custom",
            AttributeGroup::Investment => "investment",
            AttributeGroup::Digital => "digital",
            AttributeGroup::Other(s) => s,
        }
    }
}

impl From<String> for AttributeGroup {
    fn from(s: String) -> Self {
        match s.as_str() {
            "customer" => AttributeGroup::Customer,
            "activity" => AttributeGroup::Activity,
            "custom" => AttributeGroup::Custom,
            "investment" => AttributeGroup::Investment,
            "digital" => AttributeGroup::Digital,
            _ => AttributeGroup::Other(s),
        }
    }
}

impl From<&str> for AttributeGroup {
    fn from(s: &str) -> Self {
        AttributeGroup::from(s.to_string())
    }
}

impl From<AttributeGroup> for String {
    fn from(g: AttributeGroup) -> Self {
        g.as_str().to_string()
    }
}

impl std::fmt::Display for AttributeGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_available_comparisons() {
        assert_eq!(
            AttributeType::Number.available_comparisons(),
            vec![
                Comparison::Equals,
                Comparison::NotEquals,
                Comparison::GreaterThan,
                Comparison::LessThan
            ]
        );
        assert_eq!(
            AttributeType::MultiSelect.available_comparisons(),
            vec![Comparison::Contains, Comparison::In, Comparison::NotIn]
        );
        assert_eq!(
            AttributeType::Boolean.available_comparisons(),
            vec![Comparison::Equals, Comparison::NotEquals]
        );
    }

    #[test]
    fn test_parse_definition() {
        let def: AttributeDefinition = serde_json::from_value(json!({
            "id": "risk_band",
            "label": "Risk Profile",
            "type": "enum",
            "group": "customer",
            "options": ["Cautious", "Balanced", "Aggressive"]
        }))
        .unwrap();

        assert_eq!(def.attribute_type, AttributeType::Enum);
        assert_eq!(def.group, AttributeGroup::Customer);
        assert_eq!(def.options.len(), 3);
        assert!(!def.featured);
    }

    #[test]
    fn test_multi_select_wire_name() {
        let t: AttributeType = serde_json::from_value(json!("multi-select")).unwrap();
        assert_eq!(t, AttributeType::MultiSelect);
        assert_eq!(t.to_string(), "multi-select");
    }

    #[test]
    fn test_unknown_group_is_kept() {
        let g: AttributeGroup = serde_json::from_value(json!("loyalty")).unwrap();
        assert_eq!(g, AttributeGroup::Other("loyalty".into()));
        assert_eq!(g.to_string(), "loyalty");
    }
}
