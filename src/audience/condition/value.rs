// SPDX-License-Identifier: MIT

//! Attribute values stored in user records and used as comparison operands

use serde::{Deserialize, Serialize};

/// A scalar or list value attached to a user attribute or a condition operand.
///
/// A top-level null is modelled as `Option::None` by the containers that hold
/// an `AttributeValue`. Nulls nested in lists and object operands land in
/// `Opaque` so a malformed operand still reaches the evaluator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Bool(bool),
    Number(f64),
    String(String),
    List(Vec<AttributeValue>),
    Opaque(serde_json::Value),
}

impl AttributeValue {
    pub fn as_list(&self) -> Option<&[AttributeValue]> {
        match self {
            AttributeValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// True for the empty string, which authoring treats as "no value".
    pub fn is_blank(&self) -> bool {
        matches!(self, AttributeValue::String(s) if s.is_empty())
    }

    /// Identity comparison without coercion.
    ///
    /// Lists and objects are never strictly equal to anything: two of them
    /// are distinct values even when their contents match. Null equals null.
    pub fn strict_eq(&self, other: &AttributeValue) -> bool {
        match (self, other) {
            (AttributeValue::Bool(a), AttributeValue::Bool(b)) => a == b,
            (AttributeValue::Number(a), AttributeValue::Number(b)) => a == b,
            (AttributeValue::String(a), AttributeValue::String(b)) => a == b,
            (AttributeValue::Opaque(a), AttributeValue::Opaque(b)) => a.is_null() && b.is_null(),
            _ => false,
        }
    }

    /// Membership equality: strict, except that NaN matches NaN.
    pub fn same_value_zero(&self, other: &AttributeValue) -> bool {
        match (self, other) {
            (AttributeValue::Number(a), AttributeValue::Number(b)) if a.is_nan() && b.is_nan() => {
                true
            }
            _ => self.strict_eq(other),
        }
    }

    /// Numeric coercion. Unparseable input yields NaN, which fails every
    /// ordering comparison.
    pub fn to_number(&self) -> f64 {
        match self {
            AttributeValue::Bool(true) => 1.0,
            AttributeValue::Bool(false) => 0.0,
            AttributeValue::Number(n) => *n,
            AttributeValue::String(s) => parse_numeric(s),
            AttributeValue::List(items) => match items.as_slice() {
                [] => 0.0,
                [single] => parse_numeric(&single.list_item_text()),
                _ => f64::NAN,
            },
            AttributeValue::Opaque(value) if value.is_null() => 0.0,
            AttributeValue::Opaque(_) => f64::NAN,
        }
    }

    /// Text of a value joined inside a list, where null renders empty.
    fn list_item_text(&self) -> String {
        match self {
            AttributeValue::Opaque(value) if value.is_null() => String::new(),
            other => other.to_string(),
        }
    }
}

fn parse_numeric(input: &str) -> f64 {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    // Rust's float parser also accepts "inf" and "nan"; those are not numbers here.
    if !trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | 'e' | 'E'))
    {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else if n == 0.0 {
        "0".to_string()
    } else if n.abs() >= 1e21 || n.abs() < 1e-6 {
        format_exponent(n)
    } else {
        format!("{}", n)
    }
}

/// Shortest round-trip digits in `1e+21` / `1.5e-7` form.
fn format_exponent(n: f64) -> String {
    let formatted = format!("{:e}", n);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => formatted,
    }
}

impl std::fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttributeValue::Bool(b) => write!(f, "{}", b),
            AttributeValue::Number(n) => write!(f, "{}", format_number(*n)),
            AttributeValue::String(s) => write!(f, "{}", s),
            AttributeValue::List(items) => {
                let joined: Vec<String> = items.iter().map(|v| v.list_item_text()).collect();
                write!(f, "{}", joined.join(","))
            }
            AttributeValue::Opaque(value) if value.is_null() => write!(f, "null"),
            AttributeValue::Opaque(_) => write!(f, "[object Object]"),
        }
    }
}

impl From<bool> for AttributeValue {
    fn from(b: bool) -> Self {
        AttributeValue::Bool(b)
    }
}

impl From<f64> for AttributeValue {
    fn from(n: f64) -> Self {
        AttributeValue::Number(n)
    }
}

impl From<i64> for AttributeValue {
    fn from(n: i64) -> Self {
        AttributeValue::Number(n as f64)
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue::String(s.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        AttributeValue::String(s)
    }
}

impl From<Vec<&str>> for AttributeValue {
    fn from(items: Vec<&str>) -> Self {
        AttributeValue::List(items.into_iter().map(AttributeValue::from).collect())
    }
}

impl From<Vec<AttributeValue>> for AttributeValue {
    fn from(items: Vec<AttributeValue>) -> Self {
        AttributeValue::List(items)
    }
}
