//! Scalar node labels

use crate::attrs::AttrValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Scalar (or absent) human-readable identifier for a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Label {
    Str(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    /// Absent label
    Null,
}

impl Label {
    /// Converts a scalar or null attribute value into a label.
    ///
    /// Compound values (lists) have no label form and yield `None`.
    pub fn from_value(value: &AttrValue) -> Option<Label> {
        match value {
            AttrValue::String(s) => Some(Label::Str(s.clone())),
            AttrValue::Integer(i) => Some(Label::Integer(*i)),
            AttrValue::Float(f) => Some(Label::Float(*f)),
            AttrValue::Boolean(b) => Some(Label::Boolean(*b)),
            AttrValue::Null => Some(Label::Null),
            AttrValue::List(_) => None,
        }
    }
}

impl Default for Label {
    fn default() -> Self {
        Label::Str("node".to_string())
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Str(s) => write!(f, "{s}"),
            Label::Integer(i) => write!(f, "{i}"),
            Label::Float(x) => write!(f, "{x}"),
            Label::Boolean(b) => write!(f, "{b}"),
            Label::Null => write!(f, ""),
        }
    }
}

impl From<&str> for Label {
    fn from(value: &str) -> Self {
        Label::Str(value.to_string())
    }
}

impl From<String> for Label {
    fn from(value: String) -> Self {
        Label::Str(value)
    }
}
