//! Condition types for trigger evaluation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A boolean combination of field conditions. Groups may nest, though the
/// authoring UI currently only produces one flat level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionGroup {
    pub id: Uuid,
    pub operator: GroupOperator,
    pub conditions: Vec<TriggerCondition>,
    #[serde(default)]
    pub groups: Vec<ConditionGroup>,
}

impl ConditionGroup {
    pub fn new(operator: GroupOperator) -> Self {
        Self {
            id: Uuid::new_v4(),
            operator,
            conditions: Vec::new(),
            groups: Vec::new(),
        }
    }

    /// A group with no conditions anywhere in its tree is "not yet
    /// configured" and never matches.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty() && self.groups.iter().all(|g| g.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GroupOperator {
    And,
    Or,
}

/// A single field condition within a group.
///
/// `value` shape depends on the operator: `Null` for zero-arity operators
/// (`is_known`, `is_empty`, ...), a scalar for single-value operators, a
/// 2-element array for range operators (`between`, `is_between`, and the
/// `[amount, unit]` pair of `is_within_last`/`is_older_than`), and an
/// array for multi-value operators (`is_one_of`, `contains_any`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerCondition {
    pub id: Uuid,
    pub field: String,
    pub field_type: FieldType,
    pub operator: ConditionOperator,
    #[serde(default)]
    pub value: serde_json::Value,
}

impl TriggerCondition {
    pub fn new(
        field: impl Into<String>,
        field_type: FieldType,
        operator: ConditionOperator,
        value: serde_json::Value,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            field: field.into(),
            field_type,
            operator,
            value,
        }
    }
}

/// The declared type of the lead field a condition tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    Numeric,
    Array,
    Date,
    Select,
}

/// Every operator any field type supports. Which operators apply to which
/// field type is defined by `operators::operators_for`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionOperator {
    IsKnown,
    IsUnknown,
    IsEmpty,
    IsNotEmpty,
    Equals,
    NotEquals,
    Contains,
    NotContains,
    StartsWith,
    EndsWith,
    GreaterThan,
    LessThan,
    Between,
    IsBefore,
    IsAfter,
    IsBetween,
    IsWithinLast,
    IsOlderThan,
    Is,
    IsNot,
    IsOneOf,
    IsNotOneOf,
    ContainsAny,
    ContainsAll,
}

/// The candidate record conditions are evaluated against — a lead or
/// contact, as a flat attribute map.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeadRecord {
    pub attributes: HashMap<String, serde_json::Value>,
}

impl LeadRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    /// Returns the attribute value, or `None` when the field is absent or
    /// explicitly null.
    pub fn get(&self, field: &str) -> Option<&serde_json::Value> {
        self.attributes.get(field).filter(|v| !v.is_null())
    }
}
