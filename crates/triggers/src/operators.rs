//! Operator applicability per field type.
//!
//! The property editor asks `operators_for` to populate its operator
//! dropdown; the evaluator rejects combinations outside these tables.

use crate::conditions::{ConditionOperator, FieldType};

use ConditionOperator::*;

const TEXT_OPERATORS: &[ConditionOperator] = &[
    IsKnown, IsUnknown, Equals, NotEquals, Contains, NotContains, StartsWith, EndsWith,
];

const NUMERIC_OPERATORS: &[ConditionOperator] = &[
    IsKnown, IsUnknown, Equals, NotEquals, GreaterThan, LessThan, Between,
];

const ARRAY_OPERATORS: &[ConditionOperator] = &[IsEmpty, IsNotEmpty, ContainsAny, ContainsAll];

const DATE_OPERATORS: &[ConditionOperator] = &[
    IsKnown, IsUnknown, IsBefore, IsAfter, IsBetween, IsWithinLast, IsOlderThan,
];

const SELECT_OPERATORS: &[ConditionOperator] =
    &[IsKnown, IsUnknown, Is, IsNot, IsOneOf, IsNotOneOf];

/// Returns the operators a condition on a field of the given type may use.
pub fn operators_for(field_type: FieldType) -> &'static [ConditionOperator] {
    match field_type {
        FieldType::Text => TEXT_OPERATORS,
        FieldType::Numeric => NUMERIC_OPERATORS,
        FieldType::Array => ARRAY_OPERATORS,
        FieldType::Date => DATE_OPERATORS,
        FieldType::Select => SELECT_OPERATORS,
    }
}

/// True if the operator is valid for the field type.
pub fn is_applicable(field_type: FieldType, operator: ConditionOperator) -> bool {
    operators_for(field_type).contains(&operator)
}

/// True for operators that take no condition value.
pub fn is_zero_arity(operator: ConditionOperator) -> bool {
    matches!(operator, IsKnown | IsUnknown | IsEmpty | IsNotEmpty)
}

/// True for operators whose value is a 2-element array.
pub fn is_range(operator: ConditionOperator) -> bool {
    matches!(operator, Between | IsBetween | IsWithinLast | IsOlderThan)
}

/// True for operators whose value is a list of candidates.
pub fn is_multi_value(operator: ConditionOperator) -> bool {
    matches!(operator, IsOneOf | IsNotOneOf | ContainsAny | ContainsAll)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_field_type_has_operators() {
        for ft in [
            FieldType::Text,
            FieldType::Numeric,
            FieldType::Array,
            FieldType::Date,
            FieldType::Select,
        ] {
            assert!(!operators_for(ft).is_empty());
        }
    }

    #[test]
    fn test_applicability() {
        assert!(is_applicable(FieldType::Text, Contains));
        assert!(is_applicable(FieldType::Numeric, Between));
        assert!(is_applicable(FieldType::Date, IsWithinLast));
        assert!(!is_applicable(FieldType::Text, Between));
        assert!(!is_applicable(FieldType::Select, Contains));
        assert!(!is_applicable(FieldType::Array, Equals));
    }

    #[test]
    fn test_arity_classification() {
        assert!(is_zero_arity(IsKnown));
        assert!(is_zero_arity(IsNotEmpty));
        assert!(!is_zero_arity(Equals));

        assert!(is_range(Between));
        assert!(is_range(IsOlderThan));
        assert!(!is_range(GreaterThan));

        assert!(is_multi_value(ContainsAll));
        assert!(!is_multi_value(Is));
    }
}
