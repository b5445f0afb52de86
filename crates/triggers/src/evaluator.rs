//! Pure condition evaluation against a lead record.
//!
//! Evaluation is deterministic: time-relative operators take `now` as a
//! parameter instead of reading the wall clock. A condition whose value
//! shape does not match its declared field type fails closed to `false`,
//! as does any `(field_type, operator)` pair outside the applicability
//! tables — a mis-evaluated trigger sends real email downstream, so the
//! evaluator never guesses.
//!
//! Text comparisons are case-insensitive; `select` comparisons are exact,
//! since select values come from a fixed option list.

use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use tracing::warn;

use crate::conditions::{
    ConditionGroup, ConditionOperator, FieldType, GroupOperator, LeadRecord, TriggerCondition,
};
use crate::operators::is_applicable;

/// Evaluates a condition group against a record. An empty group (no
/// conditions anywhere in its tree) never matches: the UI treats it as a
/// trigger that has not been configured yet.
pub fn evaluate_group(group: &ConditionGroup, record: &LeadRecord, now: DateTime<Utc>) -> bool {
    if group.is_empty() {
        return false;
    }
    match group.operator {
        GroupOperator::And => {
            group
                .conditions
                .iter()
                .all(|c| evaluate_condition(c, record, now))
                && group.groups.iter().all(|g| evaluate_group(g, record, now))
        }
        GroupOperator::Or => {
            group
                .conditions
                .iter()
                .any(|c| evaluate_condition(c, record, now))
                || group.groups.iter().any(|g| evaluate_group(g, record, now))
        }
    }
}

/// Evaluates a single condition against a record.
pub fn evaluate_condition(
    condition: &TriggerCondition,
    record: &LeadRecord,
    now: DateTime<Utc>,
) -> bool {
    if !is_applicable(condition.field_type, condition.operator) {
        warn!(
            field = %condition.field,
            field_type = ?condition.field_type,
            operator = ?condition.operator,
            "Operator not applicable to field type, failing closed"
        );
        return false;
    }

    match condition.field_type {
        FieldType::Text => evaluate_text(condition, record),
        FieldType::Numeric => evaluate_numeric(condition, record),
        FieldType::Array => evaluate_array(condition, record),
        FieldType::Date => evaluate_date(condition, record, now),
        FieldType::Select => evaluate_select(condition, record),
    }
}

// ------------------------------------------------------------------
// Per-field-type dispatch
// ------------------------------------------------------------------

fn evaluate_text(condition: &TriggerCondition, record: &LeadRecord) -> bool {
    use ConditionOperator::*;

    let actual = record.get(&condition.field).and_then(text_value);
    match condition.operator {
        IsKnown => actual.is_some(),
        IsUnknown => actual.is_none(),
        _ => {
            let (Some(actual), Some(expected)) = (actual, text_value(&condition.value)) else {
                return fail_closed(condition, "text operand missing or non-string");
            };
            let actual = actual.to_lowercase();
            let expected = expected.to_lowercase();
            match condition.operator {
                Equals => actual == expected,
                NotEquals => actual != expected,
                Contains => actual.contains(&expected),
                NotContains => !actual.contains(&expected),
                StartsWith => actual.starts_with(&expected),
                EndsWith => actual.ends_with(&expected),
                _ => unreachable!("operator table guarantees text operators"),
            }
        }
    }
}

fn evaluate_numeric(condition: &TriggerCondition, record: &LeadRecord) -> bool {
    use ConditionOperator::*;

    let actual = record.get(&condition.field).and_then(numeric_value);
    match condition.operator {
        IsKnown => actual.is_some(),
        IsUnknown => actual.is_none(),
        Between => {
            let (Some(actual), Some((low, high))) = (actual, numeric_range(&condition.value))
            else {
                return fail_closed(condition, "numeric range operand malformed");
            };
            // Inclusive of both bounds.
            actual >= low && actual <= high
        }
        _ => {
            let (Some(actual), Some(expected)) = (actual, numeric_value(&condition.value)) else {
                return fail_closed(condition, "numeric operand missing or non-numeric");
            };
            match condition.operator {
                Equals => actual == expected,
                NotEquals => actual != expected,
                GreaterThan => actual > expected,
                LessThan => actual < expected,
                _ => unreachable!("operator table guarantees numeric operators"),
            }
        }
    }
}

fn evaluate_array(condition: &TriggerCondition, record: &LeadRecord) -> bool {
    use ConditionOperator::*;

    let actual = record.get(&condition.field).and_then(Value::as_array);
    match condition.operator {
        IsEmpty => actual.map_or(true, |a| a.is_empty()),
        IsNotEmpty => actual.is_some_and(|a| !a.is_empty()),
        ContainsAny | ContainsAll => {
            let (Some(actual), Some(expected)) = (actual, condition.value.as_array()) else {
                return fail_closed(condition, "array operand missing or not a list");
            };
            match condition.operator {
                ContainsAny => expected.iter().any(|e| actual.contains(e)),
                ContainsAll => expected.iter().all(|e| actual.contains(e)),
                _ => unreachable!(),
            }
        }
        _ => unreachable!("operator table guarantees array operators"),
    }
}

fn evaluate_date(condition: &TriggerCondition, record: &LeadRecord, now: DateTime<Utc>) -> bool {
    use ConditionOperator::*;

    let actual = record.get(&condition.field).and_then(date_value);
    match condition.operator {
        IsKnown => actual.is_some(),
        IsUnknown => actual.is_none(),
        IsBefore | IsAfter => {
            let (Some(actual), Some(expected)) = (actual, date_value(&condition.value)) else {
                return fail_closed(condition, "date operand missing or unparseable");
            };
            // Strict: equal instants are neither before nor after.
            match condition.operator {
                IsBefore => actual < expected,
                IsAfter => actual > expected,
                _ => unreachable!(),
            }
        }
        IsBetween => {
            let Some(actual) = actual else {
                return fail_closed(condition, "date operand missing or unparseable");
            };
            let Some([start, end]) = condition
                .value
                .as_array()
                .filter(|a| a.len() == 2)
                .and_then(|a| Some([date_value(&a[0])?, date_value(&a[1])?]))
            else {
                return fail_closed(condition, "date range operand malformed");
            };
            actual >= start && actual <= end
        }
        IsWithinLast | IsOlderThan => {
            let (Some(actual), Some(window)) = (actual, window_value(&condition.value)) else {
                return fail_closed(condition, "date window operand malformed");
            };
            let cutoff = now - window;
            // A record exactly at the cutoff counts as within, not older.
            match condition.operator {
                IsWithinLast => actual >= cutoff,
                IsOlderThan => actual < cutoff,
                _ => unreachable!(),
            }
        }
        _ => unreachable!("operator table guarantees date operators"),
    }
}

fn evaluate_select(condition: &TriggerCondition, record: &LeadRecord) -> bool {
    use ConditionOperator::*;

    let actual = record.get(&condition.field).and_then(text_value);
    match condition.operator {
        IsKnown => actual.is_some(),
        IsUnknown => actual.is_none(),
        Is | IsNot => {
            let (Some(actual), Some(expected)) = (actual, text_value(&condition.value)) else {
                return fail_closed(condition, "select operand missing");
            };
            match condition.operator {
                Is => actual == expected,
                IsNot => actual != expected,
                _ => unreachable!(),
            }
        }
        IsOneOf | IsNotOneOf => {
            let (Some(actual), Some(options)) = (actual, condition.value.as_array()) else {
                return fail_closed(condition, "select options operand malformed");
            };
            let member = options.iter().filter_map(text_value).any(|o| o == actual);
            match condition.operator {
                IsOneOf => member,
                IsNotOneOf => !member,
                _ => unreachable!(),
            }
        }
        _ => unreachable!("operator table guarantees select operators"),
    }
}

// ------------------------------------------------------------------
// Value coercion helpers
// ------------------------------------------------------------------

fn fail_closed(condition: &TriggerCondition, reason: &str) -> bool {
    warn!(
        field = %condition.field,
        operator = ?condition.operator,
        reason,
        "Condition failed closed"
    );
    false
}

/// A non-empty string view of a JSON value.
fn text_value(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| !s.is_empty())
}

/// Numeric coercion: native numbers plus numeric strings.
fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn numeric_range(value: &Value) -> Option<(f64, f64)> {
    let arr = value.as_array().filter(|a| a.len() == 2)?;
    Some((numeric_value(&arr[0])?, numeric_value(&arr[1])?))
}

/// Parses an RFC 3339 timestamp or a plain `YYYY-MM-DD` date (midnight UTC).
fn date_value(value: &Value) -> Option<DateTime<Utc>> {
    let s = value.as_str()?;
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Parses the `[amount, unit]` pair of the relative date operators.
/// A month is counted as 30 days.
fn window_value(value: &Value) -> Option<Duration> {
    let arr = value.as_array().filter(|a| a.len() == 2)?;
    let amount = arr[0].as_i64().or_else(|| numeric_value(&arr[0]).map(|f| f as i64))?;
    if amount < 0 {
        return None;
    }
    match arr[1].as_str()? {
        "hours" => Some(Duration::hours(amount)),
        "days" => Some(Duration::days(amount)),
        "weeks" => Some(Duration::weeks(amount)),
        "months" => Some(Duration::days(amount * 30)),
        _ => None,
    }
}
