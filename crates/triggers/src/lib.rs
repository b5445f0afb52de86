//! Trigger-condition evaluation — boolean condition groups with
//! per-field-type operator semantics, used to decide when workflows and
//! campaigns fire for a lead.

pub mod conditions;
pub mod engine;
pub mod evaluator;
pub mod operators;

pub use conditions::{
    ConditionGroup, ConditionOperator, FieldType, GroupOperator, LeadRecord, TriggerCondition,
};
pub use engine::{TriggerDefinition, TriggerEngine};
pub use evaluator::{evaluate_condition, evaluate_group};
