//! Trigger engine — registers the triggers of published workflows and
//! campaigns and reports which of them fire for a given lead. Used by the
//! authoring UI's "test this lead" preview; actual execution is handled
//! downstream.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::conditions::{ConditionGroup, LeadRecord};
use crate::evaluator::evaluate_group;

/// A named trigger extracted from a builder configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerDefinition {
    pub id: Uuid,
    pub name: String,
    /// The workflow or campaign configuration this trigger belongs to.
    pub builder_id: Uuid,
    pub condition_groups: Vec<ConditionGroup>,
    pub enabled: bool,
}

pub struct TriggerEngine {
    triggers: DashMap<Uuid, TriggerDefinition>,
}

impl TriggerEngine {
    pub fn new() -> Self {
        Self {
            triggers: DashMap::new(),
        }
    }

    pub fn register_trigger(&self, trigger: TriggerDefinition) -> Uuid {
        let id = trigger.id;
        info!(trigger_id = %id, name = %trigger.name, "Registering trigger");
        self.triggers.insert(id, trigger);
        id
    }

    pub fn get_trigger(&self, id: &Uuid) -> Option<TriggerDefinition> {
        self.triggers.get(id).map(|t| t.clone())
    }

    pub fn list_triggers(&self) -> Vec<TriggerDefinition> {
        self.triggers.iter().map(|t| t.value().clone()).collect()
    }

    pub fn remove_trigger(&self, id: &Uuid) -> Option<TriggerDefinition> {
        self.triggers.remove(id).map(|(_, t)| t)
    }

    pub fn set_enabled(&self, id: &Uuid, enabled: bool) {
        if let Some(mut t) = self.triggers.get_mut(id) {
            t.enabled = enabled;
        }
    }

    /// Returns the ids of all enabled triggers that fire for the record.
    /// A trigger fires when any of its condition groups matches.
    pub fn matching_triggers(&self, record: &LeadRecord, now: DateTime<Utc>) -> Vec<Uuid> {
        let mut matches = Vec::new();
        for entry in self.triggers.iter() {
            let trigger = entry.value();
            if !trigger.enabled {
                continue;
            }
            if trigger
                .condition_groups
                .iter()
                .any(|g| evaluate_group(g, record, now))
            {
                matches.push(trigger.id);
            }
        }
        matches
    }
}

impl Default for TriggerEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conditions::{ConditionOperator, FieldType, GroupOperator, TriggerCondition};
    use serde_json::json;

    fn make_trigger(name: &str, field: &str, expected: &str) -> TriggerDefinition {
        let mut group = ConditionGroup::new(GroupOperator::And);
        group.conditions.push(TriggerCondition::new(
            field,
            FieldType::Select,
            ConditionOperator::Is,
            json!(expected),
        ));
        TriggerDefinition {
            id: Uuid::new_v4(),
            name: name.to_string(),
            builder_id: Uuid::new_v4(),
            condition_groups: vec![group],
            enabled: true,
        }
    }

    #[test]
    fn test_matching_triggers() {
        let engine = TriggerEngine::new();
        let web = engine.register_trigger(make_trigger("web leads", "source", "Web"));
        let ads = engine.register_trigger(make_trigger("ad leads", "source", "Ads"));

        let record = LeadRecord::new().with_attribute("source", json!("Web"));
        let matches = engine.matching_triggers(&record, Utc::now());

        assert!(matches.contains(&web));
        assert!(!matches.contains(&ads));
    }

    #[test]
    fn test_disabled_trigger_never_fires() {
        let engine = TriggerEngine::new();
        let id = engine.register_trigger(make_trigger("web leads", "source", "Web"));
        engine.set_enabled(&id, false);

        let record = LeadRecord::new().with_attribute("source", json!("Web"));
        assert!(engine.matching_triggers(&record, Utc::now()).is_empty());
    }

    #[test]
    fn test_unconfigured_trigger_never_fires() {
        let engine = TriggerEngine::new();
        let id = engine.register_trigger(TriggerDefinition {
            id: Uuid::new_v4(),
            name: "empty".to_string(),
            builder_id: Uuid::new_v4(),
            condition_groups: vec![ConditionGroup::new(GroupOperator::And)],
            enabled: true,
        });

        let record = LeadRecord::new().with_attribute("source", json!("Web"));
        assert!(!engine.matching_triggers(&record, Utc::now()).contains(&id));
    }

    #[test]
    fn test_remove_trigger() {
        let engine = TriggerEngine::new();
        let id = engine.register_trigger(make_trigger("web leads", "source", "Web"));
        assert!(engine.get_trigger(&id).is_some());
        engine.remove_trigger(&id);
        assert!(engine.get_trigger(&id).is_none());
        assert!(engine.list_triggers().is_empty());
    }
}
