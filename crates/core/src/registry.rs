//! Element type registry — the catalog mapping element type identifiers to
//! their labels, default config, and editable-property schema, per builder
//! type. The authoring core only consumes `element_type` and
//! `default_config`; `config_schema` drives the property-editing UI.

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::types::BuilderType;

/// Palette grouping for an element type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementCategory {
    Input,
    Choice,
    Content,
    Trigger,
    Action,
    Logic,
    Timing,
    Messaging,
    Audience,
    Stage,
}

/// Describes one element type available in a builder's palette.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementTypeDescriptor {
    pub element_type: String,
    pub label: String,
    pub category: ElementCategory,
    pub icon: String,
    pub default_config: serde_json::Value,
    pub config_schema: serde_json::Value,
}

/// Read-only lookup of element types per builder surface.
pub struct ElementTypeRegistry {
    types: DashMap<BuilderType, Vec<ElementTypeDescriptor>>,
}

impl ElementTypeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            types: DashMap::new(),
        }
    }

    /// Creates a registry pre-populated with the stock palette for every
    /// builder type.
    pub fn with_default_catalog() -> Self {
        let registry = Self::new();
        registry.seed_default_catalog();
        registry
    }

    /// Registers a descriptor under the given builder type, replacing any
    /// existing descriptor with the same `element_type`.
    pub fn register(&self, builder_type: BuilderType, descriptor: ElementTypeDescriptor) {
        let mut entry = self.types.entry(builder_type).or_default();
        entry.retain(|d| d.element_type != descriptor.element_type);
        entry.push(descriptor);
    }

    /// Returns all element types available for the given builder.
    pub fn element_types_for(&self, builder_type: BuilderType) -> Vec<ElementTypeDescriptor> {
        self.types
            .get(&builder_type)
            .map(|e| e.clone())
            .unwrap_or_default()
    }

    /// Looks up a single descriptor by builder type and element type key.
    pub fn descriptor(
        &self,
        builder_type: BuilderType,
        element_type: &str,
    ) -> Option<ElementTypeDescriptor> {
        self.types
            .get(&builder_type)
            .and_then(|e| e.iter().find(|d| d.element_type == element_type).cloned())
    }

    /// Seeds the built-in catalog for all builder surfaces.
    pub fn seed_default_catalog(&self) {
        info!("Seeding default element type catalog");

        // ---- Form ----
        for d in [
            descriptor(
                "text_field",
                "Text Field",
                ElementCategory::Input,
                "type",
                json!({"placeholder": "", "required": false, "max_length": 255}),
                json!({"fields": ["placeholder", "required", "max_length"]}),
            ),
            descriptor(
                "email_field",
                "Email Address",
                ElementCategory::Input,
                "mail",
                json!({"placeholder": "name@example.com", "required": true}),
                json!({"fields": ["placeholder", "required"]}),
            ),
            descriptor(
                "phone_field",
                "Phone Number",
                ElementCategory::Input,
                "phone",
                json!({"placeholder": "", "required": false}),
                json!({"fields": ["placeholder", "required"]}),
            ),
            descriptor(
                "dropdown",
                "Dropdown",
                ElementCategory::Choice,
                "list",
                json!({"options": [], "required": false, "multiple": false}),
                json!({"fields": ["options", "required", "multiple"]}),
            ),
            descriptor(
                "checkbox_group",
                "Checkboxes",
                ElementCategory::Choice,
                "check-square",
                json!({"options": [], "required": false}),
                json!({"fields": ["options", "required"]}),
            ),
            descriptor(
                "paragraph",
                "Paragraph Text",
                ElementCategory::Content,
                "align-left",
                json!({"text": ""}),
                json!({"fields": ["text"]}),
            ),
        ] {
            self.register(BuilderType::Form, d);
        }

        // ---- Workflow ----
        for d in [
            descriptor(
                "trigger",
                "Trigger",
                ElementCategory::Trigger,
                "zap",
                json!({"trigger_type": "record_updated", "condition_groups": []}),
                json!({"fields": ["trigger_type", "condition_groups"]}),
            ),
            descriptor(
                "send_email",
                "Send Email",
                ElementCategory::Action,
                "mail",
                json!({"template_id": null, "sender": "default"}),
                json!({"fields": ["template_id", "sender"]}),
            ),
            descriptor(
                "update_lead",
                "Update Lead",
                ElementCategory::Action,
                "user-check",
                json!({"field": "", "value": null}),
                json!({"fields": ["field", "value"]}),
            ),
            descriptor(
                "branch",
                "Condition Branch",
                ElementCategory::Logic,
                "git-branch",
                json!({"condition_groups": []}),
                json!({"fields": ["condition_groups"]}),
            ),
            descriptor(
                "delay",
                "Delay",
                ElementCategory::Timing,
                "clock",
                json!({"delay": {"value": 1, "unit": "days"}}),
                json!({"fields": ["delay"]}),
            ),
        ] {
            self.register(BuilderType::Workflow, d);
        }

        // ---- Campaign ----
        for d in [
            descriptor(
                "trigger",
                "Campaign Trigger",
                ElementCategory::Trigger,
                "zap",
                json!({"trigger_type": "segment_entry", "condition_groups": []}),
                json!({"fields": ["trigger_type", "condition_groups"]}),
            ),
            descriptor(
                "email_blast",
                "Email",
                ElementCategory::Messaging,
                "mail",
                json!({"template_id": null, "subject": ""}),
                json!({"fields": ["template_id", "subject"]}),
            ),
            descriptor(
                "sms_blast",
                "SMS",
                ElementCategory::Messaging,
                "message-circle",
                json!({"body": ""}),
                json!({"fields": ["body"]}),
            ),
            descriptor(
                "wait",
                "Wait",
                ElementCategory::Timing,
                "clock",
                json!({"delay": {"value": 2, "unit": "days"}}),
                json!({"fields": ["delay"]}),
            ),
            descriptor(
                "audience_filter",
                "Audience Filter",
                ElementCategory::Audience,
                "filter",
                json!({"condition_groups": []}),
                json!({"fields": ["condition_groups"]}),
            ),
        ] {
            self.register(BuilderType::Campaign, d);
        }

        // ---- Journey ----
        for d in [
            descriptor(
                "stage",
                "Stage",
                ElementCategory::Stage,
                "flag",
                json!({"goal": "", "exit_criteria": []}),
                json!({"fields": ["goal", "exit_criteria"]}),
            ),
            descriptor(
                "touchpoint",
                "Touchpoint",
                ElementCategory::Messaging,
                "send",
                json!({"channel": "email", "template_id": null}),
                json!({"fields": ["channel", "template_id"]}),
            ),
            descriptor(
                "milestone",
                "Milestone",
                ElementCategory::Stage,
                "award",
                json!({"name": "", "celebrate": false}),
                json!({"fields": ["name", "celebrate"]}),
            ),
        ] {
            self.register(BuilderType::Journey, d);
        }

        // ---- Practicum ----
        for d in [
            descriptor(
                "site_placement",
                "Site Placement",
                ElementCategory::Stage,
                "map-pin",
                json!({"site": "", "supervisor": ""}),
                json!({"fields": ["site", "supervisor"]}),
            ),
            descriptor(
                "hours_log",
                "Hours Log",
                ElementCategory::Input,
                "clock",
                json!({"required_hours": 0}),
                json!({"fields": ["required_hours"]}),
            ),
            descriptor(
                "supervisor_review",
                "Supervisor Review",
                ElementCategory::Action,
                "clipboard",
                json!({"rubric_id": null}),
                json!({"fields": ["rubric_id"]}),
            ),
        ] {
            self.register(BuilderType::Practicum, d);
        }
    }
}

impl Default for ElementTypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn descriptor(
    element_type: &str,
    label: &str,
    category: ElementCategory,
    icon: &str,
    default_config: serde_json::Value,
    config_schema: serde_json::Value,
) -> ElementTypeDescriptor {
    ElementTypeDescriptor {
        element_type: element_type.to_string(),
        label: label.to_string(),
        category,
        icon: icon.to_string(),
        default_config,
        config_schema,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_covers_all_builders() {
        let registry = ElementTypeRegistry::with_default_catalog();
        for bt in [
            BuilderType::Form,
            BuilderType::Workflow,
            BuilderType::Campaign,
            BuilderType::Journey,
            BuilderType::Practicum,
        ] {
            assert!(
                !registry.element_types_for(bt).is_empty(),
                "no palette for {bt}"
            );
        }
    }

    #[test]
    fn test_trigger_descriptor_lookup() {
        let registry = ElementTypeRegistry::with_default_catalog();
        let trigger = registry
            .descriptor(BuilderType::Workflow, "trigger")
            .unwrap();
        assert_eq!(trigger.label, "Trigger");
        assert!(trigger.default_config["condition_groups"].is_array());
    }

    #[test]
    fn test_register_replaces_same_type() {
        let registry = ElementTypeRegistry::new();
        let first = descriptor(
            "custom",
            "Custom A",
            ElementCategory::Content,
            "box",
            serde_json::json!({}),
            serde_json::json!({}),
        );
        let second = descriptor(
            "custom",
            "Custom B",
            ElementCategory::Content,
            "box",
            serde_json::json!({}),
            serde_json::json!({}),
        );
        registry.register(BuilderType::Form, first);
        registry.register(BuilderType::Form, second);

        let types = registry.element_types_for(BuilderType::Form);
        assert_eq!(types.len(), 1);
        assert_eq!(types[0].label, "Custom B");
    }

    #[test]
    fn test_unknown_builder_type_is_empty() {
        let registry = ElementTypeRegistry::new();
        assert!(registry.element_types_for(BuilderType::Journey).is_empty());
        assert!(registry.descriptor(BuilderType::Form, "nope").is_none());
    }
}
