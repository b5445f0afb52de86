use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use admit_core::BuilderType;
use admit_triggers::ConditionGroup;

/// The element type key of trigger elements. Triggers are pinned at the
/// head of workflow and campaign configurations.
pub const TRIGGER_ELEMENT_TYPE: &str = "trigger";

/// A builder configuration — the root aggregate one editing session owns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuilderConfig {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub builder_type: BuilderType,
    pub elements: Vec<UniversalElement>,
    /// Opaque cross-cutting settings (audience filter, active flag, ...),
    /// not interpreted by the core.
    #[serde(default)]
    pub settings: serde_json::Value,
    #[serde(default)]
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BuilderConfig {
    /// Creates a fresh, empty configuration of the given type.
    pub fn new(builder_type: BuilderType) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: String::new(),
            description: String::new(),
            builder_type,
            elements: Vec::new(),
            settings: json!({}),
            metadata: json!({}),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn element(&self, id: &Uuid) -> Option<&UniversalElement> {
        self.elements.iter().find(|e| e.id == *id)
    }

    pub fn has_element(&self, id: &Uuid) -> bool {
        self.element(id).is_some()
    }
}

/// One step/field/action within a builder configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniversalElement {
    pub id: Uuid,
    /// Key into the element type registry.
    pub element_type: String,
    pub title: String,
    pub description: String,
    /// Kept equal to the element's index in `BuilderConfig::elements`.
    pub position: u32,
    /// Type-specific attribute bag, shaped by the registry's config schema.
    pub config: serde_json::Value,
    pub detail: ElementDetail,
}

impl UniversalElement {
    pub fn new(
        element_type: impl Into<String>,
        title: impl Into<String>,
        config: serde_json::Value,
        detail: ElementDetail,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            element_type: element_type.into(),
            title: title.into(),
            description: String::new(),
            position: 0,
            config,
            detail,
        }
    }

    pub fn is_trigger(&self) -> bool {
        self.element_type == TRIGGER_ELEMENT_TYPE
    }

    /// The condition groups this element carries, if its domain has any.
    pub fn condition_groups(&self) -> &[ConditionGroup] {
        match &self.detail {
            ElementDetail::Workflow(d) => &d.condition_groups,
            ElementDetail::Campaign(d) => &d.condition_groups,
            _ => &[],
        }
    }
}

/// Domain-specific element payload. Practicum builders reuse the form
/// variant — their elements are form-like intake fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ElementDetail {
    Form(FormDetail),
    Workflow(WorkflowDetail),
    Campaign(CampaignDetail),
    Journey(JourneyDetail),
}

impl ElementDetail {
    /// The empty detail variant new elements of the given surface start
    /// with.
    pub fn default_for(builder_type: BuilderType) -> Self {
        match builder_type {
            BuilderType::Form | BuilderType::Practicum => {
                ElementDetail::Form(FormDetail::default())
            }
            BuilderType::Workflow => ElementDetail::Workflow(WorkflowDetail::default()),
            BuilderType::Campaign => ElementDetail::Campaign(CampaignDetail::default()),
            BuilderType::Journey => ElementDetail::Journey(JourneyDetail::default()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormDetail {
    /// The lead attribute this field writes to.
    pub field_key: Option<String>,
    pub required: bool,
    pub placeholder: Option<String>,
    #[serde(default)]
    pub options: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowDetail {
    /// Trigger and branch elements carry their condition groups directly,
    /// in addition to whatever the opaque `config` bag holds.
    #[serde(default)]
    pub condition_groups: Vec<ConditionGroup>,
    pub action: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CampaignDetail {
    pub channel: Option<String>,
    #[serde(default)]
    pub condition_groups: Vec<ConditionGroup>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JourneyDetail {
    pub stage: Option<String>,
    pub channel: Option<String>,
}
