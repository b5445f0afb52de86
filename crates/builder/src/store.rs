//! The builder state store — a single editing session advanced only
//! through an explicit, closed command set.
//!
//! Every command is a total, synchronous state transition: malformed input
//! (unknown element id, out-of-range index) is a warned no-op rather than
//! an error, because a failed command must never crash an interactive
//! editing session. Checkpointing is explicit: only `SaveState` pushes
//! history, so callers group one checkpoint per discrete user action
//! rather than one per keystroke.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use admit_core::registry::ElementTypeRegistry;
use admit_core::BuilderType;

use crate::history::History;
use crate::repository::{self, ElementUpdate};
use crate::types::{BuilderConfig, ElementDetail, UniversalElement};

/// The closed command set of the builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "command")]
pub enum BuilderCommand {
    /// Replaces the config with a freshly initialized empty config of the
    /// given type and clears selection. Does not itself checkpoint.
    SetBuilderType { builder_type: BuilderType },
    /// Replaces the whole config verbatim (bulk load/import). The caller
    /// is responsible for supplying a valid config.
    SetConfig { config: BuilderConfig },
    AddElement { element: UniversalElement },
    UpdateElement { id: Uuid, update: ElementUpdate },
    DeleteElement { id: Uuid },
    DuplicateElement { id: Uuid },
    /// Moves one element within the non-trigger sub-sequence; indexes
    /// address the non-trigger partition.
    ReorderElements { old_index: usize, new_index: usize },
    SelectElement { id: Option<Uuid> },
    SetPreviewMode { enabled: bool },
    /// Explicit checkpoint of the current config.
    SaveState,
    Undo,
    Redo,
}

/// One open editing session: the current config, view state, and history.
#[derive(Debug, Clone)]
pub struct BuilderSession {
    config: BuilderConfig,
    selected_element_id: Option<Uuid>,
    preview_mode: bool,
    history: History,
}

impl BuilderSession {
    /// Opens a session on a fresh, empty config of the given type.
    pub fn new(builder_type: BuilderType) -> Self {
        Self::from_config(BuilderConfig::new(builder_type))
    }

    /// Opens a session on an existing config (load/import path).
    pub fn from_config(config: BuilderConfig) -> Self {
        Self {
            history: History::new(config.clone()),
            config,
            selected_element_id: None,
            preview_mode: false,
        }
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    pub fn selected_element_id(&self) -> Option<Uuid> {
        self.selected_element_id
    }

    pub fn is_preview_mode(&self) -> bool {
        self.preview_mode
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Applies one command. Total over well-formed state: commands that
    /// reference unknown ids or out-of-range indexes are warned no-ops.
    pub fn apply(&mut self, command: BuilderCommand) {
        match command {
            BuilderCommand::SetBuilderType { builder_type } => {
                info!(config_id = %self.config.id, %builder_type, "Starting fresh config");
                self.config = BuilderConfig::new(builder_type);
                self.selected_element_id = None;
            }
            BuilderCommand::SetConfig { config } => {
                self.config = config;
                self.touch();
                if let Some(selected) = self.selected_element_id {
                    if !self.config.has_element(&selected) {
                        self.selected_element_id = None;
                    }
                }
            }
            BuilderCommand::AddElement { element } => {
                self.mutate_elements(|elements| repository::add(elements, element));
            }
            BuilderCommand::UpdateElement { id, update } => {
                self.mutate_elements(|elements| repository::update(elements, id, &update));
            }
            BuilderCommand::DeleteElement { id } => {
                self.mutate_elements(|elements| repository::remove(elements, id));
                if self.selected_element_id == Some(id) {
                    self.selected_element_id = None;
                }
            }
            BuilderCommand::DuplicateElement { id } => {
                self.mutate_elements(|elements| repository::duplicate(elements, id));
            }
            BuilderCommand::ReorderElements {
                old_index,
                new_index,
            } => {
                self.mutate_elements(|elements| {
                    repository::reorder_non_triggers(elements, old_index, new_index)
                });
            }
            BuilderCommand::SelectElement { id } => {
                if let Some(id) = id {
                    if !self.config.has_element(&id) {
                        warn!(element_id = %id, "Ignoring selection of unknown element");
                        return;
                    }
                }
                self.selected_element_id = id;
            }
            BuilderCommand::SetPreviewMode { enabled } => {
                self.preview_mode = enabled;
            }
            BuilderCommand::SaveState => {
                self.history.push(self.config.clone());
            }
            BuilderCommand::Undo => {
                if let Some(snapshot) = self.history.undo() {
                    self.config = snapshot.clone();
                    self.drop_stale_selection();
                }
            }
            BuilderCommand::Redo => {
                if let Some(snapshot) = self.history.redo() {
                    self.config = snapshot.clone();
                    self.drop_stale_selection();
                }
            }
        }
    }

    /// Palette-click path: constructs an element of the given registry type
    /// using its default config and appends it. Returns the new element's
    /// id, or `None` when the type is unknown for this builder.
    pub fn add_element_of_type(
        &mut self,
        registry: &ElementTypeRegistry,
        element_type: &str,
    ) -> Option<Uuid> {
        let descriptor = registry.descriptor(self.config.builder_type, element_type)?;
        let element = UniversalElement::new(
            descriptor.element_type,
            descriptor.label,
            descriptor.default_config,
            ElementDetail::default_for(self.config.builder_type),
        );
        let id = element.id;
        self.apply(BuilderCommand::AddElement { element });
        self.config.has_element(&id).then_some(id)
    }

    fn mutate_elements<F>(&mut self, op: F)
    where
        F: FnOnce(Vec<UniversalElement>) -> Vec<UniversalElement>,
    {
        let elements = std::mem::take(&mut self.config.elements);
        self.config.elements = op(elements);
        self.touch();
    }

    fn touch(&mut self) {
        self.config.updated_at = Utc::now();
    }

    fn drop_stale_selection(&mut self) {
        if let Some(selected) = self.selected_element_id {
            if !self.config.has_element(&selected) {
                self.selected_element_id = None;
            }
        }
    }
}
