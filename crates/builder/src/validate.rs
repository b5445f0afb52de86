//! Pre-save validation of a builder configuration.
//!
//! The store itself accepts any well-formed command sequence; these checks
//! gate the save/publish path. Blocking issues prevent save, warnings
//! surface in the UI but do not.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::BuilderConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueSeverity {
    Blocking,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub severity: IssueSeverity,
    pub message: String,
    pub element_id: Option<Uuid>,
}

impl ValidationIssue {
    fn blocking(message: impl Into<String>, element_id: Option<Uuid>) -> Self {
        Self {
            severity: IssueSeverity::Blocking,
            message: message.into(),
            element_id,
        }
    }

    fn warning(message: impl Into<String>, element_id: Option<Uuid>) -> Self {
        Self {
            severity: IssueSeverity::Warning,
            message: message.into(),
            element_id,
        }
    }
}

/// Checks a configuration against the invariants the store maintains and
/// the save-path rules the UI enforces. Returns every issue found.
pub fn validate(config: &BuilderConfig) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if config.name.trim().is_empty() {
        issues.push(ValidationIssue::blocking("Configuration name is empty", None));
    }

    let mut seen = std::collections::HashSet::new();
    for element in &config.elements {
        if !seen.insert(element.id) {
            issues.push(ValidationIssue::blocking(
                format!("Duplicate element id {}", element.id),
                Some(element.id),
            ));
        }
    }

    for (index, element) in config.elements.iter().enumerate() {
        if element.position as usize != index {
            issues.push(ValidationIssue::blocking(
                format!(
                    "Element '{}' has position {} but sits at index {}",
                    element.title, element.position, index
                ),
                Some(element.id),
            ));
        }
    }

    if config.builder_type.has_trigger() {
        let mut seen_non_trigger = false;
        for element in &config.elements {
            if element.is_trigger() {
                if seen_non_trigger {
                    issues.push(ValidationIssue::blocking(
                        format!("Trigger '{}' is ordered after non-trigger elements", element.title),
                        Some(element.id),
                    ));
                }
            } else {
                seen_non_trigger = true;
            }
        }

        for element in config.elements.iter().filter(|e| e.is_trigger()) {
            let groups = element.condition_groups();
            if groups.iter().all(|g| g.is_empty()) {
                issues.push(ValidationIssue::warning(
                    format!("Trigger '{}' has no conditions configured", element.title),
                    Some(element.id),
                ));
            }
        }
    }

    issues
}

/// True when nothing blocks saving the configuration.
pub fn is_save_ready(issues: &[ValidationIssue]) -> bool {
    issues.iter().all(|i| i.severity != IssueSeverity::Blocking)
}
