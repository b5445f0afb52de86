use serde::{Deserialize, Serialize};

/// The authoring surface a builder configuration belongs to. Fixed for the
/// lifetime of one editing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuilderType {
    Form,
    Workflow,
    Campaign,
    Journey,
    Practicum,
}

impl BuilderType {
    /// Builder types whose configurations start from a trigger element.
    pub fn has_trigger(&self) -> bool {
        matches!(self, BuilderType::Workflow | BuilderType::Campaign)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BuilderType::Form => "form",
            BuilderType::Workflow => "workflow",
            BuilderType::Campaign => "campaign",
            BuilderType::Journey => "journey",
            BuilderType::Practicum => "practicum",
        }
    }
}

impl std::fmt::Display for BuilderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
