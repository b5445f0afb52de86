//! JSON export/import of builder configurations.

use admit_core::{AdmitError, AdmitResult};

use crate::types::BuilderConfig;
use crate::validate::{is_save_ready, validate};

/// Serializes a configuration for export-to-file.
pub fn export_json(config: &BuilderConfig) -> AdmitResult<String> {
    Ok(serde_json::to_string_pretty(config)?)
}

/// Parses an exported configuration and rejects documents that violate the
/// structural invariants, so a bad import never reaches the store.
pub fn import_json(json: &str) -> AdmitResult<BuilderConfig> {
    let config: BuilderConfig = serde_json::from_str(json)?;
    let issues = validate(&config);
    if !is_save_ready(&issues) {
        let blocking: Vec<_> = issues.iter().map(|i| i.message.as_str()).collect();
        return Err(AdmitError::Import(blocking.join("; ")));
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository;
    use crate::types::{ElementDetail, FormDetail, UniversalElement};
    use admit_core::BuilderType;
    use serde_json::json;

    fn form_config() -> BuilderConfig {
        let mut config = BuilderConfig::new(BuilderType::Form);
        config.name = "Inquiry form".to_string();
        config.elements = repository::add(
            config.elements,
            UniversalElement::new(
                "email_field",
                "Email Address",
                json!({"required": true}),
                ElementDetail::Form(FormDetail::default()),
            ),
        );
        config
    }

    #[test]
    fn test_export_import_round_trip() {
        let config = form_config();
        let exported = export_json(&config).unwrap();
        let imported = import_json(&exported).unwrap();
        assert_eq!(imported, config);
    }

    #[test]
    fn test_import_rejects_invalid_documents() {
        let mut config = form_config();
        config.name.clear();
        let exported = export_json(&config).unwrap();
        assert!(matches!(import_json(&exported), Err(AdmitError::Import(_))));
    }

    #[test]
    fn test_import_rejects_malformed_json() {
        assert!(matches!(
            import_json("{not json"),
            Err(AdmitError::Serialization(_))
        ));
    }
}
