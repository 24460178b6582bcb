//! Error types with error codes and fix suggestions
//!
//! Error code ranges:
//! - PM-001-009: Field validation errors
//! - PM-010-019: Parse/schema errors
//! - PM-020-029: Configuration errors
//! - PM-030-039: IO errors

use thiserror::Error;

use crate::schema::SchemaError;

pub type Result<T> = std::result::Result<T, ModelError>;

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

/// Format schema validation errors for display
fn format_schema_errors(errors: &[SchemaError]) -> String {
    if errors.is_empty() {
        return "no errors".to_string();
    }
    if errors.len() == 1 {
        return errors[0].to_string();
    }
    format!(
        "{} errors: {}",
        errors.len(),
        errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    )
}

#[derive(Error, Debug)]
pub enum ModelError {
    // ═══════════════════════════════════════════
    // FIELD ERRORS (001-009)
    // ═══════════════════════════════════════════
    #[error("[PM-001] Invalid value for `{field}` on {model}: must not be null")]
    InvalidFieldValue {
        model: &'static str,
        field: &'static str,
    },

    // ═══════════════════════════════════════════
    // PARSE / SCHEMA ERRORS (010-019)
    // ═══════════════════════════════════════════
    #[error("[PM-010] Failed to parse document: {details}")]
    ParseError { details: String },

    #[error("[PM-011] Schema validation failed: {}", format_schema_errors(.errors))]
    SchemaValidationFailed { errors: Vec<SchemaError> },

    #[error("[PM-012] Failed to compile schema: {reason}")]
    SchemaCompile { reason: String },

    // ═══════════════════════════════════════════
    // CONFIG ERRORS (020-029)
    // ═══════════════════════════════════════════
    #[error("[PM-020] Configuration error: {reason}")]
    ConfigError { reason: String },

    // ═══════════════════════════════════════════
    // IO ERRORS (030-039)
    // ═══════════════════════════════════════════
    #[error("[PM-030] IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ModelError {
    /// Error code without brackets, e.g. `PM-001`
    pub fn code(&self) -> &'static str {
        match self {
            ModelError::InvalidFieldValue { .. } => "PM-001",
            ModelError::ParseError { .. } => "PM-010",
            ModelError::SchemaValidationFailed { .. } => "PM-011",
            ModelError::SchemaCompile { .. } => "PM-012",
            ModelError::ConfigError { .. } => "PM-020",
            ModelError::Io(_) => "PM-030",
        }
    }
}

impl From<serde_json::Error> for ModelError {
    fn from(e: serde_json::Error) -> Self {
        ModelError::ParseError {
            details: format!("JSON: {}", e),
        }
    }
}

impl From<serde_yaml::Error> for ModelError {
    fn from(e: serde_yaml::Error) -> Self {
        ModelError::ParseError {
            details: format!("YAML: {}", e),
        }
    }
}

impl FixSuggestion for ModelError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            ModelError::InvalidFieldValue { .. } => {
                Some("Set the field, or disable client-side validation")
            }
            ModelError::ParseError { .. } => Some("Check YAML/JSON syntax: indentation and quoting"),
            ModelError::SchemaValidationFailed { .. } => {
                Some("Fix the document to match `pipeline-models schema` output")
            }
            ModelError::SchemaCompile { .. } => None,
            ModelError::ConfigError { .. } => {
                Some("Use true/false for PIPELINE_MODELS_CLIENT_SIDE_VALIDATION")
            }
            ModelError::Io(_) => Some("Check file path and permissions"),
        }
    }
}
