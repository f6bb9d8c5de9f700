//! Typed errors for the validation mechanism
//!
//! Validation *findings* are data, not errors. The types here cover the
//! mechanism itself:
//!
//! - [`RuleError`]: malformed rule metadata (a programming defect)
//! - [`ConfigError`]: loading rule registries from YAML
//! - [`ValidationError`]: an invalid entity, for callers that want `?`

use crate::core::field::FieldKind;
use crate::core::validation::ValidationErrorEntry;
use serde::Serialize;

/// Malformed rule metadata
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    /// A rule was attached to a field the entity never declared
    #[error("{entity_type}: rule `{rule}` targets undeclared field '{field}'")]
    UnknownField {
        entity_type: String,
        field: String,
        rule: String,
    },

    /// A rule was attached to a field whose kind it cannot check
    #[error("{entity_type}: rule `{rule}` cannot be applied to {kind} field '{field}'")]
    IncompatibleRule {
        entity_type: String,
        field: String,
        rule: String,
        kind: FieldKind,
    },
}

/// Errors raised while loading rule registries from configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read validation config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse validation config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("no validation rules configured for entity '{0}'")]
    UnknownEntity(String),

    #[error("invalid pattern for field '{field}': {source}")]
    InvalidPattern {
        field: String,
        #[source]
        source: regex::Error,
    },

    #[error(transparent)]
    Rule(#[from] RuleError),
}

/// An entity failed validation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Validation errors: {}", format_entries(.errors))]
    Invalid { errors: Vec<ValidationErrorEntry> },
}

impl ValidationError {
    /// The flattened errors carried by this failure
    pub fn errors(&self) -> &[ValidationErrorEntry] {
        match self {
            ValidationError::Invalid { errors } => errors,
        }
    }

    pub fn error_code(&self) -> &'static str {
        "VALIDATION_ERROR"
    }

    /// Convert to an error response body
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: Some(serde_json::json!({ "fields": self.errors() })),
        }
    }
}

fn format_entries(errors: &[ValidationErrorEntry]) -> String {
    errors
        .iter()
        .map(|e| {
            if e.field.is_empty() {
                e.message.clone()
            } else {
                format!("{}: {}", e.field, e.message)
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for ValidationError {
    fn into_response(self) -> axum::response::Response {
        let body = axum::Json(self.to_response());
        (axum::http::StatusCode::UNPROCESSABLE_ENTITY, body).into_response()
    }
}
