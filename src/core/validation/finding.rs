//! Raw validation findings and their flattened `{field, message}` form

use serde::{Deserialize, Serialize};

/// A raw validation outcome: a message plus the fields it applies to
///
/// An empty `fields` list marks an object-level finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationFinding {
    pub message: String,
    #[serde(default)]
    pub fields: Vec<String>,
}

impl ValidationFinding {
    /// Create a finding attached to the given fields
    pub fn new<I, S>(fields: I, message: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            message: message.into(),
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a finding for a single field
    pub fn for_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            fields: vec![field.into()],
        }
    }

    /// Create an object-level finding (no specific field)
    pub fn general(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            fields: Vec::new(),
        }
    }

    /// Whether this finding applies to the object rather than to a field
    pub fn is_general(&self) -> bool {
        self.fields.is_empty()
    }

    /// Expand into one entry per field, or a single entry with an empty field
    pub fn flatten(&self) -> Vec<ValidationErrorEntry> {
        if self.fields.is_empty() {
            return vec![ValidationErrorEntry {
                field: String::new(),
                message: self.message.clone(),
            }];
        }

        self.fields
            .iter()
            .map(|field| ValidationErrorEntry {
                field: field.clone(),
                message: self.message.clone(),
            })
            .collect()
    }
}

/// A normalized validation error
///
/// `field` is the empty string for object-level errors. It is serialized as
/// `""`, never omitted or null.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValidationErrorEntry {
    pub field: String,
    pub message: String,
}

impl ValidationErrorEntry {
    /// Whether this error applies to the object rather than to a field
    pub fn is_general(&self) -> bool {
        self.field.is_empty()
    }
}

/// Flatten findings in order into `{field, message}` entries
pub fn flatten_findings(findings: &[ValidationFinding]) -> Vec<ValidationErrorEntry> {
    findings.iter().flat_map(ValidationFinding::flatten).collect()
}

/// Snapshot of an entity's validity, as handed to presentation layers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<ValidationErrorEntry>,
}

impl ValidationReport {
    /// Build a report from raw findings
    pub fn from_findings(findings: &[ValidationFinding]) -> Self {
        Self {
            is_valid: findings.is_empty(),
            errors: flatten_findings(findings),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // === flatten() ===

    #[test]
    fn test_flatten_general_finding_yields_empty_field() {
        let entries = ValidationFinding::general("broken").flatten();
        assert_eq!(
            entries,
            vec![ValidationErrorEntry {
                field: String::new(),
                message: "broken".to_string(),
            }]
        );
    }

    #[test]
    fn test_flatten_empty_message_and_no_fields_is_kept() {
        let entries = ValidationFinding::general("").flatten();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].field, "");
        assert_eq!(entries[0].message, "");
        assert!(entries[0].is_general());
    }

    #[test]
    fn test_flatten_multi_field_finding_yields_entry_per_field() {
        let entries = ValidationFinding::new(["start", "end"], "start must precede end").flatten();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].field, "start");
        assert_eq!(entries[1].field, "end");
        assert!(entries.iter().all(|e| e.message == "start must precede end"));
    }

    #[test]
    fn test_flatten_keeps_duplicate_field_names() {
        let entries = ValidationFinding::new(["a", "a", ""], "dup").flatten();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[2].field, "");
    }

    // === flatten_findings() ===

    #[test]
    fn test_flatten_findings_preserves_order() {
        let findings = vec![
            ValidationFinding::for_field("name", "required"),
            ValidationFinding::general("custom"),
            ValidationFinding::new(["x", "y"], "pair"),
        ];
        let fields: Vec<_> = flatten_findings(&findings)
            .into_iter()
            .map(|e| e.field)
            .collect();
        assert_eq!(fields, vec!["name", "", "x", "y"]);
    }

    #[test]
    fn test_flatten_findings_empty() {
        assert!(flatten_findings(&[]).is_empty());
    }

    // === serialization ===

    #[test]
    fn test_general_entry_serializes_empty_field() {
        let entry = ValidationErrorEntry {
            field: String::new(),
            message: "m".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&entry).expect("serialize"),
            json!({"field": "", "message": "m"})
        );
    }

    #[test]
    fn test_report_from_findings() {
        let report = ValidationReport::from_findings(&[ValidationFinding::new(["a", "b"], "m")]);
        assert!(!report.is_valid);
        assert_eq!(
            serde_json::to_value(&report).expect("serialize"),
            json!({
                "is_valid": false,
                "errors": [
                    {"field": "a", "message": "m"},
                    {"field": "b", "message": "m"}
                ]
            })
        );

        let report = ValidationReport::from_findings(&[]);
        assert!(report.is_valid);
        assert!(report.errors.is_empty());
    }
}
