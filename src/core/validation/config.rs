//! Per-entity registry of declared fields and their validation rules

use super::finding::ValidationFinding;
use super::validators::Rule;
use crate::core::error::RuleError;
use crate::core::field::{FieldAccess, FieldKind, FieldValue};
use indexmap::IndexMap;

#[derive(Debug, Clone)]
struct FieldRules {
    kind: FieldKind,
    rules: Vec<Rule>,
}

/// Validation rules for one entity type
///
/// Fields and rules are evaluated in declaration order, which makes the
/// findings for a given declaration reproducible.
#[derive(Debug, Clone)]
pub struct EntityValidationConfig {
    entity_type: String,
    fields: IndexMap<String, FieldRules>,
}

impl EntityValidationConfig {
    pub fn new(entity_type: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            fields: IndexMap::new(),
        }
    }

    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }

    /// Declare a field and its kind
    ///
    /// Re-declaring a field updates its kind and keeps its rules.
    pub fn declare_field(&mut self, field: impl Into<String>, kind: FieldKind) -> &mut Self {
        self.fields
            .entry(field.into())
            .and_modify(|f| f.kind = kind)
            .or_insert_with(|| FieldRules {
                kind,
                rules: Vec::new(),
            });
        self
    }

    /// Attach a rule to a declared field
    pub fn add_validator(&mut self, field: &str, rule: Rule) -> Result<&mut Self, RuleError> {
        let Some(entry) = self.fields.get_mut(field) else {
            return Err(RuleError::UnknownField {
                entity_type: self.entity_type.clone(),
                field: field.to_string(),
                rule: rule.name().to_string(),
            });
        };

        if !rule.accepts(entry.kind) {
            return Err(RuleError::IncompatibleRule {
                entity_type: self.entity_type.clone(),
                field: field.to_string(),
                rule: rule.name().to_string(),
                kind: entry.kind,
            });
        }

        entry.rules.push(rule);
        Ok(self)
    }

    /// Declared fields in order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Number of rules attached across all fields
    pub fn rule_count(&self) -> usize {
        self.fields.values().map(|f| f.rules.len()).sum()
    }

    /// Run every rule against the current field values of `target`
    ///
    /// Produces one finding per violated rule, naming the field it belongs to.
    pub fn validate<T: FieldAccess + ?Sized>(&self, target: &T) -> Vec<ValidationFinding> {
        let mut findings = Vec::new();

        for (field, declared) in &self.fields {
            if declared.rules.is_empty() {
                continue;
            }

            let Some(value) = target.field_value(field) else {
                tracing::error!(
                    entity_type = %self.entity_type,
                    field = %field,
                    "declared field is not readable"
                );
                findings.push(ValidationFinding::for_field(
                    field.as_str(),
                    format!("The field {} is not readable.", field),
                ));
                continue;
            };

            if !declared.kind.admits_value(&value) {
                tracing::error!(
                    entity_type = %self.entity_type,
                    field = %field,
                    declared = %declared.kind,
                    actual = ?value.kind(),
                    "field value does not match its declared kind"
                );
                findings.push(ValidationFinding::for_field(
                    field.as_str(),
                    format!("The field {} has an unexpected value type.", field),
                ));
                continue;
            }

            findings.extend(check_field(field, &value, &declared.rules));
        }

        tracing::debug!(
            entity_type = %self.entity_type,
            findings = findings.len(),
            "declarative validation complete"
        );

        findings
    }
}

fn check_field<'a>(
    field: &'a str,
    value: &'a FieldValue,
    rules: &'a [Rule],
) -> impl Iterator<Item = ValidationFinding> + 'a {
    rules.iter().filter_map(move |rule| {
        rule.check(field, value)
            .err()
            .map(|message| ValidationFinding::for_field(field, message))
    })
}
