//! The validatable entity abstraction
//!
//! Any domain type gains uniform validity reporting by embedding a
//! [`ValidationState`] and implementing [`Validatable`]:
//!
//! - declarative findings come from [`Validatable::declared_findings`]
//!   (usually an [`EntityValidationConfig`](crate::core::validation::EntityValidationConfig)
//!   run against the current field values),
//! - custom findings are appended with [`Validatable::add_error`] and kept for
//!   the lifetime of the entity.
//!
//! Results are re-derived on every read. Mutating a field and then asking
//! [`Validatable::is_valid`] reflects the mutation without any explicit
//! re-validation step.

use crate::core::error::ValidationError;
use crate::core::validation::{
    ValidationErrorEntry, ValidationFinding, ValidationReport, flatten_findings,
};

/// Custom findings accumulated by an entity
///
/// Append-only: findings are never removed. Entities typically hold this in a
/// field marked `#[serde(skip)]`, so it does not travel with the entity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationState {
    custom_findings: Vec<ValidationFinding>,
}

impl ValidationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Findings added so far, in insertion order
    pub fn custom_findings(&self) -> &[ValidationFinding] {
        &self.custom_findings
    }

    pub fn push(&mut self, finding: ValidationFinding) {
        tracing::trace!(
            fields = ?finding.fields,
            message = %finding.message,
            "custom validation finding added"
        );
        self.custom_findings.push(finding);
    }
}

/// Capability trait for entities with uniform validity reporting
pub trait Validatable {
    fn validation_state(&self) -> &ValidationState;

    fn validation_state_mut(&mut self) -> &mut ValidationState;

    /// Findings produced by the declared rules for the current field values
    fn declared_findings(&self) -> Vec<ValidationFinding>;

    /// Declarative findings followed by custom findings in insertion order
    ///
    /// Always a fresh vector; changing it does not affect the entity.
    fn validation_findings(&self) -> Vec<ValidationFinding> {
        let mut findings = self.declared_findings();
        findings.extend_from_slice(self.validation_state().custom_findings());
        findings
    }

    fn is_valid(&self) -> bool {
        self.validation_findings().is_empty()
    }

    /// Findings flattened to one `{field, message}` pair per field
    ///
    /// Object-level findings produce a single entry with an empty field.
    fn errors(&self) -> Vec<ValidationErrorEntry> {
        flatten_findings(&self.validation_findings())
    }

    /// Record a custom finding against the given fields
    ///
    /// Field names are not checked; duplicates and empty names are kept as is.
    fn add_error<I, S>(&mut self, fields: I, message: impl Into<String>)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        Self: Sized,
    {
        self.validation_state_mut()
            .push(ValidationFinding::new(fields, message));
    }

    /// Record a custom object-level finding
    fn add_general_error(&mut self, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.validation_state_mut()
            .push(ValidationFinding::general(message));
    }

    /// Snapshot of the validity flag and flattened errors
    fn report(&self) -> ValidationReport {
        ValidationReport::from_findings(&self.validation_findings())
    }

    /// `Ok(())` when valid, otherwise the flattened errors
    fn ensure_valid(&self) -> Result<(), ValidationError> {
        let errors = self.errors();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::Invalid { errors })
        }
    }
}
