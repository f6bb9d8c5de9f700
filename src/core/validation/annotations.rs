//! Findings from `#[derive(validator::Validate)]` annotations
//!
//! Entities that declare their rules with `validator` attributes instead of an
//! [`EntityValidationConfig`](super::EntityValidationConfig) convert the
//! resulting errors here. Nested struct and list errors are reported with
//! dotted / indexed paths (`address.city`, `lines[2].qty`).

use super::finding::ValidationFinding;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

/// Run `validator` annotations on `target` and convert the outcome
pub fn annotation_findings<T: Validate + ?Sized>(target: &T) -> Vec<ValidationFinding> {
    match target.validate() {
        Ok(()) => Vec::new(),
        Err(errors) => findings_from_validator(&errors),
    }
}

/// Convert `validator` errors into findings, sorted by field path
pub fn findings_from_validator(errors: &ValidationErrors) -> Vec<ValidationFinding> {
    let mut findings = Vec::new();
    collect(errors, None, &mut findings);
    findings
}

fn collect(errors: &ValidationErrors, prefix: Option<&str>, out: &mut Vec<ValidationFinding>) {
    let mut entries: Vec<(String, &ValidationErrorsKind)> = errors
        .errors()
        .iter()
        .map(|(field, kind)| {
            let path = match prefix {
                Some(prefix) => format!("{}.{}", prefix, field),
                None => field.to_string(),
            };
            (path, kind)
        })
        .collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    for (path, kind) in entries {
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                out.extend(field_errors.iter().map(|err| {
                    let message = match &err.message {
                        Some(message) => message.to_string(),
                        None => format!("The field {} failed `{}` validation.", path, err.code),
                    };
                    ValidationFinding::for_field(path.as_str(), message)
                }));
            }
            ValidationErrorsKind::Struct(nested) => collect(nested, Some(&path), out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect(nested, Some(&format!("{}[{}]", path, index)), out);
                }
            }
        }
    }
}
