//! Core module containing the field, validation and entity abstractions

pub mod entity;
pub mod error;
pub mod field;
pub mod validation;

pub use entity::{Validatable, ValidationState};
pub use error::{ConfigError, RuleError, ValidationError};
pub use field::{FieldAccess, FieldFormat, FieldKind, FieldValue, ToFieldValue};
pub use validation::{
    EntityValidationConfig, Rule, ValidationErrorEntry, ValidationFinding, ValidationReport,
};
