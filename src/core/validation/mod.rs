//! Declarative validation
//!
//! Fields are declared with a kind and a list of rule closures in an
//! [`EntityValidationConfig`]. Running the config against an object's current
//! field values yields raw [`ValidationFinding`]s, which flatten into
//! `{field, message}` [`ValidationErrorEntry`] pairs.

pub mod annotations;
pub mod config;
pub mod finding;
pub mod validators;

pub use annotations::{annotation_findings, findings_from_validator};
pub use config::EntityValidationConfig;
pub use finding::{ValidationErrorEntry, ValidationFinding, ValidationReport, flatten_findings};
pub use validators::Rule;
