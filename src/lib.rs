//! # Validatable
//!
//! Uniform validity reporting for domain entities.
//!
//! An entity combines two sources of validation findings:
//!
//! - **Declarative rules** attached to its fields (required, length, range,
//!   format, ...), evaluated against the current field values on every read
//! - **Custom errors** added imperatively with `add_error`, typically from
//!   cross-field checks, and kept for the lifetime of the entity
//!
//! Both are merged into a validity flag and a flat list of `{field, message}`
//! pairs. An empty `field` marks an object-level error.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use validatable::prelude::*;
//!
//! impl_validated_entity!(
//!     Reservation,
//!     "reservation",
//!     {
//!         guest: Option<String>,
//!         nights: i64,
//!         check_in: String,
//!         check_out: String,
//!     },
//!     validate: {
//!         guest: [required],
//!         nights: [range(1, 30)],
//!         check_in: [date_format("%Y-%m-%d")],
//!         check_out: [date_format("%Y-%m-%d")],
//!     }
//! );
//!
//! let mut reservation = Reservation::new(
//!     Some("Ada".to_string()),
//!     3,
//!     "2024-06-10".to_string(),
//!     "2024-06-01".to_string(),
//! );
//!
//! if reservation.check_out < reservation.check_in {
//!     reservation.add_error(["check_in", "check_out"], "check-out must follow check-in");
//! }
//!
//! assert!(!reservation.is_valid());
//! assert_eq!(reservation.errors().len(), 2);
//! ```
//!
//! Rules can also come from a YAML file ([`config::ValidationConfigFile`]) or
//! from `#[derive(validator::Validate)]` attributes
//! ([`core::validation::annotation_findings`]).

pub mod config;
pub mod core;
pub mod entities;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Traits ===
    pub use crate::core::{
        entity::{Validatable, ValidationState},
        error::{ConfigError, RuleError, ValidationError},
        field::{FieldAccess, FieldFormat, FieldKind, FieldValue, ToFieldValue},
        validation::{
            EntityValidationConfig, Rule, ValidationErrorEntry, ValidationFinding,
            ValidationReport, annotation_findings, findings_from_validator, flatten_findings,
            validators,
        },
    };

    // === Macros ===
    pub use crate::{add_validators_for_field, impl_validated_entity};

    // === Config ===
    pub use crate::config::{EntityRulesConfig, FieldRulesConfig, ValidationConfigFile};

    // === External dependencies ===
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}
