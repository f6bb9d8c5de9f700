//! Reusable field validators
//!
//! Each constructor returns a [`Rule`]: a named check over the current value
//! of one field, together with the field kinds it may be attached to. Every
//! rule except [`required`] lets `Null` through, so an unset optional field
//! only fails when it is required.

use crate::core::field::{FieldFormat, FieldKind, FieldValue};
use regex::Regex;
use std::fmt;
use std::sync::Arc;

type Check = dyn Fn(&str, &FieldValue) -> Result<(), String> + Send + Sync;

/// A named validation rule for a single field
#[derive(Clone)]
pub struct Rule {
    name: &'static str,
    accepts: &'static [FieldKind],
    check: Arc<Check>,
}

impl Rule {
    /// Build a rule from a check closure
    ///
    /// An empty `accepts` list means the rule can be attached to any field.
    pub fn new<F>(name: &'static str, accepts: &'static [FieldKind], check: F) -> Self
    where
        F: Fn(&str, &FieldValue) -> Result<(), String> + Send + Sync + 'static,
    {
        Self {
            name,
            accepts,
            check: Arc::new(check),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether the rule can be attached to a field of `kind`
    pub fn accepts(&self, kind: FieldKind) -> bool {
        self.accepts.is_empty() || self.accepts.contains(&kind)
    }

    /// Run the rule, returning the violation message if the value breaks it
    pub fn check(&self, field: &str, value: &FieldValue) -> Result<(), String> {
        (self.check)(field, value)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("accepts", &self.accepts)
            .finish_non_exhaustive()
    }
}

/// Validator: field is required (not null, not a blank string)
pub fn required() -> Rule {
    Rule::new("required", &[], |field: &str, value: &FieldValue| {
        let missing = match value {
            FieldValue::Null => true,
            FieldValue::String(s) => s.trim().is_empty(),
            _ => false,
        };
        if missing {
            Err(format!("The {} field is required.", field))
        } else {
            Ok(())
        }
    })
}

/// Validator: number must be positive
///
/// NaN fails this and every other numeric rule.
pub fn positive() -> Rule {
    Rule::new("positive", FieldKind::NUMERIC, |field: &str, value: &FieldValue| {
        match value.as_number() {
            Some(num) if num.is_nan() || num <= 0.0 => Err(format!("The field {} must be positive.", field)),
            _ => Ok(()),
        }
    })
}

/// Validator: string length (in characters) must be within range
pub fn string_length(min: usize, max: usize) -> Rule {
    Rule::new(
        "string_length",
        FieldKind::TEXT,
        move |field: &str, value: &FieldValue| {
            let Some(s) = value.as_string() else {
                return Ok(());
            };
            let len = s.chars().count();
            if len < min || len > max {
                Err(format!(
                    "The field {} must be a string with a minimum length of {} and a maximum length of {}.",
                    field, min, max
                ))
            } else {
                Ok(())
            }
        },
    )
}

/// Validator: string length (in characters) must not exceed maximum
pub fn max_length(max: usize) -> Rule {
    Rule::new(
        "max_length",
        FieldKind::TEXT,
        move |field: &str, value: &FieldValue| match value.as_string() {
            Some(s) if s.chars().count() > max => Err(format!(
                "The field {} must be a string with a maximum length of {}.",
                field, max
            )),
            _ => Ok(()),
        },
    )
}

/// Validator: number must be within the inclusive range `[min, max]`
pub fn range(min: f64, max: f64) -> Rule {
    Rule::new(
        "range",
        FieldKind::NUMERIC,
        move |field: &str, value: &FieldValue| match value.as_number() {
            Some(num) if !(min..=max).contains(&num) => Err(format!(
                "The field {} must be between {} and {}.",
                field, min, max
            )),
            _ => Ok(()),
        },
    )
}

/// Validator: number must be at least minimum
pub fn min_value(min: f64) -> Rule {
    Rule::new(
        "min_value",
        FieldKind::NUMERIC,
        move |field: &str, value: &FieldValue| match value.as_number() {
            Some(num) if num.is_nan() || num < min => Err(format!("The field {} must be at least {}.", field, min)),
            _ => Ok(()),
        },
    )
}

/// Validator: number must not exceed maximum
pub fn max_value(max: f64) -> Rule {
    Rule::new(
        "max_value",
        FieldKind::NUMERIC,
        move |field: &str, value: &FieldValue| match value.as_number() {
            Some(num) if num.is_nan() || num > max => {
                Err(format!("The field {} must not exceed {}.", field, max))
            }
            _ => Ok(()),
        },
    )
}

/// Validator: value must be in allowed list
pub fn in_list(allowed: Vec<String>) -> Rule {
    Rule::new(
        "in_list",
        FieldKind::TEXT,
        move |field: &str, value: &FieldValue| match value.as_string() {
            Some(s) if !allowed.iter().any(|a| a == s) => Err(format!(
                "The field {} must be one of: {}.",
                field,
                allowed.join(", ")
            )),
            _ => Ok(()),
        },
    )
}

/// Validator: date must match format
pub fn date_format(format: impl Into<String>) -> Rule {
    let format = format.into();
    Rule::new(
        "date_format",
        FieldKind::TEXT,
        move |field: &str, value: &FieldValue| {
            let Some(s) = value.as_string() else {
                return Ok(());
            };
            match chrono::NaiveDate::parse_from_str(s, &format) {
                Ok(_) => Ok(()),
                Err(_) => Err(format!(
                    "The field {} must match the date format {}.",
                    field, format
                )),
            }
        },
    )
}

/// Validator: string must match a [`FieldFormat`]
pub fn format(format: FieldFormat) -> Rule {
    Rule::new(
        "format",
        FieldKind::TEXT,
        move |field: &str, value: &FieldValue| {
            if value.is_null() || format.validate(value) {
                Ok(())
            } else {
                Err(format!("The field {} is not a valid {}.", field, format.label()))
            }
        },
    )
}

/// Validator: string must match a regular expression
pub fn pattern(pattern: &str) -> Result<Rule, regex::Error> {
    Regex::new(pattern).map(|regex| format(FieldFormat::Custom(regex)))
}

/// Validator: arbitrary check supplied by the caller
pub fn custom<F>(name: &'static str, accepts: &'static [FieldKind], check: F) -> Rule
where
    F: Fn(&str, &FieldValue) -> Result<(), String> + Send + Sync + 'static,
{
    Rule::new(name, accepts, check)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> FieldValue {
        FieldValue::String(s.to_string())
    }

    // === required() ===

    #[test]
    fn test_required_null_value_returns_error() {
        let result = required().check("name", &FieldValue::Null);
        assert_eq!(result.unwrap_err(), "The name field is required.");
    }

    #[test]
    fn test_required_blank_string_returns_error() {
        assert!(required().check("name", &text("")).is_err());
        assert!(required().check("name", &text("   ")).is_err());
    }

    #[test]
    fn test_required_present_values_return_ok() {
        let v = required();
        assert!(v.check("name", &text("hello")).is_ok());
        assert!(v.check("age", &FieldValue::Integer(0)).is_ok());
        assert!(v.check("active", &FieldValue::Boolean(false)).is_ok());
    }

    #[test]
    fn test_required_accepts_any_kind() {
        let v = required();
        assert!(v.accepts(FieldKind::Text));
        assert!(v.accepts(FieldKind::Uuid));
    }

    // === positive() ===

    #[test]
    fn test_positive_zero_and_negative_return_error() {
        let v = positive();
        assert!(v.check("price", &FieldValue::Float(0.0)).is_err());
        assert!(v.check("count", &FieldValue::Integer(-1)).is_err());
    }

    #[test]
    fn test_positive_positive_number_returns_ok() {
        assert!(positive().check("price", &FieldValue::Float(42.5)).is_ok());
    }

    #[test]
    fn test_positive_null_passthrough() {
        assert!(positive().check("price", &FieldValue::Null).is_ok());
    }

    #[test]
    fn test_positive_rejects_text_fields() {
        assert!(!positive().accepts(FieldKind::Text));
        assert!(positive().accepts(FieldKind::Integer));
    }

    // === string_length() / max_length() ===

    #[test]
    fn test_string_length_out_of_bounds_returns_error() {
        let v = string_length(3, 5);
        assert!(v.check("name", &text("ab")).is_err());
        assert!(v.check("name", &text("abcdef")).is_err());
    }

    #[test]
    fn test_string_length_bounds_are_inclusive() {
        let v = string_length(3, 5);
        assert!(v.check("name", &text("abc")).is_ok());
        assert!(v.check("name", &text("abcde")).is_ok());
    }

    #[test]
    fn test_string_length_counts_characters_not_bytes() {
        assert!(string_length(1, 4).check("name", &text("éèêë")).is_ok());
    }

    #[test]
    fn test_max_length_message() {
        let err = max_length(2).check("code", &text("abc")).unwrap_err();
        assert_eq!(
            err,
            "The field code must be a string with a maximum length of 2."
        );
    }

    // === range() / min_value() / max_value() ===

    #[test]
    fn test_range_out_of_bounds_returns_error() {
        let v = range(0.0, 150.0);
        let err = v.check("age", &FieldValue::Integer(200)).unwrap_err();
        assert_eq!(err, "The field age must be between 0 and 150.");
        assert!(v.check("age", &FieldValue::Integer(-1)).is_err());
    }

    #[test]
    fn test_range_inclusive_bounds_return_ok() {
        let v = range(0.0, 150.0);
        assert!(v.check("age", &FieldValue::Integer(0)).is_ok());
        assert!(v.check("age", &FieldValue::Float(150.0)).is_ok());
    }

    #[test]
    fn test_min_and_max_value() {
        assert!(min_value(10.0).check("qty", &FieldValue::Integer(9)).is_err());
        assert!(min_value(10.0).check("qty", &FieldValue::Integer(10)).is_ok());
        assert!(max_value(100.0).check("score", &FieldValue::Float(100.5)).is_err());
        assert!(max_value(100.0).check("score", &FieldValue::Float(100.0)).is_ok());
    }

    #[test]
    fn test_numeric_rules_reject_nan() {
        let nan = FieldValue::Float(f64::NAN);
        assert_eq!(
            positive().check("ratio", &nan).unwrap_err(),
            "The field ratio must be positive."
        );
        assert_eq!(
            range(0.0, 1.0).check("ratio", &nan).unwrap_err(),
            "The field ratio must be between 0 and 1."
        );
        assert!(min_value(0.0).check("ratio", &nan).is_err());
        assert!(max_value(1.0).check("ratio", &nan).is_err());
    }

    // === in_list() ===

    #[test]
    fn test_in_list_membership() {
        let v = in_list(vec!["active".into(), "inactive".into()]);
        assert!(v.check("status", &text("active")).is_ok());
        let err = v.check("status", &text("deleted")).unwrap_err();
        assert_eq!(err, "The field status must be one of: active, inactive.");
    }

    // === date_format() ===

    #[test]
    fn test_date_format() {
        let v = date_format("%Y-%m-%d");
        assert!(v.check("birthday", &text("2024-01-15")).is_ok());
        assert!(v.check("birthday", &text("15/01/2024")).is_err());
        assert!(v.check("birthday", &FieldValue::Null).is_ok());
    }

    // === format() ===

    #[test]
    fn test_format_email() {
        let v = format(FieldFormat::Email);
        assert!(v.check("email", &text("a@example.com")).is_ok());
        let err = v.check("email", &text("nope")).unwrap_err();
        assert_eq!(err, "The field email is not a valid email address.");
    }

    #[test]
    fn test_format_null_passthrough() {
        let v = format(FieldFormat::Custom(Regex::new(r"^\d+$").unwrap()));
        assert!(v.check("code", &FieldValue::Null).is_ok());
        assert!(v.check("code", &text("12a")).is_err());
    }

    // === pattern() ===

    #[test]
    fn test_pattern_compiles_and_checks() {
        let v = pattern(r"^[A-Z]{3}\d{3}$").expect("valid pattern");
        assert!(v.check("code", &text("ABC123")).is_ok());
        assert!(v.check("code", &text("abc123")).is_err());
    }

    #[test]
    fn test_pattern_rejects_invalid_regex() {
        assert!(pattern("(unclosed").is_err());
    }

    // === custom() ===

    #[test]
    fn test_custom_rule_uses_closure_message() {
        let v = custom("even", FieldKind::NUMERIC, |field, value| {
            match value.as_integer() {
                Some(n) if n % 2 != 0 => Err(format!("{} must be even", field)),
                _ => Ok(()),
            }
        });
        assert_eq!(v.name(), "even");
        assert_eq!(
            v.check("seats", &FieldValue::Integer(3)).unwrap_err(),
            "seats must be even"
        );
        assert!(v.check("seats", &FieldValue::Integer(4)).is_ok());
    }
}
