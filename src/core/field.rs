//! Field value types and the field access capability used by validation rules

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;
use uuid::Uuid;
use validator::{ValidateEmail, ValidateUrl};

/// A polymorphic field value that can hold different types
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Uuid(Uuid),
    DateTime(DateTime<Utc>),
    Null,
}

impl FieldValue {
    /// Get the value as a string if possible
    pub fn as_string(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as an integer if possible
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get the value as a number, widening integers to `f64`
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(i) => Some(*i as f64),
            FieldValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Get the value as a UUID if possible
    pub fn as_uuid(&self) -> Option<Uuid> {
        match self {
            FieldValue::Uuid(u) => Some(*u),
            _ => None,
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// The kind of this value, or `None` for `Null`
    pub fn kind(&self) -> Option<FieldKind> {
        match self {
            FieldValue::String(_) => Some(FieldKind::Text),
            FieldValue::Integer(_) => Some(FieldKind::Integer),
            FieldValue::Float(_) => Some(FieldKind::Float),
            FieldValue::Boolean(_) => Some(FieldKind::Boolean),
            FieldValue::Uuid(_) => Some(FieldKind::Uuid),
            FieldValue::DateTime(_) => Some(FieldKind::DateTime),
            FieldValue::Null => None,
        }
    }
}

/// Declared type of an entity field
///
/// Rules list the kinds they can be attached to; attaching a rule to a field
/// of another kind is rejected when the rule is declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Integer,
    Float,
    Boolean,
    Uuid,
    DateTime,
}

impl FieldKind {
    /// Kinds accepted by numeric rules
    pub const NUMERIC: &'static [FieldKind] = &[FieldKind::Integer, FieldKind::Float];

    /// Kinds accepted by string rules
    pub const TEXT: &'static [FieldKind] = &[FieldKind::Text];

    /// Whether a runtime value of `value_kind` may be stored in a field of this kind
    pub fn admits(self, value_kind: FieldKind) -> bool {
        self == value_kind || (self == FieldKind::Float && value_kind == FieldKind::Integer)
    }

    /// Whether `value` may be stored in a field of this kind
    ///
    /// `Null` fits every kind. An integer field also holds the float produced
    /// by widening an unsigned value above `i64::MAX`.
    pub fn admits_value(self, value: &FieldValue) -> bool {
        match (self, value) {
            (FieldKind::Integer, FieldValue::Float(f)) => is_widened_unsigned(*f),
            _ => value.kind().is_none_or(|kind| self.admits(kind)),
        }
    }
}

fn is_widened_unsigned(f: f64) -> bool {
    f.fract() == 0.0 && f >= i64::MAX as f64 && f <= u64::MAX as f64
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::Text => "text",
            FieldKind::Integer => "integer",
            FieldKind::Float => "float",
            FieldKind::Boolean => "boolean",
            FieldKind::Uuid => "uuid",
            FieldKind::DateTime => "datetime",
        };
        f.write_str(name)
    }
}

/// Conversion from a Rust field type into a [`FieldValue`]
///
/// `KIND` is the declared kind used when the field is registered.
pub trait ToFieldValue {
    const KIND: FieldKind;

    fn to_field_value(&self) -> FieldValue;
}

impl ToFieldValue for String {
    const KIND: FieldKind = FieldKind::Text;

    fn to_field_value(&self) -> FieldValue {
        FieldValue::String(self.clone())
    }
}

impl ToFieldValue for &str {
    const KIND: FieldKind = FieldKind::Text;

    fn to_field_value(&self) -> FieldValue {
        FieldValue::String((*self).to_string())
    }
}

macro_rules! impl_to_field_value_integer {
    ($( $int:ty ),*) => {
        $(
            impl ToFieldValue for $int {
                const KIND: FieldKind = FieldKind::Integer;

                fn to_field_value(&self) -> FieldValue {
                    FieldValue::Integer(i64::from(*self))
                }
            }
        )*
    };
}

impl_to_field_value_integer!(i8, i16, i32, i64, u8, u16, u32);

// Values above i64::MAX only fit the float representation.
macro_rules! impl_to_field_value_wide {
    ($( $int:ty ),*) => {
        $(
            impl ToFieldValue for $int {
                const KIND: FieldKind = FieldKind::Integer;

                fn to_field_value(&self) -> FieldValue {
                    match i64::try_from(*self) {
                        Ok(i) => FieldValue::Integer(i),
                        Err(_) => FieldValue::Float(*self as f64),
                    }
                }
            }
        )*
    };
}

impl_to_field_value_wide!(u64, usize, isize);

impl ToFieldValue for f32 {
    const KIND: FieldKind = FieldKind::Float;

    fn to_field_value(&self) -> FieldValue {
        FieldValue::Float(f64::from(*self))
    }
}

impl ToFieldValue for f64 {
    const KIND: FieldKind = FieldKind::Float;

    fn to_field_value(&self) -> FieldValue {
        FieldValue::Float(*self)
    }
}

impl ToFieldValue for bool {
    const KIND: FieldKind = FieldKind::Boolean;

    fn to_field_value(&self) -> FieldValue {
        FieldValue::Boolean(*self)
    }
}

impl ToFieldValue for Uuid {
    const KIND: FieldKind = FieldKind::Uuid;

    fn to_field_value(&self) -> FieldValue {
        FieldValue::Uuid(*self)
    }
}

impl ToFieldValue for DateTime<Utc> {
    const KIND: FieldKind = FieldKind::DateTime;

    fn to_field_value(&self) -> FieldValue {
        FieldValue::DateTime(*self)
    }
}

impl<T: ToFieldValue> ToFieldValue for Option<T> {
    const KIND: FieldKind = T::KIND;

    fn to_field_value(&self) -> FieldValue {
        match self {
            Some(value) => value.to_field_value(),
            None => FieldValue::Null,
        }
    }
}

/// Read access to the current values of an object's fields
///
/// This is the only thing the declarative validator needs from an entity.
pub trait FieldAccess {
    /// Current value of `field`, or `None` if the object has no such field
    fn field_value(&self, field: &str) -> Option<FieldValue>;
}

/// Field format validators for automatic validation
#[derive(Debug, Clone)]
pub enum FieldFormat {
    Email,
    Uuid,
    Url,
    Phone,
    Custom(Regex),
}

impl FieldFormat {
    /// Validate a field value against this format
    pub fn validate(&self, value: &FieldValue) -> bool {
        let string_value = match value.as_string() {
            Some(s) => s,
            None => return false,
        };

        match self {
            FieldFormat::Email => string_value.to_owned().validate_email(),
            FieldFormat::Uuid => Uuid::parse_str(string_value).is_ok(),
            FieldFormat::Url => string_value.to_owned().validate_url(),
            FieldFormat::Phone => Self::is_valid_phone(string_value),
            FieldFormat::Custom(regex) => regex.is_match(string_value),
        }
    }

    /// Human-readable name used in violation messages
    pub fn label(&self) -> &'static str {
        match self {
            FieldFormat::Email => "email address",
            FieldFormat::Uuid => "UUID",
            FieldFormat::Url => "URL",
            FieldFormat::Phone => "phone number",
            FieldFormat::Custom(_) => "value",
        }
    }

    fn is_valid_phone(phone: &str) -> bool {
        static PHONE_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = PHONE_REGEX.get_or_init(|| {
            // At least 8 digits, max 15 (E.164 standard)
            Regex::new(r"^\+?[1-9]\d{7,14}$").unwrap()
        });
        regex.is_match(phone)
    }
}
