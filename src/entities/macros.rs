//! Macros for reducing boilerplate when defining validatable entities

/// Create an entity struct with declarative validation rules
///
/// Generates the struct (public fields plus a hidden, non-serialized
/// [`ValidationState`](crate::core::entity::ValidationState)), a `new`
/// constructor, [`FieldAccess`](crate::core::field::FieldAccess),
/// [`Validatable`](crate::core::entity::Validatable) and a lazily built
/// `validation_config()` registry.
///
/// Rules are checked against the declared field types the first time the
/// registry is built; a rule that cannot apply to its field (for example
/// `range` on a `String`) panics there.
///
/// # Example
///
/// ```rust,ignore
/// use validatable::prelude::*;
///
/// impl_validated_entity!(
///     Person,
///     "person",
///     {
///         name: Option<String>,
///         age: i64,
///         email: String,
///     },
///     validate: {
///         name: [required, string_length(1, 50)],
///         age: [range(0, 150)],
///         email: [required, format(email)],
///     }
/// );
///
/// let mut person = Person::new(Some("Ada".to_string()), 36, "ada@example.com".to_string());
/// assert!(person.is_valid());
///
/// person.age = 200;
/// assert!(!person.is_valid());
/// ```
#[macro_export]
macro_rules! impl_validated_entity {
    (
        $type:ident,
        $type_name:expr,
        {
            $( $field:ident : $field_type:ty ),* $(,)?
        }
        $(,)?
        validate: {
            $(
                $val_field:ident: [ $( $validator:tt )* ]
            ),* $(,)?
        }
        $(,)?
    ) => {
        #[derive(Debug, Clone, ::serde::Serialize, ::serde::Deserialize)]
        pub struct $type {
            $( pub $field : $field_type, )*

            #[serde(skip)]
            validation_state: $crate::core::entity::ValidationState,
        }

        impl $type {
            /// Create a new instance with no custom validation errors
            #[allow(clippy::too_many_arguments)]
            pub fn new( $( $field: $field_type ),* ) -> Self {
                Self {
                    $( $field, )*
                    validation_state: $crate::core::entity::ValidationState::new(),
                }
            }

            /// Entity type name used in logs and errors
            pub fn entity_type() -> &'static str {
                $type_name
            }

            /// Declared fields and rules for this entity type
            pub fn validation_config() -> &'static $crate::core::validation::EntityValidationConfig {
                use std::sync::OnceLock;
                static CONFIG: OnceLock<$crate::core::validation::EntityValidationConfig> =
                    OnceLock::new();
                CONFIG.get_or_init(|| {
                    let mut config = $crate::core::validation::EntityValidationConfig::new($type_name);
                    $(
                        config.declare_field(
                            stringify!($field),
                            <$field_type as $crate::core::field::ToFieldValue>::KIND,
                        );
                    )*
                    $(
                        $crate::add_validators_for_field!(config, stringify!($val_field), $( $validator )*);
                    )*
                    config
                })
            }
        }

        impl $crate::core::field::FieldAccess for $type {
            fn field_value(&self, field: &str) -> Option<$crate::core::field::FieldValue> {
                $(
                    if field == stringify!($field) {
                        return Some($crate::core::field::ToFieldValue::to_field_value(&self.$field));
                    }
                )*
                None
            }
        }

        impl $crate::core::entity::Validatable for $type {
            fn validation_state(&self) -> &$crate::core::entity::ValidationState {
                &self.validation_state
            }

            fn validation_state_mut(&mut self) -> &mut $crate::core::entity::ValidationState {
                &mut self.validation_state
            }

            fn declared_findings(&self) -> Vec<$crate::core::validation::ValidationFinding> {
                Self::validation_config().validate(self)
            }
        }
    };
}

/// Helper macro to add validators to a field
#[macro_export]
macro_rules! add_validators_for_field {
    // Base case: empty
    ($config:expr, $field:expr,) => {};

    // separator
    ($config:expr, $field:expr, , $( $rest:tt )*) => {
        $crate::add_validators_for_field!($config, $field, $( $rest )*);
    };

    // required
    ($config:expr, $field:expr, required $( $rest:tt )*) => {
        $crate::push_validator!($config, $field, $crate::core::validation::validators::required());
        $crate::add_validators_for_field!($config, $field, $( $rest )*);
    };

    // positive
    ($config:expr, $field:expr, positive $( $rest:tt )*) => {
        $crate::push_validator!($config, $field, $crate::core::validation::validators::positive());
        $crate::add_validators_for_field!($config, $field, $( $rest )*);
    };

    // string_length with parameters
    ($config:expr, $field:expr, string_length($min:expr, $max:expr) $( $rest:tt )*) => {
        $crate::push_validator!($config, $field, $crate::core::validation::validators::string_length($min, $max));
        $crate::add_validators_for_field!($config, $field, $( $rest )*);
    };

    // max_length with parameter
    ($config:expr, $field:expr, max_length($max:expr) $( $rest:tt )*) => {
        $crate::push_validator!($config, $field, $crate::core::validation::validators::max_length($max));
        $crate::add_validators_for_field!($config, $field, $( $rest )*);
    };

    // range with parameters
    ($config:expr, $field:expr, range($min:expr, $max:expr) $( $rest:tt )*) => {
        $crate::push_validator!($config, $field, $crate::core::validation::validators::range(($min) as f64, ($max) as f64));
        $crate::add_validators_for_field!($config, $field, $( $rest )*);
    };

    // min_value with parameter
    ($config:expr, $field:expr, min_value($min:expr) $( $rest:tt )*) => {
        $crate::push_validator!($config, $field, $crate::core::validation::validators::min_value(($min) as f64));
        $crate::add_validators_for_field!($config, $field, $( $rest )*);
    };

    // max_value with parameter
    ($config:expr, $field:expr, max_value($max:expr) $( $rest:tt )*) => {
        $crate::push_validator!($config, $field, $crate::core::validation::validators::max_value(($max) as f64));
        $crate::add_validators_for_field!($config, $field, $( $rest )*);
    };

    // in_list with values
    ($config:expr, $field:expr, in_list($( $value:expr ),* $(,)?) $( $rest:tt )*) => {
        $crate::push_validator!($config, $field, $crate::core::validation::validators::in_list(vec![$( $value.to_string() ),*]));
        $crate::add_validators_for_field!($config, $field, $( $rest )*);
    };

    // date_format with format string
    ($config:expr, $field:expr, date_format($format:expr) $( $rest:tt )*) => {
        $crate::push_validator!($config, $field, $crate::core::validation::validators::date_format($format));
        $crate::add_validators_for_field!($config, $field, $( $rest )*);
    };

    // named formats
    ($config:expr, $field:expr, format(email) $( $rest:tt )*) => {
        $crate::push_validator!($config, $field, $crate::core::validation::validators::format($crate::core::field::FieldFormat::Email));
        $crate::add_validators_for_field!($config, $field, $( $rest )*);
    };

    ($config:expr, $field:expr, format(url) $( $rest:tt )*) => {
        $crate::push_validator!($config, $field, $crate::core::validation::validators::format($crate::core::field::FieldFormat::Url));
        $crate::add_validators_for_field!($config, $field, $( $rest )*);
    };

    ($config:expr, $field:expr, format(uuid) $( $rest:tt )*) => {
        $crate::push_validator!($config, $field, $crate::core::validation::validators::format($crate::core::field::FieldFormat::Uuid));
        $crate::add_validators_for_field!($config, $field, $( $rest )*);
    };

    ($config:expr, $field:expr, format(phone) $( $rest:tt )*) => {
        $crate::push_validator!($config, $field, $crate::core::validation::validators::format($crate::core::field::FieldFormat::Phone));
        $crate::add_validators_for_field!($config, $field, $( $rest )*);
    };

    // regular expression
    ($config:expr, $field:expr, pattern($pattern:expr) $( $rest:tt )*) => {
        match $crate::core::validation::validators::pattern($pattern) {
            Ok(rule) => $crate::push_validator!($config, $field, rule),
            Err(err) => panic!("invalid pattern for field '{}': {}", $field, err),
        }
        $crate::add_validators_for_field!($config, $field, $( $rest )*);
    };

    // any Rule expression
    ($config:expr, $field:expr, rule($rule:expr) $( $rest:tt )*) => {
        $crate::push_validator!($config, $field, $rule);
        $crate::add_validators_for_field!($config, $field, $( $rest )*);
    };
}

/// Attach one rule, panicking on malformed metadata
#[doc(hidden)]
#[macro_export]
macro_rules! push_validator {
    ($config:expr, $field:expr, $rule:expr) => {
        if let Err(err) = $config.add_validator($field, $rule) {
            panic!("invalid validation rules: {}", err);
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    impl_validated_entity!(
        TestMember,
        "test_member",
        {
            name: Option<String>,
            age: i64,
            email: String,
            tier: String,
            joined: Option<String>,
        },
        validate: {
            name: [required, string_length(2, 20)],
            age: [range(0, 150)],
            email: [format(email)],
            tier: [in_list("basic", "gold")],
            joined: [date_format("%Y-%m-%d")],
        }
    );

    impl_validated_entity!(
        TestNote,
        "test_note",
        {
            body: String,
        },
        validate: {}
    );

    fn member() -> TestMember {
        TestMember::new(
            Some("Ada".to_string()),
            36,
            "ada@example.com".to_string(),
            "gold".to_string(),
            Some("2024-01-15".to_string()),
        )
    }

    #[test]
    fn test_generated_entity_is_valid() {
        let member = member();
        assert!(member.is_valid());
        assert!(member.errors().is_empty());
        assert_eq!(TestMember::entity_type(), "test_member");
    }

    #[test]
    fn test_generated_config_declares_all_fields() {
        let config = TestMember::validation_config();
        assert_eq!(config.entity_type(), "test_member");
        assert_eq!(
            config.field_names().collect::<Vec<_>>(),
            vec!["name", "age", "email", "tier", "joined"]
        );
        assert_eq!(config.rule_count(), 6);
    }

    #[test]
    fn test_field_access() {
        let member = member();
        assert_eq!(member.field_value("age"), Some(FieldValue::Integer(36)));
        assert_eq!(member.field_value("validation_state"), None);
        assert_eq!(member.field_value("missing"), None);
    }

    #[test]
    fn test_every_rule_kind_reports() {
        let member = TestMember::new(
            None,
            -1,
            "nope".to_string(),
            "platinum".to_string(),
            Some("15/01/2024".to_string()),
        );
        let fields: Vec<_> = member.errors().into_iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["name", "age", "email", "tier", "joined"]);
    }

    #[test]
    fn test_entity_without_rules_is_valid() {
        let note = TestNote::new(String::new());
        assert!(note.is_valid());
        assert_eq!(TestNote::validation_config().rule_count(), 0);
    }

    #[test]
    fn test_custom_errors_are_not_serialized() {
        let mut member = member();
        member.add_general_error("flagged");

        let json = serde_json::to_value(&member).unwrap();
        assert!(json.get("validation_state").is_none());

        let restored: TestMember = serde_json::from_value(json).unwrap();
        assert!(restored.is_valid());
    }

    #[test]
    #[should_panic(expected = "cannot be applied to text field 'title'")]
    fn test_incompatible_rule_panics_on_first_use() {
        impl_validated_entity!(
            BrokenEntity,
            "broken_entity",
            {
                title: String,
            },
            validate: {
                title: [positive],
            }
        );

        let _ = BrokenEntity::new("x".to_string()).is_valid();
    }
}
