//! Loading validation rules from YAML
//!
//! A rule file lists entities, each with its fields in evaluation order:
//!
//! ```yaml
//! entities:
//!   - name: customer
//!     fields:
//!       email:
//!         kind: text
//!         required: true
//!         format: email
//!       age:
//!         kind: integer
//!         range: { min: 18, max: 120 }
//! ```
//!
//! Rules on a field are attached in a fixed order: `required`, `positive`,
//! `string_length`, `max_length`, `range`, `min_value`, `max_value`,
//! `in_list`, `date_format`, `format`.

use crate::core::error::ConfigError;
use crate::core::field::{FieldFormat, FieldKind};
use crate::core::validation::EntityValidationConfig;
use crate::core::validation::validators::{self, Rule};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Inclusive length bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LengthBounds {
    #[serde(default)]
    pub min: usize,
    pub max: usize,
}

/// Inclusive numeric bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericBounds {
    pub min: f64,
    pub max: f64,
}

/// Built-in string formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamedFormat {
    Email,
    Url,
    Uuid,
    Phone,
}

/// A named format or a custom regular expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormatConfig {
    Named(NamedFormat),
    Pattern { pattern: String },
}

/// Declared kind and rules for one field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRulesConfig {
    pub kind: FieldKind,

    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub positive: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string_length: Option<LengthBounds>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<NumericBounds>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_list: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_format: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<FormatConfig>,
}

impl FieldRulesConfig {
    /// Build the rules for `field` in their fixed order
    pub fn rules(&self, field: &str) -> Result<Vec<Rule>, ConfigError> {
        let mut rules = Vec::new();

        if self.required {
            rules.push(validators::required());
        }
        if self.positive {
            rules.push(validators::positive());
        }
        if let Some(bounds) = self.string_length {
            rules.push(validators::string_length(bounds.min, bounds.max));
        }
        if let Some(max) = self.max_length {
            rules.push(validators::max_length(max));
        }
        if let Some(bounds) = self.range {
            rules.push(validators::range(bounds.min, bounds.max));
        }
        if let Some(min) = self.min_value {
            rules.push(validators::min_value(min));
        }
        if let Some(max) = self.max_value {
            rules.push(validators::max_value(max));
        }
        if let Some(allowed) = &self.in_list {
            rules.push(validators::in_list(allowed.clone()));
        }
        if let Some(format) = &self.date_format {
            rules.push(validators::date_format(format.as_str()));
        }
        if let Some(format) = &self.format {
            let rule = match format {
                FormatConfig::Named(NamedFormat::Email) => validators::format(FieldFormat::Email),
                FormatConfig::Named(NamedFormat::Url) => validators::format(FieldFormat::Url),
                FormatConfig::Named(NamedFormat::Uuid) => validators::format(FieldFormat::Uuid),
                FormatConfig::Named(NamedFormat::Phone) => validators::format(FieldFormat::Phone),
                FormatConfig::Pattern { pattern } => {
                    validators::pattern(pattern).map_err(|source| ConfigError::InvalidPattern {
                        field: field.to_string(),
                        source,
                    })?
                }
            };
            rules.push(rule);
        }

        Ok(rules)
    }
}

/// Rules for one entity type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRulesConfig {
    pub name: String,

    #[serde(default)]
    pub fields: IndexMap<String, FieldRulesConfig>,
}

impl EntityRulesConfig {
    /// Build the registry, rejecting rules that do not fit their field's kind
    pub fn build(&self) -> Result<EntityValidationConfig, ConfigError> {
        let mut config = EntityValidationConfig::new(self.name.as_str());

        for (field, rules) in &self.fields {
            config.declare_field(field.as_str(), rules.kind);
        }

        for (field, rules) in &self.fields {
            for rule in rules.rules(field)? {
                config.add_validator(field, rule)?;
            }
        }

        Ok(config)
    }
}

/// A rule file covering any number of entities
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfigFile {
    #[serde(default)]
    pub entities: Vec<EntityRulesConfig>,
}

impl ValidationConfigFile {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Find the rules for an entity type
    pub fn entity(&self, name: &str) -> Option<&EntityRulesConfig> {
        self.entities.iter().find(|e| e.name == name)
    }

    /// Build the registry for an entity type
    pub fn build(&self, name: &str) -> Result<EntityValidationConfig, ConfigError> {
        self.entity(name)
            .ok_or_else(|| ConfigError::UnknownEntity(name.to_string()))?
            .build()
    }

    /// Merge several files; a later definition of an entity replaces an earlier one
    pub fn merge(files: Vec<ValidationConfigFile>) -> Self {
        let mut entities: IndexMap<String, EntityRulesConfig> = IndexMap::new();

        for file in files {
            for entity in file.entities {
                if entities.contains_key(&entity.name) {
                    tracing::debug!(entity = %entity.name, "validation rules overridden by later file");
                }
                entities.insert(entity.name.clone(), entity);
            }
        }

        Self {
            entities: entities.into_values().collect(),
        }
    }
}
