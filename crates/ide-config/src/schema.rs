//! Top-level section rules for the configuration document
//!
//! The schema is a plain value built once and handed to the loader. It
//! checks which sections may appear, which are required, what node type each
//! must have, and fills in defaults before typed deserialization.

use serde_yaml::{Mapping, Value};

use crate::error::{Error, Result};

/// Shape of a top-level section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    /// Mapping of name to record; defaults to an empty mapping.
    Collection,
    /// A single record; absent unless configured.
    Singleton,
}

/// Validation rule for one top-level key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionRule {
    pub key: &'static str,
    pub kind: SectionKind,
    pub required: bool,
    /// `null` is accepted and treated as "not configured".
    pub nullable: bool,
    /// An empty mapping is treated as "not configured".
    pub omit_when_empty: bool,
}

impl SectionRule {
    pub const fn collection(key: &'static str) -> Self {
        Self {
            key,
            kind: SectionKind::Collection,
            required: false,
            nullable: false,
            omit_when_empty: false,
        }
    }

    pub const fn singleton(key: &'static str) -> Self {
        Self {
            key,
            kind: SectionKind::Singleton,
            required: false,
            nullable: false,
            omit_when_empty: true,
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub const fn keep_when_empty(mut self) -> Self {
        self.omit_when_empty = false;
        self
    }
}

/// Immutable set of top-level section rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSchema {
    sections: Vec<SectionRule>,
}

impl ConfigSchema {
    pub fn new(sections: Vec<SectionRule>) -> Self {
        Self { sections }
    }

    /// Rules for `ide-config.yaml`.
    ///
    /// `modules` is required. `symfony` is the one section where `null` is
    /// accepted and an empty mapping still counts as configured.
    pub fn ide_config() -> Self {
        Self::new(vec![
            SectionRule::collection("modules").required(),
            SectionRule::singleton("composer"),
            SectionRule::collection("servers"),
            SectionRule::collection("deployment"),
            SectionRule::singleton("php"),
            SectionRule::singleton("javascript"),
            SectionRule::singleton("vcs"),
            SectionRule::collection("databases"),
            SectionRule::singleton("sql"),
            SectionRule::singleton("symfony").nullable().keep_when_empty(),
            SectionRule::collection("run"),
        ])
    }

    pub fn rule(&self, key: &str) -> Option<&SectionRule> {
        self.sections.iter().find(|rule| rule.key == key)
    }

    /// Validate a resolved document and return it with defaults applied.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidConfig`] if the document is not a mapping or has a
    ///   non-string key
    /// * [`Error::UnknownSection`] for keys without a rule
    /// * [`Error::MissingSection`] for absent required sections
    /// * [`Error::InvalidSectionType`] for sections with the wrong node type
    pub fn apply(&self, document: Value) -> Result<Mapping> {
        let mut mapping = match document {
            Value::Mapping(mapping) => mapping,
            other => {
                return Err(Error::invalid(format!(
                    "the document must be a mapping, found {}",
                    node_type(&other)
                )));
            }
        };

        for key in mapping.keys() {
            let key = key
                .as_str()
                .ok_or_else(|| Error::invalid("top-level keys must be strings"))?;
            if self.rule(key).is_none() {
                return Err(Error::UnknownSection {
                    key: key.to_string(),
                });
            }
        }

        for rule in &self.sections {
            match mapping.get(rule.key) {
                None if rule.required => {
                    return Err(Error::MissingSection {
                        key: rule.key.to_string(),
                    });
                }
                None => {
                    if rule.kind == SectionKind::Collection {
                        mapping.insert(rule.key.into(), Value::Mapping(Mapping::new()));
                    }
                }
                Some(Value::Null) if rule.nullable => {
                    mapping.remove(rule.key);
                }
                Some(Value::Mapping(section)) => {
                    if section.is_empty() && rule.omit_when_empty {
                        tracing::debug!(section = rule.key, "Empty section treated as absent");
                        mapping.remove(rule.key);
                    }
                }
                Some(other) => {
                    return Err(Error::InvalidSectionType {
                        key: rule.key.to_string(),
                        expected: if rule.nullable {
                            "a mapping or null"
                        } else {
                            "a mapping"
                        },
                        found: node_type(other),
                    });
                }
            }
        }

        Ok(mapping)
    }
}

impl Default for ConfigSchema {
    fn default() -> Self {
        Self::ide_config()
    }
}

fn node_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
