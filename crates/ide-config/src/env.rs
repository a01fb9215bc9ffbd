//! Environment variable references inside the configuration tree
//!
//! Any string leaf written as `env(NAME)` is replaced by the value of the
//! environment variable `NAME`. There is no default and no silent skip: an
//! unset variable aborts the whole load.

use std::collections::HashMap;
use std::hash::BuildHasher;
use std::sync::LazyLock;

use regex::Regex;
use serde_yaml::value::TaggedValue;
use serde_yaml::{Mapping, Value};

use crate::error::{Error, Result};

/// A node of the raw configuration document.
pub type ConfigNode = Value;

/// Matches a whole string of the form `env(NAME)`.
static ENV_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\Aenv\((.*)\)\z").unwrap());

/// Source of environment variable values.
///
/// [`ProcessEnvironment`] reads the real process environment. A `HashMap`
/// works as a fixed snapshot, which keeps resolution reproducible in tests.
pub trait Environment {
    fn var(&self, name: &str) -> Option<String>;
}

/// The environment of the running process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        // names that cannot be set resolve as missing
        if name.is_empty() || name.contains('=') || name.contains('\0') {
            return None;
        }
        std::env::var_os(name).map(|value| value.to_string_lossy().into_owned())
    }
}

impl<S: BuildHasher> Environment for HashMap<String, String, S> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl<E: Environment + ?Sized> Environment for &E {
    fn var(&self, name: &str) -> Option<String> {
        (**self).var(name)
    }
}

/// Return the variable name if `value` is an `env(NAME)` reference.
pub fn env_reference(value: &str) -> Option<&str> {
    ENV_REFERENCE
        .captures(value)
        .and_then(|captures| captures.get(1))
        .map(|name| name.as_str())
}

/// Rewrites `env(NAME)` references in a configuration tree.
#[derive(Debug, Clone, Default)]
pub struct ConfigResolver<E> {
    env: E,
}

impl<E: Environment> ConfigResolver<E> {
    pub fn new(env: E) -> Self {
        Self { env }
    }

    /// Resolve every environment reference in `node`.
    ///
    /// Mappings and sequences are walked recursively and keep their order.
    /// Mapping keys are never rewritten. Scalars other than `env(NAME)`
    /// strings are copied unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingEnvironmentVariable`] for the first reference
    /// whose variable is not set.
    pub fn resolve(&self, node: &ConfigNode) -> Result<ConfigNode> {
        match node {
            Value::Mapping(mapping) => {
                let mut resolved = Mapping::with_capacity(mapping.len());
                for (key, value) in mapping {
                    resolved.insert(key.clone(), self.resolve(value)?);
                }
                Ok(Value::Mapping(resolved))
            }
            Value::Sequence(items) => items
                .iter()
                .map(|item| self.resolve(item))
                .collect::<Result<Vec<_>>>()
                .map(Value::Sequence),
            Value::Tagged(tagged) => Ok(Value::Tagged(Box::new(TaggedValue {
                tag: tagged.tag.clone(),
                value: self.resolve(&tagged.value)?,
            }))),
            Value::String(text) => match env_reference(text) {
                Some(name) => self.lookup(name).map(Value::String),
                None => Ok(node.clone()),
            },
            Value::Null | Value::Bool(_) | Value::Number(_) => Ok(node.clone()),
        }
    }

    fn lookup(&self, name: &str) -> Result<String> {
        match self.env.var(name) {
            Some(value) => {
                tracing::debug!(variable = name, "Resolved environment reference");
                Ok(value)
            }
            None => Err(Error::MissingEnvironmentVariable {
                name: name.to_string(),
            }),
        }
    }
}
