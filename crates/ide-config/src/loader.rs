//! Loading `ide-config.yaml` into typed records

use std::fs;
use std::path::Path;

use serde_yaml::Value;

use crate::env::{ConfigResolver, Environment, ProcessEnvironment};
use crate::error::{Error, Result};
use crate::model::IdeConfiguration;
use crate::schema::ConfigSchema;

/// Conventional name of the configuration document in a project root.
pub const DEFAULT_CONFIG_FILE: &str = "ide-config.yaml";

/// Loads configuration documents against a fixed schema and environment.
#[derive(Debug, Clone)]
pub struct ConfigLoader<E = ProcessEnvironment> {
    schema: ConfigSchema,
    resolver: ConfigResolver<E>,
}

impl ConfigLoader<ProcessEnvironment> {
    /// Create a loader that resolves `env(...)` against the process environment.
    pub fn new(schema: ConfigSchema) -> Self {
        Self::with_environment(schema, ProcessEnvironment)
    }
}

impl<E: Environment> ConfigLoader<E> {
    pub fn with_environment(schema: ConfigSchema, env: E) -> Self {
        Self {
            schema,
            resolver: ConfigResolver::new(env),
        }
    }

    /// Load a configuration document from YAML source.
    ///
    /// Environment references are resolved before validation, so a missing
    /// variable is reported even when the section using it is otherwise
    /// invalid.
    pub fn load_str(&self, source: &str) -> Result<IdeConfiguration> {
        let document: Value = serde_yaml::from_str(source)?;
        let resolved = self.resolver.resolve(&document)?;
        let validated = self.schema.apply(resolved)?;

        let config: IdeConfiguration = serde_yaml::from_value(Value::Mapping(validated))
            .map_err(|e| Error::invalid(e.to_string()))?;

        tracing::debug!(
            modules = config.modules.len(),
            servers = config.servers.len(),
            databases = config.databases.len(),
            "Loaded IDE configuration"
        );
        Ok(config)
    }

    /// Load a configuration document from a file.
    pub fn load_file(&self, path: &Path) -> Result<IdeConfiguration> {
        tracing::debug!(?path, "Reading IDE configuration");
        let source = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_str(&source)
    }
}
