//! Project configuration document for IDE metadata generation
//!
//! Loading happens in a fixed order:
//!
//! 1. Parse the YAML document into a [`ConfigNode`] tree
//! 2. Replace every `env(NAME)` string with the value of `NAME` ([`ConfigResolver`])
//! 3. Validate top-level sections and fill defaults ([`ConfigSchema`])
//! 4. Deserialize into typed records ([`IdeConfiguration`])
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use ide_config::{ConfigLoader, ConfigSchema};
//!
//! let env = HashMap::from([("DB_HOST".to_string(), "db.internal".to_string())]);
//! let loader = ConfigLoader::with_environment(ConfigSchema::ide_config(), env);
//!
//! let config = loader
//!     .load_str(
//!         r#"
//! modules:
//!   app: {}
//! databases:
//!   app_db:
//!     driver: mysql
//!     host: env(DB_HOST)
//!     port: 3306
//!     database: appdb
//! "#,
//!     )
//!     .unwrap();
//!
//! assert_eq!(config.databases.get("app_db").unwrap().host, "db.internal");
//! ```

pub mod env;
pub mod error;
pub mod loader;
pub mod model;
pub mod schema;

pub use env::{ConfigNode, ConfigResolver, Environment, ProcessEnvironment};
pub use error::{Error, Result};
pub use loader::{ConfigLoader, DEFAULT_CONFIG_FILE};
pub use model::{
    Collection, Composer, Database, Deployment, IdeConfiguration, Identified, JavaScript, Module,
    Named, Php, Run, Server, SqlDialects, Symfony, Vcs,
};
pub use schema::{ConfigSchema, SectionKind, SectionRule};
