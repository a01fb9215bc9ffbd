//! Typed records for each configuration section
//!
//! Entity sections (`modules`, `servers`, `deployment`, `databases`, `run`)
//! are mappings from a unique name to a record. The name is the map key in
//! YAML and is copied onto the record when the collection is deserialized.

use std::fmt;

use indexmap::IndexMap;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// A record addressed by a unique name within its collection.
pub trait Named {
    fn name(&self) -> &str;
    fn set_name(&mut self, name: String);
}

/// A named record that carries a persistent IDE identifier.
///
/// The identifier is empty after loading and is filled in by the merge
/// engine, either from the existing project file or freshly allocated.
pub trait Identified: Named {
    fn id(&self) -> Option<&str>;
    fn set_id(&mut self, id: String);
}

/// Ordered collection of named records.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Collection<T> {
    entries: IndexMap<String, T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }
}

impl<T: Named> Collection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record under its own name, returning any record it replaced.
    pub fn insert(&mut self, entity: T) -> Option<T> {
        self.entries.insert(entity.name().to_string(), entity)
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.entries.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut T> {
        self.entries.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Records in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.entries.values_mut()
    }
}

impl<T: Named> FromIterator<T> for Collection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut collection = Self::new();
        for entity in iter {
            collection.insert(entity);
        }
        collection
    }
}

impl<'de, T> Deserialize<'de> for Collection<T>
where
    T: Named + Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut entries = IndexMap::<String, T>::deserialize(deserializer)?;
        for (name, entity) in entries.iter_mut() {
            entity.set_name(name.clone());
        }
        Ok(Self { entries })
    }
}

macro_rules! impl_named {
    ($($record:ty),* $(,)?) => {
        $(
            impl Named for $record {
                fn name(&self) -> &str {
                    &self.name
                }

                fn set_name(&mut self, name: String) {
                    self.name = name;
                }
            }
        )*
    };
}

macro_rules! impl_identified {
    ($($record:ty),* $(,)?) => {
        $(
            impl Identified for $record {
                fn id(&self) -> Option<&str> {
                    self.id.as_deref()
                }

                fn set_id(&mut self, id: String) {
                    self.id = Some(id);
                }
            }
        )*
    };
}

impl_named!(Module, Server, Deployment, Database, Run);
impl_identified!(Server, Database);

/// A project module (content root with its source folders).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Module {
    #[serde(skip)]
    pub name: String,
    /// Content root relative to the project directory
    pub root: Option<String>,
    pub sources: Vec<String>,
    pub tests: Vec<String>,
    pub resources: Vec<String>,
    pub excluded: Vec<String>,
}

/// A web server the IDE maps project files onto, e.g. for debugging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Server {
    #[serde(skip)]
    pub name: String,
    pub host: String,
    #[serde(deserialize_with = "port")]
    pub port: u16,
    /// Local path (relative to the project) mapped to a path on the server
    #[serde(default)]
    pub mappings: IndexMap<String, String>,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// A deployment (upload) target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deployment {
    #[serde(skip)]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: DeploymentKind,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default, deserialize_with = "optional_port")]
    pub port: Option<u16>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub root: Option<String>,
    #[serde(default)]
    pub mappings: IndexMap<String, String>,
}

/// Transport used by a [`Deployment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentKind {
    Sftp,
    Ftp,
    Ftps,
    Local,
    Mount,
}

impl fmt::Display for DeploymentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeploymentKind::Sftp => write!(f, "sftp"),
            DeploymentKind::Ftp => write!(f, "ftp"),
            DeploymentKind::Ftps => write!(f, "ftps"),
            DeploymentKind::Local => write!(f, "local"),
            DeploymentKind::Mount => write!(f, "mount"),
        }
    }
}

/// A database connection shown in the IDE's database tool window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Database {
    #[serde(skip)]
    pub name: String,
    /// Logical driver name, e.g. `mysql` or `postgresql`
    pub driver: String,
    pub host: String,
    #[serde(deserialize_with = "port")]
    pub port: u16,
    pub database: String,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl Database {
    pub fn new(
        name: impl Into<String>,
        driver: impl Into<String>,
        host: impl Into<String>,
        port: u16,
        database: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            driver: driver.into(),
            host: host.into(),
            port,
            database: database.into(),
            user: None,
            id: None,
        }
    }
}

impl Server {
    pub fn new(name: impl Into<String>, host: impl Into<String>, port: u16) -> Self {
        Self {
            name: name.into(),
            host: host.into(),
            port,
            mappings: IndexMap::new(),
            id: None,
        }
    }
}

/// A run configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Run {
    #[serde(skip)]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub command: Option<String>,
    #[serde(default)]
    pub arguments: Vec<String>,
    #[serde(default)]
    pub working_directory: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Composer {
    /// Path to `composer.json` relative to the project
    pub path: Option<String>,
    pub executable: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Php {
    pub language_level: Option<String>,
    pub interpreter: Option<String>,
    pub include_paths: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JavaScript {
    pub language_level: Option<String>,
    pub libraries: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Vcs {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Directories (relative to the project) registered as repositories
    pub roots: Vec<String>,
}

/// SQL dialect per path; `default` applies to the whole project.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SqlDialects {
    pub default: Option<String>,
    pub files: IndexMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Symfony {
    pub app_directory: Option<String>,
    pub web_directory: Option<String>,
    pub translation_root: Option<String>,
}

/// The whole configuration document after validation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IdeConfiguration {
    pub modules: Collection<Module>,
    #[serde(default)]
    pub composer: Option<Composer>,
    #[serde(default)]
    pub servers: Collection<Server>,
    #[serde(default)]
    pub deployment: Collection<Deployment>,
    #[serde(default)]
    pub php: Option<Php>,
    #[serde(default)]
    pub javascript: Option<JavaScript>,
    #[serde(default)]
    pub vcs: Option<Vcs>,
    #[serde(default)]
    pub databases: Collection<Database>,
    #[serde(default)]
    pub sql: Option<SqlDialects>,
    #[serde(default)]
    pub symfony: Option<Symfony>,
    #[serde(default)]
    pub run: Collection<Run>,
}

impl IdeConfiguration {
    pub fn module(&self, name: &str) -> Option<&Module> {
        self.modules.get(name)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PortValue {
    Number(u16),
    Text(String),
}

impl PortValue {
    fn into_port<E: de::Error>(self) -> Result<u16, E> {
        match self {
            PortValue::Number(port) => Ok(port),
            PortValue::Text(text) => text
                .trim()
                .parse()
                .map_err(|_| E::custom(format!("invalid port '{}'", text))),
        }
    }
}

/// Ports arrive as strings when they come from `env(...)` references.
fn port<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u16, D::Error> {
    PortValue::deserialize(deserializer)?.into_port()
}

fn optional_port<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u16>, D::Error> {
    Option::<PortValue>::deserialize(deserializer)?
        .map(PortValue::into_port)
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_assigns_names_from_keys() {
        let yaml = r#"
app_db:
  driver: mysql
  host: localhost
  port: 3306
  database: appdb
reports:
  driver: postgresql
  host: reports.internal
  port: "5432"
  database: reports
"#;
        let databases: Collection<Database> = serde_yaml::from_str(yaml).unwrap();

        let names: Vec<_> = databases.iter().map(|db| db.name.as_str()).collect();
        assert_eq!(names, vec!["app_db", "reports"]);
        assert_eq!(databases.get("reports").unwrap().port, 5432);
        assert!(databases.iter().all(|db| db.id.is_none()));
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let yaml = "host: localhost\nport: http\n";
        let result: Result<Server, _> = serde_yaml::from_str(yaml);
        assert!(result.is_err());
    }

    #[test]
    fn test_id_is_never_read_from_config() {
        let yaml = "driver: mysql\nhost: h\nport: 1\ndatabase: d\nid: forged\n";
        let database: Database = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(database.id, None);
    }

    #[test]
    fn test_collection_from_iter_keys_by_name() {
        let servers: Collection<Server> = vec![
            Server::new("web", "localhost", 8080),
            Server::new("api", "localhost", 9000),
        ]
        .into_iter()
        .collect();

        assert_eq!(servers.names().collect::<Vec<_>>(), vec!["web", "api"]);
        assert!(servers.contains("api"));
    }
}
