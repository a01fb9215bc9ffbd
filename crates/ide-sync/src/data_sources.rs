//! Database connections: `dataSources.xml` and `dataSources.local.xml`

use ide_config::Database;
use ide_xml::Element;

use crate::error::{Error, Result};
use crate::merger::{EntityMerger, IdentityMode};

const DATA_SOURCE_MANAGER: &str = "DataSourceManagerImpl";
const DATA_SOURCE_STORAGE_LOCAL: &str = "dataSourceStorageLocal";
const DATA_SOURCE_TAG: &str = "data-source";
const UUID_ATTRIBUTE: &str = "uuid";

/// Logical driver name to JDBC driver class.
const JDBC_DRIVERS: &[(&str, &str)] = &[
    ("mysql", "com.mysql.jdbc.Driver"),
    ("postgresql", "org.postgresql.Driver"),
];

/// Look up the JDBC driver class for a logical driver name.
pub fn jdbc_driver_class(driver: &str) -> Option<&'static str> {
    JDBC_DRIVERS
        .iter()
        .find(|(name, _)| *name == driver)
        .map(|(_, class)| *class)
}

/// JDBC connection string for a database.
pub fn jdbc_url(database: &Database) -> String {
    format!(
        "jdbc:{}://{}:{}/{}",
        database.driver, database.host, database.port, database.database
    )
}

/// Shared connection definitions in `dataSources.xml`.
///
/// Owns the `uuid` of every data source; the identifier chosen here is what
/// [`DataSourcesLocalMerger`] mirrors.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataSourcesMerger;

impl EntityMerger for DataSourcesMerger {
    type Entity = Database;

    fn container<'a>(&self, root: &'a mut Element) -> &'a mut Element {
        let manager = root.find_or_create_child("component", &[("name", DATA_SOURCE_MANAGER)]);
        manager.set_attribute("format", "xml");
        manager.set_attribute("multifile-model", "true");
        manager
    }

    fn entity_tag(&self) -> &'static str {
        DATA_SOURCE_TAG
    }

    fn identity(&self) -> IdentityMode {
        IdentityMode::Assign(UUID_ATTRIBUTE)
    }

    fn populate(&self, element: &mut Element, database: &Database) -> Result<()> {
        element.set_attribute("source", "LOCAL");

        let driver_class =
            jdbc_driver_class(&database.driver).ok_or_else(|| Error::UnsupportedDriver {
                driver: database.driver.clone(),
                database: database.name.clone(),
            })?;

        element.named_child("jdbc-driver").set_text(driver_class);
        element.named_child("synchronize").set_text("true");
        element
            .named_child("driver-ref")
            .set_text(database.driver.as_str());
        element.named_child("jdbc-url").set_text(jdbc_url(database));
        Ok(())
    }
}

/// Per-user connection settings in `dataSources.local.xml`.
///
/// Must run after [`DataSourcesMerger`] in the same pass so every database
/// already carries its identifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataSourcesLocalMerger;

impl EntityMerger for DataSourcesLocalMerger {
    type Entity = Database;

    fn container<'a>(&self, root: &'a mut Element) -> &'a mut Element {
        root.find_or_create_child("component", &[("name", DATA_SOURCE_STORAGE_LOCAL)])
    }

    fn entity_tag(&self) -> &'static str {
        DATA_SOURCE_TAG
    }

    fn identity(&self) -> IdentityMode {
        IdentityMode::Mirror(UUID_ATTRIBUTE)
    }

    fn populate(&self, element: &mut Element, database: &Database) -> Result<()> {
        element.named_child("secret-storage").set_text("master_key");
        if let Some(user) = &database.user {
            element.named_child("user-name").set_text(user.as_str());
        }
        Ok(())
    }
}
