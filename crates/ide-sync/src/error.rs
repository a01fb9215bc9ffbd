//! Error types for ide-sync

use std::path::PathBuf;

/// Result type for ide-sync operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a merge. None of them are retried or downgraded.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The database declares a driver with no known JDBC driver class
    #[error("Unsupported database driver '{driver}' for data source '{database}'")]
    UnsupportedDriver { driver: String, database: String },

    /// An entity reached a merger that mirrors identifiers before one was assigned
    #[error("No identifier has been assigned to '{entity}'")]
    MissingIdentifier { entity: String },

    /// An existing project file could not be parsed
    #[error("Cannot read project file {path}: {source}")]
    InvalidProjectFile {
        path: PathBuf,
        #[source]
        source: ide_xml::Error,
    },

    #[error(transparent)]
    Xml(#[from] ide_xml::Error),

    #[error(transparent)]
    Fs(#[from] ide_fs::Error),
}
