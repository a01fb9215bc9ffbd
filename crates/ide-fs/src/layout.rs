//! Locations of IDE metadata files inside a project

use std::fmt;
use std::path::{Path, PathBuf};

/// Name of the IDE's per-project metadata directory.
pub const IDEA_DIR: &str = ".idea";

/// Project metadata files this tool manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IdeaFile {
    /// Shared database connection definitions
    DataSources,
    /// Per-user database connection settings (user names, secret storage)
    DataSourcesLocal,
    /// Per-user workspace state, including PHP servers
    Workspace,
}

impl IdeaFile {
    pub fn file_name(&self) -> &'static str {
        match self {
            IdeaFile::DataSources => "dataSources.xml",
            IdeaFile::DataSourcesLocal => "dataSources.local.xml",
            IdeaFile::Workspace => "workspace.xml",
        }
    }
}

impl fmt::Display for IdeaFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", IDEA_DIR, self.file_name())
    }
}

/// Resolves metadata file paths for one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdeaLayout {
    project_root: PathBuf,
}

impl IdeaLayout {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
        }
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn idea_dir(&self) -> PathBuf {
        self.project_root.join(IDEA_DIR)
    }

    pub fn path(&self, file: IdeaFile) -> PathBuf {
        self.idea_dir().join(file.file_name())
    }

    /// Whether the project has been opened in the IDE before.
    pub fn exists(&self) -> bool {
        self.idea_dir().is_dir()
    }
}
