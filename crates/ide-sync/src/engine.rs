//! SyncEngine implementation
//!
//! The engine renders every managed `.idea/` file from the configuration,
//! then writes the ones that changed. Rendering happens for all files before
//! anything touches the disk, so a failure in any merge leaves the project
//! exactly as it was.

use std::fmt;
use std::path::PathBuf;

use ide_config::{Collection, Database, IdeConfiguration};
use ide_fs::{IdeaFile, IdeaLayout};
use ide_xml::Element;
use similar::TextDiff;

use crate::allocator::{IdAllocator, UuidAllocator};
use crate::data_sources::{DataSourcesLocalMerger, DataSourcesMerger};
use crate::error::{Error, Result};
use crate::merger::merge_entities;
use crate::php_servers::PhpServersMerger;

/// What a sync does (or would do) to one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAction {
    Created,
    Updated,
    Unchanged,
}

impl fmt::Display for FileAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileAction::Created => write!(f, "created"),
            FileAction::Updated => write!(f, "updated"),
            FileAction::Unchanged => write!(f, "unchanged"),
        }
    }
}

/// Rendered result for one project file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    pub file: IdeaFile,
    pub path: PathBuf,
    pub action: FileAction,
    /// File content before the sync, `None` when the file did not exist
    pub before: Option<String>,
    /// File content after the sync
    pub after: String,
}

impl FileChange {
    /// Unified diff from the previous content to the rendered one.
    ///
    /// Empty for unchanged files.
    pub fn diff(&self) -> String {
        if self.action == FileAction::Unchanged {
            return String::new();
        }

        let before = self.before.as_deref().unwrap_or("");
        let old_header = format!("a/{}", self.file);
        let new_header = format!("b/{}", self.file);
        TextDiff::from_lines(before, self.after.as_str())
            .unified_diff()
            .context_radius(3)
            .header(&old_header, &new_header)
            .to_string()
    }
}

/// Report from a sync operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    /// One entry per file the configuration has something to merge into
    pub changes: Vec<FileChange>,
    /// Whether the files were left untouched
    pub dry_run: bool,
}

impl SyncReport {
    /// Changes that were (or would be) written
    pub fn written(&self) -> impl Iterator<Item = &FileChange> {
        self.changes
            .iter()
            .filter(|c| c.action != FileAction::Unchanged)
    }

    pub fn is_clean(&self) -> bool {
        self.written().next().is_none()
    }
}

/// Options for sync operations
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOptions {
    /// If true, render and report without modifying the filesystem
    pub dry_run: bool,
}

/// Engine that merges a configuration into one project's `.idea/` files.
pub struct SyncEngine<A = UuidAllocator> {
    layout: IdeaLayout,
    allocator: A,
}

impl SyncEngine<UuidAllocator> {
    /// Create an engine allocating random UUIDs for new entities.
    pub fn for_project(layout: IdeaLayout) -> Self {
        Self::new(layout, UuidAllocator)
    }
}

impl<A: IdAllocator> SyncEngine<A> {
    pub fn new(layout: IdeaLayout, allocator: A) -> Self {
        Self { layout, allocator }
    }

    /// Render every affected file without writing anything.
    ///
    /// Files whose collections are empty are skipped. On success the
    /// configured databases and servers carry the identifiers found in or
    /// allocated for the project files; on error the configuration is left
    /// as it was.
    pub fn plan(&self, config: &mut IdeConfiguration) -> Result<Vec<FileChange>> {
        let mut databases = config.databases.clone();
        let mut servers = config.servers.clone();
        let mut changes = Vec::new();

        if !databases.is_empty() {
            changes.push(self.render(IdeaFile::DataSources, |root| {
                merge_databases(root, &mut databases, &self.allocator)
            })?);
            changes.push(self.render(IdeaFile::DataSourcesLocal, |root| {
                merge_entities(&DataSourcesLocalMerger, root, &mut databases, &self.allocator)
                    .map(drop)
            })?);
        }

        if !servers.is_empty() {
            changes.push(self.render(IdeaFile::Workspace, |root| {
                merge_entities(&PhpServersMerger, root, &mut servers, &self.allocator).map(drop)
            })?);
        }

        config.databases = databases;
        config.servers = servers;
        Ok(changes)
    }

    /// Render and write every affected file.
    ///
    /// # Errors
    ///
    /// Returns the first merge or parse error before any file is written.
    /// A write failure part-way through leaves the earlier files written.
    pub fn sync(&self, config: &mut IdeConfiguration, options: SyncOptions) -> Result<SyncReport> {
        let changes = self.plan(config)?;

        if !options.dry_run {
            for change in changes.iter().filter(|c| c.action != FileAction::Unchanged) {
                ide_fs::write_text(&change.path, &change.after)?;
                tracing::info!(file = %change.file, action = %change.action, "Wrote project file");
            }
        }

        let report = SyncReport {
            changes,
            dry_run: options.dry_run,
        };
        tracing::debug!(
            files = report.changes.len(),
            written = report.written().count(),
            dry_run = options.dry_run,
            "Sync finished"
        );
        Ok(report)
    }

    fn render<F>(&self, file: IdeaFile, merge: F) -> Result<FileChange>
    where
        F: FnOnce(&mut Element) -> Result<()>,
    {
        let path = self.layout.path(file);
        let before = ide_fs::read_optional_text(&path)?;

        let existing = match before.as_deref() {
            Some(text) if !text.trim().is_empty() => {
                ide_xml::parse(text).map_err(|source| Error::InvalidProjectFile {
                    path: path.clone(),
                    source,
                })?
            }
            _ => Element::project(),
        };

        let mut tree = existing.clone();
        merge(&mut tree)?;

        let (action, after) = match before {
            None => (FileAction::Created, ide_xml::to_string(&tree)?),
            Some(ref text) if tree == existing => (FileAction::Unchanged, text.clone()),
            Some(_) => (FileAction::Updated, ide_xml::to_string(&tree)?),
        };

        tracing::debug!(%file, %action, "Rendered project file");
        Ok(FileChange {
            file,
            path,
            action,
            before,
            after,
        })
    }
}

fn merge_databases(
    root: &mut Element,
    databases: &mut Collection<Database>,
    allocator: &dyn IdAllocator,
) -> Result<()> {
    let outcome = merge_entities(&DataSourcesMerger, root, databases, allocator)?;
    if !outcome.created.is_empty() {
        tracing::info!(created = ?outcome.created, "Added data sources");
    }
    Ok(())
}
