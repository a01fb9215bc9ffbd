//! Merge engine for IDE project metadata
//!
//! Every entity kind is written the same way: find or create a container
//! element, then find or create one child per entity keyed by its name.
//! Matched elements keep everything the merge does not explicitly set,
//! unmatched entities are appended, and persistent identifiers are reused
//! once allocated. Running a merge twice gives the same tree as running it
//! once.
//!
//! ```text
//! ide-config.yaml ──► IdeConfiguration ──► EntityMerger ──► Element tree ──► .idea/*.xml
//!                                           │
//!                                           └── IdAllocator (new entities only)
//! ```

pub mod allocator;
pub mod data_sources;
pub mod engine;
pub mod error;
pub mod merger;
pub mod php_servers;

pub use allocator::{IdAllocator, UuidAllocator};
pub use data_sources::{DataSourcesLocalMerger, DataSourcesMerger, jdbc_driver_class};
pub use engine::{FileAction, FileChange, SyncEngine, SyncOptions, SyncReport};
pub use error::{Error, Result};
pub use merger::{EntityMerger, IdentityMode, MergeOutcome, merge_entities};
pub use php_servers::PhpServersMerger;
