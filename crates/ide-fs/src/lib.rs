//! Filesystem access for IDE project metadata
//!
//! Locates the files inside a project's `.idea/` directory and reads and
//! writes them safely.

pub mod error;
pub mod io;
pub mod layout;

pub use error::{Error, Result};
pub use io::{read_optional_text, read_text, write_atomic, write_text};
pub use layout::{IDEA_DIR, IdeaFile, IdeaLayout};
