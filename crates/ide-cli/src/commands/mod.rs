//! Command implementations

mod apply;
mod validate;

pub use apply::run_apply;
pub use validate::run_validate;

use std::path::Path;

use ide_config::{ConfigLoader, ConfigSchema, IdeConfiguration};

use crate::error::Result;

/// Load a configuration document against the process environment.
fn load_config(path: &Path) -> Result<IdeConfiguration> {
    let loader = ConfigLoader::new(ConfigSchema::ide_config());
    Ok(loader.load_file(path)?)
}
