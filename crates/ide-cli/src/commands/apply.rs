//! Apply command implementation

use std::path::Path;

use colored::Colorize;

use ide_fs::IdeaLayout;
use ide_sync::{FileAction, SyncEngine, SyncOptions};

use super::load_config;
use crate::error::Result;

/// Run the apply command
///
/// Loads the configuration, merges it into the project's IDE files and
/// reports what changed. With `dry_run` the diffs are printed instead of
/// written.
pub fn run_apply(config_path: &Path, project: &Path, dry_run: bool) -> Result<()> {
    let mode = if dry_run { " (dry run)".yellow().to_string() } else { String::new() };
    println!(
        "{} Applying {} to {}{}",
        "=>".blue().bold(),
        config_path.display().to_string().cyan(),
        project.display().to_string().cyan(),
        mode
    );

    let mut config = load_config(config_path)?;
    let engine = SyncEngine::for_project(IdeaLayout::new(project));
    let report = engine.sync(&mut config, SyncOptions { dry_run })?;

    if report.changes.is_empty() {
        println!("   Nothing to apply: no databases or servers configured.");
        return Ok(());
    }

    for change in &report.changes {
        let action = match change.action {
            FileAction::Created => "created".green(),
            FileAction::Updated => "updated".yellow(),
            FileAction::Unchanged => "unchanged".dimmed(),
        };
        println!("   {:>9} {}", action, change.file);
    }

    if dry_run {
        for change in report.written() {
            println!();
            print!("{}", change.diff());
        }
    }

    let written = report.written().count();
    println!();
    if written == 0 {
        println!("{} Project files are up to date.", "OK".green().bold());
    } else if dry_run {
        println!(
            "{} {} file(s) would change. Run without {} to write them.",
            "DRY-RUN".yellow().bold(),
            written,
            "--dry-run".cyan()
        );
    } else {
        println!("{} {} file(s) written.", "OK".green().bold(), written);
    }

    Ok(())
}
