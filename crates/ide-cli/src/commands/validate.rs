//! Validate command implementation

use std::path::Path;

use colored::Colorize;
use serde_json::json;

use ide_config::IdeConfiguration;
use ide_sync::jdbc_driver_class;

use super::load_config;
use crate::error::{CliError, Result};

/// Problems that would make `apply` fail even though the document loads.
fn problems(config: &IdeConfiguration) -> Vec<String> {
    config
        .databases
        .iter()
        .filter(|db| jdbc_driver_class(&db.driver).is_none())
        .map(|db| {
            format!(
                "database '{}' uses unsupported driver '{}'",
                db.name, db.driver
            )
        })
        .collect()
}

/// Run the validate command
///
/// Loads the configuration (resolving `env(...)` references) and checks
/// that every configured entity can be written.
pub fn run_validate(config_path: &Path, json: bool) -> Result<()> {
    let config = load_config(config_path)?;
    let problems = problems(&config);

    if json {
        let databases: Vec<_> = config
            .databases
            .iter()
            .map(|db| {
                json!({
                    "name": db.name,
                    "driver": db.driver,
                    "supported": jdbc_driver_class(&db.driver).is_some(),
                })
            })
            .collect();
        let output = json!({
            "config": config_path.display().to_string(),
            "valid": problems.is_empty(),
            "modules": config.modules.names().collect::<Vec<_>>(),
            "servers": config.servers.names().collect::<Vec<_>>(),
            "deployment": config.deployment.names().collect::<Vec<_>>(),
            "databases": databases,
            "run": config.run.names().collect::<Vec<_>>(),
            "problems": problems,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_summary(config_path, &config, &problems);
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(CliError::user(format!(
            "{} problem(s) found in {}",
            problems.len(),
            config_path.display()
        )))
    }
}

fn print_summary(config_path: &Path, config: &IdeConfiguration, problems: &[String]) {
    if problems.is_empty() {
        println!(
            "{} {} is valid",
            "OK".green().bold(),
            config_path.display().to_string().cyan()
        );
    } else {
        println!(
            "{} {} has problems:",
            "INVALID".red().bold(),
            config_path.display().to_string().cyan()
        );
        for problem in problems {
            println!("   {} {}", "!".red(), problem);
        }
    }

    let sections = [
        ("modules", config.modules.names().collect::<Vec<_>>()),
        ("servers", config.servers.names().collect()),
        ("deployment", config.deployment.names().collect()),
        ("databases", config.databases.names().collect()),
        ("run", config.run.names().collect()),
    ];
    for (section, names) in sections {
        if !names.is_empty() {
            println!("   {:<10} {}", section.dimmed(), names.join(", "));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ide_config::Database;

    #[test]
    fn test_problems_lists_unsupported_drivers() {
        let config = IdeConfiguration {
            databases: [
                Database::new("app_db", "mysql", "localhost", 3306, "app"),
                Database::new("dwh", "oracle", "dwh", 1521, "dwh"),
            ]
            .into_iter()
            .collect(),
            ..IdeConfiguration::default()
        };

        assert_eq!(
            problems(&config),
            vec!["database 'dwh' uses unsupported driver 'oracle'"]
        );
    }
}
