//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use ide_config::DEFAULT_CONFIG_FILE;

/// IDE Configuration - Apply ide-config.yaml to a project's .idea/ metadata
#[derive(Parser, Debug)]
#[command(name = "idecfg")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Merge the configuration into the project's IDE files
    ///
    /// Data sources go to .idea/dataSources.xml and
    /// .idea/dataSources.local.xml, PHP servers to .idea/workspace.xml.
    /// Existing content that the configuration does not describe is kept.
    ///
    /// Examples:
    ///   idecfg apply                          # ./ide-config.yaml into ./.idea
    ///   idecfg apply --dry-run                # Show the diff only
    ///   idecfg apply -c ci.yaml -p ../app     # Explicit paths
    Apply {
        /// Configuration document
        #[arg(short, long, env = "IDECFG_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,

        /// Project root containing (or receiving) the .idea directory
        #[arg(short, long, default_value = ".")]
        project: PathBuf,

        /// Preview changes without writing any file
        #[arg(long)]
        dry_run: bool,
    },

    /// Load and validate the configuration without touching the project
    Validate {
        /// Configuration document
        #[arg(short, long, env = "IDECFG_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_apply_defaults() {
        let cli = Cli::try_parse_from(["idecfg", "apply"]).unwrap();
        assert!(!cli.verbose);
        match cli.command {
            Commands::Apply {
                config,
                project,
                dry_run,
            } => {
                // IDECFG_CONFIG may be set by the caller's shell
                if std::env::var_os("IDECFG_CONFIG").is_none() {
                    assert_eq!(config, PathBuf::from("ide-config.yaml"));
                }
                assert_eq!(project, PathBuf::from("."));
                assert!(!dry_run);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_verbose_after_subcommand() {
        let cli =
            Cli::try_parse_from(["idecfg", "validate", "--json", "-v", "-c", "x.yaml"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(
            cli.command,
            Commands::Validate {
                config: PathBuf::from("x.yaml"),
                json: true,
            }
        );
    }

    #[test]
    fn test_subcommand_is_required() {
        assert!(Cli::try_parse_from(["idecfg"]).is_err());
    }
}
