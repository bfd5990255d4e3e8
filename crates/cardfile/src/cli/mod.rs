//! Command-line interface for cardfile.
//!
//! This module provides the CLI structure for the `cardfile` binary and the
//! rendering of its output.

mod commands;
pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    CompaniesCommand, ConfigCommand, ListCommand, OutputFormat, RegisterCommand, ScanCommand,
    StatusCommand,
};

/// cardfile - Keep your business cards, find them by company
///
/// Photograph a card, let OCR prefill the company and name, confirm, and
/// look cards up later by company.
#[derive(Debug, Parser)]
#[command(name = "cardfile")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for info, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// OCR a card image and show the extracted fields without saving
    Scan(ScanCommand),

    /// Register a card from an image, a text file or flags
    Register(RegisterCommand),

    /// List registered cards, optionally for one company
    List(ListCommand),

    /// List the companies cards can be filtered by
    Companies(CompaniesCommand),

    /// Show database status
    Status(StatusCommand),

    /// View or check configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn status_cli(verbose: u8, quiet: bool) -> Cli {
        Cli {
            config: None,
            verbose,
            quiet,
            command: Command::Status(StatusCommand { json: false }),
        }
    }

    #[test]
    fn test_cli_name() {
        assert_eq!(Cli::command().get_name(), "cardfile");
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_levels() {
        use crate::logging::Verbosity;

        assert_eq!(status_cli(0, true).verbosity(), Verbosity::Quiet);
        assert_eq!(status_cli(0, false).verbosity(), Verbosity::Normal);
        assert_eq!(status_cli(1, false).verbosity(), Verbosity::Verbose);
        assert_eq!(status_cli(3, false).verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_parse_scan() {
        let cli = Cli::try_parse_from(["cardfile", "scan", "card.jpg", "--raw"]).unwrap();
        match cli.command {
            Command::Scan(cmd) => {
                assert_eq!(cmd.image, PathBuf::from("card.jpg"));
                assert!(cmd.raw);
                assert_eq!(cmd.format, OutputFormat::Plain);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_register_with_overrides() {
        let cli = Cli::try_parse_from([
            "cardfile",
            "register",
            "card.jpg",
            "--company",
            "Acme",
            "-r",
            "CTO",
            "-y",
        ])
        .unwrap();
        match cli.command {
            Command::Register(cmd) => {
                assert_eq!(cmd.image, Some(PathBuf::from("card.jpg")));
                assert_eq!(cmd.company.as_deref(), Some("Acme"));
                assert_eq!(cmd.role.as_deref(), Some("CTO"));
                assert!(cmd.name.is_none());
                assert!(cmd.yes);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_register_image_conflicts_with_text() {
        let result =
            Cli::try_parse_from(["cardfile", "register", "card.jpg", "--text", "card.txt"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_list_filter() {
        let cli = Cli::try_parse_from(["cardfile", "list", "--company", "Acme", "-f", "json"])
            .unwrap();
        match cli.command {
            Command::List(cmd) => {
                assert_eq!(cmd.company.as_deref(), Some("Acme"));
                assert_eq!(cmd.format, OutputFormat::Json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_list_defaults_to_table() {
        let cli = Cli::try_parse_from(["cardfile", "list"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::List(ListCommand {
                company: None,
                format: OutputFormat::Table,
            })
        ));
    }

    #[test]
    fn test_parse_config_validate() {
        let cli = Cli::try_parse_from(["cardfile", "config", "validate", "-f", "x.toml"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Config(ConfigCommand::Validate { file: Some(_) })
        ));
    }

    #[test]
    fn test_parse_with_config() {
        let cli =
            Cli::try_parse_from(["cardfile", "-c", "/custom/config.toml", "status"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }
}
