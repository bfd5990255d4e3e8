//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

/// Scan command arguments.
#[derive(Debug, Args)]
pub struct ScanCommand {
    /// Photo of the business card
    pub image: PathBuf,

    /// Also print the raw OCR text
    #[arg(long)]
    pub raw: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Register command arguments.
#[derive(Debug, Args)]
pub struct RegisterCommand {
    /// Photo of the business card to OCR
    #[arg(conflicts_with = "text")]
    pub image: Option<PathBuf>,

    /// Read already-recognized card text from this file instead of an image
    #[arg(short, long, value_name = "FILE")]
    pub text: Option<PathBuf>,

    /// Company name (overrides the extracted value)
    #[arg(long)]
    pub company: Option<String>,

    /// Person name (overrides the extracted value)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Role or job title
    #[arg(short, long)]
    pub role: Option<String>,

    /// Save without asking to confirm the fields
    #[arg(short, long)]
    pub yes: bool,
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Only show cards from this company (exact name)
    #[arg(long)]
    pub company: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Companies command arguments.
#[derive(Debug, Args)]
pub struct CompaniesCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// Formatted table
    Table,
    /// JSON output
    Json,
}
