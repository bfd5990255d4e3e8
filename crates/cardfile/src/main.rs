//! `cardfile` - CLI for registering and browsing business cards.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use cardfile::cli::output;
use cardfile::cli::{
    Cli, Command, CompaniesCommand, ConfigCommand, ListCommand, RegisterCommand, ScanCommand,
};
use cardfile::{
    company_choices, form, init_logging, ocr, registration_message, CardSource, CompanyFilter,
    Config, Storage, TesseractEngine,
};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    match cli.command {
        Command::Scan(cmd) => handle_scan(&load_config(cli.config)?, &cmd),
        Command::Register(cmd) => handle_register(&load_config(cli.config)?, cmd),
        Command::List(cmd) => handle_list(&load_config(cli.config)?, cmd),
        Command::Companies(cmd) => handle_companies(&load_config(cli.config)?, &cmd),
        Command::Status(cmd) => handle_status(&load_config(cli.config)?, cmd.json),
        Command::Config(cmd) => handle_config(cli.config, cmd),
    }
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<Config> {
    Config::load_from(path).context("loading configuration")
}

fn open_storage(config: &Config) -> anyhow::Result<Storage> {
    let path = config.database_path();
    Storage::open(&path).with_context(|| format!("opening card database {}", path.display()))
}

fn handle_scan(config: &Config, cmd: &ScanCommand) -> anyhow::Result<()> {
    let engine = TesseractEngine::from_config(&config.ocr);
    let extraction = ocr::scan(&engine, &cmd.image, &config.extract.placeholder)?;
    print!("{}", output::render_extraction(&extraction, cmd.raw, cmd.format)?);
    Ok(())
}

fn handle_register(config: &Config, cmd: RegisterCommand) -> anyhow::Result<()> {
    let engine = TesseractEngine::from_config(&config.ocr);
    let fields = CardSource::from_inputs(cmd.image, cmd.text)
        .default_fields(&engine, &config.extract.placeholder)?
        .with_overrides(cmd.company, cmd.name, cmd.role);

    let fields = if cmd.yes {
        fields
    } else {
        form::confirm_fields(io::stdin().lock(), io::stdout(), fields)?
    };

    let storage = open_storage(config)?;
    let registration = storage.register(&fields)?;

    println!("{}", registration_message(&fields, &registration));
    Ok(())
}

fn handle_list(config: &Config, cmd: ListCommand) -> anyhow::Result<()> {
    let storage = open_storage(config)?;
    let rows = storage.list_cards()?;
    let filter = CompanyFilter::from(cmd.company);
    print!("{}", output::render_listing(&rows, &filter, cmd.format)?);
    Ok(())
}

fn handle_companies(config: &Config, cmd: &CompaniesCommand) -> anyhow::Result<()> {
    let storage = open_storage(config)?;
    let rows = storage.list_cards()?;
    print!("{}", output::render_choices(&company_choices(&rows), cmd.json)?);
    Ok(())
}

fn handle_status(config: &Config, json: bool) -> anyhow::Result<()> {
    let storage = open_storage(config)?;
    let stats = storage.stats()?;

    if json {
        let status = serde_json::json!({
            "database_path": storage.path(),
            "companies": stats.companies,
            "cards": stats.cards,
            "db_size_bytes": stats.db_size_bytes,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("cardfile status");
        println!("---------------");
        println!("Database:      {}", storage.path().display());
        println!("Companies:     {}", stats.companies);
        println!("Cards:         {}", stats.cards);
        println!("Size (bytes):  {}", stats.db_size_bytes);
    }
    Ok(())
}

fn handle_config(config_path: Option<PathBuf>, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            let config = load_config(config_path)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:  {}", config.database_path().display());
                println!();
                println!("[OCR]");
                println!("  Program:        {}", config.ocr.program);
                println!("  Languages:      {}", config.ocr.languages);
                println!();
                println!("[Extract]");
                println!("  Placeholder:    {}", config.extract.placeholder);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file
                .or(config_path)
                .unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            Config::validate_file(&path)
                .with_context(|| format!("validating {}", path.display()))?;
            println!("Configuration is valid.");
        }
    }
    Ok(())
}
