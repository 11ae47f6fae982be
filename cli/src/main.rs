mod catalog_file;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use optscan_core::{OptionCatalog, ResultSet, StopCondition};
use serde::Serialize;
use tracing::debug;

use crate::catalog_file::load_catalog;

/// CLI mirror of [`StopCondition`] with clap argument parsing support.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliStopCondition {
    All,
    BeforePositional,
    AfterPositional,
    BeforeError,
}

impl From<CliStopCondition> for StopCondition {
    fn from(stop: CliStopCondition) -> Self {
        match stop {
            CliStopCondition::All => Self::AllOptions,
            CliStopCondition::BeforePositional => Self::BeforeFirstPositional,
            CliStopCondition::AfterPositional => Self::AfterFirstPositional,
            CliStopCondition::BeforeError => Self::BeforeFirstError,
        }
    }
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
    Text,
}

#[derive(Debug, Parser)]
#[command(name = "optscan")]
#[command(about = "Render option catalogs and parse argument vectors against them")]
#[command(disable_help_subcommand = true)]
struct Cli {
    /// Enable debug logging on stderr.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the help text rendered for a catalog.
    Help(CatalogArgs),
    /// Validate a catalog declaration file.
    Check(CatalogArgs),
    /// Parse arguments against a catalog and print the result.
    Parse(ParseArgs),
}

#[derive(Debug, Args)]
struct CatalogArgs {
    /// Catalog declaration file (.yaml/.yml or JSON).
    #[arg(long)]
    catalog: PathBuf,
}

#[derive(Debug, Args)]
struct ParseArgs {
    /// Catalog declaration file (.yaml/.yml or JSON).
    #[arg(long)]
    catalog: PathBuf,

    /// When to stop scanning.
    #[arg(long, value_enum, default_value = "all")]
    stop: CliStopCondition,

    /// Output format.
    #[arg(long, value_enum, default_value = "json")]
    format: CliOutputFormat,

    /// Arguments to parse, given after `--`.
    #[arg(last = true)]
    args: Vec<String>,
}

#[derive(Debug, Serialize)]
struct OptionOutput<'a> {
    id: u32,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    argument: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct ParseOutput<'a> {
    stop: StopCondition,
    options: Vec<OptionOutput<'a>>,
    positionals: Vec<&'a str>,
    remainder_start: usize,
    remainder: Vec<&'a str>,
}

impl<'a> ParseOutput<'a> {
    fn new(
        catalog: &OptionCatalog,
        stop: StopCondition,
        results: &ResultSet<'a>,
        start: usize,
        rest: Vec<&'a str>,
    ) -> Self {
        let options = results
            .iter()
            .map(|option| OptionOutput {
                id: option.id(),
                name: catalog
                    .by_id(option.id())
                    .map(|spec| spec.display_name())
                    .unwrap_or_else(|| option.id().to_string()),
                argument: option.argument(),
            })
            .collect();

        Self {
            stop,
            options,
            positionals: results.positionals().to_vec(),
            remainder_start: start,
            remainder: rest,
        }
    }

    fn to_text(&self) -> String {
        let mut out = String::new();
        for option in &self.options {
            match option.argument {
                Some(argument) => out.push_str(&format!("option {} {argument}\n", option.name)),
                None => out.push_str(&format!("option {}\n", option.name)),
            }
        }
        for positional in &self.positionals {
            out.push_str(&format!("positional {positional}\n"));
        }
        for arg in &self.remainder {
            out.push_str(&format!("remainder {arg}\n"));
        }
        out
    }
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Command::Help(args) => run_help(args),
        Command::Check(args) => run_check(args),
        Command::Parse(args) => run_parse(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn load(path: &Path) -> Result<OptionCatalog, String> {
    load_catalog(path).map_err(|err| format!("Failed to load '{}': {err}", path.display()))
}

fn run_help(args: CatalogArgs) -> Result<(), String> {
    let catalog = load(&args.catalog)?;
    print!("{}", catalog.help_text());
    Ok(())
}

fn run_check(args: CatalogArgs) -> Result<(), String> {
    let catalog = load(&args.catalog)?;
    println!("Validated {} option(s).", catalog.len());
    Ok(())
}

fn run_parse(args: ParseArgs) -> Result<(), String> {
    let catalog = load(&args.catalog)?;
    let stop = StopCondition::from(args.stop);
    debug!(?stop, arguments = args.args.len(), "parsing arguments");

    let (results, rest) = catalog
        .parse_until(&args.args, stop)
        .map_err(|err| err.to_string())?;
    let output = ParseOutput::new(&catalog, stop, &results, rest.start(), rest.iter().collect());

    let rendered = match args.format {
        CliOutputFormat::Json => serde_json::to_string_pretty(&output)
            .map_err(|err| format!("Failed to serialize JSON: {err}"))?,
        CliOutputFormat::Yaml => serde_yaml::to_string(&output)
            .map_err(|err| format!("Failed to serialize YAML: {err}"))?,
        CliOutputFormat::Text => output.to_text(),
    };
    print!("{rendered}");
    if !rendered.is_empty() && !rendered.ends_with('\n') {
        println!();
    }
    Ok(())
}
