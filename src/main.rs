use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use settings_compare::compare::{build_comparison, only_different, select_categories, Comparison};
use settings_compare::config::{Config, ConfigOverrides};
use settings_compare::markdown::{parse_key_values, ParsedEntry};
use settings_compare::output::csv::{comparison_to_csv, entries_to_csv};
use settings_compare::output::json::render_json;
use settings_compare::output::table::{
    render_categories_table, render_comparison_table, TableOptions,
};
use settings_compare::report::loader::load_reports;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Debug, Parser)]
#[command(
    name = "settings-compare",
    about = "Compare game settings reports side by side"
)]
struct Cli {
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short, long, value_enum)]
    output: Option<OutputFormat>,
    #[arg(long)]
    placeholder: Option<String>,
    #[arg(long = "no-color")]
    no_color: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compare reports loaded from JSON files.
    Compare {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Comma separated section ids.
        #[arg(long)]
        sections: Option<String>,
        #[arg(long = "only-different")]
        only_different: bool,
    },
    /// List comparison sections and their fields.
    Fields,
    /// Parse freeform settings text (`-` for stdin).
    Parse { input: String },
    /// Show the effective config or write a template (`--init`).
    Config {
        #[arg(long)]
        init: bool,
        #[arg(long)]
        show: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load(Some(config_path.as_path()))?;
    let command_only_different = matches!(
        cli.command,
        Commands::Compare {
            only_different: true,
            ..
        }
    );
    config.apply_overrides(ConfigOverrides {
        placeholder: cli.placeholder.clone(),
        no_color: cli.no_color,
        only_different: command_only_different,
    });
    let format = resolve_output_format(cli.output, &config)?;

    match &cli.command {
        Commands::Compare {
            files, sections, ..
        } => {
            let reports = load_reports(files.as_slice())?;
            if reports.len() < 2 {
                warn!(
                    "comparing {} report(s); at least two are needed to spot differences",
                    reports.len()
                );
            }
            let mut categories = config.categories();
            if let Some(raw) = sections {
                categories = select_categories(categories, &parse_id_list(raw))?;
            }
            let mut comparison = build_comparison(&reports, &categories);
            if config.display.only_different {
                comparison = only_different(comparison);
            }
            info!(
                "compared {} report(s): {} setting(s), {} different",
                comparison.summary.reports, comparison.summary.rows, comparison.summary.different
            );
            print_comparison(&comparison, &config, format)?;
        }
        Commands::Fields => {
            let categories = config.categories();
            match format {
                OutputFormat::Table => println!("{}", render_categories_table(&categories)),
                OutputFormat::Json | OutputFormat::Csv => {
                    let listing: Vec<_> = categories
                        .iter()
                        .map(|c| serde_json::json!({ "id": c.id, "title": c.title }))
                        .collect();
                    if matches!(format, OutputFormat::Csv) {
                        warn!("CSV output for fields not implemented, using JSON");
                    }
                    println!("{}", render_json(&listing)?);
                }
            }
        }
        Commands::Parse { input } => {
            let text = read_input(input)?;
            let entries = parse_key_values(Some(text.as_str()));
            print_entries(&entries, format)?;
        }
        Commands::Config { init, show } => {
            if *init {
                Config::write_template(&config_path)?;
                println!("Wrote config template to {}", config_path.display());
            }
            if *show || !*init {
                println!("{}", render_json(&config)?);
            }
        }
    }

    Ok(())
}

fn resolve_output_format(cli: Option<OutputFormat>, config: &Config) -> Result<OutputFormat> {
    if let Some(format) = cli {
        return Ok(format);
    }
    <OutputFormat as ValueEnum>::from_str(&config.output.format, true)
        .map_err(|e| anyhow!("invalid output format in config: {e}"))
}

fn parse_id_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed reading stdin")?;
        return Ok(buf);
    }
    let path = Path::new(input);
    std::fs::read_to_string(path).with_context(|| format!("failed reading {}", path.display()))
}

fn print_comparison(comparison: &Comparison, config: &Config, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            let options = TableOptions {
                placeholder: config.display.placeholder.clone(),
                color: config.display.color,
            };
            println!("{}", render_comparison_table(comparison, &options));
        }
        OutputFormat::Json => println!("{}", render_json(comparison)?),
        OutputFormat::Csv => print!("{}", comparison_to_csv(comparison)?),
    }
    Ok(())
}

fn print_entries(entries: &[ParsedEntry], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            for entry in entries {
                println!("{}: {}", entry.raw_key, entry.value);
            }
        }
        OutputFormat::Json => println!("{}", render_json(entries)?),
        OutputFormat::Csv => print!("{}", entries_to_csv(entries)?),
    }
    Ok(())
}
