//! sdfgen: generate DV360 SDF tables from a CSV workbook directory
//!
//! Usage:
//!   # Seed a fresh workbook (destructive: resets INPUT, STRUCTURE_AND_DEFAULTS,
//!   # NAME_IDS_MAPPING)
//!   sdfgen --workbook ./campaign setup
//!
//!   # Rewrite human-readable names in INPUT to DV360 IDs via NAME_IDS_MAPPING
//!   sdfgen --workbook ./campaign convert-ids
//!
//!   # Expand INPUT into the IO/LI/AdGroup/Ad SDF tables
//!   sdfgen --workbook ./campaign generate
//!
//!   # Same, with a machine-readable report
//!   sdfgen --workbook ./campaign generate --json

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use sdfgen::{convert_names_to_ids, generate, CsvStore, GeneratorConfig, TokenStyle};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "sdfgen")]
#[command(about = "Generate DV360 Structured Data Files from a tabular workbook", long_about = None)]
struct Args {
    /// Workbook directory (one CSV file per table); created if missing
    #[arg(long, short = 'w', value_name = "DIR", default_value = ".")]
    workbook: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Seed the source tables from the built-in schema (resets them!)
    Setup,
    /// Convert names in the INPUT table to IDs using NAME_IDS_MAPPING
    ConvertIds,
    /// Generate the four SDF output tables from INPUT
    Generate {
        /// Treat templates as using the legacy single-percent tokens (%NAME%)
        #[arg(long)]
        legacy_tokens: bool,

        /// Print the run report as JSON instead of a summary line
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut store = CsvStore::open(&args.workbook)?;

    match args.command {
        Command::Setup => {
            sdfgen::setup::initial_setup(&mut store)?;
            println!("Workbook initialized in {}", args.workbook);
        }
        Command::ConvertIds => {
            let report = convert_names_to_ids(&mut store)?;
            println!(
                "Converted names to IDs: {} cell(s) rewritten, {} rule(s) applied, {} skipped",
                report.cells_rewritten, report.rules_applied, report.rules_skipped
            );
        }
        Command::Generate { legacy_tokens, json } => {
            let config = GeneratorConfig {
                token_style: if legacy_tokens {
                    TokenStyle::SinglePercent
                } else {
                    TokenStyle::DoublePercent
                },
            };
            let report = generate(&mut store, config)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else if report.is_clean() {
                println!(
                    "SDF tables generated without (apparent) errors: {} record(s), {} row(s)",
                    report.records, report.rows_written
                );
            } else {
                // One aggregate message, not a per-row stream.
                println!(
                    "SDF tables generated with {} placeholder warning(s):",
                    report.warnings.len()
                );
                for warning in &report.warnings {
                    println!("  {}", warning);
                }
            }
        }
    }

    Ok(())
}
