mod commands;
mod input;
mod output;
mod xlsx;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::generate::GenerateArgs;
use commands::preview::PreviewArgs;
use commands::sheets::SheetsArgs;

/// Straight-line asset depreciation workbook generator
#[derive(Parser)]
#[command(
    name = "activos",
    version,
    about = "Straight-line asset depreciation workbook generator",
    long_about = "Reads a spreadsheet of asset records, computes straight-line \
                  depreciation schedules as of a target month, and writes a new \
                  workbook with a cover sheet, a summary sheet and one \
                  formula-driven sheet per asset."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// List the sheet names of a workbook
    Sheets(SheetsArgs),
    /// Extract and summarise asset records without writing anything
    Preview(PreviewArgs),
    /// Run the full pipeline and write the result workbook
    Generate(GenerateArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Sheets(args) => commands::sheets::run_sheets(args),
        Commands::Preview(args) => commands::preview::run_preview(args),
        Commands::Generate(args) => commands::generate::run_generate(args),
        Commands::Version => {
            println!("activos {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::render(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
