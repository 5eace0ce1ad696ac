mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::mortgage::{PaymentArgs, ProjectArgs};

/// Mortgage overpayment and term-reduction calculator
#[derive(Parser)]
#[command(
    name = "mtg",
    version,
    about = "Mortgage overpayment and term-reduction calculator",
    long_about = "A CLI for projecting how an increased monthly payment and/or a one-time \
                  lump-sum principal reduction change the total overpayment and the \
                  remaining term of an annuity mortgage. All math in decimal precision."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "report", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Project overpayment and term reduction for a new payment / lump sum
    Project(ProjectArgs),
    /// Calculate the scheduled level monthly payment for a loan
    Payment(PaymentArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Report,
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Project(args) => commands::mortgage::run_project(args),
        Commands::Payment(args) => commands::mortgage::run_payment(args),
        Commands::Version => {
            println!("mtg {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
