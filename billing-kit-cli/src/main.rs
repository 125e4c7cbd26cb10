//! billing-kit CLI - Validate and inspect billing catalogues.
//!
//! Usage:
//!   billing-kit validate billing.json
//!   billing-kit plans billing.toml --interval year --monthly
//!   billing-kit plan billing.json pro_monthly
//!   billing-kit checkout billing.json pro_monthly --return-url https://app.example.com/billing --seats 3

mod cli;
mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use colored::Colorize;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = billing_kit::ConfigBuilder::new()
        .from_env()
        .build()
        .context("Invalid billing-kit environment configuration")?;
    billing_kit::init_tracing_with_config(&config);

    let output = if cli.json { Output::Json } else { Output::Text };

    match cli.command {
        Commands::Validate(args) => commands::validate::run(&config, args, output)?,
        Commands::Intervals(args) => commands::intervals::run(&config, args, output)?,
        Commands::Plans(args) => commands::plans::run(&config, args, output)?,
        Commands::Plan(args) => commands::plan::run(args, output)?,
        Commands::Checkout(args) => commands::checkout::run(&config, args, output)?,
    }

    Ok(())
}

/// How command results are printed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Output {
    Text,
    Json,
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{} {}", "→".blue(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "!".yellow().bold(), message);
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}
