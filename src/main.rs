//! msipack - MSI deployment package scaffolder
//!
//! Builds deployment packages by cloning a template tree into a versioned
//! destination, installing the MSI payload, and stamping the deployment
//! script with the derived version, artifact name and resolved product code.

use clap::Parser;

mod cli;
mod commands;
mod config;
mod error;
mod params;
mod patch;
mod pipeline;
mod product;
mod progress;
mod provision;
mod ui;
mod validate;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Build(args) => commands::build::run(args, cli.verbose),
        Commands::Version => commands::version::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
