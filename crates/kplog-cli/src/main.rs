//! KpLog CLI
//!
//! Command-line interface for the KpLog logging engine

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use kplog_core::logging_facility;
use kplog_core::KpLogConfig;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "kplog")]
#[command(about = "KpLog - request-scoped detail and summary logging", long_about = None)]
struct Cli {
    /// Configuration file (TOML, YAML or JSON); KPLOG_* variables override it
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run one logging session end to end and print its lines
    Demo(commands::demo::DemoArgs),
    /// Mask a single value
    Mask(commands::mask::MaskArgs),
}

fn main() {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();

    let config = match KpLogConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    logging_facility::init(config.log_profile);

    let result = match cli.command {
        Commands::Demo(args) => commands::demo::execute(args, &config),
        Commands::Mask(args) => commands::mask::execute(args, &config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
