mod config;
mod manager;
mod table;

use crate::manager::Manager;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(version, about)]
struct CLI {
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Interpolate one period table.
    Interpolate {
        #[arg(long)]
        input: PathBuf,

        #[arg(long)]
        output: PathBuf,
    },

    /// Interpolate every period table in a directory.
    Batch {
        #[arg(long)]
        input_dir: PathBuf,

        #[arg(long)]
        output_dir: PathBuf,
    },

    /// Check the period means of an interpolated table.
    Verify {
        #[arg(long)]
        input: PathBuf,

        #[arg(long)]
        output: PathBuf,
    },
}

fn main() {
    env_logger::Builder::new()
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(error) = run_cli() {
        log::error!("{error:#?}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<()> {
    let args = CLI::parse();
    log::info!("{args:#?}");

    let mgr = Manager::new(args.config.as_ref()).context("failed to construct mgr")?;

    match args.command {
        Command::Interpolate { input, output } => mgr.interpolate_file(input, output)?,
        Command::Batch {
            input_dir,
            output_dir,
        } => mgr.interpolate_dir(input_dir, output_dir)?,
        Command::Verify { input, output } => {
            mgr.verify_file(input, output)?;
        }
    }

    Ok(())
}
