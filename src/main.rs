mod chart;
mod config;
mod figure;
mod manager;
mod marks;
mod stats;
mod types;
mod utils;

use crate::manager::Manager;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(version, about)]
struct CLI {
    /// Chart configuration file (TOML).
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Mean and standard deviation band of each group of runs.
    Band {
        #[arg(long)]
        input: PathBuf,

        #[arg(long)]
        title: String,

        #[arg(long)]
        graph_id: Option<String>,

        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// One line per experiment series.
    Line {
        #[arg(long)]
        input: PathBuf,

        #[arg(long)]
        title: String,

        #[arg(long)]
        graph_id: Option<String>,

        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Labeled marks for a slider.
    Marks {
        #[arg(long, allow_negative_numbers = true)]
        min: f64,

        #[arg(long, allow_negative_numbers = true)]
        max: f64,

        #[arg(long)]
        step: f64,

        #[arg(long)]
        output: Option<PathBuf>,
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
        Command::Band {
            input,
            title,
            graph_id,
            output,
        } => mgr.render_band(&input, &title, graph_id, output.as_deref())?,
        Command::Line {
            input,
            title,
            graph_id,
            output,
        } => mgr.render_line(&input, &title, graph_id, output.as_deref())?,
        Command::Marks {
            min,
            max,
            step,
            output,
        } => mgr.render_marks(min, max, step, output.as_deref())?,
    }

    Ok(())
}
