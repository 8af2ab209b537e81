//! The command line interface for the planner.
use crate::demand::aggregate_demand;
use crate::input::load_dataset;
use crate::log;
use crate::output::{create_output_directory, get_output_dir};
use crate::planning::{self, builder::build_model};
use crate::settings::Settings;
use ::log::info;
use anyhow::{Context, Result, ensure};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

pub mod demo;
use demo::DemoSubcommands;

/// The command line interface for the planner.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// The available commands.
    #[command(subcommand)]
    command: Commands,
}

/// Options for the run command
#[derive(Args)]
pub struct RunOpts {
    /// Directory for output files
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
    /// Whether to overwrite the output directory if it already exists
    #[arg(long)]
    pub overwrite: bool,
}

/// The available commands.
#[derive(Subcommand)]
enum Commands {
    /// Run the planner on a dataset.
    Run {
        /// Path to the dataset directory.
        data_dir: PathBuf,
        /// Other run options
        #[command(flatten)]
        opts: RunOpts,
    },
    /// Check a dataset for problems, without solving.
    Validate {
        /// Path to the dataset directory.
        data_dir: PathBuf,
    },
    /// Manage the built-in demo datasets.
    Demo {
        /// The available subcommands for managing demo datasets.
        #[command(subcommand)]
        subcommand: DemoSubcommands,
    },
}

impl Commands {
    /// Execute the supplied CLI command
    fn execute(self) -> Result<()> {
        match self {
            Self::Run { data_dir, opts } => handle_run_command(&data_dir, &opts, None),
            Self::Validate { data_dir } => handle_validate_command(&data_dir, None),
            Self::Demo { subcommand } => subcommand.execute(),
        }
    }
}

/// Parse CLI arguments and start the program
pub fn run_cli() -> Result<()> {
    Cli::parse().command.execute()
}

/// Handle the `run` command.
///
/// # Arguments
///
/// * `data_dir` - Path to the dataset directory
/// * `opts` - Other run options
/// * `settings` - Program settings, loaded from file if not provided
pub fn handle_run_command(
    data_dir: &Path,
    opts: &RunOpts,
    settings: Option<Settings>,
) -> Result<()> {
    // Load program settings, if not provided
    let settings = match settings {
        Some(settings) => settings,
        None => Settings::load().context("Failed to load settings.")?,
    };

    // Get path to output folder
    let pathbuf: PathBuf;
    let output_path = if let Some(path) = opts.output_dir.as_deref() {
        path
    } else {
        pathbuf = get_output_dir(data_dir)?;
        &pathbuf
    };

    if !opts.overwrite && !settings.overwrite {
        ensure!(
            !output_path.is_dir(),
            "Output directory {} already exists. Pass --overwrite to replace its contents.",
            output_path.display()
        );
    }
    create_output_directory(output_path).context("Failed to create output directory.")?;
    log::init(Some(&settings.log_level), Some(output_path))
        .context("Failed to initialise logging.")?;

    let dataset = load_dataset(data_dir).context("Failed to load dataset.")?;
    planning::run(&dataset, &settings, output_path)?;
    info!("Results written to {}", output_path.display());

    Ok(())
}

/// Handle the `validate` command.
///
/// Loads the dataset and builds the model without solving it, so that every data error the
/// planner would trip over is reported up front.
pub fn handle_validate_command(data_dir: &Path, settings: Option<Settings>) -> Result<()> {
    let settings = match settings {
        Some(settings) => settings,
        None => Settings::load().context("Failed to load settings.")?,
    };
    if !log::is_logger_initialised() {
        log::init(Some(&settings.log_level), None).context("Failed to initialise logging.")?;
    }

    let dataset = load_dataset(data_dir).context("Failed to load dataset.")?;
    let demand = aggregate_demand(&dataset.orders);
    build_model(
        &dataset.materials,
        &dataset.plants,
        &demand,
        &dataset.production_costs,
        settings.missing_cost_policy,
    )?;
    info!("Dataset at {} is valid", data_dir.display());

    Ok(())
}
