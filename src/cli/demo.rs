//! Code related to the built-in demo datasets and the CLI commands for interacting with them.
use super::{RunOpts, handle_run_command};
use anyhow::{Context, Result, anyhow, ensure};
use clap::Subcommand;
use include_dir::{Dir, DirEntry, include_dir};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// The directory containing the demo datasets.
const DEMOS_DIR: Dir = include_dir!("demos");

/// The available subcommands for managing demo datasets.
#[derive(Subcommand)]
pub enum DemoSubcommands {
    /// List available demos.
    List,
    /// Provide information about the specified demo.
    Info {
        /// The name of the demo.
        name: String,
    },
    /// Extract a demo dataset to a new directory.
    Extract {
        /// The name of the demo to extract.
        name: String,
        /// The destination folder for the dataset.
        new_path: Option<PathBuf>,
    },
    /// Run the planner on a demo dataset.
    Run {
        /// The name of the demo to run.
        name: String,
        /// Directory for output files
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
}

impl DemoSubcommands {
    /// Execute the supplied demo subcommand
    pub fn execute(self) -> Result<()> {
        match self {
            Self::List => handle_demo_list_command(),
            Self::Info { name } => handle_demo_info_command(&name)?,
            Self::Extract {
                name,
                new_path: dest,
            } => handle_demo_extract_command(&name, dest.as_deref())?,
            Self::Run { name, output_dir } => handle_demo_run_command(&name, output_dir)?,
        }

        Ok(())
    }
}

/// Handle the `demo list` command.
fn handle_demo_list_command() {
    for entry in DEMOS_DIR.dirs() {
        println!("{}", entry.path().display());
    }
}

/// Handle the `demo info` command.
fn handle_demo_info_command(name: &str) -> Result<()> {
    let path: PathBuf = [name, "README.txt"].iter().collect();
    let readme = DEMOS_DIR
        .get_file(path)
        .context("Demo not found.")?
        .contents_utf8()
        .expect("README.txt is not UTF-8 encoded");

    println!("{}", readme);

    Ok(())
}

/// Handle the `demo extract` command
fn handle_demo_extract_command(name: &str, dest: Option<&Path>) -> Result<()> {
    let dest = dest.unwrap_or(Path::new(name));
    extract_demo(name, dest)
}

/// Extract the specified demo dataset to a new directory
fn extract_demo(name: &str, dest: &Path) -> Result<()> {
    let sub_dir = DEMOS_DIR.get_dir(name).context("Demo not found.")?;

    ensure!(
        !dest.exists(),
        "Destination {} already exists.",
        dest.display()
    );
    fs::create_dir_all(dest).context("Failed to create destination directory.")?;

    for entry in sub_dir.entries() {
        match entry {
            DirEntry::File(file) => {
                let file_name = file.path().file_name().unwrap();
                fs::write(dest.join(file_name), file.contents())?;
            }
            DirEntry::Dir(_) => {
                return Err(anyhow!("Nested directories are not supported."));
            }
        }
    }

    Ok(())
}

/// Handle the `demo run` command.
fn handle_demo_run_command(name: &str, output_dir: Option<PathBuf>) -> Result<()> {
    // Extract the demo dataset to a temporary directory and run it from there
    let temp_dir = TempDir::new().context("Failed to create temporary directory.")?;
    let data_dir = temp_dir.path().join(name);
    extract_demo(name, &data_dir)?;

    let opts = RunOpts {
        output_dir,
        overwrite: true,
    };
    handle_run_command(&data_dir, &opts, None)
}
