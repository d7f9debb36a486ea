//! build-stamp: CLI for stamping build numbers into a plugin version record
//!
//! Typical packaging use:
//!
//! ```text
//! VERSION=$(build-stamp stamp)
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;

mod commands;
mod config;
mod error;
mod logging;
mod record;

#[derive(Parser)]
#[command(name = "build-stamp")]
#[command(about = "Stamp build numbers and dates into a version record", long_about = None)]
#[command(version)]
struct Cli {
    /// Version record file (default: $BUILD_STAMP_FILE or build/build.properties)
    #[arg(short, long, global = true)]
    file: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Increment build.number, refresh build.date and print the new version
    Stamp {
        /// Show what would be written without changing the record
        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// Print the version string (major.minor.revision.build)
    Version,

    /// Show every field of the version record
    Show {
        /// Output JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Set the major, minor and revision components
    Set {
        /// New version as MAJOR.MINOR.REVISION
        version: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _logger = logging::init(cli.verbose)?;

    let path = config::record_path(cli.file.as_deref())?;
    log::debug!("version record: {}", path.display());

    match cli.command {
        Commands::Stamp { dry_run } => {
            if dry_run {
                eprintln!("{}", "(DRY-RUN MODE - no changes will be made)".blue());
            }
            let version = commands::stamp::execute(&path, dry_run)?;
            println!("{}", version);
        }

        Commands::Version => {
            println!("{}", commands::version::execute(&path)?);
        }

        Commands::Show { json } => {
            println!("{}", commands::show::execute(&path, json)?);
        }

        Commands::Set { version } => {
            println!("{}", commands::set::execute(&path, &version)?);
        }
    }

    Ok(())
}
