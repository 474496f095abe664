//! CLI subcommand definitions and handlers.
//!
//! Implements a git-like subcommand architecture:
//! - `cropscan add --user <id> ...` - Record a scan
//! - `cropscan show <scan-id>` - Show one scan
//! - `cropscan list [--user|--crop|--disease]` - List scans
//! - `cropscan delete <scan-id>` - Delete a scan
//! - `cropscan stats <user-id>` - Per-user statistics
//! - `cropscan export` - Export scans to a file

mod add;
mod delete;
mod export;
mod list;
mod show;
mod stats;

pub use add::AddCommand;
pub use delete::DeleteCommand;
pub use export::ExportCommand;
pub use list::ListCommand;
pub use show::ShowCommand;
pub use stats::StatsCommand;

use crate::config::{AppSettings, StoreBackend};
use crate::error::CliResult;
use crate::output;
use crate::storage::{self, ScanStore};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::Write;
use std::path::PathBuf;

/// cropscan - crop-disease scan records.
///
/// Records the outcome of crop-disease scans and looks them up again by
/// user, crop, or disease.
#[derive(Parser, Debug)]
#[command(name = "cropscan")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Store and query crop-disease scan records", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to custom settings file
    #[arg(long, global = true, value_name = "PATH", env = "CROPSCAN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding the scan collection
    #[arg(long, global = true, value_name = "DIR", env = "CROPSCAN_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Storage backend to use
    #[arg(long, global = true, value_enum)]
    pub backend: Option<StoreBackend>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Record a new scan (or replace one with --id)
    #[command(alias = "a")]
    Add(AddCommand),

    /// Show a single scan
    Show(ShowCommand),

    /// List scans, optionally filtered
    #[command(alias = "ls")]
    List(ListCommand),

    /// Delete a scan
    #[command(alias = "rm")]
    Delete(DeleteCommand),

    /// Show statistics for a user
    Stats(StatsCommand),

    /// Export scans
    #[command(alias = "e")]
    Export(ExportCommand),
}

impl Cli {
    /// Settings from file, with command-line overrides applied.
    pub fn settings(&self) -> CliResult<AppSettings> {
        let mut settings = match &self.config {
            Some(path) => AppSettings::load_from(path)?,
            None => AppSettings::load()?,
        };

        if let Some(dir) = &self.data_dir {
            settings.data_dir = Some(dir.clone());
        }
        if let Some(backend) = self.backend {
            settings.backend = backend;
        }

        Ok(settings)
    }

    /// Open the configured store and run the selected subcommand.
    pub fn run(&self, out: &mut dyn Write) -> CliResult<()> {
        let settings = self.settings()?;
        tracing::debug!(backend = %settings.backend, "opening scan store");

        if settings.backend == StoreBackend::Memory && !self.quiet {
            output::print_warning("memory backend: scans are discarded when the command exits");
        }

        let store = storage::open_store(&settings)?;
        self.command.execute(store.as_ref(), &settings, out, self.quiet)
    }
}

impl Commands {
    /// Dispatch to the subcommand handler.
    pub fn execute(
        &self,
        store: &dyn ScanStore,
        settings: &AppSettings,
        out: &mut dyn Write,
        quiet: bool,
    ) -> CliResult<()> {
        match self {
            Self::Add(cmd) => cmd.execute(store, out, quiet),
            Self::Show(cmd) => cmd.execute(store, settings, out),
            Self::List(cmd) => cmd.execute(store, settings, out),
            Self::Delete(cmd) => cmd.execute(store, quiet),
            Self::Stats(cmd) => cmd.execute(store, settings, out),
            Self::Export(cmd) => cmd.execute(store, out, quiet),
        }
    }
}

/// Output format for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable plain text
    #[default]
    Plain,
    /// JSON structured output
    Json,
    /// CSV format for data analysis
    Csv,
}

impl OutputFormat {
    /// Use `explicit` if given, else the configured default, else plain.
    pub fn resolve(explicit: Option<Self>, settings: &AppSettings) -> Self {
        explicit
            .or_else(|| Self::from_str(&settings.default_output_format, true).ok())
            .unwrap_or_default()
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}
