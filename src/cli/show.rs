//! Show subcommand implementation.

use crate::cli::OutputFormat;
use crate::config::AppSettings;
use crate::error::{CliError, CliResult};
use crate::output;
use crate::storage::ScanStore;
use crate::types::ScanId;
use clap::Parser;
use std::io::Write;

/// Show a single scan.
#[derive(Parser, Debug)]
pub struct ShowCommand {
    /// Scan ID to show
    #[arg(value_name = "SCAN_ID")]
    pub scan_id: ScanId,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

impl ShowCommand {
    /// Execute the show command.
    pub fn execute(
        &self,
        store: &dyn ScanStore,
        settings: &AppSettings,
        out: &mut dyn Write,
    ) -> CliResult<()> {
        let record = store
            .find_by_id(&self.scan_id)?
            .ok_or_else(|| CliError::NotFound(self.scan_id.to_string()))?;

        match OutputFormat::resolve(self.format, settings) {
            OutputFormat::Plain => output::write_detail(out, &record)?,
            OutputFormat::Json => output::write_json(out, &record)?,
            OutputFormat::Csv => output::write_csv(out, std::slice::from_ref(&record))?,
        }

        Ok(())
    }
}
