//! Stats subcommand implementation.

use crate::cli::OutputFormat;
use crate::config::AppSettings;
use crate::error::CliResult;
use crate::output;
use crate::stats::ScanStats;
use crate::storage::ScanStore;
use clap::Parser;
use std::io::Write;

/// Show scan statistics for a user.
#[derive(Parser, Debug)]
pub struct StatsCommand {
    /// User whose scans to summarize
    #[arg(value_name = "USER_ID")]
    pub user_id: String,

    /// Number of recent scans to include (defaults to the configured count)
    #[arg(short = 'n', long)]
    pub recent: Option<usize>,

    /// Output format (csv is not supported and falls back to plain)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

impl StatsCommand {
    /// Execute the stats command.
    pub fn execute(
        &self,
        store: &dyn ScanStore,
        settings: &AppSettings,
        out: &mut dyn Write,
    ) -> CliResult<()> {
        let records = store.find_by_user_id(&self.user_id)?;
        let recent = self.recent.unwrap_or(settings.recent_scan_count);
        let stats = ScanStats::from_records(records, recent);

        match OutputFormat::resolve(self.format, settings) {
            OutputFormat::Json => output::write_json(out, &stats)?,
            OutputFormat::Plain | OutputFormat::Csv => {
                output::write_stats(out, &self.user_id, &stats)?
            }
        }

        Ok(())
    }
}
