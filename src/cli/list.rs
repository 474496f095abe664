//! List subcommand implementation.
//!
//! Handles `cropscan list`, with at most one exact-match filter.

use crate::cli::OutputFormat;
use crate::config::AppSettings;
use crate::error::CliResult;
use crate::output;
use crate::stats::sort_most_recent_first;
use crate::storage::ScanStore;
use crate::types::ScanRecord;
use clap::Parser;
use std::io::Write;

/// List scans, newest first.
#[derive(Parser, Debug)]
pub struct ListCommand {
    /// Only scans owned by this user
    #[arg(short, long = "user", group = "filter")]
    pub user_id: Option<String>,

    /// Only scans of this crop
    #[arg(short, long, group = "filter")]
    pub crop: Option<String>,

    /// Only scans diagnosed with this disease
    #[arg(short, long, group = "filter")]
    pub disease: Option<String>,

    /// Maximum number of scans to show
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

impl ListCommand {
    /// Fetch the records this command selects, newest first.
    pub fn select(&self, store: &dyn ScanStore) -> CliResult<Vec<ScanRecord>> {
        let mut records = if let Some(user_id) = &self.user_id {
            store.find_by_user_id(user_id)?
        } else if let Some(crop) = &self.crop {
            store.find_by_crop(crop)?
        } else if let Some(disease) = &self.disease {
            store.find_by_disease(disease)?
        } else {
            store.find_all()?
        };

        sort_most_recent_first(&mut records);
        if let Some(limit) = self.limit {
            records.truncate(limit);
        }

        Ok(records)
    }

    /// Execute the list command.
    pub fn execute(
        &self,
        store: &dyn ScanStore,
        settings: &AppSettings,
        out: &mut dyn Write,
    ) -> CliResult<()> {
        let records = self.select(store)?;
        output::write_records(out, &records, OutputFormat::resolve(self.format, settings))?;
        Ok(())
    }
}
