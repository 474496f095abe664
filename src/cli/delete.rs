//! Delete subcommand implementation.

use crate::error::CliResult;
use crate::output;
use crate::storage::ScanStore;
use crate::types::ScanId;
use clap::Parser;

/// Delete a scan. Deleting an unknown ID succeeds.
#[derive(Parser, Debug)]
pub struct DeleteCommand {
    /// Scan ID to delete
    #[arg(value_name = "SCAN_ID")]
    pub scan_id: ScanId,
}

impl DeleteCommand {
    /// Execute the delete command.
    pub fn execute(&self, store: &dyn ScanStore, quiet: bool) -> CliResult<()> {
        store.delete_by_id(&self.scan_id)?;

        if !quiet {
            output::print_success(&format!("Deleted scan {}", self.scan_id));
        }

        Ok(())
    }
}
