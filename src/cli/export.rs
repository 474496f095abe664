//! Export subcommand implementation.
//!
//! Handles the `cropscan export` command for writing scans to a file or stdout.

use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};
use crate::output;
use crate::stats::sort_most_recent_first;
use crate::storage::ScanStore;
use clap::Parser;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Export scans.
#[derive(Parser, Debug)]
pub struct ExportCommand {
    /// Export only this user's scans
    #[arg(short, long = "user")]
    pub user_id: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Output file path (prints to stdout if not specified)
    #[arg(short = 'o', long = "output")]
    pub output_file: Option<PathBuf>,
}

impl ExportCommand {
    /// Execute the export command.
    pub fn execute(
        &self,
        store: &dyn ScanStore,
        out: &mut dyn Write,
        quiet: bool,
    ) -> CliResult<()> {
        let mut records = match &self.user_id {
            Some(user_id) => store.find_by_user_id(user_id)?,
            None => store.find_all()?,
        };
        sort_most_recent_first(&mut records);

        match &self.output_file {
            Some(path) => {
                let file = File::create(path).map_err(|source| CliError::WriteFailed {
                    path: path.clone(),
                    source,
                })?;
                let mut writer = BufWriter::new(file);
                output::write_records(&mut writer, &records, self.format)?;
                writer.flush()?;

                if !quiet {
                    output::print_success(&format!(
                        "Exported {} scan(s) to {}",
                        records.len(),
                        path.display()
                    ));
                }
            }
            None => output::write_records(out, &records, self.format)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::types::ScanRecord;
    use std::fs;

    #[test]
    fn test_export_user_csv_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("u1.csv");
        let store = MemoryStore::new();
        store.save(ScanRecord::new("u1").with_crop("Tomato")).unwrap();
        store.save(ScanRecord::new("u2").with_crop("Potato")).unwrap();

        let cmd = ExportCommand::try_parse_from([
            "export",
            "--user",
            "u1",
            "--format",
            "csv",
            "-o",
            path.to_str().unwrap(),
        ])
        .unwrap();
        let mut out = Vec::new();
        cmd.execute(&store, &mut out, true).unwrap();

        assert!(out.is_empty());
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.contains("Tomato"));
        assert!(!text.contains("Potato"));
    }

    #[test]
    fn test_export_all_json_to_stdout() {
        let store = MemoryStore::new();
        store.save(ScanRecord::new("u1")).unwrap();
        store.save(ScanRecord::new("u2")).unwrap();

        let cmd = ExportCommand::try_parse_from(["export"]).unwrap();
        let mut out = Vec::new();
        cmd.execute(&store, &mut out, true).unwrap();

        let records: Vec<ScanRecord> = serde_json::from_slice(&out).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_export_to_unwritable_path_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.json");
        let store = MemoryStore::new();

        let cmd = ExportCommand::try_parse_from(["export", "-o", path.to_str().unwrap()]).unwrap();
        let err = cmd.execute(&store, &mut Vec::new(), true).unwrap_err();

        assert!(matches!(&err, CliError::WriteFailed { path: p, .. } if *p == path));
        assert!(err.to_string().contains("out.json"));
    }
}
