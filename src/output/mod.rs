//! Output formatting module.
//!
//! Provides formatters for plain text, JSON, and CSV output of scan records.

mod csv_format;
mod json_format;
mod plain;

pub use csv_format::write_csv;
pub use json_format::write_json;
pub use plain::{
    print_error, print_success, print_warning, write_detail, write_plain, write_stats,
};

use crate::cli::OutputFormat;
use crate::types::ScanRecord;
use std::io::{self, Write};

/// Format a list of records according to the specified format.
pub fn write_records<W: Write + ?Sized>(
    out: &mut W,
    records: &[ScanRecord],
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Plain => plain::write_plain(out, records),
        OutputFormat::Json => json_format::write_json(out, records),
        OutputFormat::Csv => csv_format::write_csv(out, records),
    }
}
