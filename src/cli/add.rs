//! Add subcommand implementation.
//!
//! Handles `cropscan add`, building a record from flags and saving it.

use crate::error::{CliError, CliResult};
use crate::output;
use crate::storage::ScanStore;
use crate::types::{ScanId, ScanRecord, TreatmentAdvice};
use chrono::{DateTime, Utc};
use clap::Parser;
use std::io::Write;

/// Record a scan.
#[derive(Parser, Debug)]
pub struct AddCommand {
    /// Explicit scan ID; an existing scan with this ID is replaced
    #[arg(long)]
    pub id: Option<ScanId>,

    /// Owning user's ID
    #[arg(short, long = "user")]
    pub user_id: String,

    /// Crop name
    #[arg(short, long, default_value = "")]
    pub crop: String,

    /// Diagnosed disease
    #[arg(short, long, default_value = "")]
    pub disease: String,

    /// Symptom description
    #[arg(long, default_value = "")]
    pub symptoms: String,

    /// Precautions to take
    #[arg(long, default_value = "")]
    pub precautions: String,

    /// Location of the scanned image
    #[arg(long, default_value = "")]
    pub image_url: String,

    /// Diagnostic confidence (e.g. 0.93)
    #[arg(long, value_parser = parse_confidence)]
    pub confidence: Option<f64>,

    /// When the scan happened, RFC 3339 (defaults to now)
    #[arg(long, value_name = "RFC3339")]
    pub date: Option<String>,

    /// Chemical treatment
    #[arg(long, default_value = "")]
    pub chemical: String,

    /// Organic treatment
    #[arg(long, default_value = "")]
    pub organic: String,

    /// Treatment schedule
    #[arg(long, default_value = "")]
    pub schedule: String,

    /// Treatment quantity
    #[arg(long, default_value = "")]
    pub quantity: String,
}

impl AddCommand {
    /// Build the record described by the flags.
    pub fn to_record(&self) -> CliResult<ScanRecord> {
        let scan_date = match &self.date {
            Some(raw) => parse_date(raw)?,
            None => Utc::now(),
        };

        let treatment = TreatmentAdvice::default()
            .with_chemical(&self.chemical)
            .with_organic(&self.organic)
            .with_schedule(&self.schedule)
            .with_quantity(&self.quantity);

        let mut record = ScanRecord::new(&self.user_id)
            .with_crop(&self.crop)
            .with_disease(&self.disease)
            .with_symptoms(&self.symptoms)
            .with_precautions(&self.precautions)
            .with_image_url(&self.image_url)
            .with_treatment(treatment)
            .with_scan_date(scan_date);
        record.id = self.id.clone();
        record.confidence_score = self.confidence;

        Ok(record)
    }

    /// Execute the add command.
    pub fn execute(
        &self,
        store: &dyn ScanStore,
        out: &mut dyn Write,
        quiet: bool,
    ) -> CliResult<()> {
        let record = store.save(self.to_record()?)?;

        if let Some(id) = &record.id {
            if quiet {
                writeln!(out, "{}", id)?;
            } else {
                output::print_success(&format!("Saved scan {}", id));
            }
        }

        Ok(())
    }
}

fn parse_confidence(raw: &str) -> Result<f64, String> {
    let score: f64 = raw.parse().map_err(|e| format!("{}", e))?;
    if score.is_finite() {
        Ok(score)
    } else {
        Err(format!("'{}' is not a finite number", raw))
    }
}

fn parse_date(raw: &str) -> CliResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|_| CliError::InvalidDate(raw.to_string()))
}
