//! CSV output formatting.

use crate::types::ScanRecord;
use std::io::{self, Write};

const HEADER: [&str; 13] = [
    "id",
    "user_id",
    "crop",
    "disease",
    "symptoms",
    "precautions",
    "image_url",
    "confidence_score",
    "scan_date",
    "treatment_chemical",
    "treatment_organic",
    "treatment_schedule",
    "treatment_quantity",
];

/// Write records as CSV, one row per record with treatment flattened.
pub fn write_csv<W: Write + ?Sized>(out: &mut W, records: &[ScanRecord]) -> io::Result<()> {
    let mut wtr = csv::Writer::from_writer(out);

    wtr.write_record(HEADER)?;

    for record in records {
        let confidence = record.confidence_score.map_or(String::new(), |c| c.to_string());
        let scan_date = record.scan_date.map_or(String::new(), |d| d.to_rfc3339());

        wtr.write_record([
            record.id.as_ref().map_or("", |id| id.as_str()),
            record.user_id.as_str(),
            record.crop.as_str(),
            record.disease.as_str(),
            record.symptoms.as_str(),
            record.precautions.as_str(),
            record.image_url.as_str(),
            confidence.as_str(),
            scan_date.as_str(),
            record.treatment.chemical.as_str(),
            record.treatment.organic.as_str(),
            record.treatment.schedule.as_str(),
            record.treatment.quantity.as_str(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
