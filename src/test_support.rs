//! Fixtures shared by unit tests.

use crate::types::{ScanRecord, TreatmentAdvice};
use chrono::{TimeZone, Utc};

/// A record with every field populated.
pub fn full_record(id: &str) -> ScanRecord {
    ScanRecord::new("u1")
        .with_id(id.parse().unwrap())
        .with_crop("Tomato")
        .with_disease("Tomato_Early_blight")
        .with_symptoms("Concentric rings on older leaves")
        .with_treatment(
            TreatmentAdvice::default()
                .with_chemical("Chlorothalonil")
                .with_organic("Neem oil")
                .with_schedule("Every 7-10 days")
                .with_quantity("2 ml per litre"),
        )
        .with_precautions("Rotate crops; remove infected debris")
        .with_image_url("uploads/scan-1718000000-42.jpg")
        .with_confidence(0.8731)
        .with_scan_date(Utc.with_ymd_and_hms(2024, 6, 10, 14, 5, 0).unwrap())
}
