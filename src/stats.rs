//! Per-user scan statistics and history ordering.

use crate::types::ScanRecord;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Aggregate view over a set of scan records.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanStats {
    pub total_scans: usize,
    /// Scans whose diagnosis names a healthy plant.
    pub healthy_scans: usize,
    /// Scans with any other diagnosis.
    pub diseases_found: usize,
    pub crop_types: BTreeMap<String, usize>,
    /// Counts per disease, healthy diagnoses excluded.
    pub disease_types: BTreeMap<String, usize>,
    /// Mean confidence; a missing score counts as zero.
    pub average_confidence: f64,
    pub recent_scans: Vec<ScanRecord>,
}

impl ScanStats {
    /// Compute statistics, keeping up to `recent_count` most recent scans.
    pub fn from_records(mut records: Vec<ScanRecord>, recent_count: usize) -> Self {
        if records.is_empty() {
            return Self::default();
        }

        let mut stats = Self {
            total_scans: records.len(),
            ..Self::default()
        };
        let mut total_confidence = 0.0;

        for record in &records {
            *stats.crop_types.entry(record.crop.clone()).or_default() += 1;

            if record.is_healthy() {
                stats.healthy_scans += 1;
            } else {
                *stats.disease_types.entry(record.disease.clone()).or_default() += 1;
                stats.diseases_found += 1;
            }

            total_confidence += record.confidence_score.unwrap_or(0.0);
        }

        stats.average_confidence = total_confidence / records.len() as f64;

        sort_most_recent_first(&mut records);
        records.truncate(recent_count);
        stats.recent_scans = records;

        stats
    }
}

/// Order records newest first; undated records go last.
pub fn sort_most_recent_first(records: &mut [ScanRecord]) {
    records.sort_by(|a, b| match (a.scan_date, b.scan_date) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}
