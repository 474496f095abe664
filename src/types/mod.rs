//! Core type definitions.
//!
//! The scan record, its embedded treatment advice, and the id newtype used
//! as the store key.

mod record;
mod scan_id;

pub use record::{ScanRecord, TreatmentAdvice};
pub use scan_id::{ScanId, ScanIdError};
