//! # cropscan - Crop-Disease Scan Records
//!
//! cropscan stores the outcome of crop-disease scans and retrieves them by
//! id, owning user, crop, or diagnosed disease.
//!
//! ## Example Usage
//!
//! ```rust
//! use cropscan::storage::{MemoryStore, ScanStore};
//! use cropscan::types::{ScanRecord, TreatmentAdvice};
//!
//! let store = MemoryStore::new();
//! let saved = store
//!     .save(
//!         ScanRecord::new("farmer-7")
//!             .with_crop("Tomato")
//!             .with_disease("Late blight")
//!             .with_confidence(0.93)
//!             .with_treatment(TreatmentAdvice::default().with_organic("Copper spray")),
//!     )
//!     .unwrap();
//!
//! assert!(saved.id.is_some());
//! assert_eq!(store.find_by_user_id("farmer-7").unwrap().len(), 1);
//! assert!(store.find_by_crop("Potato").unwrap().is_empty());
//! ```
//!
//! ## Architecture
//!
//! - [`types`] - The scan record, its embedded treatment advice, and ids
//! - [`storage`] - The `ScanStore` contract with in-memory and JSON backends
//! - [`stats`] - Per-user statistics and history ordering
//! - [`config`] - Settings and XDG paths
//! - [`error`] - Error types
//! - [`output`] - Output formatting utilities
//! - [`cli`] - Command-line interface

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod stats;
pub mod storage;
pub mod types;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use error::{CliError, ConfigError, StoreError};
pub use storage::{JsonStore, MemoryStore, ScanStore};
pub use types::{ScanId, ScanRecord, TreatmentAdvice};
