//! Scan record persistence.
//!
//! [`ScanStore`] is the repository contract. Two backends implement it: an
//! in-process [`MemoryStore`] and a file-per-document [`JsonStore`].

mod json_store;
mod memory_store;

pub use json_store::JsonStore;
pub use memory_store::MemoryStore;

use crate::config::{AppSettings, StoreBackend};
use crate::error::{StoreError, StoreResult};
use crate::types::{ScanId, ScanRecord};

/// Name of the collection scan records are stored in.
pub const COLLECTION: &str = "disease_scans";

/// Persistence contract for scan records.
///
/// Implementations must be safe to share between threads. Each call is a
/// single atomic request; nothing spans multiple operations.
pub trait ScanStore: Send + Sync {
    /// Insert a record, or fully replace the one with the same id.
    ///
    /// A record without an id gets a freshly generated one, so repeated saves
    /// of id-less records create distinct entries.
    fn save(&self, record: ScanRecord) -> StoreResult<ScanRecord>;

    /// Look up a record by id. Absence is `Ok(None)`.
    fn find_by_id(&self, id: &ScanId) -> StoreResult<Option<ScanRecord>>;

    /// Every stored record, in no particular order.
    fn find_all(&self) -> StoreResult<Vec<ScanRecord>>;

    /// Remove a record. Deleting a missing id is not an error.
    fn delete_by_id(&self, id: &ScanId) -> StoreResult<()>;

    /// Every stored record matching `predicate`.
    fn find_matching(
        &self,
        predicate: &dyn Fn(&ScanRecord) -> bool,
    ) -> StoreResult<Vec<ScanRecord>>;

    /// Records owned by exactly `user_id` (case-sensitive).
    fn find_by_user_id(&self, user_id: &str) -> StoreResult<Vec<ScanRecord>> {
        self.find_matching(&|record: &ScanRecord| record.user_id == user_id)
    }

    /// Records for exactly `crop` (case-sensitive).
    fn find_by_crop(&self, crop: &str) -> StoreResult<Vec<ScanRecord>> {
        self.find_matching(&|record: &ScanRecord| record.crop == crop)
    }

    /// Records diagnosed with exactly `disease` (case-sensitive).
    fn find_by_disease(&self, disease: &str) -> StoreResult<Vec<ScanRecord>> {
        self.find_matching(&|record: &ScanRecord| record.disease == disease)
    }
}

/// Open the store selected by `settings`.
pub fn open_store(settings: &AppSettings) -> StoreResult<Box<dyn ScanStore>> {
    match settings.backend {
        StoreBackend::Memory => Ok(Box::new(MemoryStore::new())),
        StoreBackend::Json => {
            let data_dir = settings
                .resolve_data_dir()
                .map_err(|e| StoreError::unavailable(e.to_string()))?;
            Ok(Box::new(JsonStore::in_data_dir(&data_dir)?))
        }
    }
}

/// Fill in a missing id before a record is written.
pub(crate) fn assign_id(mut record: ScanRecord) -> (ScanId, ScanRecord) {
    let id = record.id.get_or_insert_with(ScanId::generate).clone();
    (id, record)
}

/// Reject records a backend could not store and load back unchanged.
pub(crate) fn check_storable(record: &ScanRecord) -> StoreResult<()> {
    match record.confidence_score {
        Some(score) if !score.is_finite() => Err(StoreError::unavailable(format!(
            "document rejected: confidence score {} is not a finite number",
            score
        ))),
        _ => Ok(()),
    }
}

/// Behaviour every backend must share, run against each one in its own tests.
#[cfg(test)]
pub(crate) mod contract {
    use super::*;
    use std::collections::HashSet;

    fn ids(records: &[ScanRecord]) -> HashSet<ScanId> {
        records.iter().filter_map(|r| r.id.clone()).collect()
    }

    pub fn save_assigns_distinct_ids(store: &dyn ScanStore) {
        let first = store.save(ScanRecord::new("u1")).unwrap();
        let second = store.save(ScanRecord::new("u1")).unwrap();

        let first_id = first.id.expect("id assigned");
        let second_id = second.id.expect("id assigned");
        assert!(!first_id.as_str().is_empty());
        assert_ne!(first_id, second_id);
        assert_eq!(store.find_all().unwrap().len(), 2);
    }

    pub fn save_with_id_round_trips(store: &dyn ScanStore) {
        let record = crate::test_support::full_record("fixed-id");
        let saved = store.save(record.clone()).unwrap();
        assert_eq!(saved, record);

        let loaded = store.find_by_id(&"fixed-id".parse().unwrap()).unwrap();
        assert_eq!(loaded, Some(record));
    }

    pub fn save_replaces_existing(store: &dyn ScanStore) {
        let saved = store
            .save(ScanRecord::new("u1").with_crop("Tomato").with_symptoms("spots"))
            .unwrap();
        let id = saved.id.clone().unwrap();

        let replacement = ScanRecord::new("u1").with_id(id.clone()).with_crop("Potato");
        store.save(replacement.clone()).unwrap();

        let loaded = store.find_by_id(&id).unwrap().unwrap();
        assert_eq!(loaded, replacement);
        assert!(loaded.symptoms.is_empty());
        assert_eq!(store.find_all().unwrap().len(), 1);
    }

    pub fn delete_then_find_is_absent(store: &dyn ScanStore) {
        let saved = store.save(ScanRecord::new("u1")).unwrap();
        let id = saved.id.unwrap();

        store.delete_by_id(&id).unwrap();
        assert_eq!(store.find_by_id(&id).unwrap(), None);
    }

    pub fn delete_missing_is_noop(store: &dyn ScanStore) {
        store.save(ScanRecord::new("u1")).unwrap();
        let before = ids(&store.find_all().unwrap());

        store.delete_by_id(&"does-not-exist".parse().unwrap()).unwrap();

        assert_eq!(ids(&store.find_all().unwrap()), before);
    }

    pub fn find_by_user_id_is_exact(store: &dyn ScanStore) {
        let a = store.save(ScanRecord::new("u1")).unwrap();
        store.save(ScanRecord::new("u2")).unwrap();
        let c = store.save(ScanRecord::new("u1")).unwrap();
        store.save(ScanRecord::new("U1")).unwrap();
        store.save(ScanRecord::new("u10")).unwrap();

        let found = store.find_by_user_id("u1").unwrap();
        let expected: HashSet<_> = [a.id.unwrap(), c.id.unwrap()].into_iter().collect();
        assert_eq!(ids(&found), expected);
        assert!(store.find_by_user_id("u3").unwrap().is_empty());
    }

    pub fn find_by_crop_is_exact(store: &dyn ScanStore) {
        let tomato = store.save(ScanRecord::new("u1").with_crop("Tomato")).unwrap();
        store.save(ScanRecord::new("u1").with_crop("tomato")).unwrap();
        store.save(ScanRecord::new("u2").with_crop("Potato")).unwrap();

        let found = store.find_by_crop("Tomato").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, tomato.id);
        assert!(store.find_by_crop("Pepper").unwrap().is_empty());
    }

    pub fn find_by_disease_is_exact(store: &dyn ScanStore) {
        store.save(ScanRecord::new("u5").with_disease("Early blight")).unwrap();
        let late1 = store.save(ScanRecord::new("u6").with_disease("Late blight")).unwrap();
        let late2 = store.save(ScanRecord::new("u7").with_disease("Late blight")).unwrap();
        store.save(ScanRecord::new("u7").with_disease("Late")).unwrap();

        let found = store.find_by_disease("Late blight").unwrap();
        let expected: HashSet<_> = [late1.id.unwrap(), late2.id.unwrap()].into_iter().collect();
        assert_eq!(ids(&found), expected);
        assert!(store.find_by_disease("Leaf Mold").unwrap().is_empty());
    }

    pub fn save_rejects_non_finite_confidence(store: &dyn ScanStore) {
        for score in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let record = ScanRecord::new("u1")
                .with_id("odd-score".parse().unwrap())
                .with_confidence(score);
            let err = store.save(record).unwrap_err();
            assert!(matches!(err, StoreError::Unavailable { .. }));
        }
        assert_eq!(store.find_by_id(&"odd-score".parse().unwrap()).unwrap(), None);
    }

    /// Run every contract check, each against a fresh store from `make`.
    pub fn run_all<S: ScanStore>(make: impl Fn() -> S) {
        save_assigns_distinct_ids(&make());
        save_with_id_round_trips(&make());
        save_replaces_existing(&make());
        delete_then_find_is_absent(&make());
        delete_missing_is_noop(&make());
        find_by_user_id_is_exact(&make());
        find_by_crop_is_exact(&make());
        find_by_disease_is_exact(&make());
        save_rejects_non_finite_confidence(&make());
    }
}
