//! In-process scan storage.

use super::{assign_id, check_storable, ScanStore};
use crate::error::{StoreError, StoreResult};
use crate::types::{ScanId, ScanRecord};
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

/// Scan storage held entirely in memory.
///
/// Contents are lost when the store is dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<ScanId, ScanRecord>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, HashMap<ScanId, ScanRecord>>> {
        self.records
            .read()
            .map_err(|_| StoreError::unavailable("memory store lock poisoned"))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, HashMap<ScanId, ScanRecord>>> {
        self.records
            .write()
            .map_err(|_| StoreError::unavailable("memory store lock poisoned"))
    }
}

impl ScanStore for MemoryStore {
    fn save(&self, record: ScanRecord) -> StoreResult<ScanRecord> {
        check_storable(&record)?;
        let (id, record) = assign_id(record);
        let replaced = self.write()?.insert(id.clone(), record.clone()).is_some();
        debug!(%id, replaced, "saved scan record");
        Ok(record)
    }

    fn find_by_id(&self, id: &ScanId) -> StoreResult<Option<ScanRecord>> {
        Ok(self.read()?.get(id).cloned())
    }

    fn find_all(&self) -> StoreResult<Vec<ScanRecord>> {
        Ok(self.read()?.values().cloned().collect())
    }

    fn delete_by_id(&self, id: &ScanId) -> StoreResult<()> {
        let removed = self.write()?.remove(id).is_some();
        debug!(%id, removed, "deleted scan record");
        Ok(())
    }

    fn find_matching(
        &self,
        predicate: &dyn Fn(&ScanRecord) -> bool,
    ) -> StoreResult<Vec<ScanRecord>> {
        Ok(self
            .read()?
            .values()
            .filter(|record| predicate(*record))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::contract;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_memory_store_contract() {
        contract::run_all(MemoryStore::new);
    }

    #[test]
    fn test_three_user_scenario() {
        let store = MemoryStore::new();
        store.save(ScanRecord::new("u1").with_crop("Tomato")).unwrap();
        store.save(ScanRecord::new("u2").with_crop("Potato")).unwrap();
        store.save(ScanRecord::new("u1").with_crop("Pepper")).unwrap();

        let mut crops: Vec<_> = store
            .find_by_user_id("u1")
            .unwrap()
            .into_iter()
            .map(|r| r.crop)
            .collect();
        crops.sort();
        assert_eq!(crops, vec!["Pepper", "Tomato"]);
        assert!(store.find_by_user_id("u3").unwrap().is_empty());
    }

    #[test]
    fn test_concurrent_saves() {
        let store = Arc::new(MemoryStore::new());

        let handles: Vec<_> = (0..8)
            .map(|n| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for _ in 0..25 {
                        store.save(ScanRecord::new(format!("user-{}", n))).unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.find_all().unwrap().len(), 200);
        assert_eq!(store.find_by_user_id("user-3").unwrap().len(), 25);
    }

    #[test]
    fn test_poisoned_lock_is_unavailable() {
        let store = Arc::new(MemoryStore::new());
        let poisoner = Arc::clone(&store);
        let _ = thread::spawn(move || {
            let _guard = poisoner.records.write().unwrap();
            panic!("poison the lock");
        })
        .join();

        let err = store.find_all().unwrap_err();
        assert!(matches!(err, StoreError::Unavailable { .. }));
    }
}
