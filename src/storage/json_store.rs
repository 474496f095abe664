//! JSON-based scan record storage.
//!
//! Stores each record as a separate JSON document inside the
//! `disease_scans` collection directory. Each write goes to its own
//! temporary file which is then renamed into place, so a reader never sees a
//! partial record and concurrent writers of one id do not collide.

use super::{assign_id, check_storable, ScanStore, COLLECTION};
use crate::error::{StoreError, StoreResult};
use crate::types::{ScanId, ScanRecord};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// JSON file-based scan storage.
#[derive(Debug, Clone)]
pub struct JsonStore {
    collection_dir: PathBuf,
}

impl JsonStore {
    /// Open a store rooted at `collection_dir`, creating it if needed.
    pub fn open(collection_dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let collection_dir = collection_dir.into();

        fs::create_dir_all(&collection_dir).map_err(|e| {
            StoreError::unavailable(format!(
                "cannot create {}: {}",
                collection_dir.display(),
                e
            ))
        })?;

        Ok(Self { collection_dir })
    }

    /// Open the `disease_scans` collection under an application data directory.
    pub fn in_data_dir(data_dir: &Path) -> StoreResult<Self> {
        Self::open(data_dir.join(COLLECTION))
    }

    /// Directory holding the record documents.
    pub fn collection_dir(&self) -> &Path {
        &self.collection_dir
    }

    /// Get the file path for a record.
    fn record_file(&self, id: &ScanId) -> PathBuf {
        self.collection_dir.join(format!("{}.json", file_stem_for(id)))
    }

    fn read_record(path: &Path) -> StoreResult<ScanRecord> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Paths of every record document in the collection.
    fn document_paths(&self) -> StoreResult<Vec<PathBuf>> {
        let mut paths = Vec::new();

        for entry in fs::read_dir(&self.collection_dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }

        Ok(paths)
    }
}

impl ScanStore for JsonStore {
    fn save(&self, record: ScanRecord) -> StoreResult<ScanRecord> {
        check_storable(&record)?;
        let (id, record) = assign_id(record);
        let file = self.record_file(&id);

        let content = serde_json::to_string_pretty(&record)?;
        let mut tmp = NamedTempFile::new_in(&self.collection_dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.persist(&file).map_err(|e| e.error)?;

        debug!(%id, path = %file.display(), "saved scan record");
        Ok(record)
    }

    fn find_by_id(&self, id: &ScanId) -> StoreResult<Option<ScanRecord>> {
        let file = self.record_file(id);

        match fs::read_to_string(&file) {
            Ok(content) => {
                let mut record: ScanRecord = serde_json::from_str(&content)?;
                record.id.get_or_insert_with(|| id.clone());
                Ok(Some(record))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn find_all(&self) -> StoreResult<Vec<ScanRecord>> {
        self.find_matching(&|_: &ScanRecord| true)
    }

    fn delete_by_id(&self, id: &ScanId) -> StoreResult<()> {
        let file = self.record_file(id);

        match fs::remove_file(&file) {
            Ok(()) => {
                debug!(%id, "deleted scan record");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn find_matching(
        &self,
        predicate: &dyn Fn(&ScanRecord) -> bool,
    ) -> StoreResult<Vec<ScanRecord>> {
        let mut records = Vec::new();

        for path in self.document_paths()? {
            match Self::read_record(&path) {
                Ok(record) if predicate(&record) => records.push(record),
                Ok(_) => {}
                // Deleted between listing and reading.
                Err(_) if !path.exists() => {}
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping unreadable scan document")
                }
            }
        }

        Ok(records)
    }
}

/// Map an id onto a safe file stem.
///
/// ASCII alphanumerics, `-` and `_` pass through; every other byte becomes
/// `%XX`, so distinct ids never share a file and no id escapes the
/// collection directory.
fn file_stem_for(id: &ScanId) -> String {
    let mut stem = String::with_capacity(id.as_str().len());
    for byte in id.as_str().bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
            stem.push(byte as char);
        } else {
            stem.push_str(&format!("%{:02X}", byte));
        }
    }
    stem
}
