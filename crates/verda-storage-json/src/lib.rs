//! Filesystem-backed JSON persistence for the emission ledger.
//!
//! The whole history lives in one pretty-printed JSON file. Appends take an
//! internal lock and rewrite the file through a temp-file rename, so
//! concurrent writers queue up instead of clobbering each other's records.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    sync::Mutex,
};

use serde::{Deserialize, Serialize};
use tracing::warn;
use verda_core::{
    storage::{record_warnings, RecordStore},
    CoreError,
};
use verda_domain::{Category, EmissionRecord};

const TMP_SUFFIX: &str = "tmp";

/// On-disk document; a wrapper object rather than a bare array so the
/// format can grow fields without a migration.
#[derive(Debug, Default, Serialize, Deserialize)]
struct LedgerFile {
    records: Vec<EmissionRecord>,
}

/// Single-file JSON backend for [`RecordStore`].
pub struct JsonRecordStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonRecordStore {
    /// Opens the store at `path`, creating parent directories. A missing
    /// file is an empty ledger; it is created on the first append.
    pub fn open(path: PathBuf) -> Result<Self, CoreError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let store = Self {
            path,
            write_lock: Mutex::new(()),
        };
        // Fail fast on an unreadable ledger instead of at the first query.
        let ledger = store.read_ledger()?;
        for warning in record_warnings(&ledger.records) {
            warn!(path = %store.path.display(), warning, "ledger anomaly");
        }
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_ledger(&self) -> Result<LedgerFile, CoreError> {
        if !self.path.exists() {
            return Ok(LedgerFile::default());
        }
        let data = fs::read_to_string(&self.path)?;
        serde_json::from_str(&data).map_err(|err| {
            CoreError::StoreUnavailable(format!(
                "ledger file {} is not valid JSON: {err}",
                self.path.display()
            ))
        })
    }

    fn write_ledger(&self, ledger: &LedgerFile) -> Result<(), CoreError> {
        let data = serde_json::to_string_pretty(ledger)
            .map_err(|err| CoreError::Serde(err.to_string()))?;
        let tmp = tmp_path(&self.path);
        let mut file = File::create(&tmp)?;
        file.write_all(data.as_bytes())?;
        file.flush()?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl RecordStore for JsonRecordStore {
    fn append(&self, record: &EmissionRecord) -> Result<(), CoreError> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| CoreError::StoreUnavailable("ledger write lock poisoned".into()))?;
        let mut ledger = self.read_ledger()?;
        ledger.records.push(record.clone());
        self.write_ledger(&ledger)
    }

    fn query_all(&self) -> Result<Vec<EmissionRecord>, CoreError> {
        Ok(self.read_ledger()?.records)
    }

    fn query_by_category(&self, category: Category) -> Result<Vec<EmissionRecord>, CoreError> {
        Ok(self
            .query_all()?
            .into_iter()
            .filter(|record| record.category == category)
            .collect())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}
