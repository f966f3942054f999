use std::{collections::HashSet, sync::Mutex};

use verda_domain::{Category, EmissionRecord};

use crate::CoreError;

/// Abstraction over append-only persistence backends for emission records.
/// Implementations must serialize concurrent appends so a later writer can
/// never clobber an earlier one's record.
pub trait RecordStore: Send + Sync {
    fn append(&self, record: &EmissionRecord) -> Result<(), CoreError>;
    fn query_all(&self) -> Result<Vec<EmissionRecord>, CoreError>;
    fn query_by_category(&self, category: Category) -> Result<Vec<EmissionRecord>, CoreError>;
}

/// Detects anomalies within a ledger snapshot.
pub fn record_warnings(records: &[EmissionRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut warnings = Vec::new();
    for record in records {
        if !seen.insert(record.id) {
            warnings.push(format!("duplicate record id {}", record.id));
        }
        if !record.total_emissions.is_finite() {
            warnings.push(format!("record {} has a non-finite total", record.id));
        } else if record.total_emissions < 0.0 {
            warnings.push(format!(
                "record {} has negative emissions {}",
                record.id, record.total_emissions
            ));
        }
    }
    warnings
}

/// In-memory reference backend for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryRecordStore {
    records: Mutex<Vec<EmissionRecord>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryRecordStore {
    fn append(&self, record: &EmissionRecord) -> Result<(), CoreError> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| CoreError::StoreUnavailable("record lock poisoned".into()))?;
        records.push(record.clone());
        Ok(())
    }

    fn query_all(&self) -> Result<Vec<EmissionRecord>, CoreError> {
        let records = self
            .records
            .lock()
            .map_err(|_| CoreError::StoreUnavailable("record lock poisoned".into()))?;
        Ok(records.clone())
    }

    fn query_by_category(&self, category: Category) -> Result<Vec<EmissionRecord>, CoreError> {
        Ok(self
            .query_all()?
            .into_iter()
            .filter(|record| record.category == category)
            .collect())
    }
}
