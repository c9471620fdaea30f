//! Append-only design store.
//!
//! The contract is deliberately narrow: append a `{config, zones}` snapshot
//! and list everything back in append order. No query, no update, no delete.
//! [`JsonFileStore`] is the durable implementation (a JSON array on disk);
//! [`MemoryStore`] backs tests and the headless harness.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use habplan_logic::session::DesignSnapshot;

/// A persisted design: a snapshot plus its store-assigned id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignRecord {
    pub id: u64,
    #[serde(flatten)]
    pub snapshot: DesignSnapshot,
}

/// Store failures, split into the client/server classes callers surface.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Payload is missing `config` or `zones`, or they have the wrong
    /// shape. Client-error class; nothing is appended.
    #[error("Invalid habitat data")]
    InvalidPayload,
    #[error("habitat store I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("habitat store data error: {0}")]
    Data(#[from] serde_json::Error),
}

impl StoreError {
    /// True for errors the caller should surface as a bad request rather
    /// than a storage failure.
    pub fn is_client_error(&self) -> bool {
        matches!(self, StoreError::InvalidPayload)
    }
}

/// Append-only record store for saved designs.
pub trait DesignStore {
    /// Persist a snapshot under a fresh unique id and return the record.
    fn append(&mut self, snapshot: DesignSnapshot) -> Result<DesignRecord, StoreError>;

    /// Every saved record, in append order.
    fn list_all(&self) -> Result<Vec<DesignRecord>, StoreError>;
}

fn next_id(records: &[DesignRecord]) -> u64 {
    records.iter().map(|r| r.id).max().unwrap_or(0) + 1
}

// ============================================================================
// JSON FILE STORE
// ============================================================================

/// Durable store backed by a single JSON array file.
///
/// The whole array is read and rewritten on every append — fine for the
/// single-writer, low-volume save path this backs.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Open (or initialize) the store file, creating parent directories
    /// and an empty array on first use.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir)?,
            _ => {}
        }
        if !path.exists() {
            fs::write(&path, "[]")?;
        }
        Ok(Self { path })
    }

    fn read_records(&self) -> Result<Vec<DesignRecord>, StoreError> {
        let raw = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn write_records(&self, records: &[DesignRecord]) -> Result<(), StoreError> {
        let raw = serde_json::to_string_pretty(records)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl DesignStore for JsonFileStore {
    fn append(&mut self, snapshot: DesignSnapshot) -> Result<DesignRecord, StoreError> {
        let mut records = self.read_records()?;
        let record = DesignRecord {
            id: next_id(&records),
            snapshot,
        };
        records.push(record.clone());
        self.write_records(&records)?;
        log::debug!(
            "appended design {} ({} zones) to {}",
            record.id,
            record.snapshot.zones.len(),
            self.path.display()
        );
        Ok(record)
    }

    fn list_all(&self) -> Result<Vec<DesignRecord>, StoreError> {
        self.read_records()
    }
}

// ============================================================================
// MEMORY STORE
// ============================================================================

/// In-process store for tests and the headless harness.
#[derive(Default)]
pub struct MemoryStore {
    records: Vec<DesignRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DesignStore for MemoryStore {
    fn append(&mut self, snapshot: DesignSnapshot) -> Result<DesignRecord, StoreError> {
        let record = DesignRecord {
            id: next_id(&self.records),
            snapshot,
        };
        self.records.push(record.clone());
        Ok(record)
    }

    fn list_all(&self) -> Result<Vec<DesignRecord>, StoreError> {
        Ok(self.records.clone())
    }
}

// ============================================================================
// SAVE ENTRY POINT
// ============================================================================

/// Successful save acknowledgement: `{message, habitat}`.
#[derive(Debug, Clone, Serialize)]
pub struct SaveOutcome {
    pub message: &'static str,
    pub habitat: DesignRecord,
}

/// Check and decode an incoming save payload.
///
/// Missing or mis-shaped `config`/`zones` is a client error; the payload
/// is rejected without touching the store.
pub fn parse_save_request(payload: &Value) -> Result<DesignSnapshot, StoreError> {
    let obj = payload.as_object().ok_or(StoreError::InvalidPayload)?;
    if !obj.contains_key("config") || !obj.contains_key("zones") {
        return Err(StoreError::InvalidPayload);
    }
    serde_json::from_value(payload.clone()).map_err(|err| {
        log::warn!("rejected save payload: {err}");
        StoreError::InvalidPayload
    })
}

/// Validate and persist one design, returning the acknowledgement.
pub fn save_design(
    store: &mut dyn DesignStore,
    payload: &Value,
) -> Result<SaveOutcome, StoreError> {
    let snapshot = parse_save_request(payload)?;
    let habitat = store.append(snapshot)?;
    Ok(SaveOutcome {
        message: "Habitat saved successfully",
        habitat,
    })
}
