//! Versioned JSON snapshots of a dataset: the ledger totals plus the entry
//! list, written atomically and reloaded verbatim.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::LedgerError;
use crate::ledger::{Entry, Ledger};

pub const CURRENT_SCHEMA_VERSION: u8 = 1;
const TMP_SUFFIX: &str = "tmp";

/// The persisted unit. Loading performs no recomputation; the totals come
/// back exactly as saved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default = "Snapshot::schema_version_default")]
    pub schema_version: u8,
    pub ledger: Ledger,
    #[serde(default)]
    pub entries: Vec<Entry>,
}

impl Snapshot {
    pub fn new(ledger: Ledger, entries: Vec<Entry>) -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            ledger,
            entries,
        }
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}

/// Reads and writes snapshots at a fixed path.
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the snapshot via a temp file and rename, so a crash mid-write
    /// leaves the previous snapshot intact.
    pub fn save(&self, snapshot: &Snapshot) -> Result<(), LedgerError> {
        let json = serde_json::to_string_pretty(snapshot)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn load(&self) -> Result<Snapshot, LedgerError> {
        let data = fs::read_to_string(&self.path)?;
        let snapshot: Snapshot = serde_json::from_str(&data)?;
        if snapshot.schema_version > CURRENT_SCHEMA_VERSION {
            return Err(LedgerError::UnsupportedSchema {
                found: snapshot.schema_version,
                supported: CURRENT_SCHEMA_VERSION,
            });
        }
        Ok(snapshot)
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

fn write_atomic(path: &Path, data: &str) -> Result<(), LedgerError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
