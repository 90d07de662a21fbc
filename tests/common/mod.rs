use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};
use expense_core::core::time::FixedClock;
use expense_core::store::JsonStorage;
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the
/// test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Returns a ledger file path inside a fresh temporary directory.
pub fn ledger_path() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().join("ledger.json");
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    path
}

/// Opens the ledger at `path` with a clock pinned to `now`. Timestamps of
/// everything written through this handle use that instant.
pub fn storage_at(path: &std::path::Path, now: DateTime<Utc>) -> JsonStorage {
    JsonStorage::with_clock(path, Arc::new(FixedClock::new(now))).expect("create json storage")
}

pub fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0)
        .single()
        .expect("valid timestamp")
}
