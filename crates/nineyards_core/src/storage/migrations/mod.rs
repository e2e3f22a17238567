//! Schema upgrades for the client storage file.
//!
//! Each step lifts the file to `target`; the reached step is recorded in
//! `PRAGMA user_version` inside the same transaction as its script.

use crate::storage::{StorageError, StorageResult};
use log::info;
use rusqlite::Connection;

struct Step {
    target: u32,
    script: &'static str,
}

/// Ordered by `target`, strictly increasing.
const STEPS: &[Step] = &[Step {
    target: 1,
    script: include_str!("0001_local_storage.sql"),
}];

/// Newest storage layout this build can read.
pub fn latest_version() -> u32 {
    STEPS.iter().map(|step| step.target).max().unwrap_or(0)
}

/// Brings the storage file up to `latest_version`.
///
/// Files written by a newer build are refused rather than downgraded.
pub fn apply_migrations(conn: &mut Connection) -> StorageResult<()> {
    let found: u32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    let latest = latest_version();
    if found > latest {
        return Err(StorageError::UnsupportedSchemaVersion {
            db_version: found,
            latest_supported: latest,
        });
    }

    let pending: Vec<&Step> = STEPS.iter().filter(|step| step.target > found).collect();
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for step in &pending {
        tx.execute_batch(step.script)?;
        tx.pragma_update(None, "user_version", step.target)?;
    }
    tx.commit()?;

    info!(
        "event=storage_migrate module=storage status=ok from_version={} to_version={}",
        found, latest
    );
    Ok(())
}
