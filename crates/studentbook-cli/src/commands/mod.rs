//! Subcommand implementations.
//!
//! Each command opens the store, calls one store operation and prints the
//! result. No validation happens here.

use std::path::Path;

use anyhow::{Context, Result};

use studentbook_core::RecordStore;

pub mod add;
pub mod delete;
pub mod export;
pub mod init;
pub mod list;
pub mod reload;
pub mod show;
pub mod stats;
pub mod update;

/// Open and load the backing file, warning about skipped lines.
pub fn open_store(path: &Path) -> Result<RecordStore> {
    let (store, report) = RecordStore::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    if !report.is_clean() {
        eprintln!(
            "Warning: {} malformed line(s) skipped in {} (run `studentbook reload` for details)",
            report.skipped.len(),
            report.source
        );
    }
    Ok(store)
}
