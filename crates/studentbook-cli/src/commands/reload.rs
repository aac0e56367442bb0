//! The `studentbook reload` command.

use std::path::Path;

use anyhow::{Context, Result};

use studentbook_core::storage::FlatFile;
use studentbook_core::RecordStore;

pub fn execute(path: &Path) -> Result<()> {
    let mut store = RecordStore::new(FlatFile::new(path));
    let report = store
        .reload()
        .with_context(|| format!("failed to reload {}", path.display()))?;

    let declared = report
        .declared_count
        .map(|n| n.to_string())
        .unwrap_or_else(|| "none".to_string());
    println!(
        "Loaded {} records from {} (header declares {})",
        report.loaded, report.source, declared
    );

    if report.is_clean() {
        println!("No malformed lines.");
    } else {
        println!("{} line(s) skipped:", report.skipped.len());
        for s in &report.skipped {
            println!("  line {}: {} ({:?})", s.line_number, s.reason, s.content);
        }
    }
    if report.count_mismatch() {
        println!("Header count does not match the records loaded.");
    }

    Ok(())
}
