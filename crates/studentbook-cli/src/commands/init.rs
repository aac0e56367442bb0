//! The `studentbook init` command.

use std::path::Path;

use anyhow::{Context, Result};

use studentbook_core::RecordStore;

pub fn execute(path: &Path) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    RecordStore::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    println!("Created {}", path.display());

    println!("\nNext steps:");
    println!("  studentbook add --id 1 --name \"Jane Doe\" --c1 15 --c2 17 --c3 12 --exam 70");
    println!("  studentbook list");

    Ok(())
}
