//! The `studentbook delete` command.

use std::path::Path;

use anyhow::Result;

pub fn execute(path: &Path, id: i64) -> Result<()> {
    let mut store = super::open_store(path)?;

    let removed = store.delete(id)?;
    println!("Student {} ({}) deleted.", removed.id, removed.name);

    Ok(())
}
