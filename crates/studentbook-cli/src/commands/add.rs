//! The `studentbook add` command.

use std::path::Path;

use anyhow::Result;

use studentbook_core::RecordForm;

pub fn execute(path: &Path, form: RecordForm) -> Result<()> {
    let mut store = super::open_store(path)?;

    let added = store.add_form(&form)?;
    println!(
        "Student {} ({}) added successfully: {} / 160, {:.2}%, grade {}",
        added.id,
        added.name,
        added.total(),
        added.percentage(),
        added.grade()
    );

    Ok(())
}
