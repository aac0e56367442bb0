//! The `studentbook show` command.

use std::path::Path;

use anyhow::Result;

use studentbook_core::ValidationError;

use crate::output::{print_record, OutputFormat};

pub fn execute(path: &Path, id: i64, format: &str) -> Result<()> {
    let format: OutputFormat = format.parse()?;
    let store = super::open_store(path)?;

    let record = store.get(id).ok_or(ValidationError::UnknownId(id))?;
    print_record(record, format)
}
