//! The `studentbook list`, `search` and `grade` commands.

use std::path::Path;

use anyhow::Result;

use studentbook_core::query::{sort_records, SortKey};
use studentbook_core::{Grade, StudentRecord};

use crate::output::{print_records, OutputFormat};
use crate::ListingArgs;

/// Which records a listing shows.
pub enum Selection {
    All,
    Search(String),
    Grade(String),
}

pub fn execute(
    path: &Path,
    selection: Selection,
    listing: &ListingArgs,
    default_format: &str,
) -> Result<()> {
    let format: OutputFormat = listing.format.as_deref().unwrap_or(default_format).parse()?;
    let sort = listing
        .sort
        .as_deref()
        .map(|s| s.parse::<SortKey>().map_err(anyhow::Error::msg))
        .transpose()?;

    let store = super::open_store(path)?;

    let mut records: Vec<&StudentRecord> = match &selection {
        Selection::All => store.records().iter().collect(),
        Selection::Search(query) => store.search(query),
        Selection::Grade(grade) => {
            let grade: Grade = grade.parse().map_err(anyhow::Error::msg)?;
            store.by_grade(grade)
        }
    };

    if let Some(key) = sort {
        sort_records(&mut records, key, listing.desc);
    } else if listing.desc {
        records.reverse();
    }

    print_records(&records, format)
}
