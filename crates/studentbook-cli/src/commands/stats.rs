//! The `studentbook stats` command.

use std::path::Path;

use anyhow::Result;
use comfy_table::{Cell, Table};

use studentbook_core::model::RecordView;
use studentbook_core::Grade;

use crate::output::OutputFormat;

pub fn execute(path: &Path, format: &str) -> Result<()> {
    let format: OutputFormat = format.parse()?;
    let store = super::open_store(path)?;
    let summary = store.summary();

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Grade", "Students", "Share"]);
    for grade in Grade::ALL {
        let count = summary.grade_count(grade);
        let share = if summary.count > 0 {
            count as f64 / summary.count as f64 * 100.0
        } else {
            0.0
        };
        table.add_row(vec![
            Cell::new(grade),
            Cell::new(count),
            Cell::new(format!("{share:.1}%")),
        ]);
    }
    println!("{table}");

    let describe = |r: &RecordView| format!("{} ({}) {:.2}%", r.name, r.id, r.percentage);
    if let Some(best) = &summary.best {
        println!("Highest: {}", describe(best));
    }
    if let Some(worst) = &summary.worst {
        println!("Lowest:  {}", describe(worst));
    }
    println!("{}", summary.status_line());

    Ok(())
}
