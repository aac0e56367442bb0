//! The `studentbook export` command.

use std::path::Path;

use anyhow::{Context, Result};

use studentbook_core::report::ClassReport;
use studentbook_report::write_html_report;

pub fn execute(path: &Path, output: &Path, format: &str) -> Result<()> {
    let store = super::open_store(path)?;
    let report = ClassReport::new(path.display().to_string(), store.records());

    match format {
        "json" => report
            .save_json(output)
            .with_context(|| format!("failed to write report to {}", output.display()))?,
        "html" => write_html_report(&report, output)?,
        other => anyhow::bail!("unknown export format: {other} (expected json or html)"),
    }

    println!(
        "Report for {} students written to {}",
        report.records.len(),
        output.display()
    );
    Ok(())
}
