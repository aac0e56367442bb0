//! Rendering of records for the terminal.

use std::str::FromStr;

use anyhow::Result;
use comfy_table::{Cell, CellAlignment, Table};

use studentbook_core::statistics::Summary;
use studentbook_core::{RecordView, StudentRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "table" | "text" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            other => anyhow::bail!("unknown output format: {other} (expected table or json)"),
        }
    }
}

const HEADER: [&str; 9] = ["ID", "Name", "C1", "C2", "C3", "Exam", "Total", "%", "Grade"];

fn record_row(r: &StudentRecord) -> Vec<Cell> {
    vec![
        Cell::new(r.id),
        Cell::new(&r.name),
        Cell::new(r.scores.c1).set_alignment(CellAlignment::Right),
        Cell::new(r.scores.c2).set_alignment(CellAlignment::Right),
        Cell::new(r.scores.c3).set_alignment(CellAlignment::Right),
        Cell::new(r.scores.exam).set_alignment(CellAlignment::Right),
        Cell::new(r.total()).set_alignment(CellAlignment::Right),
        Cell::new(format!("{:.2}%", r.percentage())).set_alignment(CellAlignment::Right),
        Cell::new(r.grade()).set_alignment(CellAlignment::Center),
    ]
}

/// Print a listing followed by the `Records Shown | Average` status line.
pub fn print_records(records: &[&StudentRecord], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let views: Vec<RecordView> = records.iter().map(|r| r.view()).collect();
            println!("{}", serde_json::to_string_pretty(&views)?);
        }
        OutputFormat::Table => {
            if records.is_empty() {
                println!("No matching students.");
            } else {
                let mut table = Table::new();
                table.set_header(HEADER.to_vec());
                for r in records {
                    table.add_row(record_row(r));
                }
                println!("{table}");
            }
            println!("{}", Summary::compute(records.iter().copied()).status_line());
        }
    }
    Ok(())
}

/// Print one record.
pub fn print_record(record: &StudentRecord, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&record.view())?),
        OutputFormat::Table => {
            let mut table = Table::new();
            table.set_header(HEADER.to_vec());
            table.add_row(record_row(record));
            println!("{table}");
        }
    }
    Ok(())
}
