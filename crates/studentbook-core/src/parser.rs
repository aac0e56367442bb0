//! Flat-file codec.
//!
//! The backing file is a declared record count on the first line followed by
//! one `id,name,c1,c2,c3,exam` line per student. Parsing is lenient: a line
//! that cannot become a valid record is skipped and reported, never fatal.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::model::{Scores, StudentRecord};

/// Number of comma-separated fields on a record line.
pub const FIELD_COUNT: usize = 6;

/// Why a line was left out of the loaded set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// The line did not split into exactly six fields.
    FieldCount { found: usize },
    /// A numeric field was not an integer.
    NotANumber { field: &'static str },
    /// The name field was empty.
    EmptyName,
    /// An earlier line already used this id.
    DuplicateId { id: i64 },
    /// The marks add up to more than an `i64` can hold.
    TotalOutOfRange,
    /// The line is not valid UTF-8.
    InvalidEncoding,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::FieldCount { found } => {
                write!(f, "expected {FIELD_COUNT} fields, found {found}")
            }
            SkipReason::NotANumber { field } => write!(f, "{field} is not a whole number"),
            SkipReason::EmptyName => write!(f, "name is empty"),
            SkipReason::DuplicateId { id } => write!(f, "duplicate ID {id}"),
            SkipReason::TotalOutOfRange => write!(f, "marks total is out of range"),
            SkipReason::InvalidEncoding => write!(f, "line is not valid UTF-8"),
        }
    }
}

/// A rejected line from the backing file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedLine {
    /// 1-based line number in the file (the header is line 1).
    pub line_number: usize,
    pub content: String,
    pub reason: SkipReason,
}

/// Output of [`parse_records`].
#[derive(Debug, Clone, Default)]
pub struct ParsedFile {
    /// The header value, if the first line held an integer.
    pub declared_count: Option<i64>,
    pub records: Vec<StudentRecord>,
    pub skipped: Vec<SkippedLine>,
}

/// Parse the raw bytes of a backing file.
///
/// Each line is decoded on its own, so a line with broken encoding is
/// skipped like any other malformed line.
pub fn parse_records(content: &[u8]) -> ParsedFile {
    let mut parsed = ParsedFile::default();
    if content.is_empty() {
        return parsed;
    }

    let mut lines = content.split(|b| *b == b'\n').enumerate();
    if let Some((_, header)) = lines.next() {
        parsed.declared_count = std::str::from_utf8(header)
            .ok()
            .and_then(|h| h.trim().parse().ok());
    }

    let mut seen = HashSet::new();
    for (index, raw) in lines {
        let line_number = index + 1;
        let line = match std::str::from_utf8(raw) {
            Ok(line) => line.strip_suffix('\r').unwrap_or(line),
            Err(_) => {
                let lossy = String::from_utf8_lossy(raw);
                parsed.skipped.push(SkippedLine {
                    line_number,
                    content: lossy.trim_end_matches('\r').to_string(),
                    reason: SkipReason::InvalidEncoding,
                });
                continue;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        match parse_record_line(line) {
            Ok(record) if !seen.insert(record.id) => parsed.skipped.push(SkippedLine {
                line_number,
                content: line.to_string(),
                reason: SkipReason::DuplicateId { id: record.id },
            }),
            Ok(record) => parsed.records.push(record),
            Err(reason) => parsed.skipped.push(SkippedLine {
                line_number,
                content: line.to_string(),
                reason,
            }),
        }
    }

    parsed
}

/// Parse the whole contents of a backing file held as text.
pub fn parse_records_str(content: &str) -> ParsedFile {
    parse_records(content.as_bytes())
}

/// Parse a single `id,name,c1,c2,c3,exam` line.
pub fn parse_record_line(line: &str) -> Result<StudentRecord, SkipReason> {
    let parts: Vec<&str> = line.trim().split(',').collect();
    if parts.len() != FIELD_COUNT {
        return Err(SkipReason::FieldCount { found: parts.len() });
    }

    let int = |field: &'static str, raw: &str| {
        raw.trim()
            .parse::<i64>()
            .map_err(|_| SkipReason::NotANumber { field })
    };

    let id = int("id", parts[0])?;
    let name = parts[1].trim();
    let scores = Scores {
        c1: int("c1", parts[2])?,
        c2: int("c2", parts[3])?,
        c3: int("c3", parts[4])?,
        exam: int("exam", parts[5])?,
    };
    if name.is_empty() {
        return Err(SkipReason::EmptyName);
    }
    if scores.checked_total().is_none() {
        return Err(SkipReason::TotalOutOfRange);
    }

    Ok(StudentRecord::new(id, name, scores))
}

/// Render a single record line (no trailing newline).
pub fn format_record_line(record: &StudentRecord) -> String {
    let s = &record.scores;
    format!(
        "{},{},{},{},{},{}",
        record.id, record.name, s.c1, s.c2, s.c3, s.exam
    )
}

/// Render a complete backing file: count header, then one line per record.
pub fn format_records(records: &[StudentRecord]) -> String {
    let mut out = format!("{}\n", records.len());
    for record in records {
        out.push_str(&format_record_line(record));
        out.push('\n');
    }
    out
}
