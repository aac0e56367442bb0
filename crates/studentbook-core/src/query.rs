//! Read-only queries over a slice of records.
//!
//! Every query is a linear scan; there is no index.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::model::{Grade, StudentRecord};

/// Does `record` match a free-text search?
///
/// Matches a case-insensitive substring of the name, or a substring of the
/// id written in decimal. A blank query matches everything.
pub fn matches_search(record: &StudentRecord, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    record.name.to_lowercase().contains(&query) || record.id.to_string().contains(&query)
}

/// Records matching a free-text search, in input order.
pub fn search<'a>(records: &'a [StudentRecord], query: &str) -> Vec<&'a StudentRecord> {
    records.iter().filter(|r| matches_search(r, query)).collect()
}

/// Records with exactly the given grade, in input order.
pub fn by_grade(records: &[StudentRecord], grade: Grade) -> Vec<&StudentRecord> {
    records.iter().filter(|r| r.grade() == grade).collect()
}

/// Column a listing can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Id,
    Name,
    C1,
    C2,
    C3,
    Exam,
    Total,
    Percentage,
    Grade,
}

impl SortKey {
    /// Compare two records on this column.
    pub fn compare(&self, a: &StudentRecord, b: &StudentRecord) -> Ordering {
        match self {
            SortKey::Id => a.id.cmp(&b.id),
            SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortKey::C1 => a.scores.c1.cmp(&b.scores.c1),
            SortKey::C2 => a.scores.c2.cmp(&b.scores.c2),
            SortKey::C3 => a.scores.c3.cmp(&b.scores.c3),
            SortKey::Exam => a.scores.exam.cmp(&b.scores.exam),
            // percentage is monotonic in total
            SortKey::Total | SortKey::Percentage => a.total().cmp(&b.total()),
            SortKey::Grade => a.grade().cmp(&b.grade()),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SortKey::Id => "id",
            SortKey::Name => "name",
            SortKey::C1 => "c1",
            SortKey::C2 => "c2",
            SortKey::C3 => "c3",
            SortKey::Exam => "exam",
            SortKey::Total => "total",
            SortKey::Percentage => "percentage",
            SortKey::Grade => "grade",
        };
        f.write_str(s)
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "id" => Ok(SortKey::Id),
            "name" => Ok(SortKey::Name),
            "c1" => Ok(SortKey::C1),
            "c2" => Ok(SortKey::C2),
            "c3" => Ok(SortKey::C3),
            "exam" => Ok(SortKey::Exam),
            "total" => Ok(SortKey::Total),
            "percentage" | "percent" | "%" => Ok(SortKey::Percentage),
            "grade" => Ok(SortKey::Grade),
            other => Err(format!("unknown sort column: {other}")),
        }
    }
}

/// Stable sort of a listing by one column.
pub fn sort_records(records: &mut [&StudentRecord], key: SortKey, descending: bool) {
    records.sort_by(|a, b| {
        let ord = key.compare(a, b);
        if descending {
            ord.reverse()
        } else {
            ord
        }
    });
}
