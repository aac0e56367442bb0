//! Core data model types for studentbook.
//!
//! A [`StudentRecord`] stores only what the backing file stores. Totals,
//! percentages and grades are always derived from the scores on demand.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Maximum achievable total: three 20-mark courseworks plus a 100-mark exam.
pub const MAX_TOTAL: i64 = 160;

/// Identifier of a student, unique within a store.
pub type StudentId = i64;

/// The four marks recorded for every student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores {
    /// Coursework 1 (out of 20 by convention).
    pub c1: i64,
    /// Coursework 2 (out of 20 by convention).
    pub c2: i64,
    /// Coursework 3 (out of 20 by convention).
    pub c3: i64,
    /// Exam (out of 100 by convention).
    pub exam: i64,
}

impl Scores {
    pub fn new(c1: i64, c2: i64, c3: i64, exam: i64) -> Self {
        Self { c1, c2, c3, exam }
    }

    /// Sum of all four marks, or `None` if it does not fit in an `i64`.
    pub fn checked_total(&self) -> Option<i64> {
        self.c1
            .checked_add(self.c2)?
            .checked_add(self.c3)?
            .checked_add(self.exam)
    }

    /// Sum of all four marks. Saturates for marks that fail [`validate`](Self::validate).
    pub fn total(&self) -> i64 {
        self.c1
            .saturating_add(self.c2)
            .saturating_add(self.c3)
            .saturating_add(self.exam)
    }

    /// Unrounded percentage of [`MAX_TOTAL`].
    pub fn raw_percentage(&self) -> f64 {
        // Scale before dividing so whole-number thresholds land exactly.
        (i128::from(self.total()) * 100) as f64 / MAX_TOTAL as f64
    }

    /// `total / 160 * 100` rounded to two decimals.
    pub fn percentage(&self) -> f64 {
        round_2(self.total() as f64 / MAX_TOTAL as f64 * 100.0)
    }

    /// Letter grade. Thresholds are applied to the unrounded percentage.
    pub fn grade(&self) -> Grade {
        Grade::from_percentage(self.raw_percentage())
    }

    /// Reject any negative mark, or marks whose total overflows.
    /// Per-field upper bounds are not enforced.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in self.fields() {
            if value < 0 {
                return Err(ValidationError::NegativeScore { field, value });
            }
        }
        if self.checked_total().is_none() {
            return Err(ValidationError::TotalOutOfRange);
        }
        Ok(())
    }

    fn fields(&self) -> [(&'static str, i64); 4] {
        [
            ("c1", self.c1),
            ("c2", self.c2),
            ("c3", self.c3),
            ("exam", self.exam),
        ]
    }
}

/// Round to two decimal places.
///
/// Goes through exact decimal formatting, so a value sitting exactly on a
/// half rounds to even (`0.625` becomes `0.62`, `69.375` becomes `69.38`).
pub fn round_2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}

/// One student's stored data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub id: StudentId,
    pub name: String,
    pub scores: Scores,
}

impl StudentRecord {
    pub fn new(id: StudentId, name: impl Into<String>, scores: Scores) -> Self {
        Self {
            id,
            name: name.into(),
            scores,
        }
    }

    pub fn total(&self) -> i64 {
        self.scores.total()
    }

    pub fn percentage(&self) -> f64 {
        self.scores.percentage()
    }

    pub fn grade(&self) -> Grade {
        self.scores.grade()
    }

    /// Check the per-record invariants: non-empty name, no separator
    /// characters in the name, no negative marks.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name(&self.name)?;
        self.scores.validate()
    }

    /// Snapshot including the derived fields.
    pub fn view(&self) -> RecordView {
        RecordView::from(self)
    }
}

pub(crate) fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if name.contains([',', '\n', '\r']) {
        return Err(ValidationError::NameContainsSeparator(name.to_string()));
    }
    Ok(())
}

/// Letter grade derived from a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub const ALL: [Grade; 5] = [Grade::A, Grade::B, Grade::C, Grade::D, Grade::F];

    /// p>=70 A, p>=60 B, p>=50 C, p>=40 D, otherwise F.
    pub fn from_percentage(p: f64) -> Self {
        if p >= 70.0 {
            Grade::A
        } else if p >= 60.0 {
            Grade::B
        } else if p >= 50.0 {
            Grade::C
        } else if p >= 40.0 {
            Grade::D
        } else {
            Grade::F
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Grade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A" => Ok(Grade::A),
            "B" => Ok(Grade::B),
            "C" => Ok(Grade::C),
            "D" => Ok(Grade::D),
            "F" => Ok(Grade::F),
            other => Err(format!("unknown grade: {other} (expected one of A, B, C, D, F)")),
        }
    }
}

/// A record together with its derived fields, for display and export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordView {
    pub id: StudentId,
    pub name: String,
    pub c1: i64,
    pub c2: i64,
    pub c3: i64,
    pub exam: i64,
    pub total: i64,
    pub percentage: f64,
    pub grade: Grade,
}

impl From<&StudentRecord> for RecordView {
    fn from(r: &StudentRecord) -> Self {
        Self {
            id: r.id,
            name: r.name.clone(),
            c1: r.scores.c1,
            c2: r.scores.c2,
            c3: r.scores.c3,
            exam: r.scores.exam,
            total: r.total(),
            percentage: r.percentage(),
            grade: r.grade(),
        }
    }
}

/// Raw text collected by an add/update form.
///
/// The presentation layer fills this in verbatim; coercion and validation
/// happen in [`RecordForm::parse`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordForm {
    pub id: String,
    pub name: String,
    pub c1: String,
    pub c2: String,
    pub c3: String,
    pub exam: String,
}

impl RecordForm {
    /// Pre-fill a form from an existing record, as an edit dialog would.
    pub fn from_record(record: &StudentRecord) -> Self {
        Self {
            id: record.id.to_string(),
            name: record.name.clone(),
            c1: record.scores.c1.to_string(),
            c2: record.scores.c2.to_string(),
            c3: record.scores.c3.to_string(),
            exam: record.scores.exam.to_string(),
        }
    }

    /// Coerce every field and check the record invariants.
    pub fn parse(&self) -> Result<StudentRecord, ValidationError> {
        let id = parse_int("id", &self.id)?;
        let scores = self.parse_scores()?;
        let record = StudentRecord::new(id, self.name.trim(), scores);
        record.validate()?;
        Ok(record)
    }

    /// Coerce the four score fields only (the id is ignored).
    pub fn parse_scores(&self) -> Result<Scores, ValidationError> {
        Ok(Scores {
            c1: parse_int("c1", &self.c1)?,
            c2: parse_int("c2", &self.c2)?,
            c3: parse_int("c3", &self.c3)?,
            exam: parse_int("exam", &self.exam)?,
        })
    }
}

fn parse_int(field: &'static str, raw: &str) -> Result<i64, ValidationError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidNumber {
            field,
            value: raw.to_string(),
        })
}
