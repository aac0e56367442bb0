//! Aggregate statistics over a listing.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{round_2, Grade, RecordView, StudentRecord};

/// Summary of any set of records (the whole store or a filtered view).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Number of records summarized.
    pub count: usize,
    /// Mean of the rounded percentages, rounded to two decimals. Zero when empty.
    pub average_percentage: f64,
    /// How many records hold each grade. Every grade is present, possibly with 0.
    pub grade_counts: BTreeMap<Grade, usize>,
    /// Highest percentage (first one wins on ties).
    pub best: Option<RecordView>,
    /// Lowest percentage (first one wins on ties).
    pub worst: Option<RecordView>,
}

impl Summary {
    pub fn compute<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a StudentRecord>,
    {
        let mut grade_counts: BTreeMap<Grade, usize> =
            Grade::ALL.iter().map(|g| (*g, 0)).collect();
        let mut count = 0usize;
        let mut sum = 0.0f64;
        let mut best: Option<&StudentRecord> = None;
        let mut worst: Option<&StudentRecord> = None;

        for r in records {
            count += 1;
            sum += r.percentage();
            *grade_counts.entry(r.grade()).or_default() += 1;

            if best.map_or(true, |b| r.total() > b.total()) {
                best = Some(r);
            }
            if worst.map_or(true, |w| r.total() < w.total()) {
                worst = Some(r);
            }
        }

        let average_percentage = if count > 0 {
            round_2(sum / count as f64)
        } else {
            0.0
        };

        Self {
            count,
            average_percentage,
            grade_counts,
            best: best.map(RecordView::from),
            worst: worst.map(RecordView::from),
        }
    }

    /// Number of records holding `grade`.
    pub fn grade_count(&self, grade: Grade) -> usize {
        self.grade_counts.get(&grade).copied().unwrap_or(0)
    }

    /// One-line status, e.g. `Records Shown: 3 | Average: 70.21%`.
    pub fn status_line(&self) -> String {
        format!(
            "Records Shown: {} | Average: {:.2}%",
            self.count, self.average_percentage
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Scores;

    #[test]
    fn empty_summary() {
        let summary = Summary::compute(std::iter::empty());
        assert_eq!(summary.count, 0);
        assert_eq!(summary.average_percentage, 0.0);
        assert!(summary.best.is_none());
        assert_eq!(summary.grade_count(Grade::A), 0);
        assert_eq!(summary.grade_counts.len(), 5);
        assert_eq!(summary.status_line(), "Records Shown: 0 | Average: 0.00%");
    }

    #[test]
    fn summary_over_records() {
        let records = vec![
            StudentRecord::new(1, "Ann", Scores::new(20, 20, 20, 100)), // 100%
            StudentRecord::new(2, "Ben", Scores::new(10, 10, 10, 50)),  // 50%
            StudentRecord::new(3, "Cy", Scores::new(0, 0, 0, 8)),       // 5%
        ];
        let summary = Summary::compute(&records);
        assert_eq!(summary.count, 3);
        assert_eq!(summary.average_percentage, 51.67);
        assert_eq!(summary.grade_count(Grade::A), 1);
        assert_eq!(summary.grade_count(Grade::C), 1);
        assert_eq!(summary.grade_count(Grade::F), 1);
        assert_eq!(summary.best.as_ref().unwrap().id, 1);
        assert_eq!(summary.worst.as_ref().unwrap().id, 3);
        assert_eq!(summary.status_line(), "Records Shown: 3 | Average: 51.67%");
    }

    #[test]
    fn ties_keep_first() {
        let records = vec![
            StudentRecord::new(1, "Ann", Scores::new(1, 1, 1, 1)),
            StudentRecord::new(2, "Ben", Scores::new(1, 1, 1, 1)),
        ];
        let summary = Summary::compute(&records);
        assert_eq!(summary.best.unwrap().id, 1);
        assert_eq!(summary.worst.unwrap().id, 1);
    }
}
