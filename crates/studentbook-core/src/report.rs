//! Class report types with JSON persistence.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{RecordView, StudentRecord};
use crate::statistics::Summary;

/// A snapshot of a class: every record with derived fields plus a summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassReport {
    /// When the report was created.
    pub generated_at: DateTime<Utc>,
    /// Where the records came from (usually the backing file path).
    pub source: String,
    pub summary: Summary,
    pub records: Vec<RecordView>,
}

impl ClassReport {
    /// Build a report over `records`, stamped with the current time.
    pub fn new<'a, I>(source: impl Into<String>, records: I) -> Self
    where
        I: IntoIterator<Item = &'a StudentRecord>,
        I::IntoIter: Clone,
    {
        let iter = records.into_iter();
        Self {
            generated_at: Utc::now(),
            source: source.into(),
            summary: Summary::compute(iter.clone()),
            records: iter.map(RecordView::from).collect(),
        }
    }

    /// Save the report as pretty JSON.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load a report previously written by [`save_json`](Self::save_json).
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let report: ClassReport = serde_json::from_str(&content)?;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Grade, Scores};

    fn records() -> Vec<StudentRecord> {
        vec![
            StudentRecord::new(1, "Ann", Scores::new(20, 20, 20, 100)),
            StudentRecord::new(2, "Ben", Scores::new(5, 5, 5, 20)),
        ]
    }

    #[test]
    fn report_carries_derived_fields() {
        let records = records();
        let report = ClassReport::new("marks.txt", &records);
        assert_eq!(report.records.len(), 2);
        assert_eq!(report.records[0].grade, Grade::A);
        assert_eq!(report.records[1].total, 35);
        assert_eq!(report.summary.count, 2);
    }

    #[test]
    fn save_and_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("report.json");
        let records = records();
        let report = ClassReport::new("marks.txt", &records);

        report.save_json(&path).unwrap();
        let loaded = ClassReport::load_json(&path).unwrap();
        assert_eq!(loaded.source, "marks.txt");
        assert_eq!(loaded.records, report.records);
        assert_eq!(loaded.summary, report.summary);
    }

    #[test]
    fn load_invalid_json_is_report_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            ClassReport::load_json(&path),
            Err(crate::error::StoreError::Report(_))
        ));
    }
}
