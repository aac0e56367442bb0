//! The student record store.
//!
//! Owns the in-memory records and keeps the backing medium in sync: every
//! successful add, update or delete is followed by a full rewrite.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{Result, StoreError, ValidationError};
use crate::model::{validate_name, Grade, RecordForm, Scores, StudentId, StudentRecord};
use crate::parser::{self, SkippedLine};
use crate::query::{self, SortKey};
use crate::statistics::Summary;
use crate::storage::FlatFile;
use crate::traits::StorageBackend;

/// What happened during a load.
#[derive(Debug, Clone, Serialize)]
pub struct LoadReport {
    /// Where the records were read from.
    pub source: String,
    /// The header count, if it was an integer.
    pub declared_count: Option<i64>,
    /// Records accepted into the store.
    pub loaded: usize,
    /// Lines left out, with reasons.
    pub skipped: Vec<SkippedLine>,
}

impl LoadReport {
    /// No lines were skipped.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    /// The header disagrees with the number of records actually loaded.
    ///
    /// A file with no usable header and no records is not a mismatch.
    pub fn count_mismatch(&self) -> bool {
        match self.declared_count {
            Some(declared) => declared != self.loaded as i64,
            None => self.loaded != 0,
        }
    }
}

/// In-memory student records backed by a flat text file.
#[derive(Debug)]
pub struct RecordStore<B: StorageBackend = FlatFile> {
    backend: B,
    records: Vec<StudentRecord>,
}

impl RecordStore<FlatFile> {
    /// Open the backing file at `path` and load it.
    ///
    /// A missing file is an error; it is never created here.
    pub fn open(path: impl AsRef<Path>) -> Result<(Self, LoadReport)> {
        Self::with_backend(FlatFile::new(path.as_ref()))
    }

    /// Create an empty backing file at `path` and return a store over it.
    ///
    /// Refuses to overwrite an existing file.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                format!("{} already exists", path.display()),
            )));
        }
        let mut store = Self::new(FlatFile::new(path));
        store.save()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        self.backend.path()
    }
}

impl<B: StorageBackend> RecordStore<B> {
    /// An empty store over `backend`. Nothing is read until [`load`](Self::load).
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            records: Vec::new(),
        }
    }

    /// Create a store over `backend` and load it.
    pub fn with_backend(backend: B) -> Result<(Self, LoadReport)> {
        let mut store = Self::new(backend);
        let report = store.load()?;
        Ok((store, report))
    }

    /// Replace the in-memory records with the contents of the backing medium.
    ///
    /// Malformed lines are skipped and listed in the returned report. On error
    /// the current records are left untouched.
    pub fn load(&mut self) -> Result<LoadReport> {
        let location = self.backend.location();
        let content = self
            .backend
            .read()?
            .ok_or_else(|| StoreError::FileNotFound(PathBuf::from(&location)))?;

        let parsed = parser::parse_records(&content);
        for skipped in &parsed.skipped {
            tracing::warn!(
                "skipping line {} of {}: {} ({:?})",
                skipped.line_number,
                location,
                skipped.reason,
                skipped.content
            );
        }

        self.records = parsed.records;
        let report = LoadReport {
            source: location,
            declared_count: parsed.declared_count,
            loaded: self.records.len(),
            skipped: parsed.skipped,
        };

        if report.count_mismatch() {
            tracing::warn!(
                "{} declares {:?} records but {} were loaded",
                report.source,
                report.declared_count,
                report.loaded
            );
        }
        tracing::info!(
            "loaded {} records from {} ({} skipped)",
            report.loaded,
            report.source,
            report.skipped.len()
        );

        Ok(report)
    }

    /// Discard the in-memory records and load again.
    pub fn reload(&mut self) -> Result<LoadReport> {
        tracing::debug!("reloading {}", self.backend.location());
        self.load()
    }

    /// Rewrite the backing medium from the in-memory records.
    ///
    /// Derived fields are not written. A failure leaves memory as it is.
    pub fn save(&mut self) -> Result<()> {
        let content = parser::format_records(&self.records);
        self.backend.write(&content).map_err(|e| {
            tracing::error!("failed to save {}: {e}", self.backend.location());
            StoreError::Io(e)
        })?;
        tracing::debug!(
            "saved {} records to {}",
            self.records.len(),
            self.backend.location()
        );
        Ok(())
    }

    /// Append a new record and save.
    pub fn add(&mut self, record: StudentRecord) -> Result<&StudentRecord> {
        record.validate()?;
        if self.position(record.id).is_some() {
            return Err(ValidationError::DuplicateId(record.id).into());
        }

        tracing::info!("adding student {} ({})", record.id, record.name);
        self.records.push(record);
        self.save()?;

        let last = self.records.len() - 1;
        Ok(&self.records[last])
    }

    /// Coerce a raw add form, then [`add`](Self::add) it.
    pub fn add_form(&mut self, form: &RecordForm) -> Result<&StudentRecord> {
        let record = form.parse()?;
        self.add(record)
    }

    /// Replace the name and scores of an existing record and save.
    ///
    /// The id is immutable and the record keeps its position.
    pub fn update(&mut self, id: StudentId, name: &str, scores: Scores) -> Result<&StudentRecord> {
        let index = self
            .position(id)
            .ok_or(ValidationError::UnknownId(id))?;

        let replacement = StudentRecord::new(id, name.trim(), scores);
        replacement.validate()?;

        tracing::info!("updating student {id}");
        self.records[index] = replacement;
        self.save()?;

        Ok(&self.records[index])
    }

    /// Coerce a raw edit form and [`update`](Self::update) record `id`.
    ///
    /// The form's own id field is ignored.
    pub fn update_form(&mut self, id: StudentId, form: &RecordForm) -> Result<&StudentRecord> {
        if self.position(id).is_none() {
            return Err(ValidationError::UnknownId(id).into());
        }
        validate_name(&form.name)?;
        let scores = form.parse_scores()?;
        self.update(id, &form.name, scores)
    }

    /// Remove a record and save. Returns the removed record.
    pub fn delete(&mut self, id: StudentId) -> Result<StudentRecord> {
        let index = self
            .position(id)
            .ok_or(ValidationError::UnknownId(id))?;

        let removed = self.records.remove(index);
        tracing::info!("deleted student {} ({})", removed.id, removed.name);
        self.save()?;

        Ok(removed)
    }

    // --- Queries ---

    /// All records in store order.
    pub fn records(&self) -> &[StudentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: StudentId) -> Option<&StudentRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn contains(&self, id: StudentId) -> bool {
        self.position(id).is_some()
    }

    /// Free-text search over name and id.
    pub fn search(&self, query: &str) -> Vec<&StudentRecord> {
        let hits = query::search(&self.records, query);
        tracing::debug!("search {:?} matched {} records", query, hits.len());
        hits
    }

    /// Records with exactly `grade`.
    pub fn by_grade(&self, grade: Grade) -> Vec<&StudentRecord> {
        query::by_grade(&self.records, grade)
    }

    /// Full listing sorted by one column.
    pub fn sorted(&self, key: SortKey, descending: bool) -> Vec<&StudentRecord> {
        let mut view: Vec<&StudentRecord> = self.records.iter().collect();
        query::sort_records(&mut view, key, descending);
        view
    }

    /// Count, average and grade distribution over the whole store.
    pub fn summary(&self) -> Summary {
        Summary::compute(self.records.iter())
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn position(&self, id: StudentId) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryBackend;

    const SAMPLE: &str = "3\n\
1345,John Curry,8,15,7,45\n\
2345,Sam Sturtivant,14,15,14,77\n\
9876,Lee Scott,17,11,16,99\n";

    fn memory_store() -> RecordStore<MemoryBackend> {
        let (store, report) =
            RecordStore::with_backend(MemoryBackend::with_content(SAMPLE)).unwrap();
        assert!(report.is_clean());
        store
    }

    fn form(id: &str, name: &str, scores: [&str; 4]) -> RecordForm {
        RecordForm {
            id: id.into(),
            name: name.into(),
            c1: scores[0].into(),
            c2: scores[1].into(),
            c3: scores[2].into(),
            exam: scores[3].into(),
        }
    }

    #[test]
    fn load_missing_file_is_file_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("StudentMarks.txt");
        let err = RecordStore::open(&path).unwrap_err();
        assert!(matches!(err, StoreError::FileNotFound(ref p) if p == &path));
        assert!(!path.exists());
    }

    #[test]
    fn load_reports_skipped_lines() {
        let backend = MemoryBackend::with_content("3\n1,Ann,1,1,1,1\n2,Bob,x,1,1,1\n3,Cy\n");
        let (store, report) = RecordStore::with_backend(backend).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(report.loaded, 1);
        assert_eq!(report.declared_count, Some(3));
        assert_eq!(report.skipped.len(), 2);
        assert!(report.count_mismatch());
    }

    #[test]
    fn empty_file_is_not_a_count_mismatch() {
        let (store, report) = RecordStore::with_backend(MemoryBackend::with_content("")).unwrap();
        assert!(store.is_empty());
        assert!(!report.count_mismatch());

        let (_, report) = RecordStore::with_backend(MemoryBackend::with_content("0\n")).unwrap();
        assert!(!report.count_mismatch());

        let (_, report) =
            RecordStore::with_backend(MemoryBackend::with_content("1,Ann,1,1,1,1\n2,Bob,1,1,1,1\n"))
                .unwrap();
        assert_eq!(report.declared_count, None);
        assert!(report.count_mismatch());
    }

    #[test]
    fn load_skips_undecodable_lines() {
        let mut content = b"2\n1,Ann,1,1,1,1\n".to_vec();
        content.extend_from_slice(&[b'2', b',', 0xc3, 0x28, b',', b'1', b'\n']);
        let (store, report) =
            RecordStore::with_backend(MemoryBackend::with_content(content)).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].reason, parser::SkipReason::InvalidEncoding);
    }

    #[test]
    fn add_accepts_huge_marks_but_rejects_overflowing_total() {
        let mut store = memory_store();
        let added = store
            .add(StudentRecord::new(77, "Big", Scores::new(1, 1, 1, 100_000_000_000_000_000)))
            .unwrap();
        assert_eq!(added.grade(), Grade::A);
        assert!(added.percentage().is_finite());

        let err = store
            .add(StudentRecord::new(78, "Bigger", Scores::new(0, 0, i64::MAX, 1)))
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Validation(ValidationError::TotalOutOfRange)
        ));
        assert!(!store.contains(78));

        let (reopened, report) = RecordStore::with_backend(MemoryBackend::with_content(
            store.backend().content().unwrap(),
        ))
        .unwrap();
        assert!(report.is_clean());
        assert_eq!(reopened.get(77).unwrap().total(), 100_000_000_000_000_003);
    }

    #[test]
    fn add_appends_and_persists() {
        let mut store = memory_store();
        let added = store
            .add(StudentRecord::new(4, "New Kid", Scores::new(10, 10, 10, 50)))
            .unwrap();
        assert_eq!(added.total(), 80);
        assert_eq!(added.percentage(), 50.0);
        assert_eq!(added.grade(), Grade::C);

        assert_eq!(store.len(), 4);
        let saved = store.backend().content().unwrap();
        assert!(saved.starts_with("4\n"));
        assert!(saved.ends_with("4,New Kid,10,10,10,50\n"));
    }

    #[test]
    fn add_duplicate_id_rejected() {
        let mut store = memory_store();
        let err = store
            .add(StudentRecord::new(1345, "Impostor", Scores::new(1, 1, 1, 1)))
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Validation(ValidationError::DuplicateId(1345))
        ));
        assert_eq!(store.len(), 3);
        assert_eq!(store.backend().write_count(), 0);
    }

    #[test]
    fn add_invalid_rejected_without_mutation() {
        let mut store = memory_store();
        assert!(store
            .add(StudentRecord::new(5, "", Scores::new(1, 1, 1, 1)))
            .is_err());
        assert!(store
            .add(StudentRecord::new(5, "Neg", Scores::new(1, -1, 1, 1)))
            .is_err());
        assert!(store.add_form(&form("5", "Bad", ["1", "2", "x", "4"])).is_err());
        assert_eq!(store.len(), 3);
        assert!(!store.contains(5));
    }

    #[test]
    fn add_form_coerces_strings() {
        let mut store = memory_store();
        let added = store
            .add_form(&form("42", " Grace Hopper ", ["20", "20", "20", "100"]))
            .unwrap();
        assert_eq!(added.id, 42);
        assert_eq!(added.name, "Grace Hopper");
        assert_eq!(added.percentage(), 100.0);
    }

    #[test]
    fn update_replaces_in_place() {
        let mut store = memory_store();
        let updated = store
            .update(2345, "Samuel Sturtivant", Scores::new(0, 0, 0, 10))
            .unwrap();
        assert_eq!(updated.id, 2345);
        assert_eq!(updated.grade(), Grade::F);

        assert_eq!(store.records()[1].name, "Samuel Sturtivant");
        assert_eq!(store.records()[1].scores, Scores::new(0, 0, 0, 10));
        assert_eq!(store.len(), 3);
        assert!(store
            .backend()
            .content()
            .unwrap()
            .contains("2345,Samuel Sturtivant,0,0,0,10\n"));
    }

    #[test]
    fn update_unknown_id_rejected() {
        let mut store = memory_store();
        let err = store
            .update(1, "Nobody", Scores::new(1, 1, 1, 1))
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Validation(ValidationError::UnknownId(1))
        ));
        assert_eq!(store.backend().write_count(), 0);
    }

    #[test]
    fn update_form_ignores_form_id() {
        let mut store = memory_store();
        store
            .update_form(9876, &form("1", "Lee Scott", ["1", "2", "3", "4"]))
            .unwrap();
        assert!(store.contains(9876));
        assert!(!store.contains(1));
        assert_eq!(store.get(9876).unwrap().total(), 10);

        let err = store
            .update_form(9876, &form("", "Lee Scott", ["-1", "2", "3", "4"]))
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(store.get(9876).unwrap().total(), 10);
    }

    #[test]
    fn delete_removes_exactly_one() {
        let mut store = memory_store();
        let removed = store.delete(1345).unwrap();
        assert_eq!(removed.name, "John Curry");
        assert_eq!(store.len(), 2);
        assert!(store.get(1345).is_none());
        assert!(store.search("1345").is_empty());

        assert!(matches!(
            store.delete(1345),
            Err(StoreError::Validation(ValidationError::UnknownId(1345)))
        ));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn failed_save_keeps_memory_change() {
        let backend = MemoryBackend::with_content(SAMPLE).failing_writes();
        let (mut store, _) = RecordStore::with_backend(backend).unwrap();

        let err = store
            .add(StudentRecord::new(7, "Unsaved", Scores::new(1, 1, 1, 1)))
            .unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
        assert!(store.contains(7));
        assert_eq!(store.backend().content(), Some(SAMPLE));
    }

    #[test]
    fn reload_discards_unsaved_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("marks.txt");
        std::fs::write(&path, SAMPLE).unwrap();

        let (mut store, _) = RecordStore::open(&path).unwrap();
        std::fs::write(&path, "1\n5,Only,1,1,1,1\n").unwrap();
        assert_eq!(store.len(), 3);

        let report = store.reload().unwrap();
        assert_eq!(report.loaded, 1);
        assert_eq!(store.records()[0].name, "Only");
    }

    #[test]
    fn save_then_load_roundtrip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("marks.txt");

        let mut store = RecordStore::create(&path).unwrap();
        store
            .add(StudentRecord::new(1, "Ann", Scores::new(20, 0, 5, 60)))
            .unwrap();
        store
            .add(StudentRecord::new(2, "Ben", Scores::new(3, 4, 5, 6)))
            .unwrap();
        store
            .update(1, "Ann Marie", Scores::new(19, 1, 5, 61))
            .unwrap();

        let (reopened, report) = RecordStore::open(&path).unwrap();
        assert!(report.is_clean());
        assert!(!report.count_mismatch());
        assert_eq!(reopened.records(), store.records());
        for r in reopened.records() {
            let s = r.scores;
            assert_eq!(r.total(), s.c1 + s.c2 + s.c3 + s.exam);
        }
    }

    #[test]
    fn create_refuses_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("marks.txt");
        std::fs::write(&path, SAMPLE).unwrap();
        assert!(RecordStore::create(&path).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), SAMPLE);
    }

    #[test]
    fn sorted_and_grade_queries() {
        let store = memory_store();
        let sorted = store.sorted(SortKey::Percentage, true);
        assert_eq!(sorted[0].id, 9876);
        assert_eq!(store.by_grade(Grade::D).len(), 1);
        assert_eq!(store.summary().count, 3);
    }
}
