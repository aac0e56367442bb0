//! Storage backend implementations.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::traits::StorageBackend;

/// The backing text file on disk.
///
/// Writes truncate and rewrite the file in place. There is no temp-file
/// rename, so a crash mid-write can leave a truncated file.
#[derive(Debug, Clone)]
pub struct FlatFile {
    path: PathBuf,
}

impl FlatFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StorageBackend for FlatFile {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn read(&self) -> std::io::Result<Option<Vec<u8>>> {
        match std::fs::read(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&mut self, content: &str) -> std::io::Result<()> {
        std::fs::write(&self.path, content)
    }
}

/// In-memory backend for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    content: Option<Vec<u8>>,
    fail_writes: bool,
    writes: usize,
}

impl MemoryBackend {
    /// A backend whose medium does not exist yet.
    pub fn missing() -> Self {
        Self::default()
    }

    /// A backend pre-filled with file text.
    pub fn with_content(content: impl Into<Vec<u8>>) -> Self {
        Self {
            content: Some(content.into()),
            ..Default::default()
        }
    }

    /// Make every subsequent write fail with a permission error.
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    /// Current text, if any has been written or seeded and it is valid UTF-8.
    pub fn content(&self) -> Option<&str> {
        self.content
            .as_deref()
            .and_then(|bytes| std::str::from_utf8(bytes).ok())
    }

    /// Number of successful writes.
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl StorageBackend for MemoryBackend {
    fn location(&self) -> String {
        "<memory>".to_string()
    }

    fn read(&self) -> std::io::Result<Option<Vec<u8>>> {
        Ok(self.content.clone())
    }

    fn write(&mut self, content: &str) -> std::io::Result<()> {
        if self.fail_writes {
            return Err(std::io::Error::new(
                ErrorKind::PermissionDenied,
                "writes disabled",
            ));
        }
        self.content = Some(content.as_bytes().to_vec());
        self.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_file_missing_reads_none() {
        let dir = tempfile::tempdir().unwrap();
        let file = FlatFile::new(dir.path().join("absent.txt"));
        assert!(file.read().unwrap().is_none());
        assert!(!file.path().exists());
    }

    #[test]
    fn flat_file_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = FlatFile::new(dir.path().join("marks.txt"));
        file.write("0\n").unwrap();
        assert_eq!(file.read().unwrap().as_deref(), Some(&b"0\n"[..]));
        file.write("1\n1,Ann,1,1,1,1\n").unwrap();
        assert_eq!(
            file.read().unwrap().as_deref(),
            Some(&b"1\n1,Ann,1,1,1,1\n"[..])
        );
    }

    #[test]
    fn flat_file_reads_invalid_utf8_as_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("marks.txt");
        std::fs::write(&path, [b'1', b'\n', 0xff, b'\n']).unwrap();
        let file = FlatFile::new(&path);
        assert_eq!(file.read().unwrap(), Some(vec![b'1', b'\n', 0xff, b'\n']));
    }

    #[test]
    fn memory_backend_failing_writes() {
        let mut mem = MemoryBackend::with_content("0\n").failing_writes();
        assert!(mem.write("1\n").is_err());
        assert_eq!(mem.content(), Some("0\n"));
        assert_eq!(mem.write_count(), 0);
    }
}
