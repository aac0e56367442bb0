//! Storage abstraction used by the record store.
//!
//! The store never touches the filesystem directly; it reads and rewrites the
//! whole text of its backing medium through this trait.

use std::fmt;

/// A place the flat-file text lives.
pub trait StorageBackend: fmt::Debug {
    /// Human-readable location (a path, or a label for in-memory backends).
    fn location(&self) -> String;

    /// Read the full contents as raw bytes. `Ok(None)` means the medium does not exist.
    fn read(&self) -> std::io::Result<Option<Vec<u8>>>;

    /// Replace the full contents.
    fn write(&mut self, content: &str) -> std::io::Result<()>;
}
