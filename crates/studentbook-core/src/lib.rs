//! studentbook-core: Student record store, grade derivation and flat-file codec.
//!
//! This crate holds every rule about student records: validation, derived
//! totals and grades, the line-oriented file format, and the store that keeps
//! memory and file in sync. Presentation layers only marshal input and
//! display what the store returns.

pub mod error;
pub mod model;
pub mod parser;
pub mod query;
pub mod report;
pub mod statistics;
pub mod storage;
pub mod store;
pub mod traits;

pub use error::{Result, StoreError, ValidationError};
pub use model::{Grade, RecordForm, RecordView, Scores, StudentId, StudentRecord};
pub use store::{LoadReport, RecordStore};
