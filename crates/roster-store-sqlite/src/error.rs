//! Error type for `roster-store-sqlite`.

use roster_core::record::StudentId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] roster_core::Error),

  #[error("database error: {0}")]
  Database(#[from] rusqlite::Error),

  #[error("folder error: {0}")]
  Folders(#[from] roster_folders::Error),

  #[error("migration {name:?} failed: {source}")]
  MigrationFailed {
    name:   &'static str,
    source: rusqlite::Error,
  },

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("unknown label in column {column}: {value:?}")]
  Decode {
    column: &'static str,
    value:  String,
  },

  /// Update or flag toggle addressed to an id that is not in use.
  #[error("student not found: {0}")]
  RecordNotFound(StudentId),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
