//! Error types for `roster-core`.

use thiserror::Error;

use crate::record::StudentId;

#[derive(Debug, Error)]
pub enum Error {
  #[error("required field is empty: {0}")]
  MissingField(&'static str),

  #[error("unknown grade label: {0:?}")]
  InvalidGrade(String),

  #[error("unknown shift label: {0:?}")]
  InvalidShift(String),

  #[error("malformed email address: {0:?}")]
  InvalidEmail(String),

  #[error("phone number must contain 11 digits: {0:?}")]
  InvalidPhone(String),

  #[error("student not found: {0}")]
  RecordNotFound(StudentId),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
