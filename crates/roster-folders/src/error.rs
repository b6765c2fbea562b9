//! Error type for `roster-folders`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("failed to create directory {}: {source}", .path.display())]
  Create {
    path:   PathBuf,
    source: std::io::Error,
  },

  #[error("failed to remove directory {}: {source}", .path.display())]
  Remove {
    path:   PathBuf,
    source: std::io::Error,
  },

  #[error("failed to copy {} to {}: {source}", .from.display(), .to.display())]
  Copy {
    from:   PathBuf,
    to:     PathBuf,
    source: std::io::Error,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
