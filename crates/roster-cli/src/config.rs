//! Runtime configuration for the roster CLI.
//!
//! An explicit struct handed to the store and the folder synchronizer at
//! construction time — no globals. Values come from an optional TOML file
//! plus `ROSTER_*` environment overrides, with defaults under the user's
//! home directory.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;

/// The two paths the application operates on.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
  /// SQLite database file.
  pub db_path:       PathBuf,
  /// Root directory holding one folder per student.
  pub students_root: PathBuf,
}

impl AppConfig {
  /// Load from `path` (the file may be absent) and `ROSTER_*` environment
  /// variables.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let data_dir = default_data_dir();

    let settings = config::Config::builder()
      .set_default(
        "db_path",
        data_dir.join("roster.db").to_string_lossy().into_owned(),
      )?
      .set_default(
        "students_root",
        data_dir.join("students").to_string_lossy().into_owned(),
      )?
      .add_source(config::File::from(path.to_path_buf()).required(false))
      .add_source(config::Environment::with_prefix("ROSTER"))
      .build()
      .context("failed to read config file")?;

    let mut cfg: AppConfig = settings
      .try_deserialize()
      .context("failed to deserialise AppConfig")?;
    cfg.db_path = expand_tilde(&cfg.db_path);
    cfg.students_root = expand_tilde(&cfg.students_root);
    Ok(cfg)
  }

  /// Create both data directories before the store opens.
  pub fn ensure_dirs(&self) -> anyhow::Result<()> {
    if let Some(parent) = self.db_path.parent() {
      std::fs::create_dir_all(parent)
        .with_context(|| format!("creating {}", parent.display()))?;
    }
    std::fs::create_dir_all(&self.students_root)
      .with_context(|| format!("creating {}", self.students_root.display()))?;
    Ok(())
  }
}

fn default_data_dir() -> PathBuf {
  std::env::var("HOME")
    .map(|home| PathBuf::from(home).join(".local/share/roster"))
    .unwrap_or_else(|_| PathBuf::from("roster-data"))
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
