//! Filesystem layer for the roster store: the per-student folder lifecycle
//! and attachment helpers.
//!
//! The invariant maintained here is "one directory per living record, named
//! `{id}_{normalized(name)}`, under a fixed students root". The synchronizer
//! never invents other names; callers persist whatever path it returns.

pub mod error;

pub use error::{Error, Result};

use std::{
  fs,
  path::{Path, PathBuf},
};

use chrono::Utc;
use roster_core::{normalize::folder_token, record::StudentId};
use strum::{AsRefStr, Display, EnumString};

#[cfg(test)]
mod tests;

// ─── Categories ──────────────────────────────────────────────────────────────

/// Attachment categories, each mapping to one subfolder of the student
/// directory. Contract and documents folders exist from record creation; the
/// rest are created lazily on first attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display, EnumString)]
pub enum Category {
  #[strum(serialize = "contrato")]
  Contract,
  #[strum(serialize = "documentos")]
  Documents,
  #[strum(serialize = "foto")]
  Photo,
  #[strum(serialize = "relatorio")]
  Report,
  #[strum(serialize = "laudo")]
  MedicalReport,
}

// ─── Synchronizer ────────────────────────────────────────────────────────────

/// Keeps the per-record directory in step with the record's identity.
#[derive(Debug, Clone)]
pub struct StudentFolders {
  root: PathBuf,
}

impl StudentFolders {
  /// A synchronizer rooted at `root`. The root itself is created by the
  /// first folder operation that needs it, not here.
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  /// Canonical folder path for a record: `root/{id}_{token}`.
  pub fn canonical_path(&self, id: StudentId, name: &str) -> PathBuf {
    self.root.join(format!("{id}_{}", folder_token(name)))
  }

  /// Create the student directory and its two mandatory subfolders.
  /// Idempotent: calling it on an existing directory succeeds and returns
  /// the same path. Creation errors propagate.
  pub fn create(&self, id: StudentId, name: &str) -> Result<PathBuf> {
    let path = self.canonical_path(id, name);
    mkdir_all(&path)?;
    mkdir_all(&path.join(Category::Contract.as_ref()))?;
    mkdir_all(&path.join(Category::Documents.as_ref()))?;
    tracing::debug!(path = %path.display(), "student folder ready");
    Ok(path)
  }

  /// Move the student directory to match a new display name.
  ///
  /// Infallible by contract. Equal canonical paths and a missing source
  /// directory are both treated as already consistent, and an OS-level
  /// rename failure degrades to the old path (logged, not propagated). The
  /// caller persists whatever path comes back, so a degraded rename leaves
  /// the record pointing at the pre-rename directory until the next
  /// successful rename.
  pub fn rename(&self, id: StudentId, old_name: &str, new_name: &str) -> PathBuf {
    let old = self.canonical_path(id, old_name);
    let new = self.canonical_path(id, new_name);

    if old == new {
      return old;
    }
    if !old.exists() {
      return old;
    }

    match fs::rename(&old, &new) {
      Ok(()) => {
        tracing::info!(from = %old.display(), to = %new.display(), "student folder renamed");
        new
      }
      Err(err) => {
        tracing::warn!(
          from = %old.display(),
          to = %new.display(),
          %err,
          "folder rename failed, keeping old path"
        );
        old
      }
    }
  }

  /// Delete a student folder subtree. A missing path is a silent no-op;
  /// anything else that goes wrong propagates so the caller can abort its
  /// own delete.
  pub fn remove(&self, path: &Path) -> Result<()> {
    if !path.exists() {
      return Ok(());
    }
    fs::remove_dir_all(path).map_err(|source| Error::Remove {
      path: path.to_path_buf(),
      source,
    })?;
    tracing::info!(path = %path.display(), "student folder removed");
    Ok(())
  }

  /// Category subfolder under `folder`, created lazily on first use.
  pub fn category_dir(&self, folder: &Path, category: Category) -> Result<PathBuf> {
    let dir = folder.join(category.as_ref());
    mkdir_all(&dir)?;
    Ok(dir)
  }

  /// Copy `source` into the category folder under the deterministic stem
  /// `{category}_{token(name)}_{token(grade_label)}`, keeping the source
  /// extension. An existing destination is never overwritten; a timestamp
  /// suffix is appended instead.
  pub fn attach(
    &self,
    folder: &Path,
    category: Category,
    name: &str,
    grade_label: &str,
    source: &Path,
  ) -> Result<PathBuf> {
    let dir = self.category_dir(folder, category)?;

    let stem = format!(
      "{}_{}_{}",
      category.as_ref(),
      folder_token(name),
      folder_token(grade_label),
    );
    let ext = source.extension().and_then(|e| e.to_str());

    let mut dest = dir.join(with_ext(&stem, ext));
    if dest.exists() {
      let stamped = format!("{stem}_{}", Utc::now().format("%Y%m%d%H%M%S"));
      dest = dir.join(with_ext(&stamped, ext));
    }

    fs::copy(source, &dest).map_err(|io| Error::Copy {
      from:   source.to_path_buf(),
      to:     dest.clone(),
      source: io,
    })?;
    Ok(dest)
  }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// Open a directory in the platform file manager. Best effort: spawn
/// failures and unsupported platforms are silent no-ops.
pub fn open_in_explorer(path: &Path) {
  let launcher = if cfg!(target_os = "windows") {
    Some("explorer")
  } else if cfg!(target_os = "macos") {
    Some("open")
  } else if cfg!(target_os = "linux") {
    Some("xdg-open")
  } else {
    None
  };

  let Some(launcher) = launcher else { return };
  if let Err(err) = std::process::Command::new(launcher).arg(path).spawn() {
    tracing::debug!(path = %path.display(), %err, "could not launch file manager");
  }
}

fn with_ext(stem: &str, ext: Option<&str>) -> String {
  match ext {
    Some(ext) => format!("{stem}.{ext}"),
    None => stem.to_string(),
  }
}

fn mkdir_all(path: &Path) -> Result<()> {
  fs::create_dir_all(path).map_err(|source| Error::Create {
    path: path.to_path_buf(),
    source,
  })
}
