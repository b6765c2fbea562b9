//! The `StudentStore` trait.
//!
//! Implemented by storage backends (e.g. `roster-store-sqlite`). The
//! presentation layer depends on this abstraction, not on any concrete
//! backend.

use std::path::PathBuf;

use crate::record::{StudentFields, StudentId, StudentRecord, StudentSummary};

/// Abstraction over a student-record store backend.
///
/// A record has exactly two states: Active (row plus folder exist) and
/// Deleted (row absent). `create` is the only transition into Active,
/// `delete` the only one out of it; `update` is Active → Active.
///
/// Implementations orchestrate the folder synchronizer: `create` makes the
/// per-student directory, `update` renames it when the display name changes,
/// and `delete` removes the whole subtree before the row goes.
pub trait StudentStore {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Validate `fields`, allocate the smallest unused positive id, insert the
  /// row, create the student folder and persist its path. Returns the new
  /// id.
  fn create(&mut self, fields: StudentFields) -> Result<StudentId, Self::Error>;

  /// All records projected to `(id, name, grade, shift, school)`, ordered by
  /// name ascending in the collation of the backing store.
  fn list(&self) -> Result<Vec<StudentSummary>, Self::Error>;

  /// Full record, or `None` when the id is not in use.
  fn get(&self, id: StudentId) -> Result<Option<StudentRecord>, Self::Error>;

  /// The display name and stored folder path, or `None` when the id is not
  /// in use.
  fn name_and_folder(
    &self,
    id: StudentId,
  ) -> Result<Option<(String, Option<PathBuf>)>, Self::Error>;

  /// Overwrite every field of an existing record in a single write. Fails
  /// loudly when the id is not in use. A changed name renames the student
  /// folder; the rename degrades to the old path on failure rather than
  /// aborting the update.
  fn update(&mut self, id: StudentId, fields: StudentFields) -> Result<(), Self::Error>;

  /// Remove the student folder subtree, then the row. A missing id is a
  /// silent no-op. A folder-removal failure aborts the delete and leaves the
  /// row in place — deliberately stricter than `update`'s rename policy.
  fn delete(&mut self, id: StudentId) -> Result<(), Self::Error>;

  /// Toggle the medical-report flag. Fails loudly when the id is not in use.
  fn set_medical_report(&mut self, id: StudentId, flag: bool) -> Result<(), Self::Error>;
}
