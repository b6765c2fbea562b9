//! [`SqliteStore`] — the SQLite implementation of [`StudentStore`].

use std::path::{Path, PathBuf};

use chrono::Utc;
use roster_core::{
  record::{StudentFields, StudentId, StudentRecord, StudentSummary},
  store::StudentStore,
};
use roster_folders::StudentFolders;
use rusqlite::{Connection, OptionalExtension as _, Row, params};

use crate::{
  Error, Result,
  encode::{RawRecord, RawSummary, encode_dt},
  migrate,
};

const RECORD_COLUMNS: &str = "id, name, birth_date, mother_name, father_name, \
   whatsapp_phone, secondary_phone, email, \
   street, neighborhood, house_number, complement, city, \
   school, grade, shift, folder_path, has_medical_report, created_at";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A student-record store backed by a single SQLite file and a students
/// directory tree.
pub struct SqliteStore {
  conn:    Connection,
  folders: StudentFolders,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and bring its schema to the head
  /// version. The database file's parent directory must already exist.
  pub fn open(path: impl AsRef<Path>, folders: StudentFolders) -> Result<Self> {
    let conn = Connection::open(path)?;
    migrate::run(&conn)?;
    Ok(Self { conn, folders })
  }

  /// In-memory store — useful for testing.
  pub fn open_in_memory(folders: StudentFolders) -> Result<Self> {
    let conn = Connection::open_in_memory()?;
    migrate::run(&conn)?;
    Ok(Self { conn, folders })
  }

  /// The folder synchronizer this store drives.
  pub fn folders(&self) -> &StudentFolders {
    &self.folders
  }

  /// Smallest positive integer not currently used as an id, found by an
  /// ascending scan. Ids freed by deletion are handed out again, keeping
  /// folder names low-numbered.
  fn allocate_id(conn: &Connection) -> Result<StudentId> {
    let mut stmt = conn.prepare("SELECT id FROM students ORDER BY id")?;
    let ids = stmt
      .query_map([], |row| row.get::<_, i64>(0))?
      .collect::<rusqlite::Result<Vec<_>>>()?;

    let mut candidate = 1;
    for id in ids {
      if id == candidate {
        candidate += 1;
      } else if id > candidate {
        break;
      }
    }
    Ok(candidate)
  }
}

fn raw_record_from_row(row: &Row<'_>) -> rusqlite::Result<RawRecord> {
  Ok(RawRecord {
    id:                 row.get(0)?,
    name:               row.get(1)?,
    birth_date:         row.get(2)?,
    mother_name:        row.get(3)?,
    father_name:        row.get(4)?,
    whatsapp_phone:     row.get(5)?,
    secondary_phone:    row.get(6)?,
    email:              row.get(7)?,
    street:             row.get(8)?,
    neighborhood:       row.get(9)?,
    house_number:       row.get(10)?,
    complement:         row.get(11)?,
    city:               row.get(12)?,
    school:             row.get(13)?,
    grade:              row.get(14)?,
    shift:              row.get(15)?,
    folder_path:        row.get(16)?,
    has_medical_report: row.get(17)?,
    created_at:         row.get(18)?,
  })
}

// ─── StudentStore impl ───────────────────────────────────────────────────────

impl StudentStore for SqliteStore {
  type Error = Error;

  fn create(&mut self, fields: StudentFields) -> Result<StudentId> {
    fields.validate()?;

    let tx = self.conn.transaction()?;
    let id = Self::allocate_id(&tx)?;
    let created_at = encode_dt(Utc::now());

    tx.execute(
      "INSERT INTO students (
         id, name, birth_date, mother_name, father_name,
         whatsapp_phone, secondary_phone, email,
         street, neighborhood, house_number, complement, city,
         school, grade, shift, has_medical_report, created_at
       ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)",
      params![
        id,
        fields.name,
        fields.birth_date,
        fields.mother_name,
        fields.father_name,
        fields.whatsapp_phone,
        fields.secondary_phone,
        fields.email,
        fields.street,
        fields.neighborhood,
        fields.house_number,
        fields.complement,
        fields.city,
        fields.school,
        fields.grade.to_string(),
        fields.shift.to_string(),
        fields.has_medical_report,
        created_at,
      ],
    )?;

    // Folder creation happens inside the transaction scope: a filesystem
    // failure rolls the insert back.
    let folder = self.folders.create(id, &fields.name)?;
    tx.execute(
      "UPDATE students SET folder_path = ?1 WHERE id = ?2",
      params![folder.to_string_lossy().into_owned(), id],
    )?;

    tx.commit()?;
    tracing::info!(id, name = %fields.name, "student record created");
    Ok(id)
  }

  fn list(&self) -> Result<Vec<StudentSummary>> {
    let mut stmt = self
      .conn
      .prepare("SELECT id, name, grade, shift, school FROM students ORDER BY name")?;
    let raws = stmt
      .query_map([], |row| {
        Ok(RawSummary {
          id:     row.get(0)?,
          name:   row.get(1)?,
          grade:  row.get(2)?,
          shift:  row.get(3)?,
          school: row.get(4)?,
        })
      })?
      .collect::<rusqlite::Result<Vec<_>>>()?;

    raws.into_iter().map(RawSummary::into_summary).collect()
  }

  fn get(&self, id: StudentId) -> Result<Option<StudentRecord>> {
    let raw: Option<RawRecord> = self
      .conn
      .query_row(
        &format!("SELECT {RECORD_COLUMNS} FROM students WHERE id = ?1"),
        params![id],
        raw_record_from_row,
      )
      .optional()?;

    raw.map(RawRecord::into_record).transpose()
  }

  fn name_and_folder(&self, id: StudentId) -> Result<Option<(String, Option<PathBuf>)>> {
    let row: Option<(String, Option<String>)> = self
      .conn
      .query_row(
        "SELECT name, folder_path FROM students WHERE id = ?1",
        params![id],
        |row| Ok((row.get(0)?, row.get(1)?)),
      )
      .optional()?;

    Ok(row.map(|(name, folder)| (name, folder.map(PathBuf::from))))
  }

  fn update(&mut self, id: StudentId, fields: StudentFields) -> Result<()> {
    fields.validate()?;

    let (old_name, _) = self
      .name_and_folder(id)?
      .ok_or(Error::RecordNotFound(id))?;

    // A changed display name moves the folder. The rename degrades to the
    // old path on failure instead of aborting the update, so the row write
    // below always proceeds.
    let folder = self.folders.rename(id, &old_name, &fields.name);

    self.conn.execute(
      "UPDATE students SET
         name = ?1, birth_date = ?2, mother_name = ?3, father_name = ?4,
         whatsapp_phone = ?5, secondary_phone = ?6, email = ?7,
         street = ?8, neighborhood = ?9, house_number = ?10,
         complement = ?11, city = ?12, school = ?13,
         grade = ?14, shift = ?15, has_medical_report = ?16,
         folder_path = ?17
       WHERE id = ?18",
      params![
        fields.name,
        fields.birth_date,
        fields.mother_name,
        fields.father_name,
        fields.whatsapp_phone,
        fields.secondary_phone,
        fields.email,
        fields.street,
        fields.neighborhood,
        fields.house_number,
        fields.complement,
        fields.city,
        fields.school,
        fields.grade.to_string(),
        fields.shift.to_string(),
        fields.has_medical_report,
        folder.to_string_lossy().into_owned(),
        id,
      ],
    )?;

    Ok(())
  }

  fn delete(&mut self, id: StudentId) -> Result<()> {
    let Some((_, folder)) = self.name_and_folder(id)? else {
      return Ok(());
    };

    // Folder removal comes first; if it fails the row stays, so no folder is
    // ever orphaned without a record pointing at it.
    if let Some(folder) = folder {
      self.folders.remove(&folder)?;
    }
    self
      .conn
      .execute("DELETE FROM students WHERE id = ?1", params![id])?;
    tracing::info!(id, "student record deleted");
    Ok(())
  }

  fn set_medical_report(&mut self, id: StudentId, flag: bool) -> Result<()> {
    let updated = self.conn.execute(
      "UPDATE students SET has_medical_report = ?1 WHERE id = ?2",
      params![flag, id],
    )?;
    if updated == 0 {
      return Err(Error::RecordNotFound(id));
    }
    Ok(())
  }
}
