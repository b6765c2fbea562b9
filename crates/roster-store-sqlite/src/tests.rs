//! Integration tests for `SqliteStore` against an in-memory database and a
//! temporary students root.

use roster_core::{
  record::{Grade, Shift, StudentFields},
  store::StudentStore,
};
use roster_folders::StudentFolders;
use rusqlite::Connection;
use tempfile::TempDir;

use crate::{Error, SqliteStore, migrate, schema};

fn store() -> (SqliteStore, TempDir) {
  let tmp = TempDir::new().expect("temp students root");
  let folders = StudentFolders::new(tmp.path().join("students"));
  let store = SqliteStore::open_in_memory(folders).expect("in-memory store");
  (store, tmp)
}

fn fields(name: &str) -> StudentFields {
  StudentFields {
    name:               name.to_string(),
    birth_date:         Some("01/02/2016".into()),
    mother_name:        "Maria Souza".into(),
    father_name:        None,
    whatsapp_phone:     "(11) 98765-4321".into(),
    secondary_phone:    None,
    email:              Some("responsavel@example.com".into()),
    street:             "Rua das Flores".into(),
    neighborhood:       "Centro".into(),
    house_number:       "123".into(),
    complement:         None,
    city:               "São Paulo".into(),
    school:             "Escola Municipal A".into(),
    grade:              Grade::Second,
    shift:              Shift::Morning,
    has_medical_report: false,
  }
}

// ─── Create / get ────────────────────────────────────────────────────────────

#[test]
fn create_then_get_round_trips_fields_and_makes_folder() {
  let (mut s, _tmp) = store();

  let id = s.create(fields("João da Silva")).unwrap();
  assert_eq!(id, 1);

  let record = s.get(id).unwrap().expect("record exists");
  assert_eq!(record.id, 1);
  assert_eq!(record.fields.name, "João da Silva");
  assert_eq!(record.fields.mother_name, "Maria Souza");
  assert_eq!(record.fields.grade, Grade::Second);
  assert_eq!(record.fields.shift, Shift::Morning);
  assert!(!record.fields.has_medical_report);

  let folder = record.folder_path.expect("folder path persisted");
  assert_eq!(folder, s.folders().root().join("1_Joao_da_Silva"));
  assert!(folder.is_dir());
  assert!(folder.join("contrato").is_dir());
  assert!(folder.join("documentos").is_dir());
}

#[test]
fn get_missing_returns_none() {
  let (s, _tmp) = store();
  assert!(s.get(42).unwrap().is_none());
}

#[test]
fn create_rejects_empty_required_field() {
  let (mut s, _tmp) = store();

  let mut bad = fields("Ana");
  bad.city = String::new();
  let err = s.create(bad).unwrap_err();
  assert!(matches!(
    err,
    Error::Core(roster_core::Error::MissingField("city"))
  ));

  // Nothing was persisted.
  assert!(s.list().unwrap().is_empty());
}

#[test]
fn create_rejects_malformed_phone() {
  let (mut s, _tmp) = store();

  let mut bad = fields("Ana");
  bad.whatsapp_phone = "999".into();
  assert!(matches!(
    s.create(bad).unwrap_err(),
    Error::Core(roster_core::Error::InvalidPhone(_))
  ));
  assert!(s.list().unwrap().is_empty());
}

// ─── Identifier allocation ───────────────────────────────────────────────────

#[test]
fn smallest_unused_id_is_reused_after_delete() {
  let (mut s, _tmp) = store();

  assert_eq!(s.create(fields("Aluno A")).unwrap(), 1);
  assert_eq!(s.create(fields("Aluno B")).unwrap(), 2);
  assert_eq!(s.create(fields("Aluno C")).unwrap(), 3);

  s.delete(2).unwrap();

  assert_eq!(s.create(fields("Aluno D")).unwrap(), 2);
  // The next one goes past the still-occupied 3.
  assert_eq!(s.create(fields("Aluno E")).unwrap(), 4);
}

// ─── List ────────────────────────────────────────────────────────────────────

#[test]
fn list_orders_by_name_in_binary_collation() {
  let (mut s, _tmp) = store();

  s.create(fields("Bruno")).unwrap();
  s.create(fields("ana")).unwrap();
  s.create(fields("Carlos")).unwrap();

  let names: Vec<String> = s.list().unwrap().into_iter().map(|r| r.name).collect();
  // Uppercase sorts before lowercase under SQLite's default BINARY collation.
  assert_eq!(names, ["Bruno", "Carlos", "ana"]);
}

#[test]
fn list_projects_summary_columns() {
  let (mut s, _tmp) = store();

  let id = s.create(fields("Ana")).unwrap();
  let summaries = s.list().unwrap();
  assert_eq!(summaries.len(), 1);
  assert_eq!(summaries[0].id, id);
  assert_eq!(summaries[0].grade, Grade::Second);
  assert_eq!(summaries[0].shift, Shift::Morning);
  assert_eq!(summaries[0].school, "Escola Municipal A");
}

// ─── Update ──────────────────────────────────────────────────────────────────

#[test]
fn update_with_changed_name_renames_folder() {
  let (mut s, _tmp) = store();

  let id = s.create(fields("Ana Lima")).unwrap();
  let old_folder = s.get(id).unwrap().unwrap().folder_path.unwrap();

  let mut changed = fields("Ana Souza");
  changed.city = "Campinas".into();
  s.update(id, changed).unwrap();

  let record = s.get(id).unwrap().unwrap();
  assert_eq!(record.fields.name, "Ana Souza");
  assert_eq!(record.fields.city, "Campinas");

  let new_folder = record.folder_path.unwrap();
  assert_eq!(new_folder, s.folders().root().join(format!("{id}_Ana_Souza")));
  assert!(new_folder.is_dir());
  assert!(!old_folder.exists());
}

#[test]
fn update_with_same_name_keeps_folder_path() {
  let (mut s, _tmp) = store();

  let id = s.create(fields("Bruno Costa")).unwrap();
  let before = s.get(id).unwrap().unwrap().folder_path;

  s.update(id, fields("Bruno Costa")).unwrap();

  let after = s.get(id).unwrap().unwrap().folder_path;
  assert_eq!(before, after);
}

#[test]
fn update_when_folder_was_removed_externally_keeps_old_path() {
  let (mut s, _tmp) = store();

  let id = s.create(fields("Carla Dias")).unwrap();
  let old_folder = s.get(id).unwrap().unwrap().folder_path.unwrap();
  std::fs::remove_dir_all(&old_folder).unwrap();

  // The missing source is treated as already consistent: no error, and the
  // stored path stays on the old canonical name.
  s.update(id, fields("Carla Nunes")).unwrap();

  let record = s.get(id).unwrap().unwrap();
  assert_eq!(record.fields.name, "Carla Nunes");
  assert_eq!(record.folder_path.unwrap(), old_folder);
}

#[test]
fn update_unknown_id_fails_loudly() {
  let (mut s, _tmp) = store();
  assert!(matches!(
    s.update(7, fields("Ninguém")).unwrap_err(),
    Error::RecordNotFound(7)
  ));
}

#[test]
fn update_never_touches_created_at() {
  let (mut s, _tmp) = store();

  let id = s.create(fields("Davi")).unwrap();
  let before = s.get(id).unwrap().unwrap().created_at;

  s.update(id, fields("Davi Alves")).unwrap();
  assert_eq!(s.get(id).unwrap().unwrap().created_at, before);
}

// ─── Delete ──────────────────────────────────────────────────────────────────

#[test]
fn delete_removes_row_and_folder_subtree() {
  let (mut s, _tmp) = store();

  let id = s.create(fields("Elisa")).unwrap();
  let folder = s.get(id).unwrap().unwrap().folder_path.unwrap();
  std::fs::write(folder.join("documentos").join("rg.png"), b"img").unwrap();

  s.delete(id).unwrap();

  assert!(s.get(id).unwrap().is_none());
  assert!(!folder.exists());
}

#[test]
fn delete_unknown_id_is_silent() {
  let (mut s, _tmp) = store();
  s.delete(42).unwrap();
}

// ─── Medical-report flag ─────────────────────────────────────────────────────

#[test]
fn medical_report_flag_round_trips() {
  let (mut s, _tmp) = store();

  let id = s.create(fields("Lia")).unwrap();
  s.set_medical_report(id, true).unwrap();
  assert!(s.get(id).unwrap().unwrap().fields.has_medical_report);

  s.set_medical_report(id, false).unwrap();
  assert!(!s.get(id).unwrap().unwrap().fields.has_medical_report);
}

#[test]
fn medical_report_flag_on_unknown_id_fails() {
  let (mut s, _tmp) = store();
  assert!(matches!(
    s.set_medical_report(9, true).unwrap_err(),
    Error::RecordNotFound(9)
  ));
}

// ─── Migrations ──────────────────────────────────────────────────────────────

#[test]
fn migrations_are_idempotent() {
  let conn = Connection::open_in_memory().unwrap();
  migrate::run(&conn).unwrap();
  migrate::run(&conn).unwrap();

  let version: i64 = conn.query_row("PRAGMA user_version", [], |r| r.get(0)).unwrap();
  assert_eq!(version, 3);
}

#[test]
fn migrations_preserve_rows_across_active_flag_drop() {
  let conn = Connection::open_in_memory().unwrap();

  // A database of the first vintage: base table, one row, version 1.
  conn.execute_batch(schema::CREATE_STUDENTS_TABLE).unwrap();
  conn.pragma_update(None, "user_version", 1).unwrap();
  conn
    .execute(
      "INSERT INTO students (
         id, name, mother_name, whatsapp_phone, street, neighborhood,
         house_number, city, school, grade, shift, active, created_at
       ) VALUES (1, 'Ana', 'Maria', '(11) 98765-4321', 'Rua A', 'Centro',
                 '1', 'São Paulo', 'Escola B', '1º Ano', 'Manhã', 1,
                 '2024-03-01T12:00:00+00:00')",
      [],
    )
    .unwrap();

  migrate::run(&conn).unwrap();

  let (name, flag): (String, bool) = conn
    .query_row(
      "SELECT name, has_medical_report FROM students WHERE id = 1",
      [],
      |row| Ok((row.get(0)?, row.get(1)?)),
    )
    .unwrap();
  assert_eq!(name, "Ana");
  assert!(!flag);

  // The soft-delete flag is gone.
  let has_active: bool = conn
    .prepare("SELECT 1 FROM pragma_table_info('students') WHERE name = 'active'")
    .unwrap()
    .exists([])
    .unwrap();
  assert!(!has_active);
}

#[test]
fn check_constraint_rejects_unknown_labels() {
  let conn = Connection::open_in_memory().unwrap();
  migrate::run(&conn).unwrap();

  let result = conn.execute(
    "INSERT INTO students (
       id, name, mother_name, whatsapp_phone, street, neighborhood,
       house_number, city, school, grade, shift, created_at
     ) VALUES (1, 'Ana', 'Maria', '(11) 98765-4321', 'Rua A', 'Centro',
               '1', 'São Paulo', 'Escola B', '10º Ano', 'Manhã',
               '2024-03-01T12:00:00+00:00')",
    [],
  );
  assert!(result.is_err());

  let count: i64 = conn
    .query_row("SELECT COUNT(*) FROM students", [], |r| r.get(0))
    .unwrap();
  assert_eq!(count, 0);
}
