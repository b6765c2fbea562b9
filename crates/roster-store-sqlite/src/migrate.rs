//! Versioned, idempotent schema migrations.
//!
//! Each step is a named function applied in order at startup, gated on
//! `PRAGMA user_version`. A failing step raises [`Error::MigrationFailed`] —
//! nothing is swallowed — and leaves `user_version` at the last completed
//! step. The ALTER steps probe `PRAGMA table_info` first so they stay
//! replayable against database files of any prior vintage.

use rusqlite::Connection;

use crate::{Error, Result, schema};

struct Migration {
  name:  &'static str,
  apply: fn(&Connection) -> rusqlite::Result<()>,
}

const MIGRATIONS: &[Migration] = &[
  Migration {
    name:  "create_students_table",
    apply: create_students_table,
  },
  Migration {
    name:  "add_medical_report_flag",
    apply: add_medical_report_flag,
  },
  Migration {
    name:  "drop_active_flag",
    apply: drop_active_flag,
  },
];

/// Bring `conn` to the head schema version. Running it on an up-to-date
/// database is a no-op.
pub fn run(conn: &Connection) -> Result<()> {
  conn.execute_batch("PRAGMA foreign_keys = ON;")?;

  let current: i64 = conn.query_row("PRAGMA user_version", [], |r| r.get(0))?;

  for (i, migration) in MIGRATIONS.iter().enumerate() {
    let version = (i + 1) as i64;
    if version <= current {
      continue;
    }
    (migration.apply)(conn).map_err(|source| Error::MigrationFailed {
      name: migration.name,
      source,
    })?;
    conn.pragma_update(None, "user_version", version)?;
    tracing::info!(step = migration.name, version, "applied schema migration");
  }

  Ok(())
}

// ─── Steps ───────────────────────────────────────────────────────────────────

fn create_students_table(conn: &Connection) -> rusqlite::Result<()> {
  conn.execute_batch(schema::CREATE_STUDENTS_TABLE)
}

fn add_medical_report_flag(conn: &Connection) -> rusqlite::Result<()> {
  if table_has_column(conn, "students", "has_medical_report")? {
    return Ok(());
  }
  conn.execute(
    "ALTER TABLE students ADD COLUMN has_medical_report INTEGER NOT NULL DEFAULT 0",
    [],
  )?;
  Ok(())
}

/// Soft deletion was abandoned; rows are now removed outright, so the flag
/// goes away.
fn drop_active_flag(conn: &Connection) -> rusqlite::Result<()> {
  if !table_has_column(conn, "students", "active")? {
    return Ok(());
  }
  conn.execute("ALTER TABLE students DROP COLUMN active", [])?;
  Ok(())
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> rusqlite::Result<bool> {
  let sql = format!("PRAGMA table_info({table})");
  let mut stmt = conn.prepare(&sql)?;
  let mut rows = stmt.query([])?;
  while let Some(row) = rows.next()? {
    let name: String = row.get(1)?;
    if name == column {
      return Ok(true);
    }
  }
  Ok(false)
}
