//! SQL schema for the roster SQLite store.
//!
//! The DDL here is migration step 1; later steps in [`crate::migrate`]
//! evolve it. `PRAGMA user_version` tracks how far a given database file has
//! advanced.

/// Base `students` table. The grade and shift CHECK constraints mirror the
/// label lists of `roster_core::record`; the `active` flag is dropped again
/// by a later migration step.
pub const CREATE_STUDENTS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS students (
    id              INTEGER PRIMARY KEY,  -- allocator-assigned, no AUTOINCREMENT
    name            TEXT NOT NULL,
    birth_date      TEXT,
    mother_name     TEXT NOT NULL,
    father_name     TEXT,
    whatsapp_phone  TEXT NOT NULL,
    secondary_phone TEXT,
    email           TEXT,
    street          TEXT NOT NULL,
    neighborhood    TEXT NOT NULL,
    house_number    TEXT NOT NULL,
    complement      TEXT,
    city            TEXT NOT NULL,
    school          TEXT NOT NULL,
    grade           TEXT NOT NULL CHECK (grade IN (
        'Educação Infantil',
        '1º Ano', '2º Ano', '3º Ano', '4º Ano', '5º Ano',
        '6º Ano', '7º Ano', '8º Ano', '9º Ano'
    )),
    shift           TEXT NOT NULL CHECK (shift IN ('Manhã', 'Tarde')),
    folder_path     TEXT,
    active          INTEGER NOT NULL DEFAULT 1,
    created_at      TEXT NOT NULL
);
";
