//! Encoding and decoding between domain types and SQLite column text.
//!
//! Timestamps are stored as RFC 3339 UTC strings. Grade and shift are stored
//! as their display labels — the same strings the CHECK constraints enforce.
//! Paths are stored as plain text.

use std::{path::PathBuf, str::FromStr as _};

use chrono::{DateTime, Utc};
use roster_core::record::{Grade, Shift, StudentFields, StudentRecord, StudentSummary};

use crate::{Error, Result};

// ─── Scalars ─────────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339()
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

pub fn decode_grade(s: &str) -> Result<Grade> {
  Grade::from_str(s).map_err(|_| Error::Decode {
    column: "grade",
    value:  s.to_string(),
  })
}

pub fn decode_shift(s: &str) -> Result<Shift> {
  Shift::from_str(s).map_err(|_| Error::Decode {
    column: "shift",
    value:  s.to_string(),
  })
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a full `students` row.
pub struct RawRecord {
  pub id:                 i64,
  pub name:               String,
  pub birth_date:         Option<String>,
  pub mother_name:        String,
  pub father_name:        Option<String>,
  pub whatsapp_phone:     String,
  pub secondary_phone:    Option<String>,
  pub email:              Option<String>,
  pub street:             String,
  pub neighborhood:       String,
  pub house_number:       String,
  pub complement:         Option<String>,
  pub city:               String,
  pub school:             String,
  pub grade:              String,
  pub shift:              String,
  pub folder_path:        Option<String>,
  pub has_medical_report: bool,
  pub created_at:         String,
}

impl RawRecord {
  pub fn into_record(self) -> Result<StudentRecord> {
    Ok(StudentRecord {
      id:          self.id,
      fields:      StudentFields {
        name:               self.name,
        birth_date:         self.birth_date,
        mother_name:        self.mother_name,
        father_name:        self.father_name,
        whatsapp_phone:     self.whatsapp_phone,
        secondary_phone:    self.secondary_phone,
        email:              self.email,
        street:             self.street,
        neighborhood:       self.neighborhood,
        house_number:       self.house_number,
        complement:         self.complement,
        city:               self.city,
        school:             self.school,
        grade:              decode_grade(&self.grade)?,
        shift:              decode_shift(&self.shift)?,
        has_medical_report: self.has_medical_report,
      },
      folder_path: self.folder_path.map(PathBuf::from),
      created_at:  decode_dt(&self.created_at)?,
    })
  }
}

/// Raw values for the list projection.
pub struct RawSummary {
  pub id:     i64,
  pub name:   String,
  pub grade:  String,
  pub shift:  String,
  pub school: String,
}

impl RawSummary {
  pub fn into_summary(self) -> Result<StudentSummary> {
    Ok(StudentSummary {
      id:     self.id,
      name:   self.name,
      grade:  decode_grade(&self.grade)?,
      shift:  decode_shift(&self.shift)?,
      school: self.school,
    })
  }
}
