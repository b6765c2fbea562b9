//! Student record types — the single entity of the roster store.
//!
//! A record is a flat field tuple plus store-assigned identity metadata
//! (`id`, `folder_path`, `created_at`). The grade and shift enumerations
//! serialize to the literal labels shown to users; those same labels are what
//! the storage layer persists and checks.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::error::{Error, Result};

/// Identifier of a student record: the smallest positive integer not in use
/// at creation time. Identifiers freed by deletion are handed out again.
pub type StudentId = i64;

// ─── Enumerations ────────────────────────────────────────────────────────────

/// School grade: one pre-literacy level plus the nine elementary years.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
pub enum Grade {
  #[serde(rename = "Educação Infantil")]
  #[strum(serialize = "Educação Infantil")]
  EarlyChildhood,
  #[serde(rename = "1º Ano")]
  #[strum(serialize = "1º Ano")]
  First,
  #[serde(rename = "2º Ano")]
  #[strum(serialize = "2º Ano")]
  Second,
  #[serde(rename = "3º Ano")]
  #[strum(serialize = "3º Ano")]
  Third,
  #[serde(rename = "4º Ano")]
  #[strum(serialize = "4º Ano")]
  Fourth,
  #[serde(rename = "5º Ano")]
  #[strum(serialize = "5º Ano")]
  Fifth,
  #[serde(rename = "6º Ano")]
  #[strum(serialize = "6º Ano")]
  Sixth,
  #[serde(rename = "7º Ano")]
  #[strum(serialize = "7º Ano")]
  Seventh,
  #[serde(rename = "8º Ano")]
  #[strum(serialize = "8º Ano")]
  Eighth,
  #[serde(rename = "9º Ano")]
  #[strum(serialize = "9º Ano")]
  Ninth,
}

impl Grade {
  /// Parse a display label, rejecting anything outside the fixed list.
  pub fn parse_label(label: &str) -> Result<Self> {
    label
      .parse()
      .map_err(|_| Error::InvalidGrade(label.to_string()))
  }
}

/// Class shift. Exactly two values; everything else is rejected before
/// persistence.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
pub enum Shift {
  #[serde(rename = "Manhã")]
  #[strum(serialize = "Manhã")]
  Morning,
  #[serde(rename = "Tarde")]
  #[strum(serialize = "Tarde")]
  Afternoon,
}

impl Shift {
  /// Parse a display label, rejecting anything outside the pair.
  pub fn parse_label(label: &str) -> Result<Self> {
    label
      .parse()
      .map_err(|_| Error::InvalidShift(label.to_string()))
  }
}

// ─── Field tuple ─────────────────────────────────────────────────────────────

/// The caller-supplied field tuple for create and update. Identity metadata
/// (`id`, `folder_path`, `created_at`) is owned by the store and never
/// accepted from callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentFields {
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
  pub grade:              Grade,
  pub shift:              Shift,
  #[serde(default)]
  pub has_medical_report: bool,
}

// ─── Record ──────────────────────────────────────────────────────────────────

/// A persisted student record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentRecord {
  pub id:          StudentId,
  #[serde(flatten)]
  pub fields:      StudentFields,
  /// Canonical per-student directory, written back by the store after folder
  /// creation or rename. `None` only on rows whose folder creation failed.
  pub folder_path: Option<PathBuf>,
  /// Set at insertion, never modified.
  pub created_at:  DateTime<Utc>,
}

/// The list-screen projection of a record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentSummary {
  pub id:     StudentId,
  pub name:   String,
  pub grade:  Grade,
  pub shift:  Shift,
  pub school: String,
}

#[cfg(test)]
mod tests {
  use std::str::FromStr;

  use super::{Grade, Shift};

  #[test]
  fn grade_labels_round_trip() {
    for grade in <Grade as strum::IntoEnumIterator>::iter() {
      assert_eq!(Grade::from_str(&grade.to_string()).unwrap(), grade);
    }
  }

  #[test]
  fn unknown_labels_are_rejected() {
    assert!(matches!(
      Grade::parse_label("10º Ano"),
      Err(crate::Error::InvalidGrade(_))
    ));
    assert!(matches!(
      Shift::parse_label("Noite"),
      Err(crate::Error::InvalidShift(_))
    ));
  }

  #[test]
  fn shift_labels() {
    assert_eq!(Shift::Morning.to_string(), "Manhã");
    assert_eq!(Shift::Afternoon.to_string(), "Tarde");
  }
}
