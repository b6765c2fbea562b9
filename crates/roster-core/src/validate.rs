//! Validation and formatting helpers, shared by the core and any front end.
//!
//! Deliberately UI-independent: an interactive form runs the incremental
//! masks on every keystroke, the store runs [`StudentFields::validate`]
//! before persisting, and both see the same rules.

use chrono::NaiveDate;

use crate::{
  error::{Error, Result},
  record::StudentFields,
};

fn digits(s: &str) -> String {
  s.chars().filter(|c| c.is_ascii_digit()).collect()
}

// ─── Checks ──────────────────────────────────────────────────────────────────

/// Basic email shape check: `local@host.tld` with restricted character sets.
/// Empty input is valid — the field is optional.
pub fn validate_email(email: &str) -> bool {
  if email.is_empty() {
    return true;
  }
  let Some((local, domain)) = email.split_once('@') else {
    return false;
  };
  if local.is_empty()
    || !local
      .chars()
      .all(|c| c.is_ascii_alphanumeric() || "_.+-".contains(c))
  {
    return false;
  }
  let Some((host, rest)) = domain.split_once('.') else {
    return false;
  };
  if host.is_empty()
    || !host.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
  {
    return false;
  }
  !rest.is_empty()
    && rest
      .chars()
      .all(|c| c.is_ascii_alphanumeric() || ".-".contains(c))
}

/// A phone is valid when empty (optional) or when exactly 11 digits remain
/// after stripping punctuation.
pub fn validate_phone(phone: &str) -> bool {
  if phone.is_empty() {
    return true;
  }
  digits(phone).len() == 11
}

// ─── Display formatting ──────────────────────────────────────────────────────

/// Format an 11-digit phone as `(XX) XXXXX-XXXX`; anything else is returned
/// unchanged.
pub fn format_phone(phone: &str) -> String {
  let d = digits(phone);
  if d.len() == 11 {
    format!("({}) {}-{}", &d[..2], &d[2..7], &d[7..])
  } else {
    phone.to_string()
  }
}

/// Convert an ISO `yyyy-mm-dd` date to the display form `dd/mm/yyyy`;
/// anything else is returned unchanged.
pub fn format_date(date: &str) -> String {
  match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
    Ok(d) => d.format("%d/%m/%Y").to_string(),
    Err(_) => date.to_string(),
  }
}

// ─── Incremental input masks ─────────────────────────────────────────────────

/// Phone mask applied on every keystroke: digits capped at 11, punctuation
/// re-inserted progressively, so partial input like `119` renders as
/// `(11) 9`.
pub fn phone_input_mask(input: &str) -> String {
  let d: String = digits(input).chars().take(11).collect();
  match d.len() {
    0 => String::new(),
    1..=2 => format!("({d})"),
    3..=6 => format!("({}) {}", &d[..2], &d[2..]),
    _ => format!("({}) {}-{}", &d[..2], &d[2..7], &d[7..]),
  }
}

/// Birth-date mask: digits capped at 8, slashes inserted after the day and
/// month groups.
pub fn date_input_mask(input: &str) -> String {
  let d: String = digits(input).chars().take(8).collect();
  match d.len() {
    0..=2 => d,
    3..=4 => format!("{}/{}", &d[..2], &d[2..]),
    _ => format!("{}/{}/{}", &d[..2], &d[2..4], &d[4..]),
  }
}

// ─── Whole-tuple validation ──────────────────────────────────────────────────

impl StudentFields {
  /// Reject empty required fields and malformed optional contact data.
  ///
  /// Callers are expected to validate before invoking the store; the store
  /// still re-runs this so its contract holds for any caller. Grade and
  /// shift are correct by construction here — their textual parse failures
  /// surface where the labels are parsed.
  pub fn validate(&self) -> Result<()> {
    let required: [(&'static str, &str); 8] = [
      ("name", &self.name),
      ("mother_name", &self.mother_name),
      ("whatsapp_phone", &self.whatsapp_phone),
      ("street", &self.street),
      ("neighborhood", &self.neighborhood),
      ("house_number", &self.house_number),
      ("city", &self.city),
      ("school", &self.school),
    ];
    for (field, value) in required {
      if value.trim().is_empty() {
        return Err(Error::MissingField(field));
      }
    }

    if let Some(email) = self.email.as_deref()
      && !validate_email(email)
    {
      return Err(Error::InvalidEmail(email.to_string()));
    }
    if !validate_phone(&self.whatsapp_phone) {
      return Err(Error::InvalidPhone(self.whatsapp_phone.clone()));
    }
    if let Some(phone) = self.secondary_phone.as_deref()
      && !validate_phone(phone)
    {
      return Err(Error::InvalidPhone(phone.to_string()));
    }

    Ok(())
  }
}
