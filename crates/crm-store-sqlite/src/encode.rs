//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are written as fixed-width RFC 3339 UTC strings, so text
//! ordering (and `MAX`) agrees with time ordering. Rows written by SQLite's
//! `CURRENT_TIMESTAMP` (`YYYY-MM-DD HH:MM:SS`) are read back as UTC. Calendar
//! dates are `YYYY-MM-DD`.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use crm_core::{
  communication::{CommType, Communication, CommunicationEntry},
  contact::{Contact, ContactStatus, ContactType},
  parse_variant,
  policy::{Policy, PolicyEntry, PolicyStatus},
};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
    return Ok(dt.with_timezone(&Utc));
  }
  // Naive values carry no offset and are taken to be UTC.
  ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
    .iter()
    .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    .map(|naive| naive.and_utc())
    .ok_or_else(|| Error::DateParse(format!("unrecognised timestamp: {s:?}")))
}

/// Years that encode to the fixed-width `YYYY-...` form.
pub fn is_storable_dt(dt: DateTime<Utc>) -> bool { (0..=9999).contains(&dt.year()) }

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── LIKE patterns ───────────────────────────────────────────────────────────

/// Escape character paired with [`contains_pattern`] in `LIKE … ESCAPE`.
pub const LIKE_ESCAPE: char = '\\';

/// Wrap `term` in `%…%` so it matches as an unanchored substring, escaping
/// any wildcard characters it contains.
pub fn contains_pattern(term: &str) -> String {
  let mut pattern = String::with_capacity(term.len() + 2);
  pattern.push('%');
  for ch in term.chars() {
    if matches!(ch, '%' | '_' | LIKE_ESCAPE) {
      pattern.push(LIKE_ESCAPE);
    }
    pattern.push(ch);
  }
  pattern.push('%');
  pattern
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `contacts` row plus the derived
/// `last_contacted_at` subquery.
pub struct RawContact {
  pub id:                i64,
  pub contact_type:      String,
  pub company_name:      Option<String>,
  pub first_name:        String,
  pub last_name:         String,
  pub title:             Option<String>,
  pub email:             Option<String>,
  pub phone:             Option<String>,
  pub mobile_phone:      Option<String>,
  pub address:           Option<String>,
  pub notes:             Option<String>,
  pub status:            String,
  pub created_at:        String,
  pub last_contacted_at: Option<String>,
}

impl RawContact {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:                row.get(0)?,
      contact_type:      row.get(1)?,
      company_name:      row.get(2)?,
      first_name:        row.get(3)?,
      last_name:         row.get(4)?,
      title:             row.get(5)?,
      email:             row.get(6)?,
      phone:             row.get(7)?,
      mobile_phone:      row.get(8)?,
      address:           row.get(9)?,
      notes:             row.get(10)?,
      status:            row.get(11)?,
      created_at:        row.get(12)?,
      last_contacted_at: row.get(13)?,
    })
  }

  pub fn into_contact(self) -> Result<Contact> {
    Ok(Contact {
      id:                self.id,
      contact_type:      parse_variant::<ContactType>("contact type", &self.contact_type)?,
      company_name:      self.company_name,
      first_name:        self.first_name,
      last_name:         self.last_name,
      title:             self.title,
      email:             self.email,
      phone:             self.phone,
      mobile_phone:      self.mobile_phone,
      address:           self.address,
      notes:             self.notes,
      status:            parse_variant::<ContactStatus>("contact status", &self.status)?,
      created_at:        decode_dt(&self.created_at)?,
      last_contacted_at: self
        .last_contacted_at
        .as_deref()
        .map(decode_dt)
        .transpose()?,
    })
  }
}

/// Raw values read from a `policies` row joined with its contact.
pub struct RawPolicyEntry {
  pub id:            i64,
  pub contact_id:    i64,
  pub policy_type:   String,
  pub policy_number: String,
  pub carrier:       String,
  pub premium:       f64,
  pub start_date:    String,
  pub renewal_date:  String,
  pub status:        String,
  pub notes:         Option<String>,
  pub created_at:    String,
  // contacts join
  pub contact_name:  String,
  pub company_name:  Option<String>,
}

impl RawPolicyEntry {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:            row.get(0)?,
      contact_id:    row.get(1)?,
      policy_type:   row.get(2)?,
      policy_number: row.get(3)?,
      carrier:       row.get(4)?,
      premium:       row.get(5)?,
      start_date:    row.get(6)?,
      renewal_date:  row.get(7)?,
      status:        row.get(8)?,
      notes:         row.get(9)?,
      created_at:    row.get(10)?,
      contact_name:  row.get(11)?,
      company_name:  row.get(12)?,
    })
  }

  pub fn into_entry(self) -> Result<PolicyEntry> {
    let policy = Policy {
      id:            self.id,
      contact_id:    self.contact_id,
      policy_type:   self.policy_type,
      policy_number: self.policy_number,
      carrier:       self.carrier,
      premium:       self.premium,
      start_date:    decode_date(&self.start_date)?,
      renewal_date:  decode_date(&self.renewal_date)?,
      status:        parse_variant::<PolicyStatus>("policy status", &self.status)?,
      notes:         self.notes,
      created_at:    decode_dt(&self.created_at)?,
    };
    Ok(PolicyEntry {
      policy,
      contact_name: self.contact_name,
      company_name: self.company_name,
    })
  }
}

/// Raw values read from a `communications` row joined with its contact.
pub struct RawCommunicationEntry {
  pub id:           i64,
  pub contact_id:   i64,
  pub comm_type:    String,
  pub comm_date:    String,
  pub details:      String,
  pub created_at:   String,
  // contacts join
  pub contact_name: String,
  pub company_name: Option<String>,
}

impl RawCommunicationEntry {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:           row.get(0)?,
      contact_id:   row.get(1)?,
      comm_type:    row.get(2)?,
      comm_date:    row.get(3)?,
      details:      row.get(4)?,
      created_at:   row.get(5)?,
      contact_name: row.get(6)?,
      company_name: row.get(7)?,
    })
  }

  pub fn into_entry(self) -> Result<CommunicationEntry> {
    let communication = Communication {
      id:         self.id,
      contact_id: self.contact_id,
      comm_type:  parse_variant::<CommType>("communication type", &self.comm_type)?,
      comm_date:  decode_dt(&self.comm_date)?,
      details:    self.details,
      created_at: decode_dt(&self.created_at)?,
    };
    Ok(CommunicationEntry {
      communication,
      contact_name: self.contact_name,
      company_name: self.company_name,
    })
  }
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;

  #[test]
  fn timestamps_are_fixed_width_utc() {
    let dt = Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap();
    assert_eq!(encode_dt(dt), "2024-03-05T14:07:09.000000000Z");
    assert_eq!(decode_dt(&encode_dt(dt)).unwrap(), dt);
  }

  #[test]
  fn sub_microsecond_precision_survives() {
    let dt = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap()
      + chrono::Duration::nanoseconds(123_456_789);
    assert_eq!(encode_dt(dt), "2024-05-01T09:00:00.123456789Z");
    assert_eq!(decode_dt(&encode_dt(dt)).unwrap(), dt);
  }

  #[test]
  fn decodes_offsets_and_sqlite_current_timestamp() {
    let expected = Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap();
    assert_eq!(decode_dt("2024-03-05T08:07:09-06:00").unwrap(), expected);
    assert_eq!(decode_dt("2024-03-05 14:07:09").unwrap(), expected);
    assert_eq!(decode_dt("2024-03-05T14:07:09").unwrap(), expected);
    assert!(decode_dt("yesterday").is_err());
  }

  #[test]
  fn contains_pattern_escapes_wildcards() {
    assert_eq!(contains_pattern("lee"), "%lee%");
    assert_eq!(contains_pattern("50%_off"), "%50\\%\\_off%");
    assert_eq!(contains_pattern("a\\b"), "%a\\\\b%");
  }
}
