//! Policies: insurance contracts held by a contact.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

use crate::error::{ValidationError, require_non_blank};

/// Conventional policy categories. `policy_type` itself is free text.
pub const POLICY_TYPES: &[&str] = &[
  "Auto",
  "Home",
  "Life",
  "Health",
  "Business",
  "Umbrella",
  "Liability",
  "Workers Comp",
  "Property",
  "Other",
];

/// The conventional spelling of `kind` when it names one of
/// [`POLICY_TYPES`] in any letter case; otherwise `kind` trimmed.
pub fn canonical_policy_type(kind: &str) -> String {
  let kind = kind.trim();
  POLICY_TYPES
    .iter()
    .find(|known| known.eq_ignore_ascii_case(kind))
    .map_or_else(|| kind.to_owned(), |known| (*known).to_owned())
}

/// Lifecycle of a policy. `Deleted` is the soft-delete marker.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum PolicyStatus {
  #[default]
  Active,
  Deleted,
}

impl PolicyStatus {
  /// The text stored in the `status` column.
  pub fn as_str(self) -> &'static str { self.into() }
}

// ─── Policy ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Policy {
  pub id:            i64,
  pub contact_id:    i64,
  pub policy_type:   String,
  /// Unique across every policy, whatever its status.
  pub policy_number: String,
  pub carrier:       String,
  pub premium:       f64,
  pub start_date:    NaiveDate,
  pub renewal_date:  NaiveDate,
  pub status:        PolicyStatus,
  pub notes:         Option<String>,
  pub created_at:    DateTime<Utc>,
}

impl Policy {
  /// Active and not yet past its renewal date.
  pub fn is_current(&self, today: NaiveDate) -> bool {
    self.status == PolicyStatus::Active && self.renewal_date >= today
  }
}

/// A policy joined with the display fields of its owning contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyEntry {
  #[serde(flatten)]
  pub policy:       Policy,
  /// `first_name last_name` of the owning contact.
  pub contact_name: String,
  pub company_name: Option<String>,
}

// ─── NewPolicy ───────────────────────────────────────────────────────────────

/// Input to [`crate::store::CrmStore::add_policy`] and the full-record
/// overwrite in [`crate::store::CrmStore::update_policy`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPolicy {
  pub contact_id:    i64,
  pub policy_type:   String,
  pub policy_number: String,
  pub carrier:       String,
  pub premium:       f64,
  pub start_date:    NaiveDate,
  pub renewal_date:  NaiveDate,
  pub status:        PolicyStatus,
  pub notes:         Option<String>,
}

impl NewPolicy {
  /// An active policy without notes.
  pub fn new(
    contact_id: i64,
    policy_type: impl Into<String>,
    policy_number: impl Into<String>,
    carrier: impl Into<String>,
    premium: f64,
    start_date: NaiveDate,
    renewal_date: NaiveDate,
  ) -> Self {
    Self {
      contact_id,
      policy_type: policy_type.into(),
      policy_number: policy_number.into(),
      carrier: carrier.into(),
      premium,
      start_date,
      renewal_date,
      status: PolicyStatus::Active,
      notes: None,
    }
  }

  pub fn validate(&self) -> Result<(), ValidationError> {
    require_non_blank("policy_type", &self.policy_type)?;
    require_non_blank("policy_number", &self.policy_number)?;
    require_non_blank("carrier", &self.carrier)?;
    if !self.premium.is_finite() || self.premium < 0.0 {
      return Err(ValidationError::new(
        "premium",
        format!("must be a non-negative amount, got {}", self.premium),
      ));
    }
    if self.start_date > self.renewal_date {
      return Err(ValidationError::new(
        "start_date",
        "start date must be on or before the renewal date",
      ));
    }
    Ok(())
  }
}

impl From<&Policy> for NewPolicy {
  fn from(p: &Policy) -> Self {
    Self {
      contact_id:    p.contact_id,
      policy_type:   p.policy_type.clone(),
      policy_number: p.policy_number.clone(),
      carrier:       p.carrier.clone(),
      premium:       p.premium,
      start_date:    p.start_date,
      renewal_date:  p.renewal_date,
      status:        p.status,
      notes:         p.notes.clone(),
    }
  }
}

// ─── Query ───────────────────────────────────────────────────────────────────

/// Parameters for [`crate::store::CrmStore::get_policies`].
///
/// `id` takes priority over `contact_id`. Deleted policies are always
/// excluded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PolicyQuery {
  pub id:         Option<i64>,
  pub contact_id: Option<i64>,
}

impl PolicyQuery {
  pub fn all() -> Self { Self::default() }

  pub fn by_id(id: i64) -> Self { Self { id: Some(id), contact_id: None } }

  pub fn for_contact(contact_id: i64) -> Self {
    Self { id: None, contact_id: Some(contact_id) }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  fn auto_policy() -> NewPolicy {
    NewPolicy::new(
      1,
      "Auto",
      "ABC-1",
      "X",
      100.0,
      date(2024, 1, 1),
      date(2025, 1, 1),
    )
  }

  #[test]
  fn valid_policy_passes() {
    assert!(auto_policy().validate().is_ok());
  }

  #[test]
  fn start_after_renewal_is_rejected() {
    let mut input = auto_policy();
    input.start_date = date(2025, 6, 1);
    let err = input.validate().unwrap_err();
    assert_eq!(err.field, "start_date");
  }

  #[test]
  fn same_day_start_and_renewal_is_allowed() {
    let mut input = auto_policy();
    input.renewal_date = input.start_date;
    assert!(input.validate().is_ok());
  }

  #[test]
  fn negative_or_nan_premium_is_rejected() {
    let mut input = auto_policy();
    input.premium = -0.01;
    assert_eq!(input.validate().unwrap_err().field, "premium");
    input.premium = f64::NAN;
    assert_eq!(input.validate().unwrap_err().field, "premium");
  }

  #[test]
  fn blank_policy_number_is_rejected() {
    let mut input = auto_policy();
    input.policy_number = " ".into();
    assert_eq!(input.validate().unwrap_err().field, "policy_number");
  }

  #[test]
  fn policy_type_takes_conventional_spelling() {
    assert_eq!(canonical_policy_type("auto"), "Auto");
    assert_eq!(canonical_policy_type(" workers comp "), "Workers Comp");
    assert_eq!(canonical_policy_type("Boat"), "Boat");
    assert_eq!(canonical_policy_type("  Pet "), "Pet");
  }

  #[test]
  fn current_means_active_and_not_past_renewal() {
    let policy = Policy {
      id:            1,
      contact_id:    1,
      policy_type:   "Home".into(),
      policy_number: "STA-100200".into(),
      carrier:       "State Farm".into(),
      premium:       1200.0,
      start_date:    date(2024, 1, 1),
      renewal_date:  date(2025, 1, 1),
      status:        PolicyStatus::Active,
      notes:         None,
      created_at:    Utc::now(),
    };
    assert!(policy.is_current(date(2025, 1, 1)));
    assert!(!policy.is_current(date(2025, 1, 2)));

    let deleted = Policy { status: PolicyStatus::Deleted, ..policy };
    assert!(!deleted.is_current(date(2024, 6, 1)));
  }
}
