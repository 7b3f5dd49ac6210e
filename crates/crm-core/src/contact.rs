//! Contacts: the individuals and companies the agency deals with.
//!
//! A contact is never physically removed. Deletion is the status transition
//! to [`ContactStatus::Deleted`], and every normal read excludes such rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

use crate::error::{ValidationError, require_non_blank};

// ─── Enums ───────────────────────────────────────────────────────────────────

/// Whether a contact is a private person or represents a company.
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
pub enum ContactType {
  #[default]
  Individual,
  Company,
}

impl ContactType {
  /// The text stored in the `contact_type` column.
  pub fn as_str(self) -> &'static str { self.into() }
}

/// Business state of a contact. `Deleted` doubles as the soft-delete marker.
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
pub enum ContactStatus {
  #[default]
  Active,
  Inactive,
  Lead,
  Prospect,
  Deleted,
}

impl ContactStatus {
  /// The text stored in the `status` column.
  pub fn as_str(self) -> &'static str { self.into() }

  pub fn is_deleted(self) -> bool { matches!(self, Self::Deleted) }
}

// ─── Contact ─────────────────────────────────────────────────────────────────

/// A contact as read back from the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
  pub id:                i64,
  pub contact_type:      ContactType,
  /// Only meaningful when `contact_type` is [`ContactType::Company`].
  pub company_name:      Option<String>,
  pub first_name:        String,
  pub last_name:         String,
  pub title:             Option<String>,
  pub email:             Option<String>,
  pub phone:             Option<String>,
  pub mobile_phone:      Option<String>,
  /// Free text; may span several lines.
  pub address:           Option<String>,
  pub notes:             Option<String>,
  pub status:            ContactStatus,
  pub created_at:        DateTime<Utc>,
  /// Latest `comm_date` among this contact's communications. Computed per
  /// query, never stored.
  pub last_contacted_at: Option<DateTime<Utc>>,
}

impl Contact {
  /// `first_name last_name`, as shown next to policies and communications.
  pub fn display_name(&self) -> String {
    format!("{} {}", self.first_name, self.last_name)
  }
}

// ─── NewContact ──────────────────────────────────────────────────────────────

/// Input to [`crate::store::CrmStore::add_contact`] and the full-record
/// overwrite in [`crate::store::CrmStore::update_contact`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NewContact {
  pub contact_type: ContactType,
  pub company_name: Option<String>,
  pub first_name:   String,
  pub last_name:    String,
  pub title:        Option<String>,
  pub email:        Option<String>,
  pub phone:        Option<String>,
  pub mobile_phone: Option<String>,
  pub address:      Option<String>,
  pub notes:        Option<String>,
  pub status:       ContactStatus,
}

impl NewContact {
  /// An active individual with every optional field empty.
  pub fn individual(
    first_name: impl Into<String>,
    last_name: impl Into<String>,
  ) -> Self {
    Self {
      first_name: first_name.into(),
      last_name: last_name.into(),
      ..Self::default()
    }
  }

  /// An active company contact person.
  pub fn company(
    company_name: impl Into<String>,
    first_name: impl Into<String>,
    last_name: impl Into<String>,
  ) -> Self {
    Self {
      contact_type: ContactType::Company,
      company_name: Some(company_name.into()),
      ..Self::individual(first_name, last_name)
    }
  }

  /// Checks the form-level rules: both names present, and a company name
  /// whenever the contact is a company.
  pub fn validate(&self) -> Result<(), ValidationError> {
    if self.contact_type == ContactType::Company {
      require_non_blank(
        "company_name",
        self.company_name.as_deref().unwrap_or_default(),
      )?;
    }
    require_non_blank("first_name", &self.first_name)?;
    require_non_blank("last_name", &self.last_name)?;
    Ok(())
  }
}

impl From<&Contact> for NewContact {
  fn from(c: &Contact) -> Self {
    Self {
      contact_type: c.contact_type,
      company_name: c.company_name.clone(),
      first_name:   c.first_name.clone(),
      last_name:    c.last_name.clone(),
      title:        c.title.clone(),
      email:        c.email.clone(),
      phone:        c.phone.clone(),
      mobile_phone: c.mobile_phone.clone(),
      address:      c.address.clone(),
      notes:        c.notes.clone(),
      status:       c.status,
    }
  }
}

// ─── Query ───────────────────────────────────────────────────────────────────

/// Parameters for [`crate::store::CrmStore::get_contacts`].
///
/// `id` takes priority over `search`. Deleted contacts are excluded in every
/// case, including lookups by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactQuery {
  pub id:     Option<i64>,
  /// Case-insensitive substring over names, company, email and phones.
  pub search: Option<String>,
}

impl ContactQuery {
  pub fn all() -> Self { Self::default() }

  pub fn by_id(id: i64) -> Self { Self { id: Some(id), search: None } }

  pub fn search(term: impl Into<String>) -> Self {
    Self { id: None, search: Some(term.into()) }
  }
}
