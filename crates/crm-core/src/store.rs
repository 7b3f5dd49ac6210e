//! The `CrmStore` trait, the contract the presentation layer calls.
//!
//! Implemented by storage backends (e.g. `crm-store-sqlite`). Every method is
//! synchronous and commits before returning; no two calls share a
//! transaction.

use chrono::NaiveDate;

use crate::{
  communication::{CommunicationEntry, NewCommunication},
  contact::{Contact, ContactQuery, ContactStatus, NewContact},
  policy::{NewPolicy, PolicyEntry, PolicyQuery, PolicyStatus},
};

pub trait CrmStore {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Contacts ──────────────────────────────────────────────────────────

  /// Insert a contact and return its newly assigned id.
  fn add_contact(&self, input: &NewContact) -> Result<i64, Self::Error>;

  /// Non-deleted contacts matching `query`, each with its derived
  /// `last_contacted_at`, ordered by last name then first name.
  fn get_contacts(&self, query: &ContactQuery) -> Result<Vec<Contact>, Self::Error>;

  /// Overwrite every mutable column of contact `id` with `input`.
  ///
  /// Fields left empty in `input` are blanked in storage. Returns `false`
  /// if no such contact exists.
  fn update_contact(&self, id: i64, input: &NewContact) -> Result<bool, Self::Error>;

  /// Change only the status of contact `id`.
  fn set_contact_status(
    &self,
    id: i64,
    status: ContactStatus,
  ) -> Result<bool, Self::Error>;

  /// Soft-delete: shorthand for setting [`ContactStatus::Deleted`].
  fn delete_contact(&self, id: i64) -> Result<bool, Self::Error> {
    self.set_contact_status(id, ContactStatus::Deleted)
  }

  // ── Policies ──────────────────────────────────────────────────────────

  /// Insert a policy and return its newly assigned id.
  fn add_policy(&self, input: &NewPolicy) -> Result<i64, Self::Error>;

  /// Non-deleted policies matching `query`, joined with their contact's
  /// display name, ordered by renewal date.
  fn get_policies(&self, query: &PolicyQuery) -> Result<Vec<PolicyEntry>, Self::Error>;

  /// Overwrite every mutable column of policy `id` with `input`.
  fn update_policy(&self, id: i64, input: &NewPolicy) -> Result<bool, Self::Error>;

  /// Change only the status of policy `id`.
  fn set_policy_status(
    &self,
    id: i64,
    status: PolicyStatus,
  ) -> Result<bool, Self::Error>;

  /// Soft-delete: shorthand for setting [`PolicyStatus::Deleted`].
  fn delete_policy(&self, id: i64) -> Result<bool, Self::Error> {
    self.set_policy_status(id, PolicyStatus::Deleted)
  }

  /// Active policies of a contact whose renewal date is on or after `today`.
  fn current_policies(
    &self,
    contact_id: i64,
    today: NaiveDate,
  ) -> Result<Vec<PolicyEntry>, Self::Error>;

  // ── Communications (append-only) ──────────────────────────────────────

  /// Log a communication and return its newly assigned id.
  fn add_communication(&self, input: &NewCommunication) -> Result<i64, Self::Error>;

  /// All communications of a contact, most recent first.
  fn get_communications(
    &self,
    contact_id: i64,
  ) -> Result<Vec<CommunicationEntry>, Self::Error>;
}
