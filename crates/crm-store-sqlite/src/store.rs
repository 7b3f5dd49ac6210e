//! [`SqliteStore`]: the SQLite implementation of [`CrmStore`].

use std::path::Path;

use chrono::{NaiveDate, Utc};
use crm_core::{
  communication::{CommunicationEntry, NewCommunication},
  contact::{Contact, ContactQuery, ContactStatus, NewContact},
  policy::{NewPolicy, PolicyEntry, PolicyQuery, PolicyStatus},
  store::CrmStore,
};
use rusqlite::{Connection, ErrorCode, ffi, params, types::Value};

use crate::{
  Error, Result, WriteError,
  encode::{
    LIKE_ESCAPE, RawCommunicationEntry, RawContact, RawPolicyEntry,
    contains_pattern, encode_date, encode_dt, is_storable_dt,
  },
  schema::{PRAGMAS, SCHEMA},
};

// ─── SQL ─────────────────────────────────────────────────────────────────────

const CONTACT_SELECT: &str = "
  SELECT
    c.id, c.contact_type, c.company_name, c.first_name, c.last_name,
    c.title, c.email, c.phone, c.mobile_phone, c.address, c.notes,
    c.status, c.created_at,
    (SELECT MAX(m.comm_date)
       FROM communications m
      WHERE m.contact_id = c.id) AS last_contacted_at
  FROM contacts c
  WHERE c.status != 'Deleted'";

const POLICY_SELECT: &str = "
  SELECT
    p.id, p.contact_id, p.policy_type, p.policy_number, p.carrier,
    p.premium, p.start_date, p.renewal_date, p.status, p.notes,
    p.created_at,
    c.first_name || ' ' || c.last_name AS contact_name,
    c.company_name
  FROM policies p
  JOIN contacts c ON c.id = p.contact_id
  WHERE p.status != 'Deleted'";

const COMMUNICATION_SELECT: &str = "
  SELECT
    m.id, m.contact_id, m.comm_type, m.comm_date, m.details, m.created_at,
    c.first_name || ' ' || c.last_name AS contact_name,
    CASE WHEN c.contact_type = 'Company' THEN c.company_name END
  FROM communications m
  JOIN contacts c ON c.id = m.contact_id
  WHERE m.contact_id = ?1
  ORDER BY m.comm_date DESC, m.id DESC";

// ─── Store ───────────────────────────────────────────────────────────────────

/// The CRM data store backed by a single SQLite file.
///
/// Holds one connection; treat it as the only writer.
pub struct SqliteStore {
  conn: Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let conn = Connection::open(path).map_err(Error::Init)?;
    let store = Self::from_connection(conn)?;
    tracing::info!(path = %path.display(), "opened CRM store");
    Ok(store)
  }

  /// Open an in-memory store, mostly for tests.
  pub fn open_in_memory() -> Result<Self> {
    let conn = Connection::open_in_memory().map_err(Error::Init)?;
    Self::from_connection(conn)
  }

  fn from_connection(conn: Connection) -> Result<Self> {
    conn.execute_batch(PRAGMAS).map_err(Error::Init)?;
    let store = Self { conn };
    store.init_schema()?;
    Ok(store)
  }

  /// Create any missing tables and indexes. Safe to call repeatedly.
  pub fn init_schema(&self) -> Result<()> {
    self.conn.execute_batch(SCHEMA).map_err(Error::Init)?;
    tracing::debug!("schema ready");
    Ok(())
  }

  /// The `PRAGMA user_version` recorded by the schema.
  pub fn schema_version(&self) -> Result<i64> {
    Ok(self.conn.query_row("PRAGMA user_version", [], |r| r.get(0))?)
  }

  /// Number of contact rows, soft-deleted ones included.
  pub fn count_contacts(&self) -> Result<i64> {
    Ok(
      self
        .conn
        .query_row("SELECT COUNT(*) FROM contacts", [], |r| r.get(0))?,
    )
  }

  #[cfg(test)]
  pub(crate) fn conn_for_tests(&self) -> &Connection { &self.conn }

  fn query_contacts(&self, sql: &str, params: &[Value]) -> Result<Vec<Contact>> {
    let mut stmt = self.conn.prepare(sql)?;
    let raws = stmt
      .query_map(rusqlite::params_from_iter(params), RawContact::from_row)?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    raws.into_iter().map(RawContact::into_contact).collect()
  }

  fn query_policies(
    &self,
    sql: &str,
    params: &[Value],
  ) -> Result<Vec<PolicyEntry>> {
    let mut stmt = self.conn.prepare(sql)?;
    let raws = stmt
      .query_map(rusqlite::params_from_iter(params), RawPolicyEntry::from_row)?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    raws.into_iter().map(RawPolicyEntry::into_entry).collect()
  }
}

/// Translate a failed write into [`Error::Write`] when SQLite rejected it on
/// a constraint; anything else stays a database error.
fn write_error(
  err: rusqlite::Error,
  policy_number: Option<&str>,
  contact_id: Option<i64>,
) -> Error {
  let (failure, message) = match err {
    rusqlite::Error::SqliteFailure(failure, message)
      if failure.code == ErrorCode::ConstraintViolation =>
    {
      (failure, message)
    }
    other => return Error::Database(other),
  };

  let rejected = match (failure.extended_code, policy_number, contact_id) {
    (ffi::SQLITE_CONSTRAINT_UNIQUE, Some(number), _) => {
      WriteError::DuplicatePolicyNumber(number.to_owned())
    }
    (ffi::SQLITE_CONSTRAINT_FOREIGNKEY, _, Some(id)) => {
      WriteError::UnknownContact(id)
    }
    _ => WriteError::Constraint(message.unwrap_or_else(|| failure.to_string())),
  };

  tracing::warn!(error = %rejected, "write rejected");
  Error::Write(rejected)
}

// ─── CrmStore impl ───────────────────────────────────────────────────────────

impl CrmStore for SqliteStore {
  type Error = Error;

  // ── Contacts ──────────────────────────────────────────────────────────────

  fn add_contact(&self, input: &NewContact) -> Result<i64> {
    self
      .conn
      .execute(
        "INSERT INTO contacts (
           contact_type, company_name, first_name, last_name, title,
           email, phone, mobile_phone, address, notes, status, created_at
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        params![
          input.contact_type.as_str(),
          input.company_name,
          input.first_name,
          input.last_name,
          input.title,
          input.email,
          input.phone,
          input.mobile_phone,
          input.address,
          input.notes,
          input.status.as_str(),
          encode_dt(Utc::now()),
        ],
      )
      .map_err(|e| write_error(e, None, None))?;

    let id = self.conn.last_insert_rowid();
    tracing::debug!(id, "added contact");
    Ok(id)
  }

  fn get_contacts(&self, query: &ContactQuery) -> Result<Vec<Contact>> {
    let search = query.search.as_deref().filter(|term| !term.is_empty());

    let (filter, params) = match (query.id, search) {
      (Some(id), _) => (" AND c.id = ?1".to_owned(), vec![Value::Integer(id)]),
      (None, Some(term)) => {
        let columns = [
          "c.first_name",
          "c.last_name",
          "c.company_name",
          "c.email",
          "c.phone",
          "c.mobile_phone",
        ];
        let ors = columns
          .iter()
          .map(|col| format!("{col} LIKE ?1 ESCAPE '{LIKE_ESCAPE}'"))
          .collect::<Vec<_>>()
          .join(" OR ");
        (format!(" AND ({ors})"), vec![Value::Text(contains_pattern(term))])
      }
      (None, None) => (String::new(), Vec::new()),
    };

    let sql = format!("{CONTACT_SELECT}{filter} ORDER BY c.last_name, c.first_name");
    self.query_contacts(&sql, &params)
  }

  fn update_contact(&self, id: i64, input: &NewContact) -> Result<bool> {
    let changed = self
      .conn
      .execute(
        "UPDATE contacts
            SET contact_type = ?1, company_name = ?2, first_name = ?3,
                last_name = ?4, title = ?5, email = ?6, phone = ?7,
                mobile_phone = ?8, address = ?9, notes = ?10, status = ?11
          WHERE id = ?12",
        params![
          input.contact_type.as_str(),
          input.company_name,
          input.first_name,
          input.last_name,
          input.title,
          input.email,
          input.phone,
          input.mobile_phone,
          input.address,
          input.notes,
          input.status.as_str(),
          id,
        ],
      )
      .map_err(|e| write_error(e, None, None))?;

    tracing::debug!(id, changed, "updated contact");
    Ok(changed > 0)
  }

  fn set_contact_status(&self, id: i64, status: ContactStatus) -> Result<bool> {
    let changed = self
      .conn
      .execute(
        "UPDATE contacts SET status = ?1 WHERE id = ?2",
        params![status.as_str(), id],
      )
      .map_err(|e| write_error(e, None, None))?;

    tracing::debug!(id, %status, changed, "set contact status");
    Ok(changed > 0)
  }

  // ── Policies ──────────────────────────────────────────────────────────────

  fn add_policy(&self, input: &NewPolicy) -> Result<i64> {
    self
      .conn
      .execute(
        "INSERT INTO policies (
           contact_id, policy_type, policy_number, carrier, premium,
           start_date, renewal_date, notes, status, created_at
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
          input.contact_id,
          input.policy_type,
          input.policy_number,
          input.carrier,
          input.premium,
          encode_date(input.start_date),
          encode_date(input.renewal_date),
          input.notes,
          input.status.as_str(),
          encode_dt(Utc::now()),
        ],
      )
      .map_err(|e| {
        write_error(e, Some(&input.policy_number), Some(input.contact_id))
      })?;

    let id = self.conn.last_insert_rowid();
    tracing::debug!(id, contact_id = input.contact_id, "added policy");
    Ok(id)
  }

  fn get_policies(&self, query: &PolicyQuery) -> Result<Vec<PolicyEntry>> {
    let (filter, params) = match (query.id, query.contact_id) {
      (Some(id), _) => (" AND p.id = ?1", vec![Value::Integer(id)]),
      (None, Some(contact_id)) => {
        (" AND p.contact_id = ?1", vec![Value::Integer(contact_id)])
      }
      (None, None) => ("", Vec::new()),
    };

    let sql = format!("{POLICY_SELECT}{filter} ORDER BY p.renewal_date, p.id");
    self.query_policies(&sql, &params)
  }

  fn update_policy(&self, id: i64, input: &NewPolicy) -> Result<bool> {
    let changed = self
      .conn
      .execute(
        "UPDATE policies
            SET contact_id = ?1, policy_type = ?2, policy_number = ?3,
                carrier = ?4, premium = ?5, start_date = ?6,
                renewal_date = ?7, notes = ?8, status = ?9
          WHERE id = ?10",
        params![
          input.contact_id,
          input.policy_type,
          input.policy_number,
          input.carrier,
          input.premium,
          encode_date(input.start_date),
          encode_date(input.renewal_date),
          input.notes,
          input.status.as_str(),
          id,
        ],
      )
      .map_err(|e| {
        write_error(e, Some(&input.policy_number), Some(input.contact_id))
      })?;

    tracing::debug!(id, changed, "updated policy");
    Ok(changed > 0)
  }

  fn set_policy_status(&self, id: i64, status: PolicyStatus) -> Result<bool> {
    let changed = self
      .conn
      .execute(
        "UPDATE policies SET status = ?1 WHERE id = ?2",
        params![status.as_str(), id],
      )
      .map_err(|e| write_error(e, None, None))?;

    tracing::debug!(id, %status, changed, "set policy status");
    Ok(changed > 0)
  }

  fn current_policies(
    &self,
    contact_id: i64,
    today: NaiveDate,
  ) -> Result<Vec<PolicyEntry>> {
    let mut entries = self.get_policies(&PolicyQuery::for_contact(contact_id))?;
    entries.retain(|e| e.policy.is_current(today));
    Ok(entries)
  }

  // ── Communications (append-only) ──────────────────────────────────────────

  fn add_communication(&self, input: &NewCommunication) -> Result<i64> {
    if !is_storable_dt(input.comm_date) {
      let rejected = WriteError::Constraint(format!(
        "comm_date {} is outside years 0000-9999",
        input.comm_date
      ));
      tracing::warn!(error = %rejected, "write rejected");
      return Err(rejected.into());
    }

    self
      .conn
      .execute(
        "INSERT INTO communications (
           contact_id, comm_type, comm_date, details, created_at
         ) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
          input.contact_id,
          input.comm_type.as_str(),
          encode_dt(input.comm_date),
          input.details,
          encode_dt(Utc::now()),
        ],
      )
      .map_err(|e| write_error(e, None, Some(input.contact_id)))?;

    let id = self.conn.last_insert_rowid();
    tracing::debug!(id, contact_id = input.contact_id, "logged communication");
    Ok(id)
  }

  fn get_communications(&self, contact_id: i64) -> Result<Vec<CommunicationEntry>> {
    let mut stmt = self.conn.prepare(COMMUNICATION_SELECT)?;
    let raws = stmt
      .query_map(params![contact_id], RawCommunicationEntry::from_row)?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    raws
      .into_iter()
      .map(RawCommunicationEntry::into_entry)
      .collect()
  }
}
