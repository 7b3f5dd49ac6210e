//! Error type for `crm-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The database could not be opened or the schema could not be created.
  /// Fatal to the caller.
  #[error("failed to initialise store: {0}")]
  Init(#[source] rusqlite::Error),

  /// An insert or update was rejected by a constraint. Nothing was written.
  #[error("write rejected: {0}")]
  Write(#[from] WriteError),

  #[error("database error: {0}")]
  Database(#[from] rusqlite::Error),

  #[error("core error: {0}")]
  Core(#[from] crm_core::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),
}

impl Error {
  pub fn is_write(&self) -> bool { matches!(self, Self::Write(_)) }
}

/// The constraint a rejected write ran into.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WriteError {
  #[error("policy number {0:?} already exists")]
  DuplicatePolicyNumber(String),

  #[error("contact {0} does not exist")]
  UnknownContact(i64),

  #[error("constraint violation: {0}")]
  Constraint(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
