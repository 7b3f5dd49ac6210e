//! Error types for `crm-core`.

use thiserror::Error;

/// A record failed an input check before reaching the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
  pub field:   &'static str,
  pub message: String,
}

impl ValidationError {
  pub fn new(field: &'static str, message: impl Into<String>) -> Self {
    Self { field, message: message.into() }
  }
}

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown {kind}: {value:?}")]
  UnknownVariant { kind: &'static str, value: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Reject values that are empty once surrounding whitespace is removed.
pub(crate) fn require_non_blank(
  field: &'static str,
  value: &str,
) -> Result<(), ValidationError> {
  if value.trim().is_empty() {
    return Err(ValidationError::new(field, "must not be empty"));
  }
  Ok(())
}

/// Parse a string-backed enum, naming the enum in the error.
pub fn parse_variant<T: std::str::FromStr>(
  kind: &'static str,
  value: &str,
) -> Result<T> {
  value.parse().map_err(|_| Error::UnknownVariant {
    kind,
    value: value.to_owned(),
  })
}
