//! Error type for `crm-config`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("failed to write {}: {source}", path.display())]
  Write {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("configuration error: {0}")]
  Config(#[from] config::ConfigError),

  #[error("unknown timezone: {0:?}")]
  UnknownTimezone(String),

  #[error("invalid {field} pattern: {pattern:?}")]
  InvalidFormat { field: &'static str, pattern: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
