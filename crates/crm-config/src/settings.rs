//! The nested settings document (`config.json`).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Prefix for environment overrides, e.g. `CRM_DATABASE__PATH`.
const ENV_PREFIX: &str = "CRM";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
  pub database: DatabaseSettings,
  pub ui:       UiSettings,
  pub business: BusinessSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
  pub path:       PathBuf,
  pub backup_dir: PathBuf,
}

impl Default for DatabaseSettings {
  fn default() -> Self {
    Self {
      path:       PathBuf::from("insurance_crm.db"),
      backup_dir: PathBuf::from("backups"),
    }
  }
}

/// Presentation preferences. Formats are `strftime` patterns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
  pub theme:           String,
  pub date_format:     String,
  pub time_format:     String,
  pub datetime_format: String,
  /// IANA zone name used when showing timestamps.
  pub timezone:        String,
}

impl Default for UiSettings {
  fn default() -> Self {
    Self {
      theme:           "default".into(),
      date_format:     "%m-%d-%Y".into(),
      time_format:     "%I:%M %p".into(),
      datetime_format: "%m-%d-%Y %I:%M %p".into(),
      timezone:        "US/Central".into(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessSettings {
  pub company_name:    String,
  pub currency_symbol: String,
}

impl Default for BusinessSettings {
  fn default() -> Self {
    Self {
      company_name:    "Insurance CRM".into(),
      currency_symbol: "$".into(),
    }
  }
}

impl Settings {
  /// Load settings from the JSON file at `path`, layered over the defaults
  /// and under `CRM_`-prefixed environment variables.
  ///
  /// A missing file is created with the defaults. A file that cannot be
  /// parsed is ignored with a warning.
  pub fn load(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();

    if !path.exists() {
      tracing::info!(path = %path.display(), "no settings file, writing defaults");
      Self::default().save(path)?;
    }

    match Self::build(Some(path)) {
      Ok(settings) => Ok(settings),
      Err(Error::Config(e)) => {
        tracing::warn!(
          path = %path.display(),
          error = %e,
          "invalid settings file, using defaults"
        );
        Self::build(None)
      }
      Err(e) => Err(e),
    }
  }

  fn build(file: Option<&Path>) -> Result<Self> {
    let mut builder = config::Config::builder()
      .add_source(config::Config::try_from(&Self::default())?);

    if let Some(path) = file {
      builder = builder.add_source(
        config::File::from(path)
          .format(config::FileFormat::Json)
          .required(false),
      );
    }

    let settings = builder
      .add_source(
        config::Environment::with_prefix(ENV_PREFIX)
          .prefix_separator("_")
          .separator("__"),
      )
      .build()?
      .try_deserialize()?;
    Ok(settings)
  }

  /// Write these settings to `path` as pretty-printed JSON.
  pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(self)?;

    if let Some(parent) = path.parent()
      && !parent.as_os_str().is_empty()
    {
      std::fs::create_dir_all(parent).map_err(|source| Error::Write {
        path: parent.to_path_buf(),
        source,
      })?;
    }

    std::fs::write(path, json).map_err(|source| Error::Write {
      path: path.to_path_buf(),
      source,
    })
  }
}
