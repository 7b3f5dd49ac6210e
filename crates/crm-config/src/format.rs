//! Timezone-aware date, time and currency formatting.

use chrono::{
  DateTime, NaiveDate, Utc,
  format::{Item, StrftimeItems},
};
use chrono_tz::Tz;

use crate::{Error, Result, Settings};

/// Display helpers resolved from [`Settings`]: the configured zone is parsed
/// and every pattern is checked once, up front.
#[derive(Debug, Clone)]
pub struct Formats {
  timezone:        Tz,
  date_format:     String,
  datetime_format: String,
  currency_symbol: String,
}

impl Formats {
  pub fn from_settings(settings: &Settings) -> Result<Self> {
    let ui = &settings.ui;
    let timezone = ui
      .timezone
      .parse::<Tz>()
      .map_err(|_| Error::UnknownTimezone(ui.timezone.clone()))?;

    Ok(Self {
      timezone,
      date_format: checked_pattern("date_format", &ui.date_format)?,
      datetime_format: checked_pattern("datetime_format", &ui.datetime_format)?,
      currency_symbol: settings.business.currency_symbol.clone(),
    })
  }

  pub fn timezone(&self) -> Tz { self.timezone }

  /// A stored UTC timestamp in the configured zone and pattern.
  pub fn format_datetime(&self, dt: DateTime<Utc>) -> String {
    dt.with_timezone(&self.timezone)
      .format(&self.datetime_format)
      .to_string()
  }

  pub fn format_date(&self, date: NaiveDate) -> String {
    date.format(&self.date_format).to_string()
  }

  /// `1234.5` becomes `$1,234.50`.
  pub fn format_premium(&self, amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
      if i > 0 && (whole.len() - i) % 3 == 0 {
        grouped.push(',');
      }
      grouped.push(digit);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{sign}{}{grouped}.{cents}", self.currency_symbol)
  }
}

/// Reject strftime patterns chrono cannot render; rendering them later would
/// panic inside `to_string`.
fn checked_pattern(field: &'static str, pattern: &str) -> Result<String> {
  if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
    return Err(Error::InvalidFormat { field, pattern: pattern.to_owned() });
  }
  Ok(pattern.to_owned())
}
