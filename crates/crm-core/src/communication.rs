//! Communications: the append-only log of interactions with a contact.
//!
//! `comm_date` is when the interaction happened and is supplied by the
//! caller. `created_at` is when it was logged and is set by the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

use crate::error::{ValidationError, require_non_blank};

/// The channel an interaction went through.
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
pub enum CommType {
  #[default]
  Unspecified,
  #[serde(rename = "Phone Call")]
  #[strum(serialize = "Phone Call")]
  PhoneCall,
  #[serde(rename = "Video Call")]
  #[strum(serialize = "Video Call")]
  VideoCall,
  #[serde(rename = "Face to Face")]
  #[strum(serialize = "Face to Face")]
  FaceToFace,
  #[serde(rename = "Text Message")]
  #[strum(serialize = "Text Message")]
  TextMessage,
  Email,
  Mail,
}

impl CommType {
  /// The text stored in the `comm_type` column.
  pub fn as_str(self) -> &'static str { self.into() }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Communication {
  pub id:         i64,
  pub contact_id: i64,
  pub comm_type:  CommType,
  pub comm_date:  DateTime<Utc>,
  pub details:    String,
  pub created_at: DateTime<Utc>,
}

/// A communication joined with the display fields of its contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunicationEntry {
  #[serde(flatten)]
  pub communication: Communication,
  pub contact_name:  String,
  /// Set only when the contact is a company.
  pub company_name:  Option<String>,
}

/// Input to [`crate::store::CrmStore::add_communication`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCommunication {
  pub contact_id: i64,
  pub comm_type:  CommType,
  pub comm_date:  DateTime<Utc>,
  pub details:    String,
}

impl NewCommunication {
  pub fn new(
    contact_id: i64,
    comm_type: CommType,
    comm_date: DateTime<Utc>,
    details: impl Into<String>,
  ) -> Self {
    Self { contact_id, comm_type, comm_date, details: details.into() }
  }

  pub fn validate(&self) -> Result<(), ValidationError> {
    require_non_blank("details", &self.details)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn comm_type_uses_display_labels() {
    assert_eq!(CommType::FaceToFace.to_string(), "Face to Face");
    assert_eq!(CommType::PhoneCall.as_str(), "Phone Call");
    assert_eq!("text message".parse::<CommType>().unwrap(), CommType::TextMessage);
    assert_eq!("Mail".parse::<CommType>().unwrap(), CommType::Mail);
    assert!("Carrier Pigeon".parse::<CommType>().is_err());
  }

  #[test]
  fn comm_type_serde_matches_storage_text() {
    let json = serde_json::to_string(&CommType::VideoCall).unwrap();
    assert_eq!(json, "\"Video Call\"");
  }

  #[test]
  fn details_are_required() {
    let input = NewCommunication::new(1, CommType::Email, Utc::now(), "   ");
    assert_eq!(input.validate().unwrap_err().field, "details");
  }
}
