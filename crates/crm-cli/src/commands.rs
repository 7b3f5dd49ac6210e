//! Subcommands and their handlers.
//!
//! Every write goes through the record's `validate()` first, so form-level
//! mistakes are reported before the store sees them.

use anyhow::{Context, Result, anyhow, bail};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Subcommand};
use crm_config::Formats;
use crm_core::{
  communication::{CommType, NewCommunication},
  contact::{ContactQuery, ContactStatus, ContactType, NewContact},
  policy::{NewPolicy, POLICY_TYPES, PolicyQuery, canonical_policy_type},
  store::CrmStore,
};
use crm_store_sqlite::SqliteStore;

use crate::{render, seed};

// ─── Command tree ─────────────────────────────────────────────────────────────

#[derive(Subcommand, Debug)]
pub enum Command {
  /// Manage contacts.
  #[command(subcommand)]
  Contact(ContactCommand),
  /// Manage policies.
  #[command(subcommand)]
  Policy(PolicyCommand),
  /// Log and review communications.
  #[command(subcommand)]
  Comm(CommCommand),
  /// Fill an empty store with sample contacts, policies and communications.
  Seed {
    /// Seed even if the store already holds contacts.
    #[arg(long)]
    force: bool,
  },
}

#[derive(Subcommand, Debug)]
pub enum ContactCommand {
  Add {
    #[arg(long)]
    first:   String,
    #[arg(long)]
    last:    String,
    #[command(flatten)]
    details: ContactDetails,
  },
  List {
    /// Substring matched against names, company, email and phone numbers.
    #[arg(short, long)]
    search: Option<String>,
    #[arg(long)]
    json:   bool,
  },
  /// Show a contact with its current policies and communications.
  Show {
    id:   i64,
    #[arg(long)]
    json: bool,
  },
  /// Change some fields of a contact; the rest keep their current values.
  Edit {
    id:         i64,
    #[arg(long)]
    first:      Option<String>,
    #[arg(long)]
    last:       Option<String>,
    /// Turn a company contact back into an individual.
    #[arg(long, conflicts_with = "company")]
    individual: bool,
    #[command(flatten)]
    details:    ContactDetails,
  },
  /// Mark a contact as deleted.
  Delete { id: i64 },
}

/// Optional contact fields shared by `add` and `edit`. An empty value clears
/// the field.
#[derive(Args, Debug, Default)]
pub struct ContactDetails {
  /// Company name; makes the contact a company contact.
  #[arg(long)]
  company: Option<String>,
  #[arg(long)]
  title:   Option<String>,
  #[arg(long)]
  email:   Option<String>,
  #[arg(long)]
  phone:   Option<String>,
  #[arg(long)]
  mobile:  Option<String>,
  #[arg(long)]
  address: Option<String>,
  #[arg(long)]
  notes:   Option<String>,
  /// Active, Inactive, Lead or Prospect.
  #[arg(long)]
  status:  Option<ContactStatus>,
}

impl ContactDetails {
  fn apply(self, input: &mut NewContact) {
    if let Some(company) = self.company {
      input.contact_type = ContactType::Company;
      input.company_name = non_empty(company);
    }
    set_optional(&mut input.title, self.title);
    set_optional(&mut input.email, self.email);
    set_optional(&mut input.phone, self.phone);
    set_optional(&mut input.mobile_phone, self.mobile);
    set_optional(&mut input.address, self.address);
    set_optional(&mut input.notes, self.notes);
    if let Some(status) = self.status {
      input.status = status;
    }
  }
}

#[derive(Subcommand, Debug)]
pub enum PolicyCommand {
  Add {
    #[arg(long)]
    contact:  i64,
    /// Category; conventional ones are matched case-insensitively.
    #[arg(long = "type", long_help = policy_type_help())]
    kind:     String,
    #[arg(long)]
    number:   String,
    #[arg(long)]
    carrier:  String,
    #[arg(long)]
    premium:  f64,
    /// First day of cover (YYYY-MM-DD).
    #[arg(long)]
    start:    NaiveDate,
    /// Renewal date (YYYY-MM-DD).
    #[arg(long)]
    renewal:  NaiveDate,
    #[arg(long)]
    notes:    Option<String>,
  },
  List {
    /// Only policies of this contact.
    #[arg(long)]
    contact: Option<i64>,
    #[arg(long)]
    json:    bool,
  },
  /// Change some fields of a policy; the rest keep their current values.
  Edit {
    id:      i64,
    #[arg(long)]
    contact: Option<i64>,
    #[arg(long = "type")]
    kind:    Option<String>,
    #[arg(long)]
    number:  Option<String>,
    #[arg(long)]
    carrier: Option<String>,
    #[arg(long)]
    premium: Option<f64>,
    #[arg(long)]
    start:   Option<NaiveDate>,
    #[arg(long)]
    renewal: Option<NaiveDate>,
    #[arg(long)]
    notes:   Option<String>,
  },
  /// Mark a policy as deleted.
  Delete { id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum CommCommand {
  Add {
    contact: i64,
    /// What was discussed.
    details: String,
    /// Phone Call, Video Call, Face to Face, Text Message, Email or Mail.
    #[arg(long = "type", default_value = "Unspecified")]
    kind:    CommType,
    /// When it happened (RFC 3339); defaults to now.
    #[arg(long)]
    date:    Option<DateTime<Utc>>,
  },
  List {
    contact: i64,
    #[arg(long)]
    json:    bool,
  },
}

// ─── Dispatch ─────────────────────────────────────────────────────────────────

pub fn run(store: &SqliteStore, formats: &Formats, command: Command) -> Result<()> {
  match command {
    Command::Contact(cmd) => contact(store, formats, cmd),
    Command::Policy(cmd) => policy(store, formats, cmd),
    Command::Comm(cmd) => comm(store, formats, cmd),
    Command::Seed { force } => {
      let existing = store.count_contacts()?;
      if existing > 0 && !force {
        bail!("store already holds {existing} contacts; pass --force to seed anyway");
      }
      let summary = seed::seed(store, &mut rand::thread_rng(), Utc::now())?;
      println!(
        "Seeded {} contacts, {} policies and {} communications.",
        summary.contacts, summary.policies, summary.communications
      );
      Ok(())
    }
  }
}

fn contact<S>(store: &S, formats: &Formats, cmd: ContactCommand) -> Result<()>
where
  S: CrmStore,
{
  match cmd {
    ContactCommand::Add { first, last, details } => {
      let mut input = NewContact::individual(first, last);
      details.apply(&mut input);
      check_contact(&input)?;
      let id = store.add_contact(&input)?;
      println!("Added contact {id}.");
    }
    ContactCommand::List { search, json } => {
      let contacts = store.get_contacts(&search_query(search))?;
      if json {
        render::json(&contacts)?;
      } else {
        render::contacts(formats, &contacts);
      }
    }
    ContactCommand::Show { id, json } => {
      let contact = store
        .get_contacts(&ContactQuery::by_id(id))?
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("contact {id} not found"))?;
      let today = Utc::now().with_timezone(&formats.timezone()).date_naive();
      let policies = store.current_policies(id, today)?;
      let communications = store.get_communications(id)?;
      if json {
        render::json(&serde_json::json!({
          "contact": contact,
          "policies": policies,
          "communications": communications,
        }))?;
      } else {
        render::contact_detail(formats, &contact, &policies, &communications);
      }
    }
    ContactCommand::Edit { id, first, last, individual, details } => {
      let current = store
        .get_contacts(&ContactQuery::by_id(id))?
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("contact {id} not found"))?;

      let mut input = NewContact::from(&current);
      if let Some(first) = first {
        input.first_name = first;
      }
      if let Some(last) = last {
        input.last_name = last;
      }
      if individual {
        input.contact_type = ContactType::Individual;
        input.company_name = None;
      }
      details.apply(&mut input);
      check_contact(&input)?;

      store.update_contact(id, &input)?;
      println!("Updated contact {id}.");
    }
    ContactCommand::Delete { id } => {
      if !store.delete_contact(id)? {
        bail!("contact {id} not found");
      }
      println!("Deleted contact {id}.");
    }
  }
  Ok(())
}

fn policy<S>(store: &S, formats: &Formats, cmd: PolicyCommand) -> Result<()>
where
  S: CrmStore,
{
  match cmd {
    PolicyCommand::Add {
      contact,
      kind,
      number,
      carrier,
      premium,
      start,
      renewal,
      notes,
    } => {
      let kind = canonical_policy_type(&kind);
      let mut input =
        NewPolicy::new(contact, kind, number, carrier, premium, start, renewal);
      input.notes = notes.and_then(non_empty);
      input.validate().context("invalid policy")?;
      let id = store.add_policy(&input)?;
      println!("Added policy {id}.");
    }
    PolicyCommand::List { contact, json } => {
      let query = PolicyQuery { id: None, contact_id: contact };
      let policies = store.get_policies(&query)?;
      if json {
        render::json(&policies)?;
      } else {
        render::policies(formats, &policies);
      }
    }
    PolicyCommand::Edit {
      id,
      contact,
      kind,
      number,
      carrier,
      premium,
      start,
      renewal,
      notes,
    } => {
      let current = store
        .get_policies(&PolicyQuery::by_id(id))?
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("policy {id} not found"))?;

      let mut input = NewPolicy::from(&current.policy);
      input.contact_id = contact.unwrap_or(input.contact_id);
      if let Some(kind) = kind {
        input.policy_type = canonical_policy_type(&kind);
      }
      input.policy_number = number.unwrap_or(input.policy_number);
      input.carrier = carrier.unwrap_or(input.carrier);
      input.premium = premium.unwrap_or(input.premium);
      input.start_date = start.unwrap_or(input.start_date);
      input.renewal_date = renewal.unwrap_or(input.renewal_date);
      set_optional(&mut input.notes, notes);
      input.validate().context("invalid policy")?;

      store.update_policy(id, &input)?;
      println!("Updated policy {id}.");
    }
    PolicyCommand::Delete { id } => {
      if !store.delete_policy(id)? {
        bail!("policy {id} not found");
      }
      println!("Deleted policy {id}.");
    }
  }
  Ok(())
}

fn comm<S>(store: &S, formats: &Formats, cmd: CommCommand) -> Result<()>
where
  S: CrmStore,
{
  match cmd {
    CommCommand::Add { contact, details, kind, date } => {
      let input = NewCommunication::new(
        contact,
        kind,
        date.unwrap_or_else(Utc::now),
        details.trim(),
      );
      input.validate().context("invalid communication")?;
      let id = store.add_communication(&input)?;
      println!("Logged communication {id}.");
    }
    CommCommand::List { contact, json } => {
      let communications = store.get_communications(contact)?;
      if json {
        render::json(&communications)?;
      } else {
        render::communications(formats, &communications);
      }
    }
  }
  Ok(())
}

// ─── Helpers ──────────────────────────────────────────────────────────────────

fn policy_type_help() -> String {
  format!(
    "Category of cover. Free text; {} are matched case-insensitively and \
     stored with that spelling.",
    POLICY_TYPES.join(", ")
  )
}

/// Form-level checks before a contact write. Deleting goes through
/// `contact delete`, never through a status edit.
fn check_contact(input: &NewContact) -> Result<()> {
  if input.status.is_deleted() {
    bail!("use `crm contact delete` to delete a contact");
  }
  input.validate().context("invalid contact")?;
  Ok(())
}

/// Search box input: surrounding whitespace is dropped, and a blank term
/// lists everything.
fn search_query(term: Option<String>) -> ContactQuery {
  ContactQuery { id: None, search: term.and_then(non_empty) }
}

fn non_empty(value: String) -> Option<String> {
  let trimmed = value.trim();
  (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

/// `Some("")` clears the field, `None` leaves it alone.
fn set_optional(field: &mut Option<String>, value: Option<String>) {
  if let Some(value) = value {
    *field = non_empty(value);
  }
}
