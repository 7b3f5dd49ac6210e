//! Plain-text and JSON output.

use anyhow::Result;
use crm_config::Formats;
use crm_core::{
  communication::CommunicationEntry,
  contact::{Contact, ContactType},
  policy::PolicyEntry,
};
use serde::Serialize;

pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
  println!("{}", serde_json::to_string_pretty(value)?);
  Ok(())
}

pub fn contacts(formats: &Formats, contacts: &[Contact]) {
  if contacts.is_empty() {
    println!("No contacts.");
    return;
  }
  println!(
    "{:>5}  {:<24} {:<26} {:<30} {:<16} {:<9} LAST CONTACTED",
    "ID", "NAME", "COMPANY", "EMAIL", "PHONE", "STATUS"
  );
  for c in contacts {
    println!(
      "{:>5}  {:<24} {:<26} {:<30} {:<16} {:<9} {}",
      c.id,
      c.display_name(),
      c.company_name.as_deref().unwrap_or("-"),
      c.email.as_deref().unwrap_or("-"),
      c.phone.as_deref().or(c.mobile_phone.as_deref()).unwrap_or("-"),
      c.status,
      c.last_contacted_at
        .map(|dt| formats.format_datetime(dt))
        .unwrap_or_else(|| "never".into()),
    );
  }
}

pub fn policies(formats: &Formats, policies: &[PolicyEntry]) {
  if policies.is_empty() {
    println!("No policies.");
    return;
  }
  println!(
    "{:>5}  {:<14} {:<13} {:<18} {:>13}  {:<10} {:<10} CONTACT",
    "ID", "NUMBER", "TYPE", "CARRIER", "PREMIUM", "START", "RENEWAL"
  );
  for e in policies {
    let p = &e.policy;
    let owner = match &e.company_name {
      Some(company) => format!("{} ({company})", e.contact_name),
      None => e.contact_name.clone(),
    };
    println!(
      "{:>5}  {:<14} {:<13} {:<18} {:>13}  {:<10} {:<10} {}",
      p.id,
      p.policy_number,
      p.policy_type,
      p.carrier,
      formats.format_premium(p.premium),
      formats.format_date(p.start_date),
      formats.format_date(p.renewal_date),
      owner,
    );
  }
}

pub fn communications(formats: &Formats, communications: &[CommunicationEntry]) {
  if communications.is_empty() {
    println!("No communications.");
    return;
  }
  for e in communications {
    let m = &e.communication;
    println!(
      "{:>5}  {}  {:<13} {}",
      m.id,
      formats.format_datetime(m.comm_date),
      m.comm_type,
      m.details,
    );
  }
}

pub fn contact_detail(
  formats: &Formats,
  contact: &Contact,
  policies: &[PolicyEntry],
  communications: &[CommunicationEntry],
) {
  println!("{} (#{})", contact.display_name(), contact.id);
  if contact.contact_type == ContactType::Company
    && let Some(company) = &contact.company_name
  {
    println!("  {:<15} {company}", "Company:");
  }

  let fields = [
    ("Title", contact.title.as_deref()),
    ("Email", contact.email.as_deref()),
    ("Phone", contact.phone.as_deref()),
    ("Mobile", contact.mobile_phone.as_deref()),
    ("Notes", contact.notes.as_deref()),
  ];
  for (label, value) in fields {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
      println!("  {:<15} {value}", format!("{label}:"));
    }
  }
  if let Some(address) = contact.address.as_deref().filter(|a| !a.is_empty()) {
    let mut lines = address.lines();
    if let Some(first) = lines.next() {
      println!("  {:<15} {first}", "Address:");
    }
    for line in lines {
      println!("  {:<15} {line}", "");
    }
  }
  println!("  {:<15} {}", "Status:", contact.status);
  println!("  {:<15} {}", "Created:", formats.format_datetime(contact.created_at));

  println!();
  println!("Current policies");
  self::policies(formats, policies);

  println!();
  println!("Communications");
  self::communications(formats, communications);
}
