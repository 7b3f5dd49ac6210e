//! Sample data: ten individuals and ten companies, each with a handful of
//! policies and a year of communications.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use crm_core::{
  communication::{CommType, NewCommunication},
  contact::{ContactQuery, ContactStatus, NewContact},
  policy::NewPolicy,
  store::CrmStore,
};
use crm_store_sqlite::{Error, WriteError};
use rand::{Rng, seq::SliceRandom};

const INDIVIDUAL_NAMES: &[(&str, &str)] = &[
  ("John", "Smith"),
  ("Mary", "Johnson"),
  ("Robert", "Williams"),
  ("Patricia", "Brown"),
  ("Michael", "Jones"),
  ("Jennifer", "Garcia"),
  ("William", "Miller"),
  ("Elizabeth", "Davis"),
  ("David", "Rodriguez"),
  ("Linda", "Martinez"),
];

const COMPANIES: &[(&str, (&str, &str))] = &[
  ("ABC Manufacturing Co.", ("James", "Wilson")),
  ("Tech Solutions Inc.", ("Sarah", "Anderson")),
  ("Global Logistics LLC", ("Thomas", "Taylor")),
  ("Sunshine Restaurants", ("Margaret", "Moore")),
  ("Premier Properties Group", ("Richard", "Jackson")),
  ("Valley Construction Inc.", ("Susan", "White")),
  ("Metro Healthcare Services", ("Joseph", "Harris")),
  ("Reliable Transport Corp.", ("Dorothy", "Martin")),
  ("Green Energy Systems", ("Charles", "Thompson")),
  ("Summit Financial Group", ("Nancy", "Lee")),
];

const TITLES: &[&str] = &[
  "CEO",
  "CFO",
  "Operations Manager",
  "HR Director",
  "General Manager",
  "Office Manager",
  "Finance Director",
  "Operations Director",
  "President",
  "Vice President",
];

const CARRIERS: &[&str] = &[
  "State Farm",
  "Allstate",
  "Progressive",
  "Liberty Mutual",
  "Nationwide",
  "Farmers Insurance",
  "GEICO",
  "Travelers",
  "American Family",
  "Hartford",
];

const PERSONAL_LINES: &[&str] = &["Auto", "Home", "Life", "Umbrella"];
const COMMERCIAL_LINES: &[&str] = &["Business", "Liability", "Workers Comp", "Property"];

const COMM_DETAILS: &[&str] = &[
  "Discussed policy renewal options",
  "Reviewed coverage details",
  "Updated contact information",
  "Processed policy changes",
  "Handled billing inquiry",
  "Discussed new policy options",
  "Annual policy review",
  "Claims discussion",
  "Premium payment confirmation",
  "Policy documentation request",
];

const COMM_TYPES: &[CommType] = &[
  CommType::PhoneCall,
  CommType::Email,
  CommType::FaceToFace,
  CommType::VideoCall,
  CommType::TextMessage,
];

/// Counts of what [`seed`] wrote.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
  pub contacts:       usize,
  pub policies:       usize,
  pub communications: usize,
}

/// Populate `store` with randomised sample records relative to `now`.
pub fn seed<S, R>(store: &S, rng: &mut R, now: DateTime<Utc>) -> Result<SeedSummary, Error>
where
  S: CrmStore<Error = Error>,
  R: Rng + ?Sized,
{
  let mut summary = SeedSummary::default();
  let today = now.date_naive();

  for &(first, last) in INDIVIDUAL_NAMES {
    let mut input = NewContact::individual(first, last);
    input.email = Some(email(rng, first, last));
    input.phone = Some(phone(rng));
    input.mobile_phone = rng.gen_bool(0.5).then(|| phone(rng));
    input.address = Some(address(rng));
    input.status = *[
      ContactStatus::Active,
      ContactStatus::Active,
      ContactStatus::Active,
      ContactStatus::Inactive,
      ContactStatus::Lead,
    ]
    .choose(rng)
    .unwrap_or(&ContactStatus::Active);
    input.notes = Some("Individual client".into());

    let id = store.add_contact(&input)?;
    summary.contacts += 1;

    for _ in 0..rng.gen_range(1..=3) {
      add_policy(store, rng, today, id, PERSONAL_LINES, 500.0..5_000.0, "Sample policy")?;
      summary.policies += 1;
    }
  }

  for &(company, (first, last)) in COMPANIES {
    let mut input = NewContact::company(company, first, last);
    input.title = TITLES.choose(rng).map(|t| t.to_string());
    input.email = Some(email(rng, first, last));
    input.phone = Some(phone(rng));
    input.mobile_phone = Some(phone(rng));
    input.address = Some(address(rng));
    input.status = *[
      ContactStatus::Active,
      ContactStatus::Active,
      ContactStatus::Active,
      ContactStatus::Inactive,
    ]
    .choose(rng)
    .unwrap_or(&ContactStatus::Active);
    input.notes = Some("Corporate client".into());

    let id = store.add_contact(&input)?;
    summary.contacts += 1;

    for _ in 0..rng.gen_range(2..=5) {
      add_policy(store, rng, today, id, COMMERCIAL_LINES, 2_000.0..50_000.0, "Corporate policy")?;
      summary.policies += 1;
    }
  }

  for contact in store.get_contacts(&ContactQuery::all())? {
    for _ in 0..rng.gen_range(3..=8) {
      let comm_date = now - Duration::seconds(rng.gen_range(0..365 * 24 * 60 * 60));
      let comm_type = *COMM_TYPES.choose(rng).unwrap_or(&CommType::Unspecified);
      let details = COMM_DETAILS.choose(rng).copied().unwrap_or("Check-in");
      store.add_communication(&NewCommunication::new(
        contact.id, comm_type, comm_date, details,
      ))?;
      summary.communications += 1;
    }
  }

  tracing::info!(
    contacts = summary.contacts,
    policies = summary.policies,
    communications = summary.communications,
    "seeded sample data"
  );
  Ok(summary)
}

/// Add one policy, drawing a fresh number if the random one is taken.
fn add_policy<S, R>(
  store: &S,
  rng: &mut R,
  today: NaiveDate,
  contact_id: i64,
  lines: &[&str],
  premiums: std::ops::Range<f64>,
  notes: &str,
) -> Result<i64, Error>
where
  S: CrmStore<Error = Error>,
  R: Rng + ?Sized,
{
  let carrier = CARRIERS.choose(rng).copied().unwrap_or("Hartford");
  let start_date = today - Duration::days(rng.gen_range(30..365 * 2));
  let renewal_date = start_date + Duration::days(365);
  let premium = (rng.gen_range(premiums) * 100.0).round() / 100.0;
  let policy_type = lines.choose(rng).copied().unwrap_or("Other");

  loop {
    let mut input = NewPolicy::new(
      contact_id,
      policy_type,
      policy_number(rng, carrier),
      carrier,
      premium,
      start_date,
      renewal_date,
    );
    input.notes = Some(notes.to_owned());

    match store.add_policy(&input) {
      Err(Error::Write(WriteError::DuplicatePolicyNumber(number))) => {
        tracing::debug!(%number, "policy number taken, drawing another");
      }
      result => return result,
    }
  }
}

/// `STA-123456` style: carrier prefix plus six digits.
fn policy_number<R: Rng + ?Sized>(rng: &mut R, carrier: &str) -> String {
  let prefix: String = carrier.chars().take(3).collect::<String>().to_uppercase();
  format!("{prefix}-{}", rng.gen_range(100_000..=999_999))
}

fn phone<R: Rng + ?Sized>(rng: &mut R) -> String {
  format!(
    "({}) {}-{}",
    rng.gen_range(200..=999),
    rng.gen_range(200..=999),
    rng.gen_range(1000..=9999)
  )
}

fn email<R: Rng + ?Sized>(rng: &mut R, first: &str, last: &str) -> String {
  let domain = ["gmail.com", "yahoo.com", "outlook.com", "aol.com", "hotmail.com"]
    .choose(rng)
    .copied()
    .unwrap_or("example.com");
  format!("{}.{}@{domain}", first.to_lowercase(), last.to_lowercase())
}

fn address<R: Rng + ?Sized>(rng: &mut R) -> String {
  let street = ["Main St", "Oak Ave", "Maple Dr", "Washington Blvd", "Park Rd"]
    .choose(rng)
    .copied()
    .unwrap_or("Main St");
  let city = ["Springfield", "Franklin", "Clinton", "Georgetown", "Salem"]
    .choose(rng)
    .copied()
    .unwrap_or("Springfield");
  let state = ["IL", "OH", "MI", "IN", "WI"].choose(rng).copied().unwrap_or("IL");
  format!(
    "{} {street}\n{city}, {state} {}",
    rng.gen_range(100..=9999),
    rng.gen_range(10_000..=99_999)
  )
}
