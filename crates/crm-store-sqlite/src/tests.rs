//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use crm_core::{
  communication::{CommType, NewCommunication},
  contact::{ContactQuery, ContactStatus, ContactType, NewContact},
  policy::{NewPolicy, PolicyQuery, PolicyStatus},
  store::CrmStore,
};

use crate::{Error, SqliteStore, WriteError, schema};

fn store() -> SqliteStore {
  SqliteStore::open_in_memory().expect("in-memory store")
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
  Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

fn policy(contact_id: i64, number: &str, renewal: NaiveDate) -> NewPolicy {
  NewPolicy::new(
    contact_id,
    "Auto",
    number,
    "X",
    100.0,
    renewal - Duration::days(365),
    renewal,
  )
}

fn note(contact_id: i64, when: DateTime<Utc>) -> NewCommunication {
  NewCommunication::new(contact_id, CommType::PhoneCall, when, "Discussed renewal")
}

// ─── Schema ──────────────────────────────────────────────────────────────────

#[test]
fn schema_init_is_idempotent() {
  let s = store();
  s.init_schema().unwrap();
  s.init_schema().unwrap();

  let tables: i64 = s
    .conn_for_tests()
    .query_row(
      "SELECT COUNT(*) FROM sqlite_master
        WHERE type = 'table'
          AND name IN ('contacts', 'policies', 'communications')",
      [],
      |r| r.get(0),
    )
    .unwrap();
  assert_eq!(tables, 3);

  let indexes: i64 = s
    .conn_for_tests()
    .query_row(
      "SELECT COUNT(*) FROM sqlite_master WHERE type = 'index' AND name LIKE 'idx_%'",
      [],
      |r| r.get(0),
    )
    .unwrap();
  assert_eq!(indexes, 8);
  assert_eq!(s.schema_version().unwrap(), schema::SCHEMA_VERSION);
}

#[test]
fn reopening_a_file_store_keeps_data() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("insurance_crm.db");

  let id = {
    let s = SqliteStore::open(&path).unwrap();
    s.add_contact(&NewContact::individual("Ann", "Lee")).unwrap()
  };

  let s = SqliteStore::open(&path).unwrap();
  let contacts = s.get_contacts(&ContactQuery::by_id(id)).unwrap();
  assert_eq!(contacts.len(), 1);
  assert_eq!(contacts[0].last_name, "Lee");
}

#[test]
fn open_in_missing_directory_is_init_error() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("no-such-dir").join("crm.db");
  let err = SqliteStore::open(&path).err().expect("open should fail");
  assert!(matches!(err, Error::Init(_)));
}

// ─── Contacts ────────────────────────────────────────────────────────────────

#[test]
fn add_and_get_contact() {
  let s = store();
  let mut input = NewContact::individual("Ann", "Lee");
  input.email = Some("ann.lee@example.com".into());
  input.address = Some("100 Main St\nSpringfield, IL 62701".into());

  let id = s.add_contact(&input).unwrap();
  assert_eq!(id, 1);

  let contacts = s.get_contacts(&ContactQuery::by_id(id)).unwrap();
  assert_eq!(contacts.len(), 1);
  let c = &contacts[0];
  assert_eq!(c.contact_type, ContactType::Individual);
  assert_eq!(c.status, ContactStatus::Active);
  assert_eq!(c.email.as_deref(), Some("ann.lee@example.com"));
  assert_eq!(c.address.as_deref(), Some("100 Main St\nSpringfield, IL 62701"));
  assert!(c.title.is_none());
  assert!(c.last_contacted_at.is_none());
  assert!(c.created_at <= Utc::now());
}

#[test]
fn blank_name_is_write_error() {
  let s = store();
  let err = s.add_contact(&NewContact::individual("  ", "Lee")).unwrap_err();
  assert!(matches!(err, Error::Write(WriteError::Constraint(_))));
  assert!(s.get_contacts(&ContactQuery::all()).unwrap().is_empty());
}

#[test]
fn contacts_sorted_by_last_then_first_name() {
  let s = store();
  s.add_contact(&NewContact::individual("Mary", "Johnson")).unwrap();
  s.add_contact(&NewContact::individual("Robert", "Brown")).unwrap();
  s.add_contact(&NewContact::individual("Alice", "Johnson")).unwrap();

  let names: Vec<_> = s
    .get_contacts(&ContactQuery::all())
    .unwrap()
    .into_iter()
    .map(|c| c.display_name())
    .collect();
  assert_eq!(names, ["Robert Brown", "Alice Johnson", "Mary Johnson"]);
}

#[test]
fn search_matches_any_field_case_insensitively() {
  let s = store();
  let mut ann = NewContact::individual("Ann", "Lee");
  ann.email = Some("ann@Example.com".into());
  ann.mobile_phone = Some("(555) 201-7788".into());
  let ann = s.add_contact(&ann).unwrap();

  let acme = s
    .add_contact(&NewContact::company("Tech Solutions Inc.", "Sarah", "Anderson"))
    .unwrap();

  let ids = |term: &str| -> Vec<i64> {
    s.get_contacts(&ContactQuery::search(term))
      .unwrap()
      .into_iter()
      .map(|c| c.id)
      .collect()
  };

  assert_eq!(ids("EXAMPLE"), [ann]);
  assert_eq!(ids("201-77"), [ann]);
  assert_eq!(ids("solutions"), [acme]);
  assert_eq!(ids("sar"), [acme]);
  assert_eq!(ids("e"), [acme, ann]);
  assert!(ids("zzz").is_empty());
}

#[test]
fn search_treats_wildcards_literally() {
  let s = store();
  s.add_contact(&NewContact::individual("Ann", "Lee")).unwrap();
  let mut odd = NewContact::individual("Percy", "Sign");
  odd.notes = Some("ignored by search".into());
  odd.email = Some("100%_real@example.com".into());
  let odd = s.add_contact(&odd).unwrap();

  let hits = s.get_contacts(&ContactQuery::search("%_")).unwrap();
  assert_eq!(hits.len(), 1);
  assert_eq!(hits[0].id, odd);

  assert!(s.get_contacts(&ContactQuery::search("ignored")).unwrap().is_empty());
}

#[test]
fn search_term_is_matched_as_given() {
  let s = store();
  s.add_contact(&NewContact::individual("Ann", "Lee")).unwrap();

  assert!(s.get_contacts(&ContactQuery::search(" lee")).unwrap().is_empty());
  assert!(s.get_contacts(&ContactQuery::search("   ")).unwrap().is_empty());
  assert_eq!(s.get_contacts(&ContactQuery::search("lee")).unwrap().len(), 1);
}

#[test]
fn empty_search_returns_everything() {
  let s = store();
  s.add_contact(&NewContact::individual("Ann", "Lee")).unwrap();
  s.add_contact(&NewContact::individual("John", "Smith")).unwrap();
  assert_eq!(s.get_contacts(&ContactQuery::search("")).unwrap().len(), 2);
}

#[test]
fn id_takes_priority_over_search() {
  let s = store();
  let ann = s.add_contact(&NewContact::individual("Ann", "Lee")).unwrap();
  s.add_contact(&NewContact::individual("John", "Smith")).unwrap();

  let query = ContactQuery { id: Some(ann), search: Some("Smith".into()) };
  let hits = s.get_contacts(&query).unwrap();
  assert_eq!(hits.len(), 1);
  assert_eq!(hits[0].id, ann);
}

#[test]
fn update_contact_overwrites_every_field() {
  let s = store();
  let mut input = NewContact::individual("Ann", "Lee");
  input.phone = Some("555-0100".into());
  input.notes = Some("VIP".into());
  let id = s.add_contact(&input).unwrap();

  let mut edit = NewContact::company("Lee Holdings", "Ann", "Lee-Park");
  edit.status = ContactStatus::Prospect;
  assert!(s.update_contact(id, &edit).unwrap());

  let c = s.get_contacts(&ContactQuery::by_id(id)).unwrap().remove(0);
  assert_eq!(c.contact_type, ContactType::Company);
  assert_eq!(c.company_name.as_deref(), Some("Lee Holdings"));
  assert_eq!(c.last_name, "Lee-Park");
  assert_eq!(c.status, ContactStatus::Prospect);
  // Full overwrite: fields absent from the edit are blanked.
  assert!(c.phone.is_none());
  assert!(c.notes.is_none());
}

#[test]
fn update_missing_contact_returns_false() {
  let s = store();
  assert!(!s.update_contact(42, &NewContact::individual("Ann", "Lee")).unwrap());
  assert!(!s.set_contact_status(42, ContactStatus::Inactive).unwrap());
}

#[test]
fn status_update_keeps_other_fields() {
  let s = store();
  let mut input = NewContact::individual("Ann", "Lee");
  input.phone = Some("555-0100".into());
  let id = s.add_contact(&input).unwrap();

  assert!(s.set_contact_status(id, ContactStatus::Inactive).unwrap());
  let c = s.get_contacts(&ContactQuery::by_id(id)).unwrap().remove(0);
  assert_eq!(c.status, ContactStatus::Inactive);
  assert_eq!(c.phone.as_deref(), Some("555-0100"));
}

#[test]
fn soft_deleted_contact_is_hidden_everywhere() {
  let s = store();
  let id = s.add_contact(&NewContact::individual("Ann", "Lee")).unwrap();
  let keep = s.add_contact(&NewContact::individual("John", "Smith")).unwrap();

  assert!(s.delete_contact(id).unwrap());

  let all: Vec<_> = s
    .get_contacts(&ContactQuery::all())
    .unwrap()
    .into_iter()
    .map(|c| c.id)
    .collect();
  assert_eq!(all, [keep]);
  assert!(s.get_contacts(&ContactQuery::by_id(id)).unwrap().is_empty());
  assert!(s.get_contacts(&ContactQuery::search("Lee")).unwrap().is_empty());

  // The row is still there.
  assert_eq!(s.count_contacts().unwrap(), 2);
}

#[test]
fn soft_delete_via_full_update_is_also_hidden() {
  let s = store();
  let id = s.add_contact(&NewContact::individual("Ann", "Lee")).unwrap();

  let mut current = s.get_contacts(&ContactQuery::by_id(id)).unwrap().remove(0);
  current.status = ContactStatus::Deleted;
  assert!(s.update_contact(id, &NewContact::from(&current)).unwrap());

  assert!(s.get_contacts(&ContactQuery::all()).unwrap().is_empty());
}

// ─── Derived last_contacted_at ───────────────────────────────────────────────

#[test]
fn last_contacted_is_latest_comm_date() {
  let s = store();
  let ann = s.add_contact(&NewContact::individual("Ann", "Lee")).unwrap();
  let john = s.add_contact(&NewContact::individual("John", "Smith")).unwrap();

  s.add_communication(&note(ann, at(2024, 5, 1, 9))).unwrap();
  s.add_communication(&note(ann, at(2024, 11, 20, 15))).unwrap();
  s.add_communication(&note(ann, at(2024, 8, 3, 12))).unwrap();

  let contacts = s.get_contacts(&ContactQuery::all()).unwrap();
  let ann_row = contacts.iter().find(|c| c.id == ann).unwrap();
  let john_row = contacts.iter().find(|c| c.id == john).unwrap();

  assert_eq!(ann_row.last_contacted_at, Some(at(2024, 11, 20, 15)));
  assert_eq!(john_row.last_contacted_at, None);
}

#[test]
fn last_contacted_keeps_nanosecond_precision() {
  let s = store();
  let ann = s.add_contact(&NewContact::individual("Ann", "Lee")).unwrap();
  let when = at(2024, 5, 1, 9) + Duration::nanoseconds(123_456_789);
  s.add_communication(&note(ann, when)).unwrap();
  s.add_communication(&note(ann, when - Duration::nanoseconds(1))).unwrap();

  let c = s.get_contacts(&ContactQuery::by_id(ann)).unwrap().remove(0);
  assert_eq!(c.last_contacted_at, Some(when));
  assert_eq!(s.get_communications(ann).unwrap()[0].communication.comm_date, when);
}

// ─── Policies ────────────────────────────────────────────────────────────────

#[test]
fn add_and_get_policy_with_contact_name() {
  let s = store();
  let owner = s
    .add_contact(&NewContact::company("Valley Construction Inc.", "Joseph", "Harris"))
    .unwrap();

  let mut input = policy(owner, "TRA-123456", date(2025, 3, 1));
  input.premium = 12_500.75;
  input.notes = Some("Corporate policy".into());
  let id = s.add_policy(&input).unwrap();

  let entries = s.get_policies(&PolicyQuery::by_id(id)).unwrap();
  assert_eq!(entries.len(), 1);
  let e = &entries[0];
  assert_eq!(e.contact_name, "Joseph Harris");
  assert_eq!(e.company_name.as_deref(), Some("Valley Construction Inc."));
  assert_eq!(e.policy.policy_number, "TRA-123456");
  assert_eq!(e.policy.premium, 12_500.75);
  assert_eq!(e.policy.start_date, date(2024, 3, 1));
  assert_eq!(e.policy.renewal_date, date(2025, 3, 1));
  assert_eq!(e.policy.status, PolicyStatus::Active);
  assert_eq!(e.policy.notes.as_deref(), Some("Corporate policy"));
}

#[test]
fn duplicate_policy_number_is_rejected() {
  let s = store();
  let owner = s.add_contact(&NewContact::individual("Ann", "Lee")).unwrap();
  s.add_policy(&policy(owner, "ABC-1", date(2025, 1, 1))).unwrap();

  let err = s
    .add_policy(&policy(owner, "ABC-1", date(2026, 1, 1)))
    .unwrap_err();
  assert!(err.is_write());
  assert!(matches!(
    err,
    Error::Write(WriteError::DuplicatePolicyNumber(ref n)) if n == "ABC-1"
  ));
  assert_eq!(s.get_policies(&PolicyQuery::all()).unwrap().len(), 1);
}

#[test]
fn deleted_policy_still_reserves_its_number() {
  let s = store();
  let owner = s.add_contact(&NewContact::individual("Ann", "Lee")).unwrap();
  let id = s.add_policy(&policy(owner, "ABC-1", date(2025, 1, 1))).unwrap();
  assert!(s.delete_policy(id).unwrap());

  let err = s
    .add_policy(&policy(owner, "ABC-1", date(2025, 1, 1)))
    .unwrap_err();
  assert!(matches!(err, Error::Write(WriteError::DuplicatePolicyNumber(_))));
}

#[test]
fn updating_to_taken_policy_number_is_rejected() {
  let s = store();
  let owner = s.add_contact(&NewContact::individual("Ann", "Lee")).unwrap();
  s.add_policy(&policy(owner, "ABC-1", date(2025, 1, 1))).unwrap();
  let second = s.add_policy(&policy(owner, "ABC-2", date(2025, 2, 1))).unwrap();

  let err = s
    .update_policy(second, &policy(owner, "ABC-1", date(2025, 2, 1)))
    .unwrap_err();
  assert!(matches!(err, Error::Write(WriteError::DuplicatePolicyNumber(_))));

  let kept = s.get_policies(&PolicyQuery::by_id(second)).unwrap().remove(0);
  assert_eq!(kept.policy.policy_number, "ABC-2");
}

#[test]
fn policy_for_unknown_contact_is_rejected() {
  let s = store();
  let err = s
    .add_policy(&policy(99, "ABC-1", date(2025, 1, 1)))
    .unwrap_err();
  assert!(matches!(err, Error::Write(WriteError::UnknownContact(99))));
}

#[test]
fn moving_policy_to_unknown_contact_is_rejected() {
  let s = store();
  let owner = s.add_contact(&NewContact::individual("Ann", "Lee")).unwrap();
  let id = s.add_policy(&policy(owner, "A-1", date(2025, 1, 1))).unwrap();

  let err = s
    .update_policy(id, &policy(404, "A-1", date(2025, 1, 1)))
    .unwrap_err();
  assert!(matches!(err, Error::Write(WriteError::UnknownContact(404))));

  let kept = s.get_policies(&PolicyQuery::by_id(id)).unwrap().remove(0);
  assert_eq!(kept.policy.contact_id, owner);
}

#[test]
fn policies_sorted_by_renewal_date() {
  let s = store();
  let owner = s.add_contact(&NewContact::individual("Ann", "Lee")).unwrap();
  s.add_policy(&policy(owner, "P-3", date(2026, 7, 1))).unwrap();
  s.add_policy(&policy(owner, "P-1", date(2025, 1, 15))).unwrap();
  s.add_policy(&policy(owner, "P-2", date(2025, 12, 31))).unwrap();

  let numbers: Vec<_> = s
    .get_policies(&PolicyQuery::all())
    .unwrap()
    .into_iter()
    .map(|e| e.policy.policy_number)
    .collect();
  assert_eq!(numbers, ["P-1", "P-2", "P-3"]);
}

#[test]
fn policies_filtered_by_contact() {
  let s = store();
  let ann = s.add_contact(&NewContact::individual("Ann", "Lee")).unwrap();
  let john = s.add_contact(&NewContact::individual("John", "Smith")).unwrap();
  s.add_policy(&policy(ann, "A-1", date(2025, 1, 1))).unwrap();
  s.add_policy(&policy(john, "J-1", date(2025, 1, 1))).unwrap();
  s.add_policy(&policy(ann, "A-2", date(2025, 6, 1))).unwrap();

  let anns = s.get_policies(&PolicyQuery::for_contact(ann)).unwrap();
  assert_eq!(anns.len(), 2);
  assert!(anns.iter().all(|e| e.policy.contact_id == ann));
  assert!(anns.iter().all(|e| e.contact_name == "Ann Lee"));
}

#[test]
fn soft_deleted_policy_is_hidden() {
  let s = store();
  let owner = s.add_contact(&NewContact::individual("Ann", "Lee")).unwrap();
  let gone = s.add_policy(&policy(owner, "A-1", date(2025, 1, 1))).unwrap();
  s.add_policy(&policy(owner, "A-2", date(2025, 1, 1))).unwrap();

  assert!(s.set_policy_status(gone, PolicyStatus::Deleted).unwrap());

  assert!(s.get_policies(&PolicyQuery::by_id(gone)).unwrap().is_empty());
  assert_eq!(s.get_policies(&PolicyQuery::for_contact(owner)).unwrap().len(), 1);
  assert_eq!(s.get_policies(&PolicyQuery::all()).unwrap().len(), 1);
}

#[test]
fn update_policy_overwrites_fields() {
  let s = store();
  let owner = s.add_contact(&NewContact::individual("Ann", "Lee")).unwrap();
  let mut input = policy(owner, "A-1", date(2025, 1, 1));
  input.notes = Some("first term".into());
  let id = s.add_policy(&input).unwrap();

  let mut current = s.get_policies(&PolicyQuery::by_id(id)).unwrap().remove(0).policy;
  current.carrier = "Hartford".into();
  current.premium = 250.0;
  current.renewal_date = date(2026, 1, 1);
  assert!(s.update_policy(id, &NewPolicy::from(&current)).unwrap());

  let updated = s.get_policies(&PolicyQuery::by_id(id)).unwrap().remove(0).policy;
  assert_eq!(updated.carrier, "Hartford");
  assert_eq!(updated.premium, 250.0);
  assert_eq!(updated.renewal_date, date(2026, 1, 1));
  assert_eq!(updated.notes.as_deref(), Some("first term"));
  assert!(!s.update_policy(999, &NewPolicy::from(&current)).unwrap());
}

#[test]
fn current_policies_exclude_expired_and_deleted() {
  let s = store();
  let owner = s.add_contact(&NewContact::individual("Ann", "Lee")).unwrap();
  let today = date(2025, 6, 15);

  s.add_policy(&policy(owner, "EXPIRED", date(2025, 6, 14))).unwrap();
  s.add_policy(&policy(owner, "DUE-TODAY", today)).unwrap();
  s.add_policy(&policy(owner, "NEXT-YEAR", date(2026, 6, 1))).unwrap();
  let deleted = s.add_policy(&policy(owner, "DELETED", date(2026, 1, 1))).unwrap();
  s.delete_policy(deleted).unwrap();

  let numbers: Vec<_> = s
    .current_policies(owner, today)
    .unwrap()
    .into_iter()
    .map(|e| e.policy.policy_number)
    .collect();
  assert_eq!(numbers, ["DUE-TODAY", "NEXT-YEAR"]);
}

// ─── Communications ──────────────────────────────────────────────────────────

#[test]
fn communications_newest_first_with_contact_names() {
  let s = store();
  let company = s
    .add_contact(&NewContact::company("Green Energy Systems", "Charles", "Thompson"))
    .unwrap();

  s.add_communication(&note(company, at(2024, 1, 10, 9))).unwrap();
  s.add_communication(&NewCommunication::new(
    company,
    CommType::FaceToFace,
    at(2024, 9, 2, 16),
    "Annual policy review",
  ))
  .unwrap();
  s.add_communication(&note(company, at(2024, 4, 5, 11))).unwrap();

  let comms = s.get_communications(company).unwrap();
  let dates: Vec<_> = comms.iter().map(|e| e.communication.comm_date).collect();
  assert_eq!(dates, [at(2024, 9, 2, 16), at(2024, 4, 5, 11), at(2024, 1, 10, 9)]);

  let latest = &comms[0];
  assert_eq!(latest.communication.comm_type, CommType::FaceToFace);
  assert_eq!(latest.communication.details, "Annual policy review");
  assert_eq!(latest.contact_name, "Charles Thompson");
  assert_eq!(latest.company_name.as_deref(), Some("Green Energy Systems"));
  assert!(latest.communication.created_at >= latest.communication.comm_date);
}

#[test]
fn individual_communications_have_no_company_name() {
  let s = store();
  let ann = s.add_contact(&NewContact::individual("Ann", "Lee")).unwrap();
  s.add_communication(&note(ann, at(2024, 1, 1, 8))).unwrap();

  let comms = s.get_communications(ann).unwrap();
  assert_eq!(comms.len(), 1);
  assert_eq!(comms[0].contact_name, "Ann Lee");
  assert!(comms[0].company_name.is_none());
}

#[test]
fn communication_for_unknown_contact_is_rejected() {
  let s = store();
  let err = s.add_communication(&note(7, Utc::now())).unwrap_err();
  assert!(matches!(err, Error::Write(WriteError::UnknownContact(7))));
}

#[test]
fn empty_communication_details_are_rejected() {
  let s = store();
  let ann = s.add_contact(&NewContact::individual("Ann", "Lee")).unwrap();
  let input = NewCommunication::new(ann, CommType::Email, Utc::now(), "");
  let err = s.add_communication(&input).unwrap_err();
  assert!(matches!(err, Error::Write(WriteError::Constraint(_))));
  assert!(s.get_communications(ann).unwrap().is_empty());
}

#[test]
fn comm_date_beyond_year_9999_is_rejected() {
  let s = store();
  let ann = s.add_contact(&NewContact::individual("Ann", "Lee")).unwrap();
  let far = Utc.with_ymd_and_hms(10_000, 1, 1, 0, 0, 0).unwrap();

  let err = s.add_communication(&note(ann, far)).unwrap_err();
  assert!(matches!(err, Error::Write(WriteError::Constraint(_))));

  assert!(s.get_communications(ann).unwrap().is_empty());
  let contacts = s.get_contacts(&ContactQuery::all()).unwrap();
  assert_eq!(contacts.len(), 1);
  assert!(contacts[0].last_contacted_at.is_none());
}

#[test]
fn communications_of_deleted_contact_remain_readable() {
  let s = store();
  let ann = s.add_contact(&NewContact::individual("Ann", "Lee")).unwrap();
  s.add_communication(&note(ann, at(2024, 1, 1, 8))).unwrap();
  s.delete_contact(ann).unwrap();

  assert_eq!(s.get_communications(ann).unwrap().len(), 1);
}

// ─── End-to-end scenario ─────────────────────────────────────────────────────

#[test]
fn ann_lee_scenario() {
  let s = store();

  let ann = s.add_contact(&NewContact::individual("Ann", "Lee")).unwrap();
  assert_eq!(ann, 1);

  let first = NewPolicy::new(
    1,
    "Auto",
    "ABC-1",
    "X",
    100.0,
    date(2024, 1, 1),
    date(2025, 1, 1),
  );
  s.add_policy(&first).unwrap();

  let err = s.add_policy(&first).unwrap_err();
  assert!(err.is_write());

  assert!(s.set_contact_status(1, ContactStatus::Deleted).unwrap());
  assert!(s.get_contacts(&ContactQuery::all()).unwrap().is_empty());
  assert!(s.get_contacts(&ContactQuery::by_id(1)).unwrap().is_empty());
}
