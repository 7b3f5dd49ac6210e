//! SQL schema for the CRM SQLite store.
//!
//! Executed on every open. `PRAGMA user_version` records the layout version.

/// Enables foreign-key enforcement for the lifetime of the connection.
pub const PRAGMAS: &str = "PRAGMA foreign_keys = ON;";

/// Full schema DDL; idempotent thanks to `IF NOT EXISTS`.
pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS contacts (
    id            INTEGER PRIMARY KEY,
    status        TEXT NOT NULL DEFAULT 'Active',
    contact_type  TEXT NOT NULL DEFAULT 'Individual',
    company_name  TEXT,
    first_name    TEXT NOT NULL CHECK (length(trim(first_name)) > 0),
    last_name     TEXT NOT NULL CHECK (length(trim(last_name)) > 0),
    title         TEXT,
    email         TEXT,
    phone         TEXT,
    mobile_phone  TEXT,
    address       TEXT,
    notes         TEXT,
    created_at    TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
);

CREATE INDEX IF NOT EXISTS idx_contacts_name    ON contacts(last_name, first_name);
CREATE INDEX IF NOT EXISTS idx_contacts_email   ON contacts(email);
CREATE INDEX IF NOT EXISTS idx_contacts_phone   ON contacts(phone, mobile_phone);
CREATE INDEX IF NOT EXISTS idx_contacts_company ON contacts(company_name);

-- policy_number is unique whatever the status, so a soft-deleted policy
-- still holds its number.
CREATE TABLE IF NOT EXISTS policies (
    id             INTEGER PRIMARY KEY,
    contact_id     INTEGER NOT NULL REFERENCES contacts(id) ON DELETE CASCADE,
    policy_type    TEXT NOT NULL,
    policy_number  TEXT NOT NULL UNIQUE,
    carrier        TEXT NOT NULL,
    premium        REAL NOT NULL,
    start_date     TEXT NOT NULL,   -- YYYY-MM-DD
    renewal_date   TEXT NOT NULL,   -- YYYY-MM-DD
    status         TEXT NOT NULL DEFAULT 'Active',
    notes          TEXT,
    created_at     TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
);

-- Communications are append-only.
-- No UPDATE or DELETE is ever issued against this table.
CREATE TABLE IF NOT EXISTS communications (
    id          INTEGER PRIMARY KEY,
    contact_id  INTEGER NOT NULL REFERENCES contacts(id) ON DELETE CASCADE,
    comm_type   TEXT NOT NULL,
    comm_date   TEXT NOT NULL,      -- RFC 3339 UTC; when it happened
    created_at  TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
    details     TEXT NOT NULL CHECK (length(trim(details)) > 0)
);

CREATE INDEX IF NOT EXISTS idx_policies_contact       ON policies(contact_id);
CREATE INDEX IF NOT EXISTS idx_policies_renewal       ON policies(renewal_date);
CREATE INDEX IF NOT EXISTS idx_communications_contact ON communications(contact_id);
CREATE INDEX IF NOT EXISTS idx_communications_date    ON communications(comm_date);

PRAGMA user_version = 1;
";

/// Value written to `PRAGMA user_version` by [`SCHEMA`].
pub const SCHEMA_VERSION: i64 = 1;
