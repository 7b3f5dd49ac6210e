//! SQLite backend for the insurance CRM.
//!
//! A single synchronous [`rusqlite::Connection`] owns the three tables
//! (contacts, policies, communications). Every operation commits before it
//! returns.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result, WriteError};
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
