//! Core types and trait definitions for the insurance CRM.
//!
//! This crate has no database dependencies. The storage
//! backend (`crm-store-sqlite`) and the command-line collaborator (`crm-cli`)
//! both depend on it.

pub mod communication;
pub mod contact;
pub mod error;
pub mod policy;
pub mod store;

pub use error::{Error, Result, ValidationError, parse_variant};
