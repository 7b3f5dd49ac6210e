//! Settings for the insurance CRM and the display helpers derived from them.
//!
//! Nothing here is global: callers load a [`Settings`] once and pass it (or a
//! [`Formats`] built from it) by reference to whatever needs it.

mod format;
mod settings;

pub mod error;

pub use error::{Error, Result};
pub use format::Formats;
pub use settings::{BusinessSettings, DatabaseSettings, Settings, UiSettings};
