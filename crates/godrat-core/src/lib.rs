//! Core domain + application logic for the class registry bot.
//!
//! This crate is framework-agnostic. Telegram and the record store live
//! behind ports (traits) implemented in adapter crates.

pub mod class;
pub mod config;
pub mod domain;
pub mod errors;
pub mod formatting;
pub mod intent;
pub mod logging;
pub mod messaging;
pub mod router;
pub mod store;

pub use errors::{Error, Result};
