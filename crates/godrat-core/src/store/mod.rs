//! Remote record store abstractions.

pub mod catalog;
pub mod port;
