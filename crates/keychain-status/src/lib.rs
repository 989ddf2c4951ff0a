//! # keychain-status
//!
//! Closed taxonomy of the result codes a credential store returns for every
//! request. Each named [`Status`] maps to exactly one integer code and one
//! human-readable description; decoding an integer is total and falls back
//! to [`Status::UnknownError`].

#[macro_use]
mod macros;
mod status;

pub use status::{Status, StatusCode};
