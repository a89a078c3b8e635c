//! Roster Core - Shared types library.
//!
//! This crate provides the types used by every Roster component:
//! - `server` - HTTP edge holding the in-memory user store
//! - `integration-tests` - typed client service and end-to-end tests
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP,
//! no shared state. Request bodies arrive here as bytes and leave as the JSON
//! value the store should append.
//!
//! # Modules
//!
//! - [`types`] - `Email`, `UserRecord`, and the intake policy applied to `POST /api/user`

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
