//! Core types for Roster.

pub mod email;
pub mod intake;
pub mod user;

pub use email::{Email, EmailError};
pub use intake::{
    IntakeError, IntakePolicy, ParseIntakePolicyError, USER_KEY, admit, is_json_media_type,
};
pub use user::{UserRecord, UserRecordError};
