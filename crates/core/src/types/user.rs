//! User record type.
//!
//! A user record is the `{ firstName, lastName, email }` object the form
//! submits. The server stores whatever JSON it receives under the permissive
//! intake policy; [`UserRecord`] is the typed view used when the strict policy
//! is active and by clients building requests.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::email::{Email, EmailError};

/// Errors that can occur when reading a [`UserRecord`] out of a JSON value.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum UserRecordError {
    /// The `user` field is absent or `null`.
    #[error("user is required")]
    Missing,
    /// The `user` field is not a JSON object.
    #[error("user must be an object")]
    NotAnObject,
    /// A required field is absent.
    #[error("{0} is required")]
    MissingField(&'static str),
    /// A field is present but not a string.
    #[error("{0} must be a string")]
    NotAString(&'static str),
    /// A name field is empty after trimming.
    #[error("{0} cannot be blank")]
    Blank(&'static str),
    /// The email field failed validation.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),
}

/// A validated user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact address.
    pub email: Email,
}

impl UserRecord {
    /// JSON name of [`UserRecord::first_name`].
    pub const FIRST_NAME: &'static str = "firstName";
    /// JSON name of [`UserRecord::last_name`].
    pub const LAST_NAME: &'static str = "lastName";
    /// JSON name of [`UserRecord::email`].
    pub const EMAIL: &'static str = "email";

    /// Build a record from already-typed parts.
    #[must_use]
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>, email: Email) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email,
        }
    }

    /// Read a record out of an untyped JSON value.
    ///
    /// Fields other than `firstName`, `lastName` and `email` are ignored.
    /// Names are trimmed.
    ///
    /// # Errors
    ///
    /// Returns the first [`UserRecordError`] encountered, checking fields in
    /// the order the form presents them.
    pub fn from_value(value: &Value) -> Result<Self, UserRecordError> {
        let fields = match value {
            Value::Null => return Err(UserRecordError::Missing),
            Value::Object(fields) => fields,
            _ => return Err(UserRecordError::NotAnObject),
        };

        let first_name = required_name(fields, Self::FIRST_NAME)?;
        let last_name = required_name(fields, Self::LAST_NAME)?;
        let email = Email::parse(required_str(fields, Self::EMAIL)?)?;

        Ok(Self {
            first_name,
            last_name,
            email,
        })
    }

    /// The JSON shape stored and returned by `GET /api/users`.
    ///
    /// Produced by the derived `Serialize`, so it always matches what clients
    /// send and decode.
    #[must_use]
    pub fn to_value(&self) -> Value {
        // Only string fields: serialization to a `Value` cannot fail.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

fn required_str<'a>(
    fields: &'a Map<String, Value>,
    name: &'static str,
) -> Result<&'a str, UserRecordError> {
    match fields.get(name) {
        None | Some(Value::Null) => Err(UserRecordError::MissingField(name)),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(UserRecordError::NotAString(name)),
    }
}

fn required_name(fields: &Map<String, Value>, name: &'static str) -> Result<String, UserRecordError> {
    let value = required_str(fields, name)?.trim();
    if value.is_empty() {
        return Err(UserRecordError::Blank(name));
    }
    Ok(value.to_owned())
}
