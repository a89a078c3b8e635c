//! Intake rules for `POST /api/user` bodies.
//!
//! [`admit`] turns a raw request body into the JSON value to append to the
//! user store, or an [`IntakeError`] saying why nothing should be appended.
//!
//! Two policies exist:
//!
//! - [`IntakePolicy::Permissive`] stores whatever sits under the `user` key,
//!   verbatim. A body without that key (including an empty body or a body that
//!   is not an object) stores `null`. Only a body declared as JSON that fails
//!   to parse is refused.
//! - [`IntakePolicy::Strict`] additionally requires `user` to be a valid
//!   [`UserRecord`] and stores its normalized form.
//!
//! Bodies whose media type is not JSON are never parsed; callers hand
//! [`admit`] an empty body for them (see [`is_json_media_type`]), so they
//! behave like `{}`.

use core::fmt;
use std::str::FromStr;

use serde_json::Value;

use super::user::{UserRecord, UserRecordError};

/// Key under which the form nests the submitted record.
pub const USER_KEY: &str = "user";

/// How strictly `POST /api/user` bodies are checked before being stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum IntakePolicy {
    /// Store the `user` value as-is, `null` when absent.
    #[default]
    Permissive,
    /// Store only well-formed user records.
    Strict,
}

impl IntakePolicy {
    /// Lowercase name used in configuration.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Permissive => "permissive",
            Self::Strict => "strict",
        }
    }
}

impl fmt::Display for IntakePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when an intake policy name is not recognized.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown intake policy '{0}' (expected 'permissive' or 'strict')")]
pub struct ParseIntakePolicyError(String);

impl FromStr for IntakePolicy {
    type Err = ParseIntakePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "permissive" => Ok(Self::Permissive),
            "strict" => Ok(Self::Strict),
            _ => Err(ParseIntakePolicyError(s.to_owned())),
        }
    }
}

/// Why a request body was not admitted.
#[derive(thiserror::Error, Debug)]
pub enum IntakeError {
    /// The body is not valid JSON.
    #[error("malformed JSON body: {0}")]
    MalformedJson(#[from] serde_json::Error),
    /// The body is JSON but the `user` value is not a valid record (strict only).
    #[error("{0}")]
    Invalid(#[from] UserRecordError),
}

/// Decide what, if anything, a `POST /api/user` body appends to the store.
///
/// An empty (or all-whitespace) body is treated as `{}`.
///
/// # Errors
///
/// - [`IntakeError::MalformedJson`] if the body is not JSON, under either policy.
/// - [`IntakeError::Invalid`] if the policy is strict and `user` is not a valid record.
pub fn admit(body: &[u8], policy: IntakePolicy) -> Result<Value, IntakeError> {
    let user = extract_user(body)?;

    match policy {
        IntakePolicy::Permissive => Ok(user),
        IntakePolicy::Strict => Ok(UserRecord::from_value(&user)?.to_value()),
    }
}

/// Whether a `Content-Type` value names JSON (`application/json` or any
/// `application/*+json`), ignoring parameters and case.
#[must_use]
pub fn is_json_media_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    essence
        .strip_prefix("application/")
        .is_some_and(|subtype| subtype == "json" || subtype.ends_with("+json"))
}

fn extract_user(body: &[u8]) -> Result<Value, serde_json::Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }

    let mut payload: Value = serde_json::from_slice(body)?;
    Ok(payload
        .as_object_mut()
        .and_then(|fields| fields.remove(USER_KEY))
        .unwrap_or(Value::Null))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    const ADA: &[u8] =
        br#"{"user":{"firstName":"Ada","lastName":"Lovelace","email":"ada@x.com"}}"#;

    #[test]
    fn test_policy_parse() {
        assert_eq!("permissive".parse::<IntakePolicy>(), Ok(IntakePolicy::Permissive));
        assert_eq!(" STRICT ".parse::<IntakePolicy>(), Ok(IntakePolicy::Strict));
        assert!("lenient".parse::<IntakePolicy>().is_err());
    }

    #[test]
    fn test_policy_default_is_permissive() {
        assert_eq!(IntakePolicy::default(), IntakePolicy::Permissive);
        assert_eq!(IntakePolicy::default().to_string(), "permissive");
    }

    #[test]
    fn test_permissive_stores_user_verbatim() {
        let stored = admit(ADA, IntakePolicy::Permissive).unwrap();
        assert_eq!(
            stored,
            json!({ "firstName": "Ada", "lastName": "Lovelace", "email": "ada@x.com" })
        );
    }

    #[test]
    fn test_permissive_keeps_arbitrary_shapes() {
        let stored = admit(br#"{"user":{"nick":"ada","age":36}}"#, IntakePolicy::Permissive).unwrap();
        assert_eq!(stored, json!({ "nick": "ada", "age": 36 }));

        let stored = admit(br#"{"user":42}"#, IntakePolicy::Permissive).unwrap();
        assert_eq!(stored, json!(42));
    }

    #[test]
    fn test_permissive_missing_user_is_null() {
        let bodies: [&[u8]; 5] = [
            br#"{"firstName":"Ada"}"#,
            b"{}",
            b"[1, 2]",
            b"",
            b"  \n",
        ];
        for body in bodies {
            assert_eq!(admit(body, IntakePolicy::Permissive).unwrap(), Value::Null);
        }
    }

    #[test]
    fn test_json_media_types() {
        assert!(is_json_media_type("application/json"));
        assert!(is_json_media_type("Application/JSON; charset=utf-8"));
        assert!(is_json_media_type("application/vnd.api+json"));

        assert!(!is_json_media_type("text/plain"));
        assert!(!is_json_media_type("application/x-www-form-urlencoded"));
        assert!(!is_json_media_type("text/json-ish"));
        assert!(!is_json_media_type(""));
    }

    #[test]
    fn test_malformed_json_is_refused_under_both_policies() {
        for policy in [IntakePolicy::Permissive, IntakePolicy::Strict] {
            let err = admit(b"{\"user\":", policy).unwrap_err();
            assert!(matches!(err, IntakeError::MalformedJson(_)));
        }
    }

    #[test]
    fn test_strict_accepts_valid_record() {
        let stored = admit(ADA, IntakePolicy::Strict).unwrap();
        assert_eq!(
            stored,
            json!({ "firstName": "Ada", "lastName": "Lovelace", "email": "ada@x.com" })
        );
    }

    #[test]
    fn test_strict_normalizes_record() {
        let body = br#"{"user":{"firstName":" Ada ","lastName":"Lovelace","email":" ada@x.com","extra":true}}"#;
        let stored = admit(body, IntakePolicy::Strict).unwrap();
        assert_eq!(
            stored,
            json!({ "firstName": "Ada", "lastName": "Lovelace", "email": "ada@x.com" })
        );
    }

    #[test]
    fn test_strict_rejects_missing_user() {
        let err = admit(b"{}", IntakePolicy::Strict).unwrap_err();
        assert!(matches!(err, IntakeError::Invalid(UserRecordError::Missing)));
    }

    #[test]
    fn test_strict_rejects_bad_email() {
        let body = br#"{"user":{"firstName":"Ada","lastName":"Lovelace","email":"ada"}}"#;
        let err = admit(body, IntakePolicy::Strict).unwrap_err();
        assert!(matches!(
            err,
            IntakeError::Invalid(UserRecordError::InvalidEmail(_))
        ));
        assert_eq!(err.to_string(), "invalid email: email must contain an @ symbol");
    }
}
