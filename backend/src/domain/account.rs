//! Account identity data model.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Validation errors returned when constructing a [`Uid`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UidValidationError {
    /// Identifier is empty after trimming whitespace.
    #[error("user id must not be empty")]
    Empty,
    /// Identifier contains leading or trailing whitespace.
    #[error("user id must not contain surrounding whitespace")]
    SurroundingWhitespace,
}

/// Stable account identifier issued by the identity store.
///
/// Identifiers are opaque non-empty strings; this type only enforces shape,
/// not existence.
///
/// # Examples
/// ```
/// use backend::domain::Uid;
///
/// let uid = Uid::new("usr-4711").expect("valid uid");
/// assert_eq!(uid.as_str(), "usr-4711");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
pub struct Uid(String);

impl Uid {
    /// Validate and construct a [`Uid`].
    pub fn new(value: impl Into<String>) -> Result<Self, UidValidationError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(UidValidationError::Empty);
        }
        if raw.trim() != raw {
            return Err(UidValidationError::SurroundingWhitespace);
        }
        Ok(Self(raw))
    }

    /// Borrow the underlying identifier as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for Uid {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<Uid> for String {
    fn from(value: Uid) -> Self {
        value.0
    }
}

impl TryFrom<String> for Uid {
    type Error = UidValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// The authenticated principal behind an invocation.
///
/// Supplied by the platform's auth layer per request; handlers pass it into
/// the domain explicitly so every permission branch stays unit-testable.
/// Never persisted by this system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    uid: Uid,
}

impl CallerIdentity {
    /// Wrap an authenticated account identifier.
    pub fn new(uid: Uid) -> Self {
        Self { uid }
    }

    /// The caller's account identifier.
    pub fn uid(&self) -> &Uid {
        &self.uid
    }
}

/// A user record as stored in the external directory.
///
/// This system only ever reads these records; the directory owns them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Directory key, matching the identity-store account id.
    pub uid: Uid,
    /// Elevated privilege to perform account deletion.
    #[serde(default)]
    pub is_admin: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", UidValidationError::Empty)]
    #[case("   ", UidValidationError::Empty)]
    #[case(" usr-1", UidValidationError::SurroundingWhitespace)]
    #[case("usr-1 ", UidValidationError::SurroundingWhitespace)]
    fn uid_rejects_malformed_input(#[case] raw: &str, #[case] expected: UidValidationError) {
        assert_eq!(Uid::new(raw), Err(expected));
    }

    #[test]
    fn uid_serde_round_trip() {
        let uid: Uid = serde_json::from_str("\"usr-42\"").expect("deserialize uid");
        assert_eq!(uid.as_str(), "usr-42");
        let json = serde_json::to_string(&uid).expect("serialize uid");
        assert_eq!(json, "\"usr-42\"");
    }

    #[test]
    fn user_record_defaults_admin_flag_to_false() {
        let record: UserRecord =
            serde_json::from_str(r#"{"uid":"usr-42"}"#).expect("deserialize record");
        assert!(!record.is_admin);
    }
}
