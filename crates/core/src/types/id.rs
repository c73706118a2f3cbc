//! User identifier type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`UserId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum UserIdError {
    /// The input string is empty.
    #[error("user id cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("user id must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains whitespace or control characters.
    #[error("user id must not contain whitespace or control characters")]
    InvalidCharacter,
}

/// An opaque user identifier.
///
/// User ids are assigned by the calling platform (e.g. a chat service's
/// numeric member id rendered as a string) and the ledger treats them as
/// opaque keys. Validation only rejects values that could never be a real
/// identifier so they are caught before any storage access.
///
/// ## Constraints
///
/// - Length: 1-64 characters
/// - No whitespace or control characters
///
/// ## Examples
///
/// ```
/// use rollcall_core::UserId;
///
/// assert!(UserId::parse("352815616964754954").is_ok());
/// assert!(UserId::parse("").is_err());
/// assert!(UserId::parse("has space").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Maximum length of a user id.
    pub const MAX_LENGTH: usize = 64;

    /// Parse a `UserId` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input:
    /// - Is empty
    /// - Is longer than 64 characters
    /// - Contains whitespace or control characters
    pub fn parse(s: &str) -> Result<Self, UserIdError> {
        if s.is_empty() {
            return Err(UserIdError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(UserIdError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if s.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(UserIdError::InvalidCharacter);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the user id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `UserId` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let id = UserId::parse("352815616964754954").unwrap();
        assert_eq!(id.as_str(), "352815616964754954");
    }

    #[test]
    fn test_parse_non_numeric_valid() {
        // Ids are opaque; alphanumeric values are fine
        assert!(UserId::parse("user-42_test").is_ok());
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(UserId::parse(""), Err(UserIdError::Empty));
    }

    #[test]
    fn test_parse_too_long() {
        let long = "x".repeat(UserId::MAX_LENGTH + 1);
        assert!(matches!(
            UserId::parse(&long),
            Err(UserIdError::TooLong { .. })
        ));
    }

    #[test]
    fn test_parse_max_length_ok() {
        let max = "x".repeat(UserId::MAX_LENGTH);
        assert!(UserId::parse(&max).is_ok());
    }

    #[test]
    fn test_parse_whitespace() {
        assert_eq!(UserId::parse("a b"), Err(UserIdError::InvalidCharacter));
        assert_eq!(UserId::parse("a\tb"), Err(UserIdError::InvalidCharacter));
    }

    #[test]
    fn test_parse_control_character() {
        assert_eq!(UserId::parse("a\u{7}b"), Err(UserIdError::InvalidCharacter));
    }

    #[test]
    fn test_display() {
        let id = UserId::parse("12345").unwrap();
        assert_eq!(id.to_string(), "12345");
    }
}
