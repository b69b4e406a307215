//! Email address type.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::ValidationError;

/// A customer email address.
///
/// The datastore treats emails as opaque labels: the only structural rule is
/// that the trimmed value is not blank. Uniqueness is enforced by the store,
/// comparing the trimmed value case-sensitively.
///
/// ## Examples
///
/// ```
/// use datastore_core::Email;
///
/// // Surrounding whitespace is trimmed
/// assert_eq!(Email::parse("  user@example.com ").unwrap().as_str(), "user@example.com");
///
/// // Blank values are rejected
/// assert!(Email::parse("").is_err());
/// assert!(Email::parse("   ").is_err());
///
/// // No @ is required at this level
/// assert!(Email::parse("no-at-symbol").is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Parse an `Email` from a string, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Blank`] if the input is empty or whitespace only.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Blank { field: "email" });
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the email address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the address contains an @ symbol.
    #[must_use]
    pub fn has_at_symbol(&self) -> bool {
        self.0.contains('@')
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Email {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
