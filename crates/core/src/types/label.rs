//! Non-blank text labels.
//!
//! Use the `define_label!` macro for text fields whose only rule is
//! "trimmed and not blank".

use serde::{Deserialize, Serialize};

use super::ValidationError;

macro_rules! define_label {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Parse from a string, trimming surrounding whitespace.
            ///
            /// # Errors
            ///
            /// Returns [`ValidationError::Blank`] if the input is empty or whitespace only.
            pub fn parse(s: &str) -> Result<Self, ValidationError> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(ValidationError::Blank { field: $field });
                }
                Ok(Self(trimmed.to_owned()))
            }

            /// Returns the label as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_label!(
    /// Display name of a customer or product.
    Name,
    "name"
);

define_label!(
    /// Free-form product category label.
    ///
    /// Categories compare exactly: "Food" and "food" are distinct categories.
    Category,
    "category"
);
