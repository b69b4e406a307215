//! Field validation errors.

/// Errors raised when a value violates a field constraint.
///
/// Every validated constructor in this crate returns this type, and the store
/// reuses it for the customer email uniqueness rule.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A text field is empty or whitespace only.
    #[error("{field} must not be blank")]
    Blank {
        /// Name of the offending field.
        field: &'static str,
    },
    /// A numeric field that must be zero or more is negative.
    #[error("{field} must be >= 0, got {value}")]
    Negative {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value, rendered for display.
        value: String,
    },
    /// A numeric field exceeds its upper bound.
    #[error("{field} must be <= {max}, got {value}")]
    TooLarge {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value, rendered for display.
        value: String,
        /// The bound, rendered for display.
        max: String,
    },
    /// An order line quantity is zero or negative.
    #[error("quantity must be > 0, got {0}")]
    NonPositiveQuantity(i64),
    /// Another live customer already owns this email.
    #[error("email already exists: {0}")]
    DuplicateEmail(String),
}
