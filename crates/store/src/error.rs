//! Store error types.

use std::fmt;

use thiserror::Error;

use datastore_core::ValidationError;

/// The entity kind an operation referred to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Customer,
    Product,
    Order,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Customer => write!(f, "Customer"),
            Self::Product => write!(f, "Product"),
            Self::Order => write!(f, "Order"),
        }
    }
}

/// Errors returned by [`Store`](crate::Store) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Supplied data violates a field rule or the email uniqueness rule.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The referenced identifier is not in the relevant primary map.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Which primary map was consulted.
        kind: EntityKind,
        /// The missing identifier.
        id: String,
    },
}

impl StoreError {
    pub(crate) fn not_found(kind: EntityKind, id: impl fmt::Display) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    /// Whether this is a validation (including email conflict) failure.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Whether this is a not-found failure.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Whether this is an email uniqueness conflict.
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::Validation(ValidationError::DuplicateEmail(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use datastore_core::CustomerId;

    #[test]
    fn test_not_found_message() {
        let id = CustomerId::generate();
        let err = StoreError::not_found(EntityKind::Customer, id);
        assert_eq!(err.to_string(), format!("Customer not found: {id}"));
        assert!(err.is_not_found());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_conflict_is_validation() {
        let err = StoreError::from(ValidationError::DuplicateEmail("a@x.com".to_owned()));
        assert!(err.is_validation());
        assert!(err.is_conflict());
        assert!(!err.is_not_found());
    }
}
