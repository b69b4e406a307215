//! Customer entity.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::Serialize;

use datastore_core::{CustomerId, Email, LoyaltyPoints, Name, ValidationError};

use crate::sort::fold_case;

/// A customer.
///
/// Equality and hashing use only the ID.
#[derive(Debug, Clone, Serialize)]
pub struct Customer {
    id: CustomerId,
    name: Name,
    email: Email,
    loyalty_points: LoyaltyPoints,
}

impl Customer {
    pub(crate) fn new(
        id: CustomerId,
        name: &str,
        email: &str,
        loyalty_points: i64,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id,
            name: Name::parse(name)?,
            email: Email::parse(email)?,
            loyalty_points: LoyaltyPoints::new(loyalty_points)?,
        })
    }

    #[must_use]
    pub const fn id(&self) -> CustomerId {
        self.id
    }

    #[must_use]
    pub const fn name(&self) -> &Name {
        &self.name
    }

    #[must_use]
    pub const fn email(&self) -> &Email {
        &self.email
    }

    #[must_use]
    pub const fn loyalty_points(&self) -> LoyaltyPoints {
        self.loyalty_points
    }

    pub(crate) fn set_name(&mut self, name: Name) {
        self.name = name;
    }

    pub(crate) fn set_email(&mut self, email: Email) {
        self.email = email;
    }

    pub(crate) const fn set_loyalty_points(&mut self, points: LoyaltyPoints) {
        self.loyalty_points = points;
    }

    /// Position of this customer in the natural-order index.
    pub(crate) fn sort_key(&self) -> CustomerKey {
        CustomerKey {
            name: fold_case(self.name.as_str()),
            email: fold_case(self.email.as_str()),
            id: self.id,
        }
    }

    /// Natural ordering: name, then email (both case-insensitive), then ID.
    #[must_use]
    pub fn natural_cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl PartialEq for Customer {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Customer {}

impl Hash for Customer {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Customer{{id={}, name='{}', email='{}', points={}}}",
            self.id, self.name, self.email, self.loyalty_points
        )
    }
}

/// Derived sort key for the natural-order index. Field order defines the
/// comparison order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct CustomerKey {
    name: String,
    email: String,
    pub(crate) id: CustomerId,
}
