//! Validated integer counts.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Customer loyalty points, never negative.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct LoyaltyPoints(u64);

impl LoyaltyPoints {
    /// Validate a raw point balance.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Negative`] if `points` is below zero.
    pub fn new(points: i64) -> Result<Self, ValidationError> {
        u64::try_from(points)
            .map(Self)
            .map_err(|_| ValidationError::Negative {
                field: "loyalty_points",
                value: points.to_string(),
            })
    }

    /// The point balance.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for LoyaltyPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Order line quantity, always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(u64);

impl Quantity {
    /// Largest accepted line quantity. See [`Price::MAX_AMOUNT`](crate::Price::MAX_AMOUNT).
    pub const MAX: u64 = 1_000_000;

    /// Validate a raw quantity.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NonPositiveQuantity`] if `qty` is zero or
    /// negative, or [`ValidationError::TooLarge`] if it exceeds [`Self::MAX`].
    pub fn new(qty: i64) -> Result<Self, ValidationError> {
        match u64::try_from(qty) {
            Ok(0) | Err(_) => Err(ValidationError::NonPositiveQuantity(qty)),
            Ok(q) if q > Self::MAX => Err(ValidationError::TooLarge {
                field: "quantity",
                value: qty.to_string(),
                max: Self::MAX.to_string(),
            }),
            Ok(q) => Ok(Self(q)),
        }
    }

    /// The quantity.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
