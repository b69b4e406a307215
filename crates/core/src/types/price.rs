//! Type-safe price representation using decimal arithmetic.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Quantity, ValidationError};

/// A non-negative unit price.
///
/// Prices use [`Decimal`] rather than floating point so that the product
/// ordering is a total order and order totals sum exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Largest accepted unit price.
    ///
    /// With [`Quantity::MAX`] a line total is at most 10^18, so totals over
    /// any number of lines the store can hold fit in a `Decimal` (about
    /// 7.9 * 10^28).
    pub const MAX_AMOUNT: i64 = 1_000_000_000_000;

    /// Create a price, rejecting negative and oversized amounts.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Negative`] if `amount` is below zero, or
    /// [`ValidationError::TooLarge`] if it exceeds [`Self::MAX_AMOUNT`].
    pub fn new(amount: Decimal) -> Result<Self, ValidationError> {
        if amount < Decimal::ZERO {
            return Err(ValidationError::Negative {
                field: "price",
                value: amount.to_string(),
            });
        }
        let max = Decimal::from(Self::MAX_AMOUNT);
        if amount > max {
            return Err(ValidationError::TooLarge {
                field: "price",
                value: amount.to_string(),
                max: max.to_string(),
            });
        }
        Ok(Self(amount))
    }

    /// The amount in the currency's standard unit.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Price multiplied by a line quantity.
    #[must_use]
    pub fn times(&self, quantity: Quantity) -> Decimal {
        self.0 * Decimal::from(quantity.get())
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
