//! Order and order line entities.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use datastore_core::{CustomerId, OrderId, OrderStatus, ProductId, Quantity, ValidationError};

use super::{PriceLookup, Product};

/// One line of an order: a product reference and a quantity.
///
/// The line holds the product's ID, not a copy of it. The line total is
/// resolved against the live catalog, so a price change is visible
/// retroactively through every line that references the product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderItem {
    product_id: ProductId,
    quantity: Quantity,
}

impl OrderItem {
    pub(crate) fn new(product: &Product, quantity: i64) -> Result<Self, ValidationError> {
        Ok(Self {
            product_id: product.id(),
            quantity: Quantity::new(quantity)?,
        })
    }

    #[must_use]
    pub const fn product_id(&self) -> ProductId {
        self.product_id
    }

    #[must_use]
    pub const fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Current price times quantity, or `None` if the product is gone.
    #[must_use]
    pub fn line_total<P: PriceLookup + ?Sized>(&self, prices: &P) -> Option<Decimal> {
        prices
            .price_of(self.product_id)
            .map(|price| price.times(self.quantity))
    }
}

/// A customer order.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    id: OrderId,
    customer_id: CustomerId,
    created_at: DateTime<Utc>,
    status: OrderStatus,
    items: Vec<OrderItem>,
}

impl Order {
    pub(crate) fn new(id: OrderId, customer_id: CustomerId, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            customer_id,
            created_at,
            status: OrderStatus::New,
            items: Vec::new(),
        }
    }

    #[must_use]
    pub const fn id(&self) -> OrderId {
        self.id
    }

    /// The customer that placed the order, as captured at creation.
    #[must_use]
    pub const fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub const fn status(&self) -> OrderStatus {
        self.status
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of line totals, recomputed on every call.
    ///
    /// Lines whose product cannot be resolved contribute nothing.
    #[must_use]
    pub fn total<P: PriceLookup + ?Sized>(&self, prices: &P) -> Decimal {
        self.items
            .iter()
            .filter_map(|item| item.line_total(prices))
            .sum()
    }

    pub(crate) const fn set_status(&mut self, status: OrderStatus) {
        self.status = status;
    }

    pub(crate) fn push_item(&mut self, item: OrderItem) {
        self.items.push(item);
    }

    /// Drop every line referencing `product_id`. Returns how many were removed.
    pub(crate) fn remove_items_for_product(&mut self, product_id: ProductId) -> usize {
        let before = self.items.len();
        self.items.retain(|item| item.product_id != product_id);
        before - self.items.len()
    }

    pub(crate) const fn time_key(&self) -> OrderTimeKey {
        OrderTimeKey {
            created_at: self.created_at,
            id: self.id,
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Order{{id={}, customerId={}, status={}, items={}, createdAt={}}}",
            self.id,
            self.customer_id,
            self.status,
            self.items.len(),
            self.created_at.to_rfc3339()
        )
    }
}

/// Key of the creation-time index.
///
/// The order ID breaks ties between orders created in the same clock tick, so
/// no order is ever shadowed in the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct OrderTimeKey {
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) id: OrderId,
}
