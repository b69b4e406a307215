//! Entities owned by the store.
//!
//! Constructors and setters are crate-private: the only way to create, change
//! or remove an entity from outside this crate is through [`Store`](crate::Store),
//! which keeps the indexes in step. Callers get read-only access through the
//! public getters.

mod customer;
mod order;
mod product;

pub use customer::Customer;
pub use order::{Order, OrderItem};
pub use product::Product;

pub(crate) use customer::CustomerKey;
pub(crate) use order::OrderTimeKey;
pub(crate) use product::ProductKey;

use std::collections::HashMap;
use std::hash::BuildHasher;

use datastore_core::{Price, ProductId};

/// Resolves the current price of a product.
///
/// Order lines hold a product ID rather than a copy of the product, so totals
/// always reflect the price at the moment they are computed.
pub trait PriceLookup {
    /// Current price of `id`, or `None` if the product no longer exists.
    fn price_of(&self, id: ProductId) -> Option<Price>;
}

impl<S: BuildHasher> PriceLookup for HashMap<ProductId, Product, S> {
    fn price_of(&self, id: ProductId) -> Option<Price> {
        self.get(&id).map(Product::price)
    }
}

impl PriceLookup for [Product] {
    fn price_of(&self, id: ProductId) -> Option<Price> {
        self.iter().find(|p| p.id() == id).map(Product::price)
    }
}

impl<T: PriceLookup + ?Sized> PriceLookup for &T {
    fn price_of(&self, id: ProductId) -> Option<Price> {
        (**self).price_of(id)
    }
}
