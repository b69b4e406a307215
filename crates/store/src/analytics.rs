//! Read-only reporting over store snapshots.
//!
//! Every function here takes the output of a `Store::list_*` call (or any
//! other slice of entities) and never mutates it.

use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;

use datastore_core::Category;

use crate::entity::{Customer, Order, PriceLookup, Product};
use crate::sort::cmp_ignore_case;

/// Placeholder returned by [`safe_customer_email`] when no usable email exists.
pub const NO_EMAIL: &str = "NO_EMAIL";

/// Distinct names of products priced at or above `min_price`, sorted
/// case-insensitively.
#[must_use]
pub fn expensive_product_names(products: &[Product], min_price: Decimal) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names: Vec<String> = products
        .iter()
        .filter(|p| p.price().amount() >= min_price)
        .map(|p| p.name().as_str())
        .filter(|name| seen.insert(*name))
        .map(str::to_owned)
        .collect();
    names.sort_by(|a, b| cmp_ignore_case(a, b));
    names
}

/// Mean price per category.
#[must_use]
pub fn avg_price_by_category(products: &[Product]) -> HashMap<Category, Decimal> {
    let mut sums: HashMap<&Category, (Decimal, u32)> = HashMap::new();
    for product in products {
        let entry = sums.entry(product.category()).or_insert((Decimal::ZERO, 0));
        entry.0 += product.price().amount();
        entry.1 += 1;
    }
    sums.into_iter()
        .map(|(category, (sum, count))| (category.clone(), sum / Decimal::from(count)))
        .collect()
}

/// Sum of order totals, each resolved against `prices`.
#[must_use]
pub fn total_revenue<P: PriceLookup + ?Sized>(orders: &[Order], prices: &P) -> Decimal {
    orders.iter().map(|order| order.total(prices)).sum()
}

/// The customer's email if it contains an @, otherwise [`NO_EMAIL`].
#[must_use]
pub fn safe_customer_email(customer: Option<&Customer>) -> String {
    customer
        .map(Customer::email)
        .filter(|email| email.has_at_symbol())
        .map_or_else(|| NO_EMAIL.to_owned(), ToString::to_string)
}

/// Customer with the most loyalty points. Ties go to the earliest in `customers`.
#[must_use]
pub fn top_customer(customers: &[Customer]) -> Option<&Customer> {
    customers.iter().reduce(|best, candidate| {
        if candidate.loyalty_points() > best.loyalty_points() {
            candidate
        } else {
            best
        }
    })
}
