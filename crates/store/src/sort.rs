//! Ordering policies.
//!
//! Pure comparison functions. The store maintains the natural orderings
//! itself; the standing comparators here are applied by callers to snapshots,
//! e.g. `products.sort_by(sort::product_by_price_desc_then_name_then_category)`.

use std::cmp::Ordering;

use crate::entity::{Customer, Product};

/// Case-folded copy of `s`, used to build index keys.
#[must_use]
pub fn fold_case(s: &str) -> String {
    s.chars().flat_map(char::to_lowercase).collect()
}

/// Compare two strings ignoring case, consistently with [`fold_case`].
#[must_use]
pub fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

/// Price descending, then name, then category (case-insensitive).
#[must_use]
pub fn product_by_price_desc_then_name_then_category(a: &Product, b: &Product) -> Ordering {
    b.price()
        .cmp(&a.price())
        .then_with(|| cmp_ignore_case(a.name().as_str(), b.name().as_str()))
        .then_with(|| cmp_ignore_case(a.category().as_str(), b.category().as_str()))
}

/// Loyalty points descending, then name (case-insensitive).
#[must_use]
pub fn customer_by_points_desc_then_name(a: &Customer, b: &Customer) -> Ordering {
    b.loyalty_points()
        .cmp(&a.loyalty_points())
        .then_with(|| cmp_ignore_case(a.name().as_str(), b.name().as_str()))
}
