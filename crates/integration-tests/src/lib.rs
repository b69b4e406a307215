//! Integration tests for the datastore.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p datastore-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `customers` - Customer lifecycle, email uniqueness, cascades
//! - `products` - Catalog lifecycle, category set, order line removal
//! - `orders` - Order lifecycle, totals, time view
//! - `properties` - Random operation sequences checked against every index
//!
//! Shared fixtures live here so each test file builds stores the same way.

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;

use datastore::{FixedClock, ProductId, Store, StoreError};

/// Instant every fixture store stamps its orders with.
#[must_use]
pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0)
        .single()
        .unwrap_or(DateTime::UNIX_EPOCH)
}

/// Empty store with a frozen clock.
#[must_use]
pub fn fixed_store() -> Store {
    Store::with_clock(FixedClock(epoch()))
}

/// IDs of the products created by [`stock_catalog`].
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    pub laptop: ProductId,
    pub mouse: ProductId,
    pub coffee: ProductId,
    pub tea: ProductId,
}

/// Four products across two categories.
///
/// # Errors
///
/// Propagates any store error; none is expected on a fresh store.
pub fn stock_catalog(store: &mut Store) -> Result<Catalog, StoreError> {
    Ok(Catalog {
        laptop: store
            .create_product("Laptop", "Electronics", Decimal::from(32000))?
            .id(),
        mouse: store
            .create_product("Mouse", "Electronics", Decimal::from(700))?
            .id(),
        coffee: store.create_product("Coffee", "Food", Decimal::from(250))?.id(),
        tea: store.create_product("Tea", "Food", Decimal::from(180))?.id(),
    })
}
