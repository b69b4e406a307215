//! Datastore - In-memory repository of customers, products and orders.
//!
//! The [`Store`] owns every entity and every index over them:
//!
//! | Index | Structure | Contents |
//! |-------|-----------|----------|
//! | customers / products / orders | `HashMap` | primary lookup by ID |
//! | customer emails | `HashSet` | uniqueness constraint |
//! | product categories | `HashSet` | categories of live products |
//! | customers / products ordered | `BTreeSet` | natural-order views |
//! | orders by time | `BTreeSet` | creation-time view |
//!
//! Entities can only be created, mutated and removed through the store, which
//! keeps all indexes consistent after every operation.
//!
//! # Modules
//!
//! - [`entity`] - Customer, Product, Order and `OrderItem`
//! - [`store`] - The multi-index store
//! - [`shared`] - Lock-guarded handle for concurrent callers
//! - [`sort`] - Standing comparators for ad-hoc sorting
//! - [`analytics`] - Read-only reporting over snapshots
//! - [`clock`] - Time source for order timestamps

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod analytics;
pub mod clock;
pub mod entity;
pub mod error;
pub mod shared;
pub mod sort;
pub mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use entity::{Customer, Order, OrderItem, PriceLookup, Product};
pub use error::{EntityKind, StoreError};
pub use shared::SharedStore;
pub use store::{CustomerUpdate, ProductUpdate, Store};

pub use datastore_core::*;
