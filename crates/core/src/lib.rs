//! Datastore Core - Validated field types.
//!
//! This crate provides the building blocks shared by every datastore component:
//! - `datastore` - The in-memory multi-index store
//! - `datastore-cli` - Demo driver and container benchmark
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no indexes, no logging.
//! Every type here validates on construction, so a value that exists is a
//! value that satisfies its field rules.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, names, emails, prices, counts and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
