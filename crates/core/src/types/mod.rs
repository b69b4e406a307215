//! Core types for the datastore.
//!
//! This module provides type-safe wrappers for entity fields. Each wrapper
//! rejects invalid input at the point of construction with a [`ValidationError`].

pub mod count;
pub mod email;
pub mod error;
pub mod id;
pub mod label;
pub mod price;
pub mod status;

pub use count::{LoyaltyPoints, Quantity};
pub use email::Email;
pub use error::ValidationError;
pub use id::*;
pub use label::{Category, Name};
pub use price::Price;
pub use status::*;
