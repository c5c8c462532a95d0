//! Data models
//!
//! Wire-format DTOs exchanged with the storefront backend. Field names are
//! camelCase on the wire (`#[serde(rename_all = "camelCase")]`); all IDs are
//! `i64`. Guest-side cart lines use negative IDs so they can never collide
//! with server-assigned positive ones.

pub mod cart;
pub mod coupon;
pub mod customer;
pub mod order;
pub mod product;

// Re-exports
pub use cart::*;
pub use coupon::*;
pub use customer::*;
pub use order::*;
pub use product::*;
