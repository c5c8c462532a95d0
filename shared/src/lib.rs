//! Shared types for the storefront engine
//!
//! Domain models, pricing rules, response envelopes and small utilities
//! used by the storefront client crate.

pub mod models;
pub mod pricing;
pub mod response;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

// Pricing re-exports (for convenient access)
pub use pricing::{
    LineQuote, PricingError, compute_design_charge, compute_tiered_discount, price_line,
};
