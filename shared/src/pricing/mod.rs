//! Pricing rules
//!
//! Pure computation over product/variant data: tiered quantity discounts,
//! the design surcharge, and per-line totals. All arithmetic is done with
//! `Decimal` internally and converted to `f64` at the edges.

pub mod money;
pub mod quote;

use thiserror::Error;

pub use money::{
    MONEY_TOLERANCE, money_eq, round_money, square_feet_from_inches, sum_prices, to_decimal,
    to_f64, validate_cart_line,
};
pub use quote::{
    DESIGN_CHARGE, LineQuote, compute_basis, compute_design_charge, compute_tiered_discount,
    price_line,
};

/// Validation failures raised before a line enters a cart.
#[derive(Debug, Error)]
pub enum PricingError {
    /// Shop floor for this product, surfaced with the exact storefront wording
    #[error("You must order minimum {0} pieces.")]
    BelowMinimumQuantity(i32),

    #[error("quantity must be positive, got {0}")]
    InvalidQuantity(i32),

    #[error("{0}")]
    InvalidInput(String),
}
