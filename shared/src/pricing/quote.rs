//! Line quoting
//!
//! The discount ramp, the design surcharge and the per-line total as shown
//! on the product page and rebuilt at order submission.

use rust_decimal::prelude::*;
use serde::Serialize;

use crate::models::{Product, ProductVariant};
use crate::pricing::money::{round_money, to_decimal, to_f64};

/// Flat surcharge covering per-order design effort
pub const DESIGN_CHARGE: Decimal = Decimal::from_parts(250, 0, 0, false, 0);

/// Above this figure a line absorbs the design cost; unit prices at or
/// above it never carry the surcharge either.
const DESIGN_CHARGE_LIMIT: Decimal = Decimal::from_parts(1000, 0, 0, false, 0);

/// A priced cart line as quoted to the customer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineQuote {
    /// Quantity driving the discount lookup: pieces, or area × pieces
    pub basis: f64,
    pub discount_percentage: f64,
    pub design_charge: f64,
    /// Floored to whole currency units
    pub total: f64,
    /// False when no variant matched the selection; the total is then the
    /// raw base price and submission should stay disabled.
    pub complete: bool,
}

/// Discount basis for a line: area × pieces for area-priced products with a
/// usable area, plain piece count otherwise.
pub fn compute_basis(is_area: bool, area_sq_ft: Option<f64>, quantity: i32) -> Decimal {
    let quantity = Decimal::from(quantity);
    match area_sq_ft {
        Some(area) if is_area && area > 0.0 => to_decimal(area) * quantity,
        _ => quantity,
    }
}

/// Linear discount ramp between two inclusive basis thresholds.
///
/// The step index starts at 1 when `basis` sits exactly on
/// `discount_start`, so the first qualifying basis already earns a slice of
/// the maximum rather than 0. Past `discount_end` the full maximum applies.
/// Missing or zeroed tier configuration disables the ramp entirely.
pub fn compute_tiered_discount(
    basis: Decimal,
    discount_start: Option<i64>,
    discount_end: Option<i64>,
    max_discount_pct: Option<f64>,
) -> Decimal {
    let (Some(start), Some(end), Some(max_pct)) = (discount_start, discount_end, max_discount_pct)
    else {
        return Decimal::ZERO;
    };
    let max_pct = to_decimal(max_pct);
    if max_pct <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let start = Decimal::from(start);
    let end = Decimal::from(end);
    if basis < start {
        return Decimal::ZERO;
    }
    if basis <= end {
        let step_index = basis - start + Decimal::ONE;
        let range_length = end - start + Decimal::ONE;
        round_money(max_pct * step_index / range_length)
    } else {
        round_money(max_pct)
    }
}

/// Design surcharge rule.
///
/// Waived entirely once the discounted subtotal clears the limit; otherwise
/// levied only on products whose per-unit price sits strictly between 0 and
/// the limit.
pub fn compute_design_charge(unit_price: Decimal, discounted_subtotal: Decimal) -> Decimal {
    if discounted_subtotal > DESIGN_CHARGE_LIMIT {
        return Decimal::ZERO;
    }
    if unit_price > Decimal::ZERO && unit_price < DESIGN_CHARGE_LIMIT {
        DESIGN_CHARGE
    } else {
        Decimal::ZERO
    }
}

/// Quote one line.
///
/// With no matched variant this returns a provisional quote instead of an
/// error: the raw base price, no discount, and the flat-price surcharge
/// rule, flagged `complete: false` so callers keep the submit affordance
/// disabled until the selection fully matches a variant.
pub fn price_line(
    product: &Product,
    variant: Option<&ProductVariant>,
    quantity: i32,
    area_sq_ft: Option<f64>,
) -> LineQuote {
    let unit_price = to_decimal(product.base_price);

    let Some(variant) = variant else {
        let design_charge = compute_design_charge(unit_price, Decimal::ZERO);
        return LineQuote {
            basis: to_f64(Decimal::from(quantity)),
            discount_percentage: 0.0,
            design_charge: to_f64(design_charge),
            total: to_f64(unit_price),
            complete: false,
        };
    };

    let effective_unit = unit_price + to_decimal(variant.additional_price);
    let basis = compute_basis(product.pricing_type.is_area(), area_sq_ft, quantity);
    let discount_pct = compute_tiered_discount(
        basis,
        product.discount_start,
        product.discount_end,
        product.discount_percentage,
    );

    let discount_factor = Decimal::ONE - discount_pct / Decimal::ONE_HUNDRED;
    let discounted_subtotal = round_money(basis * effective_unit * discount_factor).floor();
    let design_charge = compute_design_charge(unit_price, discounted_subtotal);
    let total = (discounted_subtotal + design_charge).floor();

    LineQuote {
        basis: to_f64(basis),
        discount_percentage: to_f64(discount_pct),
        design_charge: to_f64(design_charge),
        total: to_f64(total),
        complete: true,
    }
}
