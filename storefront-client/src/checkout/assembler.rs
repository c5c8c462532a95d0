//! Order line assembly
//!
//! Turns cart lines into the breakdown the order endpoint expects. The
//! stored line total is the agreed price and is sent verbatim; the
//! fields around it are recomputed from the product snapshot so the
//! breakdown multiplies back to that total. Any shortfall between the
//! list price and the agreed price (a coupon, say) is folded into the
//! discount percentage, never into the design charge.

use std::collections::HashMap;

use rust_decimal::{Decimal, RoundingStrategy};
use shared::models::{CartLine, OrderLine, Product, ProductVariant};
use shared::pricing::{
    compute_basis, compute_design_charge, compute_tiered_discount, round_money, to_decimal, to_f64,
};

/// Build order lines for every cart line, in cart order.
///
/// Snapshots embedded in the line win; lines without one fall back to
/// the catalog lookup by product id.
pub fn build_order_lines(lines: &[CartLine], catalog: &HashMap<i64, Product>) -> Vec<OrderLine> {
    lines
        .iter()
        .map(|line| {
            let product = line
                .product
                .as_ref()
                .or_else(|| catalog.get(&line.product_id));
            let variant = line.product_variant.as_ref().or_else(|| {
                product.and_then(|p| {
                    p.variants
                        .iter()
                        .find(|v| Some(v.product_variant_id) == line.product_variant_id)
                })
            });
            reconcile_line(line, product, variant)
        })
        .collect()
}

/// Reconcile one cart line into its submitted breakdown.
///
/// Lines without product snapshots still assemble: every derived field
/// falls back to zero and the stored price goes through untouched.
pub fn reconcile_line(
    line: &CartLine,
    product: Option<&Product>,
    variant: Option<&ProductVariant>,
) -> OrderLine {
    let unit_price = product.map(|p| to_decimal(p.base_price)).unwrap_or_default();
    let additional_price = variant
        .map(|v| to_decimal(v.additional_price))
        .unwrap_or_default();
    let effective_unit = unit_price + additional_price;

    let is_area = product.is_some_and(|p| p.pricing_type.is_area());
    let basis = compute_basis(is_area, line.size, line.quantity);

    let tier_pct = match product {
        Some(product) => compute_tiered_discount(
            basis,
            product.discount_start,
            product.discount_end,
            product.discount_percentage,
        ),
        None => Decimal::ZERO,
    };

    // Recompute the charge from the tier-discounted subtotal, as quoted
    let discount_factor = Decimal::ONE - tier_pct / Decimal::ONE_HUNDRED;
    let discounted_subtotal = round_money(basis * effective_unit * discount_factor).floor();
    let design_charge = compute_design_charge(unit_price, discounted_subtotal);

    // Whatever the breakdown fails to explain becomes extra discount
    let line_price = to_decimal(line.price);
    let list_price = basis * effective_unit;
    let required_amount = (list_price + design_charge - line_price)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .max(Decimal::ZERO);
    let required_pct = if list_price > Decimal::ZERO {
        required_amount / list_price * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };
    let final_pct = round_money(tier_pct + required_pct).min(Decimal::ONE_HUNDRED);

    OrderLine {
        product_id: line.product_id,
        product_variant_id: line.product_variant_id,
        quantity: line.quantity,
        size: line.size,
        width_inch: line.width_inch,
        height_inch: line.height_inch,
        unit_price: to_f64(unit_price),
        additional_price: to_f64(additional_price),
        discount_percentage: to_f64(final_pct),
        design_charge: to_f64(design_charge),
        price: line.price,
    }
}
