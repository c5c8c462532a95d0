//! Money conversion and validation utilities
//!
//! Monetary wire fields are `f64`; every calculation converts to `Decimal`
//! first and back at the end, rounded to 2 decimal places.

use rust_decimal::prelude::*;

use crate::models::Product;
use crate::pricing::PricingError;

/// Rounding precision for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Maximum allowed price per unit
const MAX_PRICE: f64 = 1_000_000.0;
/// Maximum allowed quantity per line
const MAX_QUANTITY: i32 = 9999;

const INCHES_PER_FOOT: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Validate that a f64 value is finite (not NaN, not Infinity)
#[inline]
fn require_finite(value: f64, field_name: &str) -> Result<(), PricingError> {
    if !value.is_finite() {
        return Err(PricingError::InvalidInput(format!(
            "{} must be a finite number, got {}",
            field_name, value
        )));
    }
    Ok(())
}

/// Validate quantity and dimensions before a line is added to a cart.
///
/// The minimum-order check carries the storefront's exact user-facing
/// wording; everything else is a plain input-bounds failure.
pub fn validate_cart_line(
    product: &Product,
    quantity: i32,
    area_sq_ft: Option<f64>,
) -> Result<(), PricingError> {
    if quantity <= 0 {
        return Err(PricingError::InvalidQuantity(quantity));
    }
    if quantity > MAX_QUANTITY {
        return Err(PricingError::InvalidInput(format!(
            "quantity exceeds maximum allowed ({}), got {}",
            MAX_QUANTITY, quantity
        )));
    }
    if quantity < product.min_order_quantity {
        return Err(PricingError::BelowMinimumQuantity(product.min_order_quantity));
    }

    require_finite(product.base_price, "base price")?;
    if product.base_price < 0.0 {
        return Err(PricingError::InvalidInput(format!(
            "base price must be non-negative, got {}",
            product.base_price
        )));
    }
    if product.base_price > MAX_PRICE {
        return Err(PricingError::InvalidInput(format!(
            "base price exceeds maximum allowed ({}), got {}",
            MAX_PRICE, product.base_price
        )));
    }

    if let Some(area) = area_sq_ft {
        require_finite(area, "area")?;
        if area < 0.0 {
            return Err(PricingError::InvalidInput(format!(
                "area must be non-negative, got {}",
                area
            )));
        }
    }

    Ok(())
}

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Round to 2 decimal places, half away from zero
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Area of a width × height rectangle given in inches, in square feet
/// rounded to 2 decimal places.
pub fn square_feet_from_inches(width_inch: f64, height_inch: f64) -> f64 {
    let width_ft = to_decimal(width_inch) / INCHES_PER_FOOT;
    let height_ft = to_decimal(height_inch) / INCHES_PER_FOOT;
    to_f64(width_ft * height_ft)
}

/// Sum line prices with precise arithmetic
pub fn sum_prices<I: IntoIterator<Item = f64>>(prices: I) -> f64 {
    let total: Decimal = prices.into_iter().map(to_decimal).sum();
    to_f64(total)
}

/// Compare two monetary values for equality (within 0.01 tolerance)
pub fn money_eq(a: f64, b: f64) -> bool {
    let diff = (to_decimal(a) - to_decimal(b)).abs();
    diff < MONEY_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PricingType;

    fn test_product(base_price: f64, min_order_quantity: i32) -> Product {
        Product {
            product_id: 1,
            name: "Test".to_string(),
            slug: None,
            sku: None,
            base_price,
            min_order_quantity,
            discount_start: None,
            discount_end: None,
            discount_percentage: None,
            pricing_type: PricingType::Flat,
            is_active: true,
            variants: vec![],
        }
    }

    #[test]
    fn test_to_decimal_precision() {
        // Classic floating point problem: 0.1 + 0.2 != 0.3
        let sum_f64 = 0.1_f64 + 0.2_f64;
        assert_ne!(sum_f64, 0.3);

        let sum_dec = to_decimal(0.1) + to_decimal(0.2);
        assert_eq!(to_f64(sum_dec), 0.3);
    }

    #[test]
    fn test_to_decimal_non_finite_becomes_zero() {
        assert_eq!(to_decimal(f64::NAN), Decimal::ZERO);
        assert_eq!(to_decimal(f64::INFINITY), Decimal::ZERO);
        assert_eq!(to_decimal(f64::NEG_INFINITY), Decimal::ZERO);
    }

    #[test]
    fn test_round_money_half_away_from_zero() {
        assert_eq!(round_money(Decimal::new(10905, 3)), Decimal::new(1091, 2)); // 10.905 -> 10.91
        assert_eq!(round_money(Decimal::new(10904, 3)), Decimal::new(1090, 2)); // 10.904 -> 10.90
    }

    #[test]
    fn test_square_feet_from_inches() {
        // 24" x 36" = 2ft x 3ft = 6 sqft
        assert_eq!(square_feet_from_inches(24.0, 36.0), 6.0);
        // 23" x 35" = 1.9166ft x 2.9166ft = 5.5902..
        assert_eq!(square_feet_from_inches(23.0, 35.0), 5.59);
    }

    #[test]
    fn test_sum_prices_accumulation() {
        let total = sum_prices((0..1000).map(|_| 0.01));
        assert_eq!(total, 10.0);
    }

    #[test]
    fn test_money_eq() {
        assert!(money_eq(100.0, 100.0));
        assert!(money_eq(100.004, 100.006));
        assert!(!money_eq(100.0, 100.02));
    }

    #[test]
    fn test_validate_cart_line_minimum_order() {
        let product = test_product(500.0, 5);
        let err = validate_cart_line(&product, 3, None).unwrap_err();
        assert_eq!(err.to_string(), "You must order minimum 5 pieces.");
        assert!(validate_cart_line(&product, 5, None).is_ok());
    }

    #[test]
    fn test_validate_cart_line_rejects_bad_quantity() {
        let product = test_product(500.0, 1);
        assert!(validate_cart_line(&product, 0, None).is_err());
        assert!(validate_cart_line(&product, -2, None).is_err());
        assert!(validate_cart_line(&product, MAX_QUANTITY + 1, None).is_err());
    }

    #[test]
    fn test_validate_cart_line_rejects_bad_inputs() {
        assert!(validate_cart_line(&test_product(f64::NAN, 1), 1, None).is_err());
        assert!(validate_cart_line(&test_product(-1.0, 1), 1, None).is_err());
        assert!(validate_cart_line(&test_product(MAX_PRICE * 2.0, 1), 1, None).is_err());
        assert!(validate_cart_line(&test_product(500.0, 1), 1, Some(-3.0)).is_err());
        assert!(validate_cart_line(&test_product(500.0, 1), 1, Some(f64::INFINITY)).is_err());
        assert!(validate_cart_line(&test_product(500.0, 1), 1, Some(12.5)).is_ok());
    }
}
