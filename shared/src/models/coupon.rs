//! Coupon Models

use serde::{Deserialize, Serialize};

/// Coupon entity as returned by the coupon-check collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    pub coupon_id: i64,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub discount_percentage: Option<f64>,
}

/// Result of checking a coupon code against an order subtotal
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponCheck {
    #[serde(default)]
    pub valid: bool,
    #[serde(default)]
    pub coupon: Option<Coupon>,
    /// Order total after the coupon is applied
    #[serde(default)]
    pub discounted_price: Option<f64>,
    #[serde(default)]
    pub message: Option<String>,
}
