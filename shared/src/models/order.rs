//! Order Models

use serde::{Deserialize, Serialize};

/// Delivery options accepted by the order-creation collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DeliveryMethod {
    #[default]
    #[serde(rename = "shop-pickup")]
    ShopPickup,
    #[serde(rename = "courier")]
    Courier,
}

impl DeliveryMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryMethod::ShopPickup => "shop-pickup",
            DeliveryMethod::Courier => "courier",
        }
    }
}

/// One submitted order line with its full pricing breakdown.
///
/// Synthesized fresh per checkout attempt; `price` is always the cart's
/// stored line total verbatim, while the breakdown fields around it are
/// recomputed so they multiply back to that same figure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product_id: i64,
    pub product_variant_id: Option<i64>,
    pub quantity: i32,
    pub size: Option<f64>,
    pub width_inch: Option<f64>,
    pub height_inch: Option<f64>,
    pub unit_price: f64,
    pub additional_price: f64,
    pub discount_percentage: f64,
    pub design_charge: f64,
    pub price: f64,
}

/// A design artwork attachment for an order.
///
/// Carries bytes and a filename only; attachments are never persisted in
/// client storage, so a page reload drops them.
#[derive(Debug, Clone)]
pub struct DesignFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// The single order-creation request shape.
///
/// Optional fields cover what older call sites passed positionally; the
/// whole struct is validated once before any network call.
#[derive(Debug, Clone)]
pub struct OrderRequest {
    pub customer_id: i64,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: String,
    pub billing_address: String,
    pub additional_notes: String,
    pub delivery_method: DeliveryMethod,
    pub courier_id: Option<i64>,
    pub courier_address: Option<String>,
    pub staff_id: Option<i64>,
    pub coupon_id: Option<i64>,
    pub order_items: Vec<OrderLine>,
    pub design_files: Vec<DesignFile>,
}

/// Payload returned by the create-order collaborator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreated {
    #[serde(default)]
    pub order_id: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
}
