//! Cart Models

use serde::{Deserialize, Serialize};

use super::product::{Product, ProductVariant};

/// One line of a customer's cart.
///
/// Server carts return these with positive `cart_item_id`s and embedded
/// product/variant snapshots. Guest carts persist the same shape client-side
/// with a stable negative id assigned at add-time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub cart_item_id: i64,
    #[serde(default)]
    pub customer_id: i64,
    pub product_id: i64,
    #[serde(default)]
    pub product_variant_id: Option<i64>,
    pub quantity: i32,
    /// Area in square feet, for area-priced products
    #[serde(default)]
    pub size: Option<f64>,
    #[serde(default)]
    pub width_inch: Option<f64>,
    #[serde(default)]
    pub height_inch: Option<f64>,
    /// Agreed line total as shown to the customer when the line was created
    pub price: f64,
    #[serde(default)]
    pub created_at: Option<String>,
    /// Product snapshot, embedded server-side or captured at add-time
    #[serde(default)]
    pub product: Option<Product>,
    #[serde(default)]
    pub product_variant: Option<ProductVariant>,
}

impl CartLine {
    /// Guest lines carry negative ids so they never collide with
    /// server-assigned ones.
    pub fn is_guest(&self) -> bool {
        self.cart_item_id < 0
    }
}

/// Add-to-cart payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCartItem {
    pub customer_id: i64,
    pub product_id: i64,
    pub product_variant_id: Option<i64>,
    pub quantity: i32,
    pub size: Option<f64>,
    pub width_inch: Option<f64>,
    pub height_inch: Option<f64>,
    pub price: f64,
}

impl CreateCartItem {
    /// Re-address a guest line at a customer, for the login-time merge.
    pub fn from_guest_line(line: &CartLine, customer_id: i64) -> Self {
        Self {
            customer_id,
            product_id: line.product_id,
            product_variant_id: line.product_variant_id,
            quantity: line.quantity,
            size: line.size,
            width_inch: line.width_inch,
            height_inch: line.height_inch,
            price: line.price,
        }
    }
}

/// Payload shape of the fetch-cart collaborator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemsPayload {
    #[serde(default)]
    pub cart_items: Vec<CartLine>,
}
