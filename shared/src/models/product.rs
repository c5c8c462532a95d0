//! Product Model

use serde::{Deserialize, Serialize};

/// How a product's line total is derived from its quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PricingType {
    /// Priced per piece
    #[default]
    #[serde(rename = "flat")]
    Flat,
    /// Priced per square foot, multiplied by piece count
    #[serde(rename = "square-feet")]
    SquareFeet,
}

impl PricingType {
    pub fn is_area(&self) -> bool {
        matches!(self, PricingType::SquareFeet)
    }
}

/// Product entity (read-only from the engine's perspective)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub product_id: i64,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    pub base_price: f64,
    /// Smallest quantity the shop accepts for this product
    #[serde(default = "default_min_order_quantity")]
    pub min_order_quantity: i32,
    /// Inclusive basis threshold where the discount ramp begins
    #[serde(default)]
    pub discount_start: Option<i64>,
    /// Inclusive basis threshold where the ramp reaches its maximum
    #[serde(default)]
    pub discount_end: Option<i64>,
    /// Maximum discount percent, reached at `discount_end`
    #[serde(default)]
    pub discount_percentage: Option<f64>,
    #[serde(default)]
    pub pricing_type: PricingType,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub variants: Vec<ProductVariant>,
}

fn default_min_order_quantity() -> i32 {
    1
}

impl Product {
    /// Find the variant matching a full selection of variation items.
    ///
    /// A variant matches when every one of its detail rows points at an item
    /// the customer selected. An incomplete selection matches nothing, which
    /// callers surface as a provisional quote rather than an error.
    pub fn matching_variant(&self, selected_item_ids: &[i64]) -> Option<&ProductVariant> {
        self.variants.iter().find(|variant| {
            !variant.variant_details.is_empty()
                && variant
                    .variant_details
                    .iter()
                    .all(|detail| selected_item_ids.contains(&detail.variation_item_id))
        })
    }
}

/// Product variant entity
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    pub product_variant_id: i64,
    #[serde(default)]
    pub product_id: i64,
    /// Added to the base price per unit, before any discount
    pub additional_price: f64,
    #[serde(default)]
    pub variant_details: Vec<VariantDetail>,
}

/// One variation-axis choice a variant is composed of
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantDetail {
    pub variation_item_id: i64,
}
