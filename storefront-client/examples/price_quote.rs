//! Offline Pricing Example
//!
//! Demonstrates the pricing rules without a backend:
//! 1. Quote a flat-priced product with the design surcharge
//! 2. Quote an area-priced banner through its discount ramp
//! 3. Show the provisional quote for an unmatched variant
//!
//! Run: cargo run --example price_quote

use storefront_client::{
    PricingType, Product, ProductVariant, VariantDetail, price_line, square_feet_from_inches,
};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    println!("\n🏷️  Storefront Pricing");
    println!("=====================\n");

    // 1. Flat-priced business cards, 500 per unit
    let cards = Product {
        product_id: 1,
        name: "Business Cards (100 pack)".into(),
        slug: None,
        sku: Some("BC-100".into()),
        base_price: 500.0,
        min_order_quantity: 1,
        discount_start: None,
        discount_end: None,
        discount_percentage: None,
        pricing_type: PricingType::Flat,
        is_active: true,
        variants: vec![ProductVariant {
            product_variant_id: 11,
            product_id: 1,
            additional_price: 0.0,
            variant_details: vec![VariantDetail {
                variation_item_id: 101,
            }],
        }],
    };

    let quote = price_line(&cards, Some(&cards.variants[0]), 1, None);
    println!("1 pack of business cards:");
    println!(
        "   subtotal {} + design charge {}",
        quote.total - quote.design_charge,
        quote.design_charge
    );
    println!("   total: {}\n", quote.total);

    // 2. Area-priced banner with a discount ramp from 10 to 20 sqft
    let banner = Product {
        product_id: 2,
        name: "PVC Banner".into(),
        slug: None,
        sku: Some("PVC-B".into()),
        base_price: 100.0,
        min_order_quantity: 1,
        discount_start: Some(10),
        discount_end: Some(20),
        discount_percentage: Some(20.0),
        pricing_type: PricingType::SquareFeet,
        is_active: true,
        variants: vec![ProductVariant {
            product_variant_id: 21,
            product_id: 2,
            additional_price: 0.0,
            variant_details: vec![VariantDetail {
                variation_item_id: 201,
            }],
        }],
    };

    let area = square_feet_from_inches(36.0, 60.0);
    let quote = price_line(&banner, Some(&banner.variants[0]), 1, Some(area));
    println!("36\" x 60\" banner ({area} sqft):");
    println!("   tier discount: {}%", quote.discount_percentage);
    println!("   total: {}\n", quote.total);

    // 3. No variant matched yet: provisional quote, not submittable
    let quote = price_line(&banner, None, 1, Some(area));
    println!("Same banner before choosing a material:");
    println!("   provisional total: {}", quote.total);
    println!("   complete: {}", quote.complete);
}
