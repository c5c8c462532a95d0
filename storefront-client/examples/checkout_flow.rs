//! End-to-End Checkout Example
//!
//! This example demonstrates:
//! 1. Loading configuration from the environment
//! 2. Browsing the catalog and pricing a line into the cart
//! 3. Logging in with a pre-issued token (merging the guest cart)
//! 4. Filling the checkout form and submitting the order
//!
//! Run: cargo run --example checkout_flow
//!
//! Environment:
//!   STOREFRONT_API_URL      backend base URL (default http://localhost:8080/api)
//!   STOREFRONT_TOKEN        JWT for an existing customer (optional)
//!   STOREFRONT_CUSTOMER_ID  customer id matching the token (optional)

use std::collections::HashMap;

use storefront_client::{
    ApiClient, CartSession, CheckoutFlow, ClientConfig, ClientError, Customer, DeliveryMethod,
    FileStore, StorefrontBackend,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    println!("\n🛒 Storefront Checkout");
    println!("======================\n");

    let config = ClientConfig::from_env();
    println!("📋 Backend: {}", config.base_url);
    println!("📋 Data dir: {}\n", config.data_dir.display());

    let api = ApiClient::new(&config);
    let store = FileStore::new(&config.data_dir);
    let mut session = CartSession::new(api, store)?;
    session.refresh().await.ok();

    // Browse the catalog and pick something orderable
    println!("📦 Fetching products...");
    let products = match session.backend().fetch_products().await {
        Ok(products) => products,
        Err(err) => {
            println!("❌ Could not reach the backend: {}", err);
            println!("   Start the storefront API or set STOREFRONT_API_URL.");
            return Ok(());
        }
    };
    println!("   {} products available", products.len());

    let Some(product) = products
        .iter()
        .find(|p| p.is_active && !p.variants.is_empty())
    else {
        println!("❌ No orderable product in the catalog");
        return Ok(());
    };
    let variant = &product.variants[0];
    let quantity = product.min_order_quantity.max(1);

    println!("\n➕ Adding to cart: {} x{}", product.name, quantity);
    session
        .add_item(product, variant, quantity, None, None)
        .await?;
    println!("   Cart subtotal: {}", session.subtotal());

    // A token normally comes back from the auth endpoint after login
    if !session.is_authenticated() {
        match std::env::var("STOREFRONT_TOKEN") {
            Ok(token) => {
                let customer = Customer {
                    customer_id: std::env::var("STOREFRONT_CUSTOMER_ID")
                        .ok()
                        .and_then(|id| id.parse().ok())
                        .unwrap_or(1),
                    name: "Demo Customer".into(),
                    email: Some("demo@example.com".into()),
                    phone: Some("01712345678".into()),
                    address: None,
                };
                println!("\n🔑 Logging in as customer {}...", customer.customer_id);
                let report = session.login(token, customer).await?;
                println!("   Merged {} guest lines ({} rejected)", report.merged, report.failed);
            }
            Err(_) => {
                println!("\n🔒 No STOREFRONT_TOKEN set, staying in guest mode");
            }
        }
    }

    // Fill the form the way the checkout page would
    let mut checkout = CheckoutFlow::resume(&session)?;
    if checkout.form.customer_name.trim().is_empty() {
        checkout.form.customer_name = "Demo Customer".into();
    }
    if checkout.form.customer_email.trim().is_empty() {
        checkout.form.customer_email = "demo@example.com".into();
    }
    if checkout.form.customer_phone.trim().is_empty() {
        checkout.form.customer_phone = "01712345678".into();
    }
    checkout.form.billing_address = "12 Motijheel C/A, Dhaka".into();
    checkout.form.delivery_method = DeliveryMethod::ShopPickup;

    let catalog: HashMap<i64, _> = products
        .iter()
        .map(|p| (p.product_id, p.clone()))
        .collect();

    println!("\n📨 Submitting order (payable: {})...", checkout.payable_total(&session));
    match checkout.submit(&mut session, &catalog).await {
        Ok(created) => {
            println!("✅ Order placed!");
            if let Some(order_id) = created.order_id {
                println!("   Order id: {}", order_id);
            }
            if let Some(message) = created.message {
                println!("   {}", message);
            }
        }
        Err(ClientError::Unauthorized) => {
            println!("🔒 Login required before ordering.");
            println!("   The form was kept as a draft; set STOREFRONT_TOKEN and rerun.");
        }
        Err(err) => {
            println!("❌ Order rejected: {}", err);
        }
    }

    Ok(())
}
