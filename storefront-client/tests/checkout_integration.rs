// storefront-client/tests/checkout_integration.rs
// Checkout flow tests over an in-memory backend

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use storefront_client::{
    CartLine, CartSession, CheckoutFlow, ClientError, ClientResult, Coupon, CouponCheck, Courier,
    CreateCartItem, Customer, FileStore, GuestStore, OrderCreated, OrderRequest, Product,
    ProductVariant, Staff, StorefrontBackend,
};
use tempfile::TempDir;

fn product(product_id: i64, base_price: f64) -> Product {
    Product {
        product_id,
        name: format!("Product {product_id}"),
        slug: None,
        sku: None,
        base_price,
        min_order_quantity: 1,
        discount_start: None,
        discount_end: None,
        discount_percentage: None,
        pricing_type: Default::default(),
        is_active: true,
        variants: vec![ProductVariant {
            product_variant_id: product_id * 10,
            additional_price: 0.0,
            ..Default::default()
        }],
    }
}

fn customer() -> Customer {
    Customer {
        customer_id: 11,
        name: "Rahim Uddin".into(),
        email: Some("rahim@example.com".into()),
        phone: Some("01712345678".into()),
        address: None,
    }
}

fn fill_form(flow: &mut CheckoutFlow) {
    flow.form.customer_name = "Rahim Uddin".into();
    flow.form.customer_email = "rahim@example.com".into();
    flow.form.customer_phone = "01712345678".into();
    flow.form.billing_address = "12 Motijheel C/A, Dhaka".into();
}

/// In-memory stand-in for the storefront backend
#[derive(Default)]
struct MockBackend {
    token: Option<String>,
    rows: Mutex<Vec<CartLine>>,
    next_id: Mutex<i64>,
    products: Vec<Product>,
    /// (code, coupon id, discounted total) accepted by coupon checks
    coupon: Option<(String, i64, f64)>,
    orders: Mutex<Vec<OrderRequest>>,
    order_unauthorized: bool,
}

#[async_trait]
impl StorefrontBackend for MockBackend {
    async fn fetch_cart(&self, customer_id: i64) -> ClientResult<Vec<CartLine>> {
        if self.token.is_none() {
            return Err(ClientError::Unauthorized);
        }
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.customer_id == customer_id)
            .cloned()
            .collect())
    }

    async fn add_cart_item(&self, item: &CreateCartItem) -> ClientResult<()> {
        if self.token.is_none() {
            return Err(ClientError::Unauthorized);
        }
        let product = self
            .products
            .iter()
            .find(|p| p.product_id == item.product_id)
            .cloned();
        let product_variant = product.as_ref().and_then(|p| {
            p.variants
                .iter()
                .find(|v| Some(v.product_variant_id) == item.product_variant_id)
                .cloned()
        });

        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        self.rows.lock().unwrap().push(CartLine {
            cart_item_id: *next_id,
            customer_id: item.customer_id,
            product_id: item.product_id,
            product_variant_id: item.product_variant_id,
            quantity: item.quantity,
            size: item.size,
            width_inch: item.width_inch,
            height_inch: item.height_inch,
            price: item.price,
            product,
            product_variant,
            ..Default::default()
        });
        Ok(())
    }

    async fn remove_cart_item(&self, cart_item_id: i64) -> ClientResult<()> {
        self.rows
            .lock()
            .unwrap()
            .retain(|r| r.cart_item_id != cart_item_id);
        Ok(())
    }

    async fn fetch_products(&self) -> ClientResult<Vec<Product>> {
        Ok(self.products.clone())
    }

    async fn fetch_couriers(&self) -> ClientResult<Vec<Courier>> {
        Ok(Vec::new())
    }

    async fn fetch_staff(&self) -> ClientResult<Vec<Staff>> {
        Ok(Vec::new())
    }

    async fn check_coupon(&self, code: &str, subtotal: f64) -> ClientResult<CouponCheck> {
        match &self.coupon {
            Some((accepted, coupon_id, discounted)) if accepted == code => Ok(CouponCheck {
                valid: true,
                coupon: Some(Coupon {
                    coupon_id: *coupon_id,
                    code: Some(accepted.clone()),
                    discount_percentage: None,
                }),
                discounted_price: Some(*discounted),
                message: None,
            }),
            _ => Ok(CouponCheck {
                valid: false,
                coupon: None,
                discounted_price: Some(subtotal),
                message: Some("Coupon code is invalid or expired.".into()),
            }),
        }
    }

    async fn create_order(&self, order: &OrderRequest) -> ClientResult<OrderCreated> {
        if self.order_unauthorized || self.token.is_none() {
            return Err(ClientError::Unauthorized);
        }
        self.orders.lock().unwrap().push(order.clone());
        Ok(OrderCreated {
            order_id: Some(5001),
            message: Some("Order request received.".into()),
        })
    }

    fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }
}

async fn logged_in_session_with_line(
    dir: &TempDir,
    backend: MockBackend,
) -> CartSession<MockBackend, FileStore> {
    let mut session = CartSession::new(backend, FileStore::new(dir.path())).unwrap();
    session.login("jwt-token", customer()).await.unwrap();

    let p = product(9, 300.0);
    session
        .add_item(&p, &p.variants[0], 2, None, None)
        .await
        .unwrap();
    session
}

#[tokio::test]
async fn test_submit_assembles_and_clears() {
    let dir = TempDir::new().unwrap();
    let backend = MockBackend {
        products: vec![product(9, 300.0)],
        ..Default::default()
    };
    let mut session = logged_in_session_with_line(&dir, backend).await;

    let mut flow = CheckoutFlow::new();
    fill_form(&mut flow);

    let created = flow.submit(&mut session, &HashMap::new()).await.unwrap();
    assert_eq!(created.order_id, Some(5001));

    let orders = session.backend().orders.lock().unwrap();
    assert_eq!(orders.len(), 1);
    let request = &orders[0];
    assert_eq!(request.customer_id, 11);
    assert_eq!(request.order_items.len(), 1);

    let item = &request.order_items[0];
    // 2 * 300 = 600 list + 250 charge = 850 agreed: breakdown explains it all
    assert_eq!(item.unit_price, 300.0);
    assert_eq!(item.design_charge, 250.0);
    assert_eq!(item.discount_percentage, 0.0);
    assert_eq!(item.price, 850.0);

    // Breakdown multiplies back to the agreed price
    let basis = item.quantity as f64;
    let recomputed = (basis * (item.unit_price + item.additional_price))
        * (1.0 - item.discount_percentage / 100.0)
        + item.design_charge;
    assert!((recomputed - item.price).abs() <= 1.0);
    drop(orders);

    // Server cart emptied and session refreshed
    assert!(session.backend().rows.lock().unwrap().is_empty());
    assert!(session.lines().is_empty());
    assert!(session.storage().load_checkout_form().unwrap().is_none());
}

#[tokio::test]
async fn test_submit_as_guest_saves_draft_and_asks_for_login() {
    let dir = TempDir::new().unwrap();
    let mut session =
        CartSession::new(MockBackend::default(), FileStore::new(dir.path())).unwrap();

    let p = product(9, 300.0);
    session
        .add_item(&p, &p.variants[0], 2, None, None)
        .await
        .unwrap();

    let mut flow = CheckoutFlow::new();
    fill_form(&mut flow);

    let err = flow.submit(&mut session, &HashMap::new()).await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized));

    // Form survives the authentication detour; cart untouched
    let draft = session.storage().load_checkout_form().unwrap().unwrap();
    assert_eq!(draft.customer_name, "Rahim Uddin");
    assert_eq!(session.storage().load_cart().unwrap().len(), 1);
}

#[tokio::test]
async fn test_submit_blocks_invalid_phone() {
    let dir = TempDir::new().unwrap();
    let mut session = logged_in_session_with_line(&dir, MockBackend::default()).await;

    let mut flow = CheckoutFlow::new();
    fill_form(&mut flow);
    flow.form.customer_phone = "0123".into();

    let err = flow.submit(&mut session, &HashMap::new()).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Validation error: Phone number must be a valid Bangladeshi number starting with 01 and 11 digits long."
    );
    assert!(session.backend().orders.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_coupon_flows_into_order_request() {
    let dir = TempDir::new().unwrap();
    let backend = MockBackend {
        coupon: Some(("SAVE100".into(), 77, 750.0)),
        ..Default::default()
    };
    let mut session = logged_in_session_with_line(&dir, backend).await;

    let mut flow = CheckoutFlow::new();
    fill_form(&mut flow);

    assert_eq!(flow.payable_total(&session), 850.0);

    let applied = flow.apply_coupon(&session, "SAVE100").await.unwrap();
    assert_eq!(applied.coupon_id, 77);
    assert_eq!(flow.payable_total(&session), 750.0);

    flow.submit(&mut session, &HashMap::new()).await.unwrap();
    let orders = session.backend().orders.lock().unwrap();
    assert_eq!(orders[0].coupon_id, Some(77));

    // Spent with the order
    drop(orders);
    assert!(flow.applied_coupon().is_none());
}

#[tokio::test]
async fn test_apply_coupon_rejections() {
    let dir = TempDir::new().unwrap();
    let backend = MockBackend {
        coupon: Some(("SAVE100".into(), 77, 750.0)),
        ..Default::default()
    };
    let mut session = logged_in_session_with_line(&dir, backend).await;

    let mut flow = CheckoutFlow::new();
    let empty = flow.apply_coupon(&session, "  ").await.unwrap_err();
    assert_eq!(
        empty.to_string(),
        "Validation error: Please enter a coupon code."
    );

    let wrong = flow.apply_coupon(&session, "WRONG").await.unwrap_err();
    assert_eq!(
        wrong.to_string(),
        "Validation error: Coupon code is invalid or expired."
    );
    assert!(flow.applied_coupon().is_none());
}

#[tokio::test]
async fn test_resume_prefers_customer_identity_and_consumes_draft() {
    let dir = TempDir::new().unwrap();
    let mut session =
        CartSession::new(MockBackend::default(), FileStore::new(dir.path())).unwrap();

    // A guest drafts the form, then logs in
    let mut guest_flow = CheckoutFlow::new();
    guest_flow.form.customer_name = "guest".into();
    guest_flow.form.customer_email = "guest@nowhere.test".into();
    guest_flow.form.billing_address = "12 Motijheel C/A, Dhaka".into();
    guest_flow.save_draft(session.storage()).unwrap();

    session.login("jwt-token", customer()).await.unwrap();

    let flow = CheckoutFlow::resume(&session).unwrap();
    // Account identity wins over draft values
    assert_eq!(flow.form.customer_name, "Rahim Uddin");
    assert_eq!(flow.form.customer_email, "rahim@example.com");
    assert_eq!(flow.form.customer_phone, "01712345678");
    // Everything else survives from the draft
    assert_eq!(flow.form.billing_address, "12 Motijheel C/A, Dhaka");

    // Draft is single-shot
    assert!(session.storage().load_checkout_form().unwrap().is_none());
}

#[tokio::test]
async fn test_submit_falls_back_to_stored_guest_lines() {
    let dir = TempDir::new().unwrap();
    let mut session =
        CartSession::new(MockBackend::default(), FileStore::new(dir.path())).unwrap();
    session.login("jwt-token", customer()).await.unwrap();

    // A guest line left on disk after the login-time merge, say from an
    // interrupted earlier visit, with no matching server row
    let p = product(9, 300.0);
    let leftover = CartLine {
        cart_item_id: -7,
        product_id: 9,
        product_variant_id: Some(90),
        quantity: 2,
        price: 850.0,
        product: Some(p.clone()),
        product_variant: Some(p.variants[0].clone()),
        ..Default::default()
    };
    session
        .storage()
        .save_cart(std::slice::from_ref(&leftover))
        .unwrap();
    session.refresh().await.unwrap();
    assert!(session.lines().is_empty());

    let mut flow = CheckoutFlow::new();
    fill_form(&mut flow);
    flow.submit(&mut session, &HashMap::new()).await.unwrap();

    let orders = session.backend().orders.lock().unwrap();
    assert_eq!(orders[0].order_items.len(), 1);
    assert_eq!(orders[0].order_items[0].price, 850.0);
    assert_eq!(orders[0].order_items[0].unit_price, 300.0);
}

#[tokio::test]
async fn test_unauthorized_submit_logs_out() {
    let dir = TempDir::new().unwrap();
    let backend = MockBackend {
        order_unauthorized: true,
        ..Default::default()
    };
    let mut session = logged_in_session_with_line(&dir, backend).await;

    let mut flow = CheckoutFlow::new();
    fill_form(&mut flow);

    let err = flow.submit(&mut session, &HashMap::new()).await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized));
    assert!(!session.is_authenticated());
    assert!(session.storage().load_session().unwrap().is_none());
}
