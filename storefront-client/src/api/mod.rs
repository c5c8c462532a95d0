//! Storefront backend API
//!
//! `StorefrontBackend` is the seam between cart/checkout logic and the
//! network. `ApiClient` is the real HTTP implementation; tests swap in
//! an in-memory one.

use async_trait::async_trait;
use serde_json::Value;
use shared::models::{
    CartItemsPayload, CartLine, Courier, CouponCheck, CouriersPayload, CreateCartItem,
    OrderCreated, OrderRequest, Product, ProductsPayload, Staff, StaffPayload,
};

use crate::{ClientConfig, ClientResult, HttpClient};

/// Backend operations the cart and checkout flows depend on
#[async_trait]
pub trait StorefrontBackend: Send + Sync {
    /// Fetch the server-side cart rows for a customer
    async fn fetch_cart(&self, customer_id: i64) -> ClientResult<Vec<CartLine>>;

    /// Add one cart row for an authenticated customer
    async fn add_cart_item(&self, item: &CreateCartItem) -> ClientResult<()>;

    /// Delete one cart row by its id
    async fn remove_cart_item(&self, cart_item_id: i64) -> ClientResult<()>;

    /// Fetch the product catalog
    async fn fetch_products(&self) -> ClientResult<Vec<Product>>;

    /// Fetch available courier providers
    async fn fetch_couriers(&self) -> ClientResult<Vec<Courier>>;

    /// Fetch staff members available as order references
    async fn fetch_staff(&self) -> ClientResult<Vec<Staff>>;

    /// Validate a coupon code against the current subtotal
    async fn check_coupon(&self, code: &str, subtotal: f64) -> ClientResult<CouponCheck>;

    /// Submit an order as a multipart form
    async fn create_order(&self, order: &OrderRequest) -> ClientResult<OrderCreated>;

    /// Replace or clear the bearer token used for authenticated calls
    fn set_token(&mut self, token: Option<String>);
}

/// HTTP-backed implementation of [`StorefrontBackend`]
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: HttpClient,
}

impl ApiClient {
    /// Create an API client from configuration
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            http: HttpClient::new(config),
        }
    }

    /// Wrap an existing HTTP client
    pub fn from_http(http: HttpClient) -> Self {
        Self { http }
    }

    /// Access the underlying HTTP client
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Build the multipart form the order endpoint expects.
    ///
    /// Scalar fields go out as text parts, order lines as one JSON-encoded
    /// "orderItems" part, and each design file as a repeated "designFiles"
    /// file part. The payment fields are fixed for the online storefront.
    fn order_form(order: &OrderRequest) -> ClientResult<reqwest::multipart::Form> {
        use reqwest::multipart::{Form, Part};

        let items_json = serde_json::to_string(&order.order_items)?;

        let mut form = Form::new()
            .text("customerId", order.customer_id.to_string())
            .text("customerName", order.customer_name.clone())
            .text("customerPhone", order.customer_phone.clone())
            .text("customerEmail", order.customer_email.clone())
            .text("billingAddress", order.billing_address.clone())
            .text("additionalNotes", order.additional_notes.clone())
            .text("deliveryMethod", order.delivery_method.as_str())
            .text("orderItems", items_json);

        if let Some(courier_id) = order.courier_id {
            form = form.text("courierId", courier_id.to_string());
        }
        if let Some(courier_address) = &order.courier_address {
            form = form.text("courierAddress", courier_address.clone());
        }
        if let Some(staff_id) = order.staff_id {
            form = form.text("staffId", staff_id.to_string());
        }
        if let Some(coupon_id) = order.coupon_id {
            form = form.text("couponId", coupon_id.to_string());
        }

        for file in &order.design_files {
            let mime = mime_guess::from_path(&file.file_name).first_or_octet_stream();
            let part = Part::bytes(file.bytes.clone())
                .file_name(file.file_name.clone())
                .mime_str(mime.essence_str())?;
            form = form.part("designFiles", part);
        }

        form = form
            .text("method", "online")
            .text("paymentMethod", "online-payment");

        Ok(form)
    }
}

#[async_trait]
impl StorefrontBackend for ApiClient {
    async fn fetch_cart(&self, customer_id: i64) -> ClientResult<Vec<CartLine>> {
        let payload: CartItemsPayload = self.http.get(&format!("cart/{}", customer_id)).await?;
        Ok(payload.cart_items)
    }

    async fn add_cart_item(&self, item: &CreateCartItem) -> ClientResult<()> {
        let _: Value = self.http.post("cart/add", item).await?;
        Ok(())
    }

    async fn remove_cart_item(&self, cart_item_id: i64) -> ClientResult<()> {
        let _: Value = self.http.delete(&format!("cart/{}", cart_item_id)).await?;
        Ok(())
    }

    async fn fetch_products(&self) -> ClientResult<Vec<Product>> {
        let payload: ProductsPayload = self.http.get("product").await?;
        Ok(payload.products)
    }

    async fn fetch_couriers(&self) -> ClientResult<Vec<Courier>> {
        let payload: CouriersPayload = self.http.get("courier").await?;
        Ok(payload
            .couriers
            .into_iter()
            .filter(|c| !c.is_deleted)
            .collect())
    }

    async fn fetch_staff(&self) -> ClientResult<Vec<Staff>> {
        let payload: StaffPayload = self.http.get("staff").await?;
        Ok(payload.staff.into_iter().filter(|s| !s.is_deleted).collect())
    }

    async fn check_coupon(&self, code: &str, subtotal: f64) -> ClientResult<CouponCheck> {
        #[derive(serde::Serialize)]
        struct CouponCheckRequest<'a> {
            code: &'a str,
            subtotal: f64,
        }

        self.http
            .post("coupon/check", &CouponCheckRequest { code, subtotal })
            .await
    }

    async fn create_order(&self, order: &OrderRequest) -> ClientResult<OrderCreated> {
        let form = Self::order_form(order)?;
        self.http.post_multipart("order/create-request", form).await
    }

    fn set_token(&mut self, token: Option<String>) {
        self.http.set_token(token);
    }
}
