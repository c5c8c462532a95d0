//! Storefront Client - ordering client for the signage storefront
//!
//! Prices product configurations and reconciles guest carts with the
//! server-side cart; the checkout flow assembles multipart order
//! submissions for the backend API.

pub mod api;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod error;
pub mod http;
pub mod storage;

pub use api::{ApiClient, StorefrontBackend};
pub use cart::{CartSession, MergeReport, SessionMode};
pub use checkout::{
    AppliedCoupon, CheckoutFlow, CheckoutForm, build_order_lines, reconcile_line,
    validate_order_request,
};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use storage::{FileStore, GuestStore, StoredSession};

// Re-export shared types for convenience
pub use shared::models::{
    CartLine, Coupon, CouponCheck, Courier, CreateCartItem, Customer, DeliveryMethod, DesignFile,
    OrderCreated, OrderLine, OrderRequest, PricingType, Product, ProductVariant, Staff,
    VariantDetail,
};
pub use shared::pricing::{LineQuote, price_line, square_feet_from_inches};
