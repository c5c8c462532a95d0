//! Cart session
//!
//! One cart API over two backing stores. Guests keep their lines in
//! local storage under stable negative ids; authenticated customers
//! keep them as server rows. Logging in replays the guest lines onto
//! the server and then drops the local copy.

use chrono::{SecondsFormat, Utc};
use shared::models::{CartLine, CreateCartItem, Customer, Product, ProductVariant};
use shared::pricing::{price_line, square_feet_from_inches, sum_prices, validate_cart_line};
use shared::util::guest_line_id;

use crate::api::StorefrontBackend;
use crate::storage::{GuestStore, StoredSession};
use crate::{ClientError, ClientResult};

/// Whose cart this session is operating on
#[derive(Debug, Clone)]
pub enum SessionMode {
    /// Anonymous visitor, lines live in local storage
    Guest,
    /// Logged-in customer, lines live on the server
    Authenticated { customer: Customer },
}

/// Outcome of replaying a guest cart onto the server
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Lines accepted by the server
    pub merged: usize,
    /// Lines the server rejected and that were dropped
    pub failed: usize,
}

/// Cart state machine over a backend and a guest store
pub struct CartSession<B: StorefrontBackend, S: GuestStore> {
    backend: B,
    storage: S,
    mode: SessionMode,
    lines: Vec<CartLine>,
}

impl<B: StorefrontBackend, S: GuestStore> CartSession<B, S> {
    /// Create a session, resuming a persisted login when one exists.
    ///
    /// Guest lines are available immediately; server lines need a
    /// [`refresh`](Self::refresh) call.
    pub fn new(mut backend: B, storage: S) -> ClientResult<Self> {
        let mode = match storage.load_session()? {
            Some(StoredSession { token, customer }) => {
                backend.set_token(Some(token));
                SessionMode::Authenticated { customer }
            }
            None => SessionMode::Guest,
        };

        let lines = match &mode {
            SessionMode::Guest => storage.load_cart()?,
            SessionMode::Authenticated { .. } => Vec::new(),
        };

        Ok(Self {
            backend,
            storage,
            mode,
            lines,
        })
    }

    /// Reload lines from wherever the current mode keeps them
    pub async fn refresh(&mut self) -> ClientResult<()> {
        self.lines = match &self.mode {
            SessionMode::Guest => self.storage.load_cart()?,
            SessionMode::Authenticated { customer } => {
                self.backend.fetch_cart(customer.customer_id).await?
            }
        };
        Ok(())
    }

    /// Current cart lines, newest last
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Current session mode
    pub fn mode(&self) -> &SessionMode {
        &self.mode
    }

    /// Logged-in customer, if any
    pub fn customer(&self) -> Option<&Customer> {
        match &self.mode {
            SessionMode::Authenticated { customer } => Some(customer),
            SessionMode::Guest => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.mode, SessionMode::Authenticated { .. })
    }

    /// Access the backend this session talks to
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Access the guest store this session persists into
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Sum of agreed line totals
    pub fn subtotal(&self) -> f64 {
        sum_prices(self.lines.iter().map(|l| l.price))
    }

    /// Price a line and add it to the cart.
    ///
    /// The caller picks the variant, so a line can only enter the cart
    /// fully priced. Dimensions only matter for area-priced products
    /// and both must be positive to count.
    pub async fn add_item(
        &mut self,
        product: &Product,
        variant: &ProductVariant,
        quantity: i32,
        width_inch: Option<f64>,
        height_inch: Option<f64>,
    ) -> ClientResult<()> {
        let size = match (product.pricing_type.is_area(), width_inch, height_inch) {
            (true, Some(w), Some(h)) if w > 0.0 && h > 0.0 => {
                Some(square_feet_from_inches(w, h))
            }
            _ => None,
        };

        validate_cart_line(product, quantity, size)?;

        let quote = price_line(product, Some(variant), quantity, size);
        if quote.total <= 0.0 {
            return Err(ClientError::Validation("Line total must be positive".into()));
        }

        let customer_id = self.customer().map(|c| c.customer_id);
        match customer_id {
            None => {
                let line = CartLine {
                    cart_item_id: guest_line_id(),
                    customer_id: 0,
                    product_id: product.product_id,
                    product_variant_id: Some(variant.product_variant_id),
                    quantity,
                    size,
                    width_inch,
                    height_inch,
                    price: quote.total,
                    created_at: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
                    product: Some(product.clone()),
                    product_variant: Some(variant.clone()),
                };
                tracing::debug!(
                    cart_item_id = line.cart_item_id,
                    product_id = product.product_id,
                    "Guest cart line added"
                );
                self.lines.push(line);
                self.storage.save_cart(&self.lines)?;
            }
            Some(customer_id) => {
                let item = CreateCartItem {
                    customer_id,
                    product_id: product.product_id,
                    product_variant_id: Some(variant.product_variant_id),
                    quantity,
                    size,
                    width_inch,
                    height_inch,
                    price: quote.total,
                };
                self.backend.add_cart_item(&item).await?;
                self.refresh().await?;
            }
        }

        Ok(())
    }

    /// Remove one line by id
    pub async fn remove_item(&mut self, cart_item_id: i64) -> ClientResult<()> {
        if self.is_authenticated() {
            self.backend.remove_cart_item(cart_item_id).await?;
            self.refresh().await
        } else {
            let before = self.lines.len();
            self.lines.retain(|l| l.cart_item_id != cart_item_id);
            if self.lines.len() == before {
                return Err(ClientError::NotFound(format!("cart item {}", cart_item_id)));
            }
            self.storage.save_cart(&self.lines)
        }
    }

    /// Switch to an authenticated session and replay the guest cart.
    ///
    /// The session is persisted before the merge, so a crash mid-merge
    /// resumes authenticated with whatever guest lines are left.
    pub async fn login(
        &mut self,
        token: impl Into<String>,
        customer: Customer,
    ) -> ClientResult<MergeReport> {
        let token = token.into();
        self.storage.save_session(&StoredSession {
            token: token.clone(),
            customer: customer.clone(),
        })?;
        self.backend.set_token(Some(token));
        tracing::info!(customer_id = customer.customer_id, "Customer logged in");
        self.mode = SessionMode::Authenticated { customer };

        self.merge_guest_cart().await
    }

    /// Drop the session and fall back to the guest cart
    pub fn logout(&mut self) -> ClientResult<()> {
        self.storage.clear_session()?;
        self.backend.set_token(None);
        self.mode = SessionMode::Guest;
        self.lines = self.storage.load_cart()?;
        tracing::info!("Session cleared");
        Ok(())
    }

    /// Replay stored guest lines onto the server cart.
    ///
    /// No-op unless authenticated with a non-empty guest cart. Lines
    /// are added one at a time in stored order. A rejected line is
    /// logged and dropped; an auth failure aborts the whole merge and
    /// leaves the guest cart on disk for the next login.
    pub async fn merge_guest_cart(&mut self) -> ClientResult<MergeReport> {
        let customer_id = match self.customer() {
            Some(customer) => customer.customer_id,
            None => return Ok(MergeReport::default()),
        };

        let guest_lines = self.storage.load_cart()?;
        if guest_lines.is_empty() {
            return Ok(MergeReport::default());
        }

        let mut report = MergeReport::default();
        for line in &guest_lines {
            let item = CreateCartItem::from_guest_line(line, customer_id);
            match self.backend.add_cart_item(&item).await {
                Ok(()) => report.merged += 1,
                Err(ClientError::Unauthorized) => {
                    // Token went stale mid-merge. Drop the session but
                    // keep the guest cart for the next attempt.
                    self.logout()?;
                    return Err(ClientError::Unauthorized);
                }
                Err(err) => {
                    tracing::warn!(
                        product_id = line.product_id,
                        error = %err,
                        "Cart line rejected during merge"
                    );
                    report.failed += 1;
                }
            }
        }

        self.storage.clear_cart()?;
        self.refresh().await?;
        tracing::info!(
            merged = report.merged,
            failed = report.failed,
            "Guest cart merged"
        );
        Ok(report)
    }
}
