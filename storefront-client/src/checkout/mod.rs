//! Checkout flow
//!
//! Carries a checkout form through coupon application, order assembly
//! and multipart submission. The form survives an authentication
//! detour as a stored draft; design file attachments never do.

mod assembler;

pub use assembler::{build_order_lines, reconcile_line};

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use shared::models::{DeliveryMethod, DesignFile, OrderCreated, OrderRequest, Product};

use crate::api::StorefrontBackend;
use crate::cart::CartSession;
use crate::storage::GuestStore;
use crate::{ClientError, ClientResult};

/// Checkout form state.
///
/// Persisted as a draft whenever checkout is interrupted by a login,
/// then consumed on resume. `design_files` is deliberately skipped:
/// attachments have to be re-picked after any interruption.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckoutForm {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub billing_address: String,
    pub additional_notes: String,
    pub delivery_method: DeliveryMethod,
    pub courier_id: Option<i64>,
    pub courier_address: String,
    pub staff_id: Option<i64>,
    #[serde(skip)]
    pub design_files: Vec<DesignFile>,
}

/// A coupon the backend accepted for the current cart
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppliedCoupon {
    pub coupon_id: i64,
    /// Order total after the coupon, as quoted by the backend
    pub discounted_total: f64,
}

/// Drives one checkout attempt over a cart session
#[derive(Debug, Default)]
pub struct CheckoutFlow {
    pub form: CheckoutForm,
    applied_coupon: Option<AppliedCoupon>,
}

impl CheckoutFlow {
    /// Start a blank checkout
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume checkout, consuming any stored draft.
    ///
    /// A logged-in customer's own name, email and phone take precedence
    /// over whatever the draft holds, so a post-login resume shows the
    /// authoritative identity. The draft is removed once read.
    pub fn resume<B: StorefrontBackend, S: GuestStore>(
        session: &CartSession<B, S>,
    ) -> ClientResult<Self> {
        let mut form = session.storage().load_checkout_form()?.unwrap_or_default();

        if let Some(customer) = session.customer() {
            if !customer.name.trim().is_empty() {
                form.customer_name = customer.name.clone();
            }
            if let Some(email) = customer.email.as_deref().filter(|e| !e.trim().is_empty()) {
                form.customer_email = email.to_string();
            }
            if let Some(phone) = customer.phone.as_deref().filter(|p| !p.trim().is_empty()) {
                form.customer_phone = phone.to_string();
            }
        }

        session.storage().clear_checkout_form()?;

        Ok(Self {
            form,
            applied_coupon: None,
        })
    }

    /// Persist the current form as a draft
    pub fn save_draft<S: GuestStore>(&self, storage: &S) -> ClientResult<()> {
        storage.save_checkout_form(&self.form)
    }

    /// Coupon currently applied, if any
    pub fn applied_coupon(&self) -> Option<AppliedCoupon> {
        self.applied_coupon
    }

    /// Ask the backend to validate a coupon against the cart subtotal
    pub async fn apply_coupon<B: StorefrontBackend, S: GuestStore>(
        &mut self,
        session: &CartSession<B, S>,
        code: &str,
    ) -> ClientResult<AppliedCoupon> {
        let code = code.trim();
        if code.is_empty() {
            return Err(ClientError::Validation("Please enter a coupon code.".into()));
        }

        let subtotal = session.subtotal();
        let check = session.backend().check_coupon(code, subtotal).await?;
        if !check.valid {
            let message = check
                .message
                .unwrap_or_else(|| "Invalid coupon code.".into());
            return Err(ClientError::Validation(message));
        }

        let coupon_id = check
            .coupon
            .as_ref()
            .map(|c| c.coupon_id)
            .ok_or_else(|| ClientError::InvalidResponse("coupon reply without coupon".into()))?;

        let applied = AppliedCoupon {
            coupon_id,
            discounted_total: check.discounted_price.unwrap_or(subtotal),
        };
        tracing::debug!(coupon_id, total = applied.discounted_total, "Coupon applied");
        self.applied_coupon = Some(applied);
        Ok(applied)
    }

    /// Drop the applied coupon
    pub fn clear_coupon(&mut self) {
        self.applied_coupon = None;
    }

    /// Total the customer pays: coupon-adjusted when one is applied
    pub fn payable_total<B: StorefrontBackend, S: GuestStore>(
        &self,
        session: &CartSession<B, S>,
    ) -> f64 {
        self.applied_coupon
            .map(|c| c.discounted_total)
            .unwrap_or_else(|| session.subtotal())
    }

    /// Assemble the order request from the form and the cart.
    ///
    /// Requires a logged-in customer; a guest gets the form saved as a
    /// draft and an authorization error asking for login first. Falls
    /// back to stored guest lines when the in-memory cart is empty.
    fn build_request<B: StorefrontBackend, S: GuestStore>(
        &self,
        session: &CartSession<B, S>,
        catalog: &HashMap<i64, Product>,
    ) -> ClientResult<OrderRequest> {
        let Some(customer) = session.customer() else {
            self.save_draft(session.storage())?;
            return Err(ClientError::Unauthorized);
        };

        let mut lines = session.lines().to_vec();
        if lines.is_empty() {
            lines = session.storage().load_cart()?;
        }
        if lines.is_empty() {
            return Err(ClientError::Validation("Cart is empty.".into()));
        }

        let order_items = build_order_lines(&lines, catalog);

        let courier_address = self.form.courier_address.trim();
        Ok(OrderRequest {
            customer_id: customer.customer_id,
            customer_name: self.form.customer_name.clone(),
            customer_phone: self.form.customer_phone.clone(),
            customer_email: self.form.customer_email.clone(),
            billing_address: self.form.billing_address.clone(),
            additional_notes: self.form.additional_notes.clone(),
            delivery_method: self.form.delivery_method,
            courier_id: self.form.courier_id,
            courier_address: (!courier_address.is_empty())
                .then(|| self.form.courier_address.clone()),
            staff_id: self.form.staff_id,
            coupon_id: self.applied_coupon.map(|c| c.coupon_id),
            order_items,
            design_files: self.form.design_files.clone(),
        })
    }

    /// Validate, submit and clean up after one order attempt.
    ///
    /// On success the server cart is emptied row by row and local drafts
    /// dropped; a row that refuses to delete is logged, not fatal, since
    /// the order itself already went through. An authorization failure
    /// logs the session out and keeps every local state for retry.
    pub async fn submit<B: StorefrontBackend, S: GuestStore>(
        &mut self,
        session: &mut CartSession<B, S>,
        catalog: &HashMap<i64, Product>,
    ) -> ClientResult<OrderCreated> {
        let request = self.build_request(session, catalog)?;
        validate_order_request(&request)?;

        let created = match session.backend().create_order(&request).await {
            Ok(created) => created,
            Err(ClientError::Unauthorized) => {
                session.logout()?;
                return Err(ClientError::Unauthorized);
            }
            Err(err) => return Err(err),
        };

        if let Some(customer_id) = session.customer().map(|c| c.customer_id) {
            match session.backend().fetch_cart(customer_id).await {
                Ok(rows) => {
                    for row in rows {
                        if let Err(err) =
                            session.backend().remove_cart_item(row.cart_item_id).await
                        {
                            tracing::warn!(
                                cart_item_id = row.cart_item_id,
                                error = %err,
                                "Cart row left behind after order"
                            );
                        }
                    }
                }
                Err(err) => {
                    tracing::warn!(error = %err, "Could not fetch cart for post-order clearing");
                }
            }
        }

        session.storage().clear_checkout_form()?;
        session.storage().clear_cart()?;
        self.applied_coupon = None;
        session.refresh().await?;

        tracing::info!(order_id = ?created.order_id, "Order request submitted");
        Ok(created)
    }
}

/// Validate an assembled order request.
///
/// Field rules and messages follow the order endpoint's contract, so a
/// request that passes here is not bounced for shape reasons.
pub fn validate_order_request(request: &OrderRequest) -> ClientResult<()> {
    let name = request.customer_name.trim();
    if name.is_empty() {
        return Err(ClientError::Validation("Name cannot be empty.".into()));
    }
    if name.chars().count() < 2 {
        return Err(ClientError::Validation(
            "Name must be at least 2 characters long.".into(),
        ));
    }

    if request.customer_email.is_empty() {
        return Err(ClientError::Validation("Email cannot be empty.".into()));
    }
    if !is_valid_email(&request.customer_email) {
        return Err(ClientError::Validation("Invalid email address.".into()));
    }

    let phone = request.customer_phone.trim();
    if phone.is_empty() {
        return Err(ClientError::Validation(
            "Phone number cannot be empty.".into(),
        ));
    }
    if !is_valid_bd_phone(phone) {
        return Err(ClientError::Validation(
            "Phone number must be a valid Bangladeshi number starting with 01 and 11 digits long."
                .into(),
        ));
    }

    let billing = request.billing_address.trim();
    if billing.is_empty() {
        return Err(ClientError::Validation(
            "Billing address cannot be empty.".into(),
        ));
    }
    if billing.chars().count() < 5 {
        return Err(ClientError::Validation(
            "Billing address must be at least 5 characters long.".into(),
        ));
    }

    let notes = request.additional_notes.trim();
    if !notes.is_empty() && notes.chars().count() < 5 {
        return Err(ClientError::Validation(
            "Additional notes must be at least 5 characters long.".into(),
        ));
    }

    if request.delivery_method == DeliveryMethod::Courier {
        if request.courier_id.is_none() {
            return Err(ClientError::Validation(
                "Please select a courier service".into(),
            ));
        }
        if request
            .courier_address
            .as_deref()
            .is_none_or(|addr| addr.trim().is_empty())
        {
            return Err(ClientError::Validation(
                "Courier address is required.".into(),
            ));
        }
    }

    Ok(())
}

/// Matches `local@host.tld` with the endpoint's accepted character sets
fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty()
        || !local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "._%+-".contains(c))
    {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    if host.is_empty()
        || !host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        return false;
    }
    tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic())
}

/// Bangladeshi mobile number: 11 digits, `01` then an operator digit 3-9
fn is_valid_bd_phone(phone: &str) -> bool {
    let bytes = phone.as_bytes();
    bytes.len() == 11
        && bytes[0] == b'0'
        && bytes[1] == b'1'
        && (b'3'..=b'9').contains(&bytes[2])
        && bytes[3..].iter().all(|b| b.is_ascii_digit())
}
