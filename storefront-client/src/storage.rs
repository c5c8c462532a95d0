//! Local persistence for guest state
//!
//! Guest carts, half-filled checkout forms and the login session survive
//! process restarts as JSON files under the configured data directory.
//! The [`GuestStore`] trait keeps cart and checkout logic independent of
//! where those files actually live.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use shared::models::{CartLine, Customer};

use crate::checkout::CheckoutForm;
use crate::ClientResult;

const GUEST_CART_FILE: &str = "guest_cart.json";
const GUEST_CHECKOUT_FILE: &str = "guest_checkout.json";
const SESSION_FILE: &str = "session.json";

/// Persisted login session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredSession {
    /// JWT bearer token
    pub token: String,
    /// Customer the token belongs to
    pub customer: Customer,
}

/// Storage operations for guest-side state
pub trait GuestStore: Send + Sync {
    /// Load the guest cart, empty when nothing was saved yet
    fn load_cart(&self) -> ClientResult<Vec<CartLine>>;
    /// Persist the guest cart
    fn save_cart(&self, lines: &[CartLine]) -> ClientResult<()>;
    /// Drop the guest cart
    fn clear_cart(&self) -> ClientResult<()>;

    /// Load the saved checkout form, if any
    fn load_checkout_form(&self) -> ClientResult<Option<CheckoutForm>>;
    /// Persist the checkout form (design files are never written out)
    fn save_checkout_form(&self, form: &CheckoutForm) -> ClientResult<()>;
    /// Drop the saved checkout form
    fn clear_checkout_form(&self) -> ClientResult<()>;

    /// Load the login session, if any
    fn load_session(&self) -> ClientResult<Option<StoredSession>>;
    /// Persist the login session
    fn save_session(&self, session: &StoredSession) -> ClientResult<()>;
    /// Drop the login session
    fn clear_session(&self) -> ClientResult<()>;
}

/// File-backed [`GuestStore`], one pretty-printed JSON file per key
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at the given directory
    ///
    /// The directory is created lazily on first write
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory the store writes into
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn read_json<T: DeserializeOwned>(&self, name: &str) -> ClientResult<Option<T>> {
        let path = self.dir.join(name);
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn write_json<T: Serialize>(&self, name: &str, value: &T) -> ClientResult<()> {
        std::fs::create_dir_all(&self.dir)?;
        let content = serde_json::to_string_pretty(value)?;
        std::fs::write(self.dir.join(name), content)?;
        tracing::debug!(file = %name, "Guest state saved");
        Ok(())
    }

    fn remove(&self, name: &str) -> ClientResult<()> {
        let path = self.dir.join(name);
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

impl GuestStore for FileStore {
    fn load_cart(&self) -> ClientResult<Vec<CartLine>> {
        Ok(self.read_json(GUEST_CART_FILE)?.unwrap_or_default())
    }

    fn save_cart(&self, lines: &[CartLine]) -> ClientResult<()> {
        self.write_json(GUEST_CART_FILE, &lines)
    }

    fn clear_cart(&self) -> ClientResult<()> {
        self.remove(GUEST_CART_FILE)
    }

    fn load_checkout_form(&self) -> ClientResult<Option<CheckoutForm>> {
        self.read_json(GUEST_CHECKOUT_FILE)
    }

    fn save_checkout_form(&self, form: &CheckoutForm) -> ClientResult<()> {
        self.write_json(GUEST_CHECKOUT_FILE, form)
    }

    fn clear_checkout_form(&self) -> ClientResult<()> {
        self.remove(GUEST_CHECKOUT_FILE)
    }

    fn load_session(&self) -> ClientResult<Option<StoredSession>> {
        self.read_json(SESSION_FILE)
    }

    fn save_session(&self, session: &StoredSession) -> ClientResult<()> {
        self.write_json(SESSION_FILE, session)
    }

    fn clear_session(&self) -> ClientResult<()> {
        self.remove(SESSION_FILE)
    }
}
