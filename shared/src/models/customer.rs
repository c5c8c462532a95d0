//! Customer, Courier and Staff Models

use serde::{Deserialize, Serialize};

/// Authenticated customer snapshot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub customer_id: i64,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

/// Courier service provider offered at checkout
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Courier {
    pub courier_id: i64,
    pub name: String,
    #[serde(default)]
    pub is_deleted: bool,
}

/// Shop staff member a customer may credit with the sale
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Staff {
    pub staff_id: i64,
    pub name: String,
    #[serde(default)]
    pub is_deleted: bool,
}

/// Payload shape of the courier-list collaborator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouriersPayload {
    #[serde(default)]
    pub couriers: Vec<Courier>,
}

/// Payload shape of the staff-list collaborator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffPayload {
    #[serde(default)]
    pub staff: Vec<Staff>,
}

/// Payload shape of the product-list collaborator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductsPayload {
    #[serde(default)]
    pub products: Vec<super::product::Product>,
}
