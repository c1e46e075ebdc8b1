//! Storefront domain types: products, orders, contact messages, admins.
//!
//! Request types (`ProductDraft`, `ProductUpdate`, `NewOrder`,
//! `NewContactMessage`) carry `validator` rules; records are built from them
//! with server-assigned ids and timestamps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::money::Money;

pub const DEFAULT_PRODUCT_NAME: &str = "Strawberry Punch";
pub const DEFAULT_NICOTINE_STRENGTH: &str = "5%";
pub const DEFAULT_PRICE: &str = "29.99";
pub const DEFAULT_STOCK: i64 = 100;
pub const DEFAULT_IMAGE_URL: &str = "https://customer-assets.emergentagent.com/job_mooki-single-vape/artifacts/534ct6rv_shisha.jpg";
pub const DEFAULT_DESCRIPTION: &str = "Premium vape with refreshing strawberry punch flavor";
pub const DEFAULT_PAYMENT_METHOD: &str = "Cash on Delivery";

pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

// ============================================================================
// Product
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    #[schema(example = "3f1c2a9e-5b7d-4e0a-9c61-2d8f4b7a1e55")]
    pub id: String,
    pub name: String,
    pub flavor: String,
    pub nicotine_strength: String,
    #[schema(value_type = String, example = "29.99")]
    pub price: Money,
    pub stock: i64,
    pub is_available: bool,
    pub image_url: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Product creation payload. Every omitted field takes the storefront default.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct ProductDraft {
    #[validate(length(min = 1, message = "name cannot be empty"))]
    pub name: String,
    pub flavor: String,
    pub nicotine_strength: String,
    #[schema(value_type = String, example = "29.99")]
    pub price: Money,
    #[validate(range(min = 0, message = "stock cannot be negative"))]
    pub stock: i64,
    pub is_available: bool,
    pub image_url: String,
    pub description: String,
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self {
            name: DEFAULT_PRODUCT_NAME.to_string(),
            flavor: DEFAULT_PRODUCT_NAME.to_string(),
            nicotine_strength: DEFAULT_NICOTINE_STRENGTH.to_string(),
            price: DEFAULT_PRICE.parse().unwrap_or(Money::ZERO),
            stock: DEFAULT_STOCK,
            is_available: true,
            image_url: DEFAULT_IMAGE_URL.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
        }
    }
}

impl ProductDraft {
    pub fn into_product(self, now: DateTime<Utc>) -> Product {
        Product {
            id: new_id(),
            name: self.name,
            flavor: self.flavor,
            nicotine_strength: self.nicotine_strength,
            price: self.price,
            stock: self.stock,
            is_available: self.is_available,
            image_url: self.image_url,
            description: self.description,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial product update. `None` leaves the field untouched; `stock` is an
/// absolute value, not a delta.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct ProductUpdate {
    #[validate(length(min = 1, message = "name cannot be empty"))]
    pub name: Option<String>,
    pub flavor: Option<String>,
    pub nicotine_strength: Option<String>,
    #[schema(value_type = Option<String>, example = "24.99")]
    pub price: Option<Money>,
    #[validate(range(min = 0, message = "stock cannot be negative"))]
    pub stock: Option<i64>,
    pub is_available: Option<bool>,
    pub image_url: Option<String>,
    pub description: Option<String>,
}

impl ProductUpdate {
    pub fn apply(&self, product: &mut Product, now: DateTime<Utc>) {
        if let Some(v) = &self.name {
            product.name = v.clone();
        }
        if let Some(v) = &self.flavor {
            product.flavor = v.clone();
        }
        if let Some(v) = &self.nicotine_strength {
            product.nicotine_strength = v.clone();
        }
        if let Some(v) = self.price {
            product.price = v;
        }
        if let Some(v) = self.stock {
            product.stock = v;
        }
        if let Some(v) = self.is_available {
            product.is_available = v;
        }
        if let Some(v) = &self.image_url {
            product.image_url = v.clone();
        }
        if let Some(v) = &self.description {
            product.description = v.clone();
        }
        product.updated_at = now;
    }
}

// ============================================================================
// Order
// ============================================================================

/// Order lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejected status literal
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid status. Must be one of: [Pending, Confirmed, Completed, Cancelled]")]
pub struct InvalidStatus(pub String);

impl FromStr for OrderStatus {
    type Err = InvalidStatus;

    /// Exact, case-sensitive match against the four literals.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| InvalidStatus(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct OrderItem {
    #[validate(length(min = 1, message = "product_id cannot be empty"))]
    pub product_id: String,
    pub product_name: String,
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: i64,
    #[schema(value_type = String, example = "29.99")]
    pub price: Money,
}

impl OrderItem {
    /// `None` when the product overflows
    pub fn line_total(&self) -> Option<Money> {
        self.price.times(self.quantity)
    }
}

/// Order intake payload
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NewOrder {
    #[validate(length(min = 1, message = "customer_name cannot be empty"))]
    pub customer_name: String,
    #[validate(length(min = 1, message = "phone cannot be empty"))]
    pub phone: String,
    #[validate(length(min = 1, message = "address cannot be empty"))]
    pub address: String,
    #[serde(default)]
    pub email: Option<String>,
    #[validate(length(min = 1, message = "order must contain at least one item"), nested)]
    pub items: Vec<OrderItem>,
    #[schema(value_type = String, example = "59.98")]
    pub total: Money,
    #[serde(default = "default_payment_method")]
    pub payment_method: String,
}

fn default_payment_method() -> String {
    DEFAULT_PAYMENT_METHOD.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: String,
    pub customer_name: String,
    pub phone: String,
    pub address: String,
    pub email: Option<String>,
    pub items: Vec<OrderItem>,
    #[schema(value_type = String, example = "59.98")]
    pub total: Money,
    pub payment_method: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    pub fn from_request(req: NewOrder, now: DateTime<Utc>) -> Self {
        // Blank email from the checkout form means "no email"
        let email = req.email.filter(|e| !e.trim().is_empty());
        Self {
            id: new_id(),
            customer_name: req.customer_name,
            phone: req.phone,
            address: req.address,
            email,
            items: req.items,
            total: req.total,
            payment_method: req.payment_method,
            status: OrderStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sum of line totals, `None` on overflow. Only used to flag client
    /// totals that disagree.
    pub fn items_total(&self) -> Option<Money> {
        self.items
            .iter()
            .try_fold(Money::ZERO, |acc, item| acc.checked_add(item.line_total()?))
    }

    pub fn short_id(&self) -> &str {
        self.id.get(..8).unwrap_or(&self.id)
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct OrderStatusUpdate {
    #[schema(example = "Confirmed")]
    pub status: String,
}

// ============================================================================
// Contact messages
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ContactMessage {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub is_read: bool,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NewContactMessage {
    #[validate(length(min = 1, message = "name cannot be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "email cannot be empty"))]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[validate(length(min = 1, message = "message cannot be empty"))]
    pub message: String,
}

impl NewContactMessage {
    pub fn into_message(self, now: DateTime<Utc>) -> ContactMessage {
        ContactMessage {
            id: new_id(),
            name: self.name,
            email: self.email,
            phone: self.phone,
            message: self.message,
            created_at: now,
            is_read: false,
        }
    }
}

// ============================================================================
// Admins
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct AdminUser {
    pub id: String,
    pub username: String,
    /// Argon2 PHC string
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}
