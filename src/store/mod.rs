//! Storage layer
//!
//! Every handler talks to storage through the [`Store`] trait:
//! - [`PgStore`]: PostgreSQL via sqlx (production)
//! - [`MemoryStore`]: process-local maps (development and tests)
//!
//! Order placement is the only multi-record operation. Both backends check
//! and decrement stock for every line item and insert the order as one
//! atomic unit, so concurrent orders cannot oversell a product.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::{AdminUser, ContactMessage, Order, OrderItem, OrderStatus, Product, ProductUpdate};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Why a line item could not be reserved
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StockRejection {
    /// Product is missing or flagged unavailable
    #[error("Product {product_name} not available")]
    Unavailable { product_name: String },

    #[error("Insufficient stock for {product_name}")]
    InsufficientStock { product_name: String },
}

impl StockRejection {
    pub fn unavailable(item: &OrderItem) -> Self {
        Self::Unavailable {
            product_name: item.product_name.clone(),
        }
    }

    pub fn insufficient(item: &OrderItem) -> Self {
        Self::InsufficientStock {
            product_name: item.product_name.clone(),
        }
    }

    /// Check one line item against the product's current state.
    pub fn check(item: &OrderItem, available: bool, stock: i64) -> Result<(), Self> {
        if !available {
            return Err(Self::unavailable(item));
        }
        if stock < item.quantity {
            return Err(Self::insufficient(item));
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Corrupt record: {0}")]
    Corrupt(String),

    #[error(transparent)]
    Rejected(#[from] StockRejection),
}

#[async_trait]
pub trait Store: Send + Sync {
    /// Backend name for logs
    fn name(&self) -> &'static str;

    async fn health_check(&self) -> Result<(), StoreError>;

    // Products

    /// Products in creation order
    async fn list_products(&self, limit: usize) -> Result<Vec<Product>, StoreError>;

    /// The featured product: the first one created
    async fn first_product(&self) -> Result<Option<Product>, StoreError>;

    async fn get_product(&self, id: &str) -> Result<Option<Product>, StoreError>;

    async fn insert_product(&self, product: &Product) -> Result<(), StoreError>;

    /// Returns the updated product, or `None` if it does not exist.
    async fn update_product(
        &self,
        id: &str,
        update: &ProductUpdate,
        now: DateTime<Utc>,
    ) -> Result<Option<Product>, StoreError>;

    /// Returns `false` if the product did not exist.
    async fn delete_product(&self, id: &str) -> Result<bool, StoreError>;

    // Orders

    /// Reserve stock for every line item and persist the order, all or nothing.
    ///
    /// Fails with [`StoreError::Rejected`] when any product is missing,
    /// unavailable or short on stock; nothing is written in that case.
    async fn place_order(&self, order: &Order) -> Result<(), StoreError>;

    /// Newest first
    async fn list_orders(&self, limit: usize) -> Result<Vec<Order>, StoreError>;

    async fn get_order(&self, id: &str) -> Result<Option<Order>, StoreError>;

    async fn update_order_status(
        &self,
        id: &str,
        status: OrderStatus,
        now: DateTime<Utc>,
    ) -> Result<Option<Order>, StoreError>;

    // Contact messages

    async fn insert_message(&self, message: &ContactMessage) -> Result<(), StoreError>;

    /// Newest first
    async fn list_messages(&self, limit: usize) -> Result<Vec<ContactMessage>, StoreError>;

    /// Returns `false` if the message did not exist.
    async fn mark_message_read(&self, id: &str) -> Result<bool, StoreError>;

    // Admins

    async fn find_admin(&self, username: &str) -> Result<Option<AdminUser>, StoreError>;

    async fn has_admin(&self) -> Result<bool, StoreError>;

    async fn insert_admin(&self, admin: &AdminUser) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn item(quantity: i64) -> OrderItem {
        OrderItem {
            product_id: "p1".to_string(),
            product_name: "Strawberry Punch".to_string(),
            quantity,
            price: Money::ZERO,
        }
    }

    #[test]
    fn test_check_accepts_exact_stock() {
        assert!(StockRejection::check(&item(5), true, 5).is_ok());
    }

    #[test]
    fn test_check_unavailable_wins_over_stock() {
        let err = StockRejection::check(&item(1), false, 0).unwrap_err();
        assert_eq!(err.to_string(), "Product Strawberry Punch not available");
    }

    #[test]
    fn test_check_insufficient() {
        let err = StockRejection::check(&item(6), true, 5).unwrap_err();
        assert_eq!(err.to_string(), "Insufficient stock for Strawberry Punch");
    }
}
