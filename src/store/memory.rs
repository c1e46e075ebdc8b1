//! In-memory store
//!
//! All state sits behind one `RwLock`; `place_order` holds the write lock for
//! the whole check-and-decrement sequence.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::{StockRejection, Store, StoreError};
use crate::models::{AdminUser, ContactMessage, Order, OrderStatus, Product, ProductUpdate};

#[derive(Default)]
struct State {
    /// Insertion order doubles as creation order
    products: Vec<Product>,
    orders: Vec<Order>,
    messages: Vec<ContactMessage>,
    admins: HashMap<String, AdminUser>,
}

#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first<T: Clone>(records: &[T], created_at: impl Fn(&T) -> DateTime<Utc>, limit: usize) -> Vec<T> {
    let mut out: Vec<T> = records.to_vec();
    // Reverse first so the stable sort keeps later inserts ahead on equal timestamps
    out.reverse();
    out.sort_by_key(|r| std::cmp::Reverse(created_at(r)));
    out.truncate(limit);
    out
}

#[async_trait]
impl Store for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn list_products(&self, limit: usize) -> Result<Vec<Product>, StoreError> {
        let state = self.state.read().await;
        Ok(state.products.iter().take(limit).cloned().collect())
    }

    async fn first_product(&self) -> Result<Option<Product>, StoreError> {
        Ok(self.state.read().await.products.first().cloned())
    }

    async fn get_product(&self, id: &str) -> Result<Option<Product>, StoreError> {
        let state = self.state.read().await;
        Ok(state.products.iter().find(|p| p.id == id).cloned())
    }

    async fn insert_product(&self, product: &Product) -> Result<(), StoreError> {
        self.state.write().await.products.push(product.clone());
        Ok(())
    }

    async fn update_product(
        &self,
        id: &str,
        update: &ProductUpdate,
        now: DateTime<Utc>,
    ) -> Result<Option<Product>, StoreError> {
        let mut state = self.state.write().await;
        Ok(state.products.iter_mut().find(|p| p.id == id).map(|product| {
            update.apply(product, now);
            product.clone()
        }))
    }

    async fn delete_product(&self, id: &str) -> Result<bool, StoreError> {
        let mut state = self.state.write().await;
        let before = state.products.len();
        state.products.retain(|p| p.id != id);
        Ok(state.products.len() != before)
    }

    async fn place_order(&self, order: &Order) -> Result<(), StoreError> {
        let mut state = self.state.write().await;

        // Stock remaining per product as this order's items are reserved in turn
        let mut remaining: HashMap<&str, i64> = HashMap::new();
        for item in &order.items {
            let product = state
                .products
                .iter()
                .find(|p| p.id == item.product_id)
                .ok_or_else(|| StockRejection::unavailable(item))?;
            let stock = remaining.entry(product.id.as_str()).or_insert(product.stock);
            StockRejection::check(item, product.is_available, *stock)?;
            *stock -= item.quantity;
        }

        let reserved: Vec<(String, i64)> = remaining
            .into_iter()
            .map(|(id, stock)| (id.to_string(), stock))
            .collect();
        for (id, stock) in reserved {
            if let Some(product) = state.products.iter_mut().find(|p| p.id == id) {
                product.stock = stock;
                product.updated_at = order.created_at;
            }
        }
        state.orders.push(order.clone());
        Ok(())
    }

    async fn list_orders(&self, limit: usize) -> Result<Vec<Order>, StoreError> {
        let state = self.state.read().await;
        Ok(newest_first(&state.orders, |o| o.created_at, limit))
    }

    async fn get_order(&self, id: &str) -> Result<Option<Order>, StoreError> {
        let state = self.state.read().await;
        Ok(state.orders.iter().find(|o| o.id == id).cloned())
    }

    async fn update_order_status(
        &self,
        id: &str,
        status: OrderStatus,
        now: DateTime<Utc>,
    ) -> Result<Option<Order>, StoreError> {
        let mut state = self.state.write().await;
        Ok(state.orders.iter_mut().find(|o| o.id == id).map(|order| {
            order.status = status;
            order.updated_at = now;
            order.clone()
        }))
    }

    async fn insert_message(&self, message: &ContactMessage) -> Result<(), StoreError> {
        self.state.write().await.messages.push(message.clone());
        Ok(())
    }

    async fn list_messages(&self, limit: usize) -> Result<Vec<ContactMessage>, StoreError> {
        let state = self.state.read().await;
        Ok(newest_first(&state.messages, |m| m.created_at, limit))
    }

    async fn mark_message_read(&self, id: &str) -> Result<bool, StoreError> {
        let mut state = self.state.write().await;
        match state.messages.iter_mut().find(|m| m.id == id) {
            Some(message) => {
                message.is_read = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn find_admin(&self, username: &str) -> Result<Option<AdminUser>, StoreError> {
        Ok(self.state.read().await.admins.get(username).cloned())
    }

    async fn has_admin(&self) -> Result<bool, StoreError> {
        Ok(!self.state.read().await.admins.is_empty())
    }

    async fn insert_admin(&self, admin: &AdminUser) -> Result<(), StoreError> {
        self.state
            .write()
            .await
            .admins
            .insert(admin.username.clone(), admin.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OrderItem, ProductDraft};
    use std::sync::Arc;

    fn product(stock: i64, available: bool) -> Product {
        let mut p = ProductDraft::default().into_product(Utc::now());
        p.stock = stock;
        p.is_available = available;
        p
    }

    fn order(lines: &[(&Product, i64)]) -> Order {
        let now = Utc::now();
        let items: Vec<OrderItem> = lines
            .iter()
            .map(|(p, quantity)| OrderItem {
                product_id: p.id.clone(),
                product_name: p.name.clone(),
                quantity: *quantity,
                price: p.price,
            })
            .collect();
        Order {
            id: crate::models::new_id(),
            customer_name: "Jane".to_string(),
            phone: "555-0100".to_string(),
            address: "1 Main St".to_string(),
            email: None,
            total: items
                .iter()
                .try_fold(crate::money::Money::ZERO, |acc, item| acc.checked_add(item.line_total()?))
                .unwrap(),
            items,
            payment_method: "Cash on Delivery".to_string(),
            status: OrderStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    async fn stock_of(store: &MemoryStore, id: &str) -> i64 {
        store.get_product(id).await.unwrap().unwrap().stock
    }

    #[tokio::test]
    async fn test_place_order_decrements_stock() {
        let store = MemoryStore::new();
        let p = product(100, true);
        store.insert_product(&p).await.unwrap();

        let o = order(&[(&p, 2)]);
        store.place_order(&o).await.unwrap();

        assert_eq!(stock_of(&store, &p.id).await, 98);
        assert_eq!(store.get_order(&o.id).await.unwrap(), Some(o));
    }

    #[tokio::test]
    async fn test_rejected_order_changes_nothing() {
        let store = MemoryStore::new();
        let plenty = product(100, true);
        let scarce = product(1, true);
        store.insert_product(&plenty).await.unwrap();
        store.insert_product(&scarce).await.unwrap();

        let o = order(&[(&plenty, 5), (&scarce, 2)]);
        let err = store.place_order(&o).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::Rejected(StockRejection::InsufficientStock { .. })
        ));

        assert_eq!(stock_of(&store, &plenty.id).await, 100);
        assert_eq!(stock_of(&store, &scarce.id).await, 1);
        assert!(store.list_orders(10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_and_unavailable_products_rejected() {
        let store = MemoryStore::new();
        let hidden = product(10, false);
        store.insert_product(&hidden).await.unwrap();
        let ghost = product(10, true);

        for o in [order(&[(&hidden, 1)]), order(&[(&ghost, 1)])] {
            let err = store.place_order(&o).await.unwrap_err();
            assert!(matches!(
                err,
                StoreError::Rejected(StockRejection::Unavailable { .. })
            ));
        }
        assert_eq!(stock_of(&store, &hidden.id).await, 10);
    }

    #[tokio::test]
    async fn test_repeated_product_lines_share_stock() {
        let store = MemoryStore::new();
        let p = product(100, true);
        store.insert_product(&p).await.unwrap();

        let o = order(&[(&p, 60), (&p, 60)]);
        assert!(store.place_order(&o).await.is_err());
        assert_eq!(stock_of(&store, &p.id).await, 100);

        let o = order(&[(&p, 60), (&p, 40)]);
        store.place_order(&o).await.unwrap();
        assert_eq!(stock_of(&store, &p.id).await, 0);
    }

    #[tokio::test]
    async fn test_concurrent_orders_never_oversell() {
        let store = Arc::new(MemoryStore::new());
        let p = product(10, true);
        store.insert_product(&p).await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..25 {
            let store = store.clone();
            let o = order(&[(&p, 1)]);
            handles.push(tokio::spawn(async move { store.place_order(&o).await.is_ok() }));
        }
        let mut accepted = 0;
        for h in handles {
            if h.await.unwrap() {
                accepted += 1;
            }
        }

        assert_eq!(accepted, 10);
        assert_eq!(stock_of(&store, &p.id).await, 0);
        assert_eq!(store.list_orders(100).await.unwrap().len(), 10);
    }

    #[tokio::test]
    async fn test_orders_listed_newest_first() {
        let store = MemoryStore::new();
        let p = product(100, true);
        store.insert_product(&p).await.unwrap();

        let mut first = order(&[(&p, 1)]);
        first.created_at -= chrono::Duration::minutes(5);
        let second = order(&[(&p, 1)]);
        store.place_order(&first).await.unwrap();
        store.place_order(&second).await.unwrap();

        let ids: Vec<String> = store.list_orders(10).await.unwrap().into_iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[tokio::test]
    async fn test_first_product_is_oldest() {
        let store = MemoryStore::new();
        let a = product(1, true);
        let b = product(2, true);
        store.insert_product(&a).await.unwrap();
        store.insert_product(&b).await.unwrap();
        assert_eq!(store.first_product().await.unwrap().unwrap().id, a.id);

        assert!(store.delete_product(&a.id).await.unwrap());
        assert!(!store.delete_product(&a.id).await.unwrap());
        assert_eq!(store.first_product().await.unwrap().unwrap().id, b.id);
    }

    #[tokio::test]
    async fn test_mark_message_read() {
        let store = MemoryStore::new();
        let msg = crate::models::NewContactMessage {
            name: "Sam".to_string(),
            email: "sam@example.com".to_string(),
            phone: None,
            message: "Do you ship?".to_string(),
        }
        .into_message(Utc::now());
        store.insert_message(&msg).await.unwrap();

        assert!(store.mark_message_read(&msg.id).await.unwrap());
        assert!(!store.mark_message_read("missing").await.unwrap());
        assert!(store.list_messages(10).await.unwrap()[0].is_read);
    }
}
