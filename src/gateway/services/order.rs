//! Order Service - order intake and status changes

use chrono::Utc;
use thiserror::Error;
use validator::Validate;

use crate::email::{EmailMessage, Mailer, order_confirmation, order_confirmation_subject};
use crate::models::{InvalidStatus, NewOrder, Order, OrderStatus};
use crate::store::{StockRejection, Store, StoreError};

/// Order service error
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("{0}")]
    Invalid(#[from] validator::ValidationErrors),

    #[error(transparent)]
    Rejected(StockRejection),

    #[error(transparent)]
    InvalidStatus(#[from] InvalidStatus),

    #[error("Order not found")]
    NotFound,

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for OrderError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Rejected(rejection) => OrderError::Rejected(rejection),
            other => OrderError::Store(other),
        }
    }
}

/// Order Service - borrows the shared store and mailer for one request
pub struct OrderService<'a> {
    store: &'a dyn Store,
    mailer: Option<&'a dyn Mailer>,
}

impl<'a> OrderService<'a> {
    pub fn new(store: &'a dyn Store, mailer: Option<&'a dyn Mailer>) -> Self {
        Self { store, mailer }
    }

    /// Validate, reserve stock and persist the order, then send the
    /// confirmation email. Email failures never fail the order.
    pub async fn place(&self, req: NewOrder) -> Result<Order, OrderError> {
        // 1. Shape checks
        req.validate()?;

        // 2. Build the record
        let order = Order::from_request(req, Utc::now());
        match order.items_total() {
            Some(computed) if computed != order.total => tracing::warn!(
                order_id = %order.id,
                client_total = %order.total,
                items_total = %computed,
                "Order total does not match line items"
            ),
            Some(_) => {}
            // Stock check below rejects quantities this large
            None => tracing::warn!(order_id = %order.id, "Line totals overflow"),
        }

        // 3. Reserve + persist (atomic in the store)
        if let Err(e) = self.store.place_order(&order).await {
            tracing::warn!(order_id = %order.id, "Order rejected: {}", e);
            return Err(e.into());
        }
        tracing::info!(
            order_id = %order.id,
            items = order.items.len(),
            total = %order.total,
            "Order placed"
        );

        // 4. Confirmation
        if let Some(to) = &order.email {
            self.send_confirmation(&order, to).await;
        }

        Ok(order)
    }

    pub async fn update_status(&self, id: &str, status: &str) -> Result<Order, OrderError> {
        let status: OrderStatus = status.parse()?;
        let order = self
            .store
            .update_order_status(id, status, Utc::now())
            .await?
            .ok_or(OrderError::NotFound)?;
        tracing::info!(order_id = %order.id, status = %status, "Order status updated");
        Ok(order)
    }

    async fn send_confirmation(&self, order: &Order, to: &str) {
        let Some(mailer) = self.mailer else {
            tracing::warn!(order_id = %order.id, "RESEND_API_KEY not configured, skipping email");
            return;
        };
        let message = EmailMessage {
            to: to.to_string(),
            subject: order_confirmation_subject(order),
            html: order_confirmation(order),
        };
        match mailer.send(&message).await {
            Ok(email_id) => {
                tracing::info!(order_id = %order.id, email_id = %email_id, "Order confirmation email sent")
            }
            Err(e) => tracing::error!(order_id = %order.id, "Failed to send confirmation email: {}", e),
        }
    }
}
