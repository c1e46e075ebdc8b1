//! HTTP handlers, one module per resource. Every handler answers with the
//! `ApiResponse` envelope; guarded ones sit behind `jwt_auth_middleware`.

pub mod contact;
pub mod email;
pub mod health;
pub mod order;
pub mod product;

pub use contact::{create_message, list_messages, mark_message_read};
pub use email::{TestEmailRequest, TestEmailResponse, send_test_email};
pub use health::{HealthResponse, RootResponse, health_check, root};
pub use order::{create_order, get_order, list_orders, update_order_status};
pub use product::{
    create_product, delete_product, get_featured_product, get_product, list_products, update_featured_product,
    update_product,
};

/// Listing caps
pub const PRODUCT_LIST_LIMIT: usize = 100;
pub const ORDER_LIST_LIMIT: usize = 1000;
pub const MESSAGE_LIST_LIMIT: usize = 1000;
