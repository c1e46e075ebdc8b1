//! OpenAPI / Swagger UI Documentation
//!
//! - Swagger UI: `http://localhost:8001/docs`
//! - OpenAPI JSON: `http://localhost:8001/api-docs/openapi.json`

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::gateway::handlers::{HealthResponse, RootResponse, TestEmailRequest, TestEmailResponse};
use crate::gateway::types::MessageData;
use crate::models::{
    ContactMessage, NewContactMessage, NewOrder, Order, OrderItem, OrderStatus, OrderStatusUpdate, Product,
    ProductDraft, ProductUpdate,
};
use crate::user_auth::{LoginRequest, TokenResponse, VerifyResponse};

/// Admin bearer token security scheme
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Admin token from POST /api/auth/login, valid for 24 hours"))
                        .build(),
                ),
            );
        }
    }
}

/// Main API Documentation struct
#[derive(OpenApi)]
#[openapi(
    info(
        title = "MOOKI STORE API",
        version = "1.0.0",
        description = "Single-product storefront: catalog, cash-on-delivery orders, contact inbox and admin back office.",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:8001", description = "Development"),
    ),
    paths(
        crate::gateway::handlers::health::root,
        crate::gateway::handlers::health::health_check,
        crate::user_auth::handlers::login,
        crate::user_auth::handlers::verify,
        crate::gateway::handlers::product::list_products,
        crate::gateway::handlers::product::get_featured_product,
        crate::gateway::handlers::product::update_featured_product,
        crate::gateway::handlers::product::get_product,
        crate::gateway::handlers::product::create_product,
        crate::gateway::handlers::product::update_product,
        crate::gateway::handlers::product::delete_product,
        crate::gateway::handlers::order::create_order,
        crate::gateway::handlers::order::list_orders,
        crate::gateway::handlers::order::get_order,
        crate::gateway::handlers::order::update_order_status,
        crate::gateway::handlers::contact::create_message,
        crate::gateway::handlers::contact::list_messages,
        crate::gateway::handlers::contact::mark_message_read,
        crate::gateway::handlers::email::send_test_email,
    ),
    components(
        schemas(
            RootResponse,
            HealthResponse,
            MessageData,
            LoginRequest,
            TokenResponse,
            VerifyResponse,
            Product,
            ProductDraft,
            ProductUpdate,
            NewOrder,
            Order,
            OrderItem,
            OrderStatus,
            OrderStatusUpdate,
            ContactMessage,
            NewContactMessage,
            TestEmailRequest,
            TestEmailResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Catalog", description = "Product listing (public) and management (admin)"),
        (name = "Orders", description = "Order intake (public) and processing (admin)"),
        (name = "Contact", description = "Contact form and admin inbox"),
        (name = "Auth", description = "Admin login and token check"),
        (name = "Email", description = "Email provider check (admin)"),
        (name = "System", description = "Banner and health check")
    )
)]
pub struct ApiDoc;
