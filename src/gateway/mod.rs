pub mod handlers;
pub mod openapi;
pub mod services;
pub mod state;
pub mod types;

use anyhow::{Context, Result};
use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post, put},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::user_auth::{handlers as auth_handlers, jwt_auth_middleware};
use openapi::ApiDoc;
use state::AppState;

/// Build the full application router.
///
/// Public and admin routes are separate routers merged per path, so one
/// path can serve a public GET and a guarded PUT.
pub fn build_router(state: Arc<AppState>) -> Router {
    let public_routes = Router::new()
        .route("/api", get(handlers::root))
        .route("/api/", get(handlers::root))
        .route("/api/health", get(handlers::health_check))
        .route("/api/auth/login", post(auth_handlers::login))
        .route("/api/products", get(handlers::list_products))
        .route("/api/product", get(handlers::get_featured_product))
        .route("/api/product/{product_id}", get(handlers::get_product))
        .route("/api/orders", post(handlers::create_order))
        .route("/api/orders/{order_id}", get(handlers::get_order))
        .route("/api/contact", post(handlers::create_message));

    let admin_routes = Router::new()
        .route("/api/auth/verify", get(auth_handlers::verify))
        .route(
            "/api/product",
            post(handlers::create_product).put(handlers::update_featured_product),
        )
        .route(
            "/api/product/{product_id}",
            put(handlers::update_product).delete(handlers::delete_product),
        )
        .route("/api/orders", get(handlers::list_orders))
        .route("/api/orders/{order_id}/status", put(handlers::update_order_status))
        .route("/api/contact", get(handlers::list_messages))
        .route("/api/contact/{message_id}/read", put(handlers::mark_message_read))
        .route("/api/send-test-email", post(handlers::send_test_email))
        .layer(from_fn_with_state(state.clone(), jwt_auth_middleware));

    Router::new()
        .merge(public_routes)
        .merge(admin_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
}

/// Bind and serve until Ctrl+C or SIGTERM.
pub async fn run_server(host: &str, port: u16, state: Arc<AppState>) -> Result<()> {
    let app = build_router(state);

    let addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("🚀 Gateway listening on http://{}", addr);
    tracing::info!("📖 API docs on http://{}/docs", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        tracing::info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
