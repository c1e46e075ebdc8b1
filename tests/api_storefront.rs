//! End-to-end HTTP tests against the in-memory store.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

use mooki_store::config::AuthConfig;
use mooki_store::gateway::{build_router, state::AppState};
use mooki_store::seed;
use mooki_store::store::{MemoryStore, Store};
use mooki_store::user_auth::AdminAuthService;

const SECRET: &str = "test-secret";

struct TestApp {
    router: Router,
    auth: Arc<AdminAuthService>,
}

impl TestApp {
    async fn new() -> Self {
        let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
        let auth = Arc::new(AdminAuthService::new(store.clone(), SECRET.to_string(), 24));
        seed::seed(store.as_ref(), &auth, &AuthConfig::default()).await.unwrap();
        let state = Arc::new(AppState::new(store, auth.clone(), None));
        Self {
            router: build_router(state),
            auth,
        }
    }

    async fn call(&self, method: &str, path: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let req = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.send(req).await
    }

    async fn call_raw(&self, method: &str, path: &str, body: &'static str) -> (StatusCode, Value) {
        let req = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();
        self.send(req).await
    }

    async fn send(&self, req: Request<Body>) -> (StatusCode, Value) {
        let resp = self.router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    async fn login(&self) -> String {
        let (status, body) = self
            .call(
                "POST",
                "/api/auth/login",
                None,
                Some(json!({"username": "admin", "password": "admin123"})),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        body["data"]["access_token"].as_str().unwrap().to_string()
    }

    async fn featured(&self) -> Value {
        let (status, body) = self.call("GET", "/api/product", None, None).await;
        assert_eq!(status, StatusCode::OK);
        body["data"].clone()
    }

    async fn stock_of(&self, product_id: &str) -> i64 {
        let (_, body) = self.call("GET", &format!("/api/product/{}", product_id), None, None).await;
        body["data"]["stock"].as_i64().unwrap()
    }
}

fn order_body(items: Value) -> Value {
    json!({
        "customer_name": "Dana",
        "phone": "+1 555 0100",
        "address": "1 Main St",
        "items": items,
        "total": 59.98
    })
}

fn line(product_id: &str, quantity: i64) -> Value {
    json!({
        "product_id": product_id,
        "product_name": "Strawberry Punch",
        "quantity": quantity,
        "price": 29.99
    })
}

// ── System ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn root_and_health() {
    let app = TestApp::new().await;

    let (status, body) = app.call("GET", "/api/", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["message"], "MOOKI STORE API");

    let (status, body) = app.call("GET", "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 0);
    assert_eq!(body["data"]["store"], "memory");
}

// ── Auth gate ────────────────────────────────────────────────────────────

#[tokio::test]
async fn login_then_verify() {
    let app = TestApp::new().await;
    let token = app.login().await;

    let (status, body) = app.call("GET", "/api/auth/verify", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["valid"], true);
    assert_eq!(body["data"]["username"], "admin");
}

#[tokio::test]
async fn login_rejects_bad_credentials() {
    let app = TestApp::new().await;

    for (username, password) in [("admin", "wrong"), ("nobody", "admin123")] {
        let (status, body) = app
            .call(
                "POST",
                "/api/auth/login",
                None,
                Some(json!({"username": username, "password": password})),
            )
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["msg"], "Invalid credentials");
    }
}

#[tokio::test]
async fn guarded_routes_require_token() {
    let app = TestApp::new().await;

    for (method, path) in [
        ("GET", "/api/auth/verify"),
        ("GET", "/api/orders"),
        ("GET", "/api/contact"),
        ("POST", "/api/product"),
        ("PUT", "/api/product"),
        ("PUT", "/api/product/abc"),
        ("DELETE", "/api/product/abc"),
        ("PUT", "/api/orders/abc/status"),
        ("PUT", "/api/contact/abc/read"),
        ("POST", "/api/send-test-email"),
    ] {
        let (status, body) = app.call(method, path, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{method} {path}");
        assert_eq!(body["code"], 2001, "{method} {path}");
    }

    let (status, _) = app.call("GET", "/api/orders", Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn expired_token_rejected() {
    let app = TestApp::new().await;
    let stale = app
        .auth
        .issue_token_at("admin", Utc::now() - Duration::hours(25))
        .unwrap();

    let (status, body) = app.call("GET", "/api/auth/verify", Some(&stale), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 2003);
}

#[tokio::test]
async fn foreign_signature_rejected() {
    let app = TestApp::new().await;
    let other = AdminAuthService::new(Arc::new(MemoryStore::new()), "other-secret".to_string(), 24);
    let forged = other.issue_token("admin").unwrap();

    let (status, _) = app.call("GET", "/api/auth/verify", Some(&forged), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// ── Order intake ─────────────────────────────────────────────────────────

#[tokio::test]
async fn order_decrements_stock() {
    let app = TestApp::new().await;
    let product = app.featured().await;
    let pid = product["id"].as_str().unwrap();
    assert_eq!(product["stock"], 100);

    let (status, body) = app.call("POST", "/api/orders", None, Some(order_body(json!([line(pid, 2)])))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["status"], "Pending");
    assert_eq!(body["data"]["payment_method"], "Cash on Delivery");
    assert_eq!(app.stock_of(pid).await, 98);

    // Confirmation page reads the order without a token
    let order_id = body["data"]["id"].as_str().unwrap();
    let (status, body) = app.call("GET", &format!("/api/orders/{}", order_id), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"][0]["quantity"], 2);
}

#[tokio::test]
async fn understocked_order_changes_nothing() {
    let app = TestApp::new().await;
    let token = app.login().await;
    let pid = app.featured().await["id"].as_str().unwrap().to_string();

    let (status, body) = app.call("POST", "/api/orders", None, Some(order_body(json!([line(&pid, 101)])))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "Insufficient stock for Strawberry Punch");
    assert_eq!(app.stock_of(&pid).await, 100);

    let (_, body) = app.call("GET", "/api/orders", Some(&token), None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn one_bad_line_rejects_whole_order() {
    let app = TestApp::new().await;
    let token = app.login().await;
    let pid = app.featured().await["id"].as_str().unwrap().to_string();

    let (status, body) = app
        .call(
            "POST",
            "/api/product",
            Some(&token),
            Some(json!({"name": "Mango Ice", "flavor": "Mango Ice", "stock": 1})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let scarce = body["data"]["id"].as_str().unwrap().to_string();

    let items = json!([line(&pid, 1), {
        "product_id": scarce,
        "product_name": "Mango Ice",
        "quantity": 2,
        "price": "29.99"
    }]);
    let (status, body) = app.call("POST", "/api/orders", None, Some(order_body(items))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "Insufficient stock for Mango Ice");
    assert_eq!(app.stock_of(&pid).await, 100);
    assert_eq!(app.stock_of(&scarce).await, 1);
}

#[tokio::test]
async fn unavailable_and_unknown_products_rejected() {
    let app = TestApp::new().await;
    let token = app.login().await;
    let pid = app.featured().await["id"].as_str().unwrap().to_string();

    let (status, _) = app
        .call("POST", "/api/orders", None, Some(order_body(json!([line("no-such-product", 1)]))))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .call("PUT", "/api/product", Some(&token), Some(json!({"is_available": false})))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.call("POST", "/api/orders", None, Some(order_body(json!([line(&pid, 1)])))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "Product Strawberry Punch not available");
    assert_eq!(app.stock_of(&pid).await, 100);
}

#[tokio::test]
async fn malformed_orders_rejected() {
    let app = TestApp::new().await;
    let pid = app.featured().await["id"].as_str().unwrap().to_string();

    let (status, _) = app.call("POST", "/api/orders", None, Some(order_body(json!([])))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.call("POST", "/api/orders", None, Some(order_body(json!([line(&pid, 0)])))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(app.stock_of(&pid).await, 100);
}

#[tokio::test]
async fn overflowing_line_total_rejected() {
    let app = TestApp::new().await;
    let pid = app.featured().await["id"].as_str().unwrap().to_string();

    // price * quantity exceeds the decimal range
    let items = json!([{
        "product_id": pid,
        "product_name": "Strawberry Punch",
        "quantity": 9_000_000_000_000_000_000_i64,
        "price": "9999999999.99"
    }]);
    let (status, body) = app.call("POST", "/api/orders", None, Some(order_body(items))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "Insufficient stock for Strawberry Punch");
    assert_eq!(app.stock_of(&pid).await, 100);
}

#[tokio::test]
async fn out_of_range_price_rejected() {
    let app = TestApp::new().await;
    let pid = app.featured().await["id"].as_str().unwrap().to_string();

    for price in [json!("100000000000"), json!("29.999")] {
        let items = json!([{
            "product_id": pid,
            "product_name": "Strawberry Punch",
            "quantity": 1,
            "price": price
        }]);
        let (status, body) = app.call("POST", "/api/orders", None, Some(order_body(items))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{price}");
        assert_eq!(body["code"], 1001, "{price}");
    }
    assert_eq!(app.stock_of(&pid).await, 100);
}

#[tokio::test]
async fn unreadable_bodies_use_envelope() {
    let app = TestApp::new().await;

    let (status, body) = app.call_raw("POST", "/api/orders", "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 1001);
    assert!(body["msg"].is_string());

    // Missing required field
    let (status, body) = app.call_raw("POST", "/api/contact", r#"{"name": "Dana"}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 1001);

    // Wrong type
    let (status, body) = app.call_raw("POST", "/api/auth/login", r#"{"username": 1, "password": "x"}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 1001);
}

#[tokio::test]
async fn order_status_transitions() {
    let app = TestApp::new().await;
    let token = app.login().await;
    let pid = app.featured().await["id"].as_str().unwrap().to_string();
    let (_, body) = app.call("POST", "/api/orders", None, Some(order_body(json!([line(&pid, 1)])))).await;
    let order_id = body["data"]["id"].as_str().unwrap().to_string();
    let status_path = format!("/api/orders/{}/status", order_id);

    let (status, body) = app
        .call("PUT", &status_path, Some(&token), Some(json!({"status": "Shipped"})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["msg"].as_str().unwrap().starts_with("Invalid status. Must be one of:"));

    let (_, body) = app.call("GET", &format!("/api/orders/{}", order_id), None, None).await;
    assert_eq!(body["data"]["status"], "Pending");

    let (status, body) = app
        .call("PUT", &status_path, Some(&token), Some(json!({"status": "Confirmed"})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "Confirmed");

    let (status, _) = app
        .call("PUT", "/api/orders/missing/status", Some(&token), Some(json!({"status": "Completed"})))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn orders_listed_newest_first() {
    let app = TestApp::new().await;
    let token = app.login().await;
    let pid = app.featured().await["id"].as_str().unwrap().to_string();

    let mut ids = Vec::new();
    for _ in 0..3 {
        let (_, body) = app.call("POST", "/api/orders", None, Some(order_body(json!([line(&pid, 1)])))).await;
        ids.push(body["data"]["id"].as_str().unwrap().to_string());
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let (_, body) = app.call("GET", "/api/orders", Some(&token), None).await;
    let listed: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["id"].as_str().unwrap())
        .collect();
    ids.reverse();
    assert_eq!(listed, ids);
    assert_eq!(app.stock_of(&pid).await, 97);
}

// ── Catalog ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn product_crud() {
    let app = TestApp::new().await;
    let token = app.login().await;

    let (status, body) = app
        .call(
            "POST",
            "/api/product",
            Some(&token),
            Some(json!({"name": "Blue Razz", "price": "19.50"})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["price"], "19.5");
    assert_eq!(body["data"]["stock"], 100);
    let id = body["data"]["id"].as_str().unwrap().to_string();
    let path = format!("/api/product/{}", id);

    let (status, body) = app.call("PUT", &path, Some(&token), Some(json!({"stock": 7}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["stock"], 7);
    assert_eq!(body["data"]["name"], "Blue Razz");

    let (status, _) = app.call("PUT", &path, Some(&token), Some(json!({"stock": -1}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = app.call("GET", "/api/products", None, None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let (status, _) = app.call("DELETE", &path, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = app.call("GET", &path, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 4001);

    let (status, _) = app.call("DELETE", &path, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn featured_product_update() {
    let app = TestApp::new().await;
    let token = app.login().await;

    let (status, body) = app
        .call("PUT", "/api/product", Some(&token), Some(json!({"price": 24.99, "stock": 50})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["price"], "24.99");

    let featured = app.featured().await;
    assert_eq!(featured["stock"], 50);
    assert_eq!(featured["name"], "Strawberry Punch");
}

// ── Contact inbox ────────────────────────────────────────────────────────

#[tokio::test]
async fn contact_flow() {
    let app = TestApp::new().await;
    let token = app.login().await;

    let (status, body) = app
        .call(
            "POST",
            "/api/contact",
            None,
            Some(json!({"name": "Sam", "email": "sam@example.com", "message": "Do you ship?"})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["is_read"], false);
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, _) = app
        .call("PUT", &format!("/api/contact/{}/read", id), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app.call("GET", "/api/contact", Some(&token), None).await;
    let messages = body["data"].as_array().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["is_read"], true);

    let (status, _) = app.call("PUT", "/api/contact/missing/read", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ── Email ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_email_requires_valid_recipient_and_mailer() {
    let app = TestApp::new().await;
    let token = app.login().await;

    let (status, _) = app
        .call(
            "POST",
            "/api/send-test-email",
            Some(&token),
            Some(json!({"recipient_email": "not-an-email", "subject": "hi", "html_content": "<p>hi</p>"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .call(
            "POST",
            "/api/send-test-email",
            Some(&token),
            Some(json!({"recipient_email": "owner@example.com", "subject": "hi", "html_content": "<p>hi</p>"})),
        )
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], 5002);
}
