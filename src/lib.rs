//! MOOKI STORE - single-product storefront backend
//!
//! # Modules
//!
//! - [`config`] - YAML configuration with environment overrides
//! - [`logging`] - tracing subscriber setup
//! - [`money`] - Non-negative decimal amounts
//! - [`models`] - Products, orders, contact messages, admins
//! - [`db`] - PostgreSQL connection pool and schema
//! - [`store`] - Storage trait with PostgreSQL and in-memory backends
//! - [`user_auth`] - Admin login and bearer-token gate
//! - [`email`] - Outbound email (Resend) and order confirmation template
//! - [`seed`] - Default product and admin on startup
//! - [`gateway`] - HTTP router, handlers, OpenAPI

pub mod config;
pub mod db;
pub mod email;
pub mod gateway;
pub mod logging;
pub mod models;
pub mod money;
pub mod seed;
pub mod store;
pub mod user_auth;

pub use config::AppConfig;
pub use gateway::{build_router, run_server, state::AppState};
pub use money::Money;
pub use store::{MemoryStore, PgStore, Store, StoreError};
