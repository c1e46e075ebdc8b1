//! MOOKI STORE API server
//!
//! ```text
//! mooki_store [--env dev|prod] [--port 8001]
//! ```

use anyhow::{Context, Result};
use std::sync::Arc;

use mooki_store::config::AppConfig;
use mooki_store::db::Database;
use mooki_store::email::{Mailer, ResendMailer};
use mooki_store::gateway::{self, state::AppState};
use mooki_store::store::{MemoryStore, PgStore, Store};
use mooki_store::user_auth::AdminAuthService;
use mooki_store::{logging, seed};

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

/// Get port override from command line (--port argument)
fn get_port_override() -> Option<u16> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--port" && i + 1 < args.len() {
            return args[i + 1].parse().ok();
        }
    }
    None
}

async fn open_store(config: &AppConfig) -> Result<Arc<dyn Store>> {
    match &config.postgres_url {
        Some(url) => {
            let db = Database::connect(url).await.context("Failed to connect to PostgreSQL")?;
            db.ensure_schema().await.context("Failed to create schema")?;
            tracing::info!("PostgreSQL store ready");
            Ok(Arc::new(PgStore::new(Arc::new(db))))
        }
        None => {
            tracing::warn!("postgres_url not set, using in-memory store (data is lost on restart)");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let env = get_env();
    let app_config = AppConfig::load(&env)?;
    let _log_guard = logging::init_logging(&app_config);

    tracing::info!("Starting MOOKI STORE API in {} mode", env);

    let store = open_store(&app_config).await?;
    let auth = Arc::new(AdminAuthService::new(
        store.clone(),
        app_config.auth.jwt_secret.clone(),
        app_config.auth.token_ttl_hours,
    ));
    seed::seed(store.as_ref(), &auth, &app_config.auth)
        .await
        .context("Failed to seed store")?;

    let mailer: Option<Arc<dyn Mailer>> = match ResendMailer::from_config(&app_config.email)? {
        Some(mailer) => Some(Arc::new(mailer)),
        None => {
            tracing::warn!("RESEND_API_KEY not configured, confirmation emails disabled");
            None
        }
    };

    let state = Arc::new(AppState::new(store, auth, mailer));
    let port = get_port_override().unwrap_or(app_config.gateway.port);
    gateway::run_server(&app_config.gateway.host, port, state).await
}
