//! Startup seeding: default product and default admin account.

use chrono::Utc;

use crate::config::AuthConfig;
use crate::models::ProductDraft;
use crate::store::{Store, StoreError};
use crate::user_auth::{AdminAuthService, AuthError};

/// Insert the default product when the catalog is empty.
/// Returns `true` if a product was created.
pub async fn ensure_default_product(store: &dyn Store) -> Result<bool, StoreError> {
    if store.first_product().await?.is_some() {
        return Ok(false);
    }
    let product = ProductDraft::default().into_product(Utc::now());
    store.insert_product(&product).await?;
    tracing::info!(product_id = %product.id, name = %product.name, "Default product created");
    Ok(true)
}

/// Seed everything a fresh store needs.
pub async fn seed(store: &dyn Store, auth: &AdminAuthService, config: &AuthConfig) -> Result<(), AuthError> {
    ensure_default_product(store).await?;
    auth.ensure_default_admin(&config.default_admin_username, &config.default_admin_password)
        .await?;
    Ok(())
}
