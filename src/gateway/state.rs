use std::sync::Arc;

use crate::email::Mailer;
use crate::store::Store;
use crate::user_auth::AdminAuthService;

/// Gateway application state (shared)
#[derive(Clone)]
pub struct AppState {
    /// Products, orders, messages, admins
    pub store: Arc<dyn Store>,
    /// Login and bearer-token verification
    pub auth: Arc<AdminAuthService>,
    /// Outbound email; `None` when no provider key is configured
    pub mailer: Option<Arc<dyn Mailer>>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, auth: Arc<AdminAuthService>, mailer: Option<Arc<dyn Mailer>>) -> Self {
        Self { store, auth, mailer }
    }
}
