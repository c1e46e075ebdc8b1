//! Admin authentication: Argon2 password check at login, HS256 bearer tokens
//! for every admin route.

pub mod handlers;
pub mod middleware;
pub mod service;

pub use middleware::jwt_auth_middleware;
pub use service::{AdminAuthService, AuthError, Claims, LoginRequest, TokenResponse, VerifyResponse};
