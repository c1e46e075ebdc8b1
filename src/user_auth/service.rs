use std::sync::Arc;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::models::{AdminUser, new_id};
use crate::store::{Store, StoreError};

/// JWT Claims structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String, // Subject (admin username)
    pub exp: usize,  // Expiration time (as UTC timestamp)
    pub iat: usize,  // Issued at
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Hashing failed: {0}")]
    Hashing(String),

    #[error("Failed to generate token: {0}")]
    Signing(jsonwebtoken::errors::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Admin Login Request
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "admin")]
    pub username: String,
    #[schema(example = "admin123")]
    pub password: String,
}

/// Auth Response (JWT)
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    #[schema(example = "bearer")]
    pub token_type: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VerifyResponse {
    pub valid: bool,
    #[schema(example = "admin")]
    pub username: String,
}

pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Hashing(e.to_string()))
}

/// False for a wrong password and for an unparseable stored hash alike.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    match PasswordHash::new(password_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            tracing::error!("Stored password hash is malformed: {}", e);
            false
        }
    }
}

/// Issues and verifies admin bearer tokens. Tokens are never stored; a token
/// is valid while its HS256 signature matches and `exp` is in the future.
pub struct AdminAuthService {
    store: Arc<dyn Store>,
    jwt_secret: String,
    token_ttl: Duration,
}

impl AdminAuthService {
    pub fn new(store: Arc<dyn Store>, jwt_secret: String, token_ttl_hours: i64) -> Self {
        Self {
            store,
            jwt_secret,
            token_ttl: Duration::hours(token_ttl_hours),
        }
    }

    /// Create the bootstrap admin when no admin account exists.
    /// Returns whether one was created.
    pub async fn ensure_default_admin(&self, username: &str, password: &str) -> Result<bool, AuthError> {
        if self.store.has_admin().await? {
            return Ok(false);
        }

        let admin = AdminUser {
            id: new_id(),
            username: username.to_string(),
            password_hash: hash_password(password)?,
            created_at: Utc::now(),
        };
        self.store.insert_admin(&admin).await?;
        tracing::info!(username = %admin.username, "Default admin created");
        Ok(true)
    }

    /// Check credentials and issue a JWT
    pub async fn login(&self, req: LoginRequest) -> Result<TokenResponse, AuthError> {
        let admin = self
            .store
            .find_admin(&req.username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(&req.password, &admin.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(TokenResponse {
            access_token: self.issue_token(&admin.username)?,
            token_type: "bearer".to_string(),
        })
    }

    pub fn issue_token(&self, username: &str) -> Result<String, AuthError> {
        self.issue_token_at(username, Utc::now())
    }

    /// Issue a token as if minted at `issued_at`
    pub fn issue_token_at(&self, username: &str, issued_at: DateTime<Utc>) -> Result<String, AuthError> {
        let claims = Claims {
            sub: username.to_string(),
            exp: (issued_at + self.token_ttl).timestamp().max(0) as usize,
            iat: issued_at.timestamp().max(0) as usize,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(AuthError::Signing)
    }

    /// Verify JWT token
    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        let decoding_key = DecodingKey::from_secret(self.jwt_secret.as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let token_data = decode::<Claims>(token, &decoding_key, &validation).map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::InvalidToken,
        })?;

        if token_data.claims.sub.is_empty() {
            return Err(AuthError::InvalidToken);
        }
        Ok(token_data.claims)
    }
}
