use std::sync::Arc;

use axum::{RequestPartsExt, extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    AppState,
    config::Config,
    error::{AppError, Result},
    store::ForumStore,
};

/// Decides whether a username/password pair may log in.
///
/// The store never sees credentials; login asks a verifier and only then
/// touches session state, so a real authenticator can be dropped in here.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, username: &str, password: &str) -> bool;
}

/// Accepts exactly one literal username/password pair.
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    username: String,
    password: String,
}

impl StaticCredentials {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
        }
    }
}

impl Default for StaticCredentials {
    fn default() -> Self {
        Self::new("testuser", "pass123")
    }
}

impl CredentialVerifier for StaticCredentials {
    fn verify(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

/// One username whose password is checked against a bcrypt hash.
#[derive(Debug, Clone)]
pub struct HashedCredentials {
    username: String,
    password_hash: String,
}

impl HashedCredentials {
    pub fn new(username: &str, password_hash: &str) -> Self {
        Self {
            username: username.to_string(),
            password_hash: password_hash.to_string(),
        }
    }
}

impl CredentialVerifier for HashedCredentials {
    fn verify(&self, username: &str, password: &str) -> bool {
        if self.username != username {
            return false;
        }
        match verify_password(password, &self.password_hash) {
            Ok(valid) => valid,
            Err(e) => {
                tracing::error!("Password hash check failed: {:?}", e);
                false
            }
        }
    }
}

/// Picks the hashed verifier when a hash is configured, the literal pair otherwise.
pub fn verifier_from_config(config: &Config) -> Arc<dyn CredentialVerifier> {
    match &config.demo_password_hash {
        Some(hash) => Arc::new(HashedCredentials::new(&config.demo_username, hash)),
        None => Arc::new(StaticCredentials::new(
            &config.demo_username,
            &config.demo_password,
        )),
    }
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    bcrypt::verify(password, hash).map_err(AppError::from)
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // session_id
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(session_id: Uuid, jwt_secret: &str, ttl_hours: i64) -> Result<(String, Self)> {
        let now = Utc::now();
        let exp = now + Duration::hours(ttl_hours);

        let claims = Self {
            sub: session_id.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(jwt_secret.as_ref()),
        )?;

        Ok((token, claims))
    }

    pub fn verify(token: &str, jwt_secret: &str) -> Result<Self> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(jwt_secret.as_ref()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}

/// The caller's session store, resolved from the bearer token.
#[derive(Debug)]
pub struct ForumSession {
    pub session_id: Uuid,
    pub store: Arc<Mutex<ForumStore>>,
}

impl FromRequestParts<AppState> for ForumSession {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| AppError::Authentication("Missing session token".to_string()))?;

        let claims = Claims::verify(bearer.token(), &state.config.jwt_secret)?;

        let session_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::Authentication("Invalid session ID in token".to_string()))?;

        let store = state
            .sessions
            .get(session_id)
            .await
            .ok_or_else(|| AppError::Authentication("Session expired".to_string()))?;

        Ok(ForumSession { session_id, store })
    }
}
