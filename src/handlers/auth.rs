use axum::{extract::State, response::Json};
use serde_json::{Value, json};
use std::sync::Arc;

use crate::{
    AppState,
    auth::ForumSession,
    error::{AppError, Result},
    models::{LoginRequest, User},
    services::auth_service,
};

pub async fn login(
    State(state): State<AppState>,
    session: ForumSession,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<Value>> {
    let verifier = Arc::clone(&state.verifier);
    let LoginRequest { username, password } = payload;

    // Hashing verifiers are CPU-bound; keep them off the runtime and outside the store lock
    let username = tokio::task::spawn_blocking(move || {
        auth_service::check_credentials(verifier.as_ref(), &username, &password).map(|_| username)
    })
    .await
    .map_err(|e| AppError::Internal(format!("Credential check failed: {}", e)))??;

    let mut store = session.store.lock().await;
    let user = auth_service::sign_in(&mut store, &state.config.demo_profile(), &username);

    Ok(Json(json!({
        "message": "Login successful",
        "user": user
    })))
}

pub async fn logout(session: ForumSession) -> Result<Json<Value>> {
    let mut store = session.store.lock().await;
    auth_service::logout(&mut store);

    Ok(Json(json!({
        "message": "Logged out successfully"
    })))
}

pub async fn get_current_user(session: ForumSession) -> Result<Json<Option<User>>> {
    let store = session.store.lock().await;

    Ok(Json(store.current_user().cloned()))
}
