use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::{Value, json};

use crate::{
    AppState,
    auth::{Claims, ForumSession},
    error::Result,
};

pub async fn open_session(State(state): State<AppState>) -> Result<(StatusCode, Json<Value>)> {
    let session_id = state.sessions.create().await?;

    let (token, claims) = Claims::new(
        session_id,
        &state.config.jwt_secret,
        state.config.session_ttl_hours,
    )?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "token": token,
            "session_id": session_id,
            "expires_at": claims.exp
        })),
    ))
}

pub async fn close_session(
    State(state): State<AppState>,
    session: ForumSession,
) -> Result<StatusCode> {
    state.sessions.remove(session.session_id).await;

    Ok(StatusCode::NO_CONTENT)
}
