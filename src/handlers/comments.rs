use axum::{extract::Path, http::StatusCode, response::Json};
use uuid::Uuid;

use crate::{
    auth::ForumSession,
    error::{AppError, Result},
    models::{CreateCommentRequest, Post, VoteDirection, VoteRequest, VoteResponse},
    services::comment_service,
};

pub async fn create_comment(
    session: ForumSession,
    Path(post_id): Path<Uuid>,
    Json(payload): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<Post>)> {
    let mut store = session.store.lock().await;
    let post = comment_service::add_comment(&mut store, post_id, &payload)?;

    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn create_reply(
    session: ForumSession,
    Path((post_id, comment_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<Post>)> {
    let mut store = session.store.lock().await;
    let post = comment_service::reply_to_comment(&mut store, post_id, comment_id, &payload)?;

    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn vote_comment(
    session: ForumSession,
    Path((post_id, comment_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<VoteRequest>,
) -> Result<Json<VoteResponse>> {
    let direction: VoteDirection = payload.direction.parse().map_err(AppError::BadRequest)?;

    let mut store = session.store.lock().await;
    let post = comment_service::vote_comment(&mut store, post_id, comment_id, direction)?;

    let comment = post
        .comment(comment_id)
        .ok_or_else(|| AppError::Internal("Voted comment vanished".to_string()))?;

    Ok(Json(VoteResponse {
        upvotes: comment.upvotes,
        downvotes: comment.downvotes,
        score: comment.score(),
    }))
}
