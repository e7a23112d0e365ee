use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::{
    AppState,
    auth::ForumSession,
    error::{AppError, Result},
    models::{CreatePostRequest, Post, PostSort, VoteDirection, VoteRequest, VoteResponse},
    services::{post_service, search_service},
};

#[derive(Debug, Deserialize)]
pub struct GetPostsQuery {
    pub sort: Option<PostSort>,
    pub limit: Option<usize>,
}

pub async fn get_posts(
    State(state): State<AppState>,
    session: ForumSession,
    Query(params): Query<GetPostsQuery>,
) -> Result<Json<Value>> {
    let sort = params.sort.unwrap_or_default();
    let limit = params.limit.unwrap_or(state.config.trending_limit).min(100);

    let store = session.store.lock().await;
    let posts = match sort {
        PostSort::Trending => search_service::trending(&store, Some(limit)),
        PostSort::New => search_service::newest(&store, Some(limit)),
    };

    Ok(Json(json!({
        "posts": posts,
        "total": store.posts().len()
    })))
}

pub async fn create_post(
    session: ForumSession,
    Json(payload): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<Post>)> {
    let mut store = session.store.lock().await;
    let post = post_service::create_post(&mut store, &payload)?;

    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn get_post(session: ForumSession, Path(post_id): Path<Uuid>) -> Result<Json<Post>> {
    let store = session.store.lock().await;

    Ok(Json(post_service::get_post(&store, post_id)?))
}

pub async fn vote_post(
    session: ForumSession,
    Path(post_id): Path<Uuid>,
    Json(payload): Json<VoteRequest>,
) -> Result<Json<VoteResponse>> {
    let direction: VoteDirection = payload.direction.parse().map_err(AppError::BadRequest)?;

    let mut store = session.store.lock().await;
    let post = post_service::vote(&mut store, post_id, direction)?;

    Ok(Json(VoteResponse {
        upvotes: post.upvotes,
        downvotes: post.downvotes,
        score: post.score(),
    }))
}
