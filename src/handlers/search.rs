use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
    AppState,
    auth::ForumSession,
    error::Result,
    models::{Feed, Post},
    services::search_service,
};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
    pub limit: Option<usize>,
}

pub async fn search(
    session: ForumSession,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Value>> {
    let q = query.q.unwrap_or_default();

    let store = session.store.lock().await;
    let results = search_service::search(&store, &q);

    Ok(Json(json!({
        "query": q,
        "count": results.len(),
        "results": results
    })))
}

pub async fn feed(
    State(state): State<AppState>,
    session: ForumSession,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Feed>> {
    let limit = query.limit.unwrap_or(state.config.trending_limit).min(100);

    let store = session.store.lock().await;

    Ok(Json(search_service::feed(
        &store,
        query.q.as_deref(),
        Some(limit),
    )?))
}

pub async fn tag_posts(session: ForumSession, Path(tag): Path<String>) -> Result<Json<Vec<Post>>> {
    let store = session.store.lock().await;

    Ok(Json(search_service::by_tag(&store, &tag)))
}
