use axum::{extract::Path, response::Json};
use serde_json::{Value, json};

use crate::{
    auth::ForumSession,
    error::Result,
    models::{CategorySummary, SelectCategoryRequest},
    services::{category_service, search_service},
};

pub async fn get_categories(session: ForumSession) -> Result<Json<Vec<CategorySummary>>> {
    let store = session.store.lock().await;

    Ok(Json(category_service::category_summaries(&store)))
}

pub async fn get_category_posts(
    session: ForumSession,
    Path(category_id): Path<String>,
) -> Result<Json<Value>> {
    let store = session.store.lock().await;
    let posts = search_service::by_category(&store, &category_id)?;

    Ok(Json(json!({
        "category_id": category_id,
        "posts": posts
    })))
}

pub async fn select_category(
    session: ForumSession,
    Json(payload): Json<SelectCategoryRequest>,
) -> Result<Json<Value>> {
    let mut store = session.store.lock().await;
    let selected = category_service::select_category(&mut store, payload.category_id.as_deref())?;

    Ok(Json(json!({
        "selected": selected
    })))
}
