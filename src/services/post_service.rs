use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, Result},
    models::{CreatePostRequest, Post, VoteDirection, normalize_tags},
    store::ForumStore,
};

pub fn get_post(store: &ForumStore, post_id: Uuid) -> Result<Post> {
    store
        .post(post_id)
        .cloned()
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))
}

/// Creates a post authored by the current user and appends it to the store.
pub fn create_post(store: &mut ForumStore, payload: &CreatePostRequest) -> Result<Post> {
    let author = store
        .current_user()
        .map(|user| user.username.clone())
        .ok_or_else(|| AppError::AuthRequired("Log in to create a post".to_string()))?;

    payload.validate()?;

    if store.category(&payload.category_id).is_none() {
        return Err(AppError::Validation(format!(
            "Unknown category {}",
            payload.category_id
        )));
    }

    let post = Post {
        id: Uuid::new_v4(),
        category_id: payload.category_id.clone(),
        title: payload.title.trim().to_string(),
        content: payload.content.trim().to_string(),
        author,
        created_at: Utc::now(),
        upvotes: 0,
        downvotes: 0,
        comments: Vec::new(),
        tags: normalize_tags(&payload.tags),
    };

    store.insert_post(post.clone());
    if let Some(user) = store.current_user_mut() {
        user.thread_count += 1;
    }

    tracing::info!(
        "Post {} created by {} in category {}",
        post.id,
        post.author,
        post.category_id
    );

    Ok(post)
}

/// Adds one vote in `direction`. Anyone may vote, any number of times.
pub fn vote(store: &mut ForumStore, post_id: Uuid, direction: VoteDirection) -> Result<Post> {
    let post = store
        .post_mut(post_id)
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    match direction {
        VoteDirection::Up => post.upvotes = post.upvotes.saturating_add(1),
        VoteDirection::Down => post.downvotes = post.downvotes.saturating_add(1),
    }

    tracing::debug!(
        "Post {} voted {:?}: {} up / {} down",
        post_id,
        direction,
        post.upvotes,
        post.downvotes
    );

    Ok(post.clone())
}
