use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, Result},
    models::{Comment, CreateCommentRequest, Post, VoteDirection},
    store::ForumStore,
};

/// Appends a comment by the current user to `post_id` and returns the post.
pub fn add_comment(
    store: &mut ForumStore,
    post_id: Uuid,
    payload: &CreateCommentRequest,
) -> Result<Post> {
    append(store, post_id, None, payload)
}

/// Appends a reply to `parent_id` on `post_id` and returns the post.
///
/// Replies live in the same flat list as top-level comments, linked by
/// `parent_id`, so the list stays in insertion order.
pub fn reply_to_comment(
    store: &mut ForumStore,
    post_id: Uuid,
    parent_id: Uuid,
    payload: &CreateCommentRequest,
) -> Result<Post> {
    append(store, post_id, Some(parent_id), payload)
}

fn append(
    store: &mut ForumStore,
    post_id: Uuid,
    parent_id: Option<Uuid>,
    payload: &CreateCommentRequest,
) -> Result<Post> {
    let author = store
        .current_user()
        .map(|user| user.username.clone())
        .ok_or_else(|| AppError::AuthRequired("Log in to comment".to_string()))?;

    let post = store
        .post(post_id)
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    if let Some(parent_id) = parent_id {
        if post.comment(parent_id).is_none() {
            return Err(AppError::NotFound("Comment not found".to_string()));
        }
    }

    payload.validate()?;

    let comment = Comment {
        id: Uuid::new_v4(),
        parent_id,
        author,
        content: payload.content.trim().to_string(),
        upvotes: 0,
        downvotes: 0,
        created_at: Utc::now(),
    };
    let comment_id = comment.id;

    let post = store
        .post_mut(post_id)
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;
    post.comments.push(comment);
    let post = post.clone();

    if let Some(user) = store.current_user_mut() {
        user.comment_count += 1;
    }

    match parent_id {
        Some(parent_id) => tracing::info!(
            "Reply {} added to comment {} on post {}",
            comment_id,
            parent_id,
            post_id
        ),
        None => tracing::info!("Comment {} added to post {}", comment_id, post_id),
    }

    Ok(post)
}

pub fn vote_comment(
    store: &mut ForumStore,
    post_id: Uuid,
    comment_id: Uuid,
    direction: VoteDirection,
) -> Result<Post> {
    let post = store
        .post_mut(post_id)
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    let comment = post
        .comment_mut(comment_id)
        .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))?;

    match direction {
        VoteDirection::Up => comment.upvotes = comment.upvotes.saturating_add(1),
        VoteDirection::Down => comment.downvotes = comment.downvotes.saturating_add(1),
    }

    tracing::debug!("Comment {} on post {} voted {:?}", comment_id, post_id, direction);

    Ok(post.clone())
}
