//! Read-only projections over a store. Nothing here mutates state.

use std::cmp::Reverse;

use crate::{
    error::{AppError, Result},
    models::{Feed, Post},
    store::ForumStore,
};

/// Posts by net score, highest first. Equal scores keep creation order.
pub fn trending(store: &ForumStore, limit: Option<usize>) -> Vec<Post> {
    let mut posts = store.posts().to_vec();
    // sort_by_key is stable, which is what keeps ties in creation order
    posts.sort_by_key(|post| Reverse(post.score()));
    if let Some(limit) = limit {
        posts.truncate(limit);
    }
    posts
}

/// Most recently created first.
pub fn newest(store: &ForumStore, limit: Option<usize>) -> Vec<Post> {
    let posts = store.posts().iter().rev().cloned();
    match limit {
        Some(limit) => posts.take(limit).collect(),
        None => posts.collect(),
    }
}

pub fn by_category(store: &ForumStore, category_id: &str) -> Result<Vec<Post>> {
    if store.category(category_id).is_none() {
        return Err(AppError::NotFound(format!("Category {} not found", category_id)));
    }

    Ok(store
        .posts()
        .iter()
        .filter(|post| post.category_id == category_id)
        .cloned()
        .collect())
}

pub fn by_tag(store: &ForumStore, tag: &str) -> Vec<Post> {
    let tag = tag.trim().to_lowercase();
    if tag.is_empty() {
        return Vec::new();
    }

    store
        .posts()
        .iter()
        .filter(|post| post.tags.contains(&tag))
        .cloned()
        .collect()
}

/// Case-insensitive substring match on title or content.
///
/// A blank query means no search is active and matches nothing.
pub fn search(store: &ForumStore, query: &str) -> Vec<Post> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    store
        .posts()
        .iter()
        .filter(|post| {
            post.title.to_lowercase().contains(&needle)
                || post.content.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Search results if the query is non-blank, else the selected category,
/// else trending.
pub fn feed(store: &ForumStore, query: Option<&str>, limit: Option<usize>) -> Result<Feed> {
    if let Some(query) = query.filter(|q| !q.trim().is_empty()) {
        return Ok(Feed::Search(search(store, query)));
    }

    match store.selected_category() {
        Some(category) => Ok(Feed::Category(by_category(store, &category.id)?)),
        None => Ok(Feed::Trending(trending(store, limit))),
    }
}
