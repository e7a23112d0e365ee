//! In-memory entity store for a single forum session.
//!
//! Holds the categories, posts (with their comments), the current user and
//! the active category filter. Mutations go through the service modules,
//! which validate first and only then touch the store, so a failed
//! operation never leaves partial state behind.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    models::{Category, Comment, Post, User, normalize_tags},
    seed::{Seed, SeedComment},
};

#[derive(Debug, Default)]
pub struct ForumStore {
    categories: Vec<Category>,
    /// Posts in creation order.
    posts: Vec<Post>,
    /// Post id -> position in `posts`.
    index: HashMap<Uuid, usize>,
    current_user: Option<User>,
    selected_category: Option<String>,
}

impl ForumStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds and initializes a store in one step.
    pub fn seeded(seed: &Seed) -> Result<Self> {
        let mut store = Self::new();
        store.initialize(seed)?;
        Ok(store)
    }

    pub fn is_initialized(&self) -> bool {
        !self.categories.is_empty()
    }

    /// Populates the store from `seed` once.
    ///
    /// Returns `Ok(false)` without touching anything if the store already
    /// holds categories. The seed is checked as a whole before anything is
    /// inserted.
    pub fn initialize(&mut self, seed: &Seed) -> Result<bool> {
        if self.is_initialized() {
            return Ok(false);
        }

        if seed.categories.is_empty() {
            return Err(AppError::Validation(
                "Seed must contain at least one category".to_string(),
            ));
        }

        let mut ids = HashSet::new();
        for category in &seed.categories {
            if category.id.trim().is_empty() {
                return Err(AppError::Validation(
                    "Category id must not be blank".to_string(),
                ));
            }
            if !ids.insert(category.id.as_str()) {
                return Err(AppError::Validation(format!(
                    "Duplicate category id {}",
                    category.id
                )));
            }
        }

        for post in &seed.posts {
            if !ids.contains(post.category_id.as_str()) {
                return Err(AppError::Validation(format!(
                    "Seed post '{}' references unknown category {}",
                    post.title, post.category_id
                )));
            }
            if post.title.trim().is_empty() || post.content.trim().is_empty() {
                return Err(AppError::Validation(
                    "Seed posts must have a title and content".to_string(),
                ));
            }
            check_seed_comments(&post.comments)?;
        }

        let now = Utc::now();
        self.categories = seed.categories.clone();
        for post in &seed.posts {
            self.insert_post(Post {
                id: Uuid::new_v4(),
                category_id: post.category_id.clone(),
                title: post.title.trim().to_string(),
                content: post.content.trim().to_string(),
                author: post.author.clone(),
                created_at: post.created_at.unwrap_or(now),
                upvotes: post.upvotes,
                downvotes: post.downvotes,
                comments: flatten_seed_comments(&post.comments, now),
                tags: normalize_tags(&post.tags),
            });
        }

        tracing::debug!(
            "Store initialized with {} categories and {} posts",
            self.categories.len(),
            self.posts.len()
        );
        Ok(true)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn post(&self, id: Uuid) -> Option<&Post> {
        self.index.get(&id).map(|&i| &self.posts[i])
    }

    pub(crate) fn post_mut(&mut self, id: Uuid) -> Option<&mut Post> {
        match self.index.get(&id) {
            Some(&i) => self.posts.get_mut(i),
            None => None,
        }
    }

    /// Appends a post; ids are freshly generated, so a clash is a bug.
    pub(crate) fn insert_post(&mut self, post: Post) {
        debug_assert!(!self.index.contains_key(&post.id));
        self.index.insert(post.id, self.posts.len());
        self.posts.push(post);
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    pub(crate) fn current_user_mut(&mut self) -> Option<&mut User> {
        self.current_user.as_mut()
    }

    pub fn set_current_user(&mut self, user: Option<User>) {
        self.current_user = user;
    }

    pub fn selected_category(&self) -> Option<&Category> {
        self.selected_category
            .as_deref()
            .and_then(|id| self.category(id))
    }

    pub(crate) fn set_selected_category(&mut self, category_id: Option<String>) {
        self.selected_category = category_id;
    }
}

fn check_seed_comments(comments: &[SeedComment]) -> Result<()> {
    for comment in comments {
        if comment.content.trim().is_empty() {
            return Err(AppError::Validation(
                "Seed comments must have content".to_string(),
            ));
        }
        check_seed_comments(&comment.replies)?;
    }
    Ok(())
}

/// Flattens a seed thread depth-first: each comment is followed by its replies.
fn flatten_seed_comments(comments: &[SeedComment], now: DateTime<Utc>) -> Vec<Comment> {
    let mut flat = Vec::new();
    push_seed_comments(&mut flat, comments, None, now);
    flat
}

fn push_seed_comments(
    flat: &mut Vec<Comment>,
    comments: &[SeedComment],
    parent_id: Option<Uuid>,
    now: DateTime<Utc>,
) {
    for seed in comments {
        let id = Uuid::new_v4();
        flat.push(Comment {
            id,
            parent_id,
            author: seed.author.clone(),
            content: seed.content.trim().to_string(),
            upvotes: seed.upvotes,
            downvotes: seed.downvotes,
            created_at: seed.created_at.unwrap_or(now),
        });
        push_seed_comments(flat, &seed.replies, Some(id), now);
    }
}
