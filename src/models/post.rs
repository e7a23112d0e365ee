use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::{Comment, validate_not_blank};

pub const MAX_TAGS: usize = 5;
pub const MAX_TAG_LEN: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub category_id: String,
    pub title: String,
    pub content: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub upvotes: u32,
    pub downvotes: u32,
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Post {
    /// Net score used by the trending order.
    pub fn score(&self) -> i64 {
        i64::from(self.upvotes) - i64::from(self.downvotes)
    }

    pub fn comment(&self, comment_id: Uuid) -> Option<&Comment> {
        self.comments.iter().find(|c| c.id == comment_id)
    }

    pub(crate) fn comment_mut(&mut self, comment_id: Uuid) -> Option<&mut Comment> {
        self.comments.iter_mut().find(|c| c.id == comment_id)
    }

    /// Direct replies to `comment_id`, oldest first.
    pub fn replies(&self, comment_id: Uuid) -> impl Iterator<Item = &Comment> {
        self.comments
            .iter()
            .filter(move |c| c.parent_id == Some(comment_id))
    }
}

fn validate_tags(tags: &[String]) -> Result<(), ValidationError> {
    if normalize_tags(tags).len() > MAX_TAGS {
        return Err(ValidationError::new("too_many_tags")
            .with_message(format!("at most {} tags are allowed", MAX_TAGS).into()));
    }
    if tags.iter().any(|t| t.trim().chars().count() > MAX_TAG_LEN) {
        return Err(ValidationError::new("tag_too_long")
            .with_message(format!("tags must be at most {} characters", MAX_TAG_LEN).into()));
    }
    Ok(())
}

/// Trims and lower-cases tags, dropping blanks and repeats while keeping order.
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim().to_lowercase();
        if !tag.is_empty() && !normalized.contains(&tag) {
            normalized.push(tag);
        }
    }
    normalized
}

// Create post request
#[derive(Debug, Validate, Deserialize)]
pub struct CreatePostRequest {
    pub category_id: String,
    #[validate(length(max = 300), custom(function = "validate_not_blank"))]
    pub title: String,
    #[validate(length(max = 10000), custom(function = "validate_not_blank"))]
    pub content: String,
    #[serde(default)]
    #[validate(custom(function = "validate_tags"))]
    pub tags: Vec<String>,
}

impl CreatePostRequest {
    pub fn new(category_id: &str, title: &str, content: &str) -> Self {
        Self {
            category_id: category_id.to_string(),
            title: title.to_string(),
            content: content.to_string(),
            tags: Vec::new(),
        }
    }
}

// Sorting options for post listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostSort {
    #[default]
    Trending,
    New,
}

/// What a UI shows: search results, else the selected category, else trending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "posts", rename_all = "lowercase")]
pub enum Feed {
    Search(Vec<Post>),
    Category(Vec<Post>),
    Trending(Vec<Post>),
}

impl Feed {
    pub fn posts(&self) -> &[Post] {
        match self {
            Feed::Search(posts) | Feed::Category(posts) | Feed::Trending(posts) => posts,
        }
    }
}
