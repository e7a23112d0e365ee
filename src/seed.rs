//! Seed data loaded into every new store: the category list and any demo posts.

use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::{error::Result, models::Category};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedComment {
    pub author: String,
    pub content: String,
    #[serde(default)]
    pub upvotes: u32,
    #[serde(default)]
    pub downvotes: u32,
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub replies: Vec<SeedComment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedPost {
    pub category_id: String,
    pub title: String,
    pub content: String,
    pub author: String,
    #[serde(default)]
    pub upvotes: u32,
    #[serde(default)]
    pub downvotes: u32,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Defaults to the moment the store is initialized.
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub comments: Vec<SeedComment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seed {
    pub categories: Vec<Category>,
    #[serde(default)]
    pub posts: Vec<SeedPost>,
}

impl Seed {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let seed = Self::from_json(&raw)?;
        tracing::debug!(
            "Loaded seed from {}: {} categories, {} posts",
            path.display(),
            seed.categories.len(),
            seed.posts.len()
        );
        Ok(seed)
    }

    /// Categories only, no demo posts.
    pub fn with_categories(categories: Vec<Category>) -> Self {
        Self {
            categories,
            posts: Vec::new(),
        }
    }
}

fn category(id: &str, name: &str, description: &str, icon: &str, color: &str) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
        color: color.to_string(),
    }
}

impl Default for Seed {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            categories: vec![
                category(
                    "1",
                    "General Discussion",
                    "Talk about anything and everything",
                    "💬",
                    "#6366f1",
                ),
                category(
                    "2",
                    "Technology",
                    "Latest tech news and discussions",
                    "💻",
                    "#0ea5e9",
                ),
                category(
                    "3",
                    "Gaming",
                    "Video games and gaming culture",
                    "🎮",
                    "#f43f5e",
                ),
            ],
            posts: vec![
                SeedPost {
                    category_id: "1".to_string(),
                    title: "Welcome to ForumHub!".to_string(),
                    content: "This is a forum where you can discuss anything you want."
                        .to_string(),
                    author: "Admin".to_string(),
                    upvotes: 10,
                    downvotes: 0,
                    tags: vec!["welcome".to_string()],
                    created_at: Some(now - Duration::days(2)),
                    comments: Vec::new(),
                },
                SeedPost {
                    category_id: "2".to_string(),
                    title: "Best practices for state management in 2024".to_string(),
                    content: "I've been using the same approach for years, but I'm curious \
                              about newer solutions. What are your experiences?"
                        .to_string(),
                    author: "johndoe".to_string(),
                    upvotes: 45,
                    downvotes: 2,
                    tags: vec!["state-management".to_string(), "frontend".to_string()],
                    created_at: Some(now - Duration::days(1)),
                    comments: vec![SeedComment {
                        author: "janedoe".to_string(),
                        content: "Signals have been working well for me.".to_string(),
                        upvotes: 12,
                        downvotes: 0,
                        created_at: Some(now - Duration::hours(20)),
                        replies: vec![SeedComment {
                            author: "johndoe".to_string(),
                            content: "Thanks, I'll give them a try.".to_string(),
                            upvotes: 3,
                            downvotes: 0,
                            created_at: Some(now - Duration::hours(18)),
                            replies: Vec::new(),
                        }],
                    }],
                },
            ],
        }
    }
}
