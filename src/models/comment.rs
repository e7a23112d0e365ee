use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::validate_not_blank;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    /// Comment this one answers; `None` for top-level comments.
    #[serde(default)]
    pub parent_id: Option<Uuid>,
    pub author: String,
    pub content: String,
    pub upvotes: u32,
    pub downvotes: u32,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn score(&self) -> i64 {
        i64::from(self.upvotes) - i64::from(self.downvotes)
    }
}

// Create comment request
#[derive(Debug, Validate, Deserialize)]
pub struct CreateCommentRequest {
    #[validate(
        length(max = 10000),
        custom(function = "validate_not_blank")
    )]
    pub content: String,
}
