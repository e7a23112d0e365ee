use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The single authenticated identity of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub karma: u32,
    pub level: u32,
    pub thread_count: u32,
    pub comment_count: u32,
    pub joined_at: DateTime<Utc>,
}

/// Fixed profile fields handed to every user on login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoProfile {
    pub karma: u32,
    pub level: u32,
}

impl Default for DemoProfile {
    fn default() -> Self {
        Self {
            karma: 1500,
            level: 5,
        }
    }
}

// Login request; any pair the verifier rejects is "Invalid credentials"
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}
