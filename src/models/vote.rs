use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteDirection {
    Up,
    Down,
}

impl FromStr for VoteDirection {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(VoteDirection::Up),
            "down" => Ok(VoteDirection::Down),
            _ => Err(format!("Unknown VoteDirection: {}", s)),
        }
    }
}

// Vote request
#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    pub direction: String, // "up" or "down"
}

// Vote response
#[derive(Debug, Serialize)]
pub struct VoteResponse {
    pub upvotes: u32,
    pub downvotes: u32,
    pub score: i64,
}
