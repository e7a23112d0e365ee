use serde::Deserialize;
use std::env;

use crate::models::DemoProfile;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub session_ttl_hours: i64,
    pub max_sessions: usize,
    pub allowed_origins: Vec<String>,

    // Demo login
    pub demo_username: String,
    pub demo_password: String,
    pub demo_password_hash: Option<String>,
    pub demo_karma: u32,
    pub demo_level: u32,

    // Content
    pub seed_file: Option<String>,
    pub trending_limit: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
            jwt_secret: env::var("JWT_SECRET")?,
            session_ttl_hours: env::var("SESSION_TTL_HOURS")
                .unwrap_or_else(|_| "24".to_string())
                .parse()
                .unwrap_or(24),
            max_sessions: env::var("MAX_SESSIONS")
                .ok()
                .and_then(|n| n.parse().ok())
                .unwrap_or(10_000),
            allowed_origins: env::var("ALLOWED_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:3000,http://localhost:5173".to_string())
                .split(',')
                .map(|s| s.trim().to_string())
                .collect(),

            demo_username: env::var("DEMO_USERNAME").unwrap_or_else(|_| "testuser".to_string()),
            demo_password: env::var("DEMO_PASSWORD").unwrap_or_else(|_| "pass123".to_string()),
            demo_password_hash: env::var("DEMO_PASSWORD_HASH").ok(),
            demo_karma: env::var("DEMO_KARMA")
                .ok()
                .and_then(|k| k.parse().ok())
                .unwrap_or(1500),
            demo_level: env::var("DEMO_LEVEL")
                .ok()
                .and_then(|l| l.parse().ok())
                .unwrap_or(5),

            seed_file: env::var("SEED_FILE").ok(),
            trending_limit: env::var("TRENDING_LIMIT")
                .ok()
                .and_then(|n| n.parse().ok())
                .unwrap_or(5),
        })
    }

    pub fn demo_profile(&self) -> DemoProfile {
        DemoProfile {
            karma: self.demo_karma,
            level: self.demo_level,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            jwt_secret: "forumhub-dev-secret".to_string(),
            session_ttl_hours: 24,
            max_sessions: 10_000,
            allowed_origins: vec!["http://localhost:3000".to_string()],
            demo_username: "testuser".to_string(),
            demo_password: "pass123".to_string(),
            demo_password_hash: None,
            demo_karma: 1500,
            demo_level: 5,
            seed_file: None,
            trending_limit: 5,
        }
    }
}
