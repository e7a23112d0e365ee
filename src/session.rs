//! Per-client session stores.
//!
//! Every session owns an independent `ForumStore` seeded from the same
//! `Seed`; sessions never share posts, votes or the current user. At most
//! `max_sessions` are kept; opening one more evicts the oldest.

use std::{collections::HashMap, sync::Arc};

use chrono::{DateTime, Duration, Utc};
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::{error::Result, seed::Seed, store::ForumStore};

#[derive(Debug)]
struct SessionEntry {
    store: Arc<Mutex<ForumStore>>,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct SessionRegistry {
    seed: Seed,
    ttl: Duration,
    max_sessions: usize,
    sessions: RwLock<HashMap<Uuid, SessionEntry>>,
}

impl SessionRegistry {
    pub fn new(seed: Seed, ttl_hours: i64, max_sessions: usize) -> Self {
        Self {
            seed,
            ttl: Duration::hours(ttl_hours),
            max_sessions: max_sessions.max(1),
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Opens a session with a freshly seeded store and returns its id.
    pub async fn create(&self) -> Result<Uuid> {
        let store = ForumStore::seeded(&self.seed)?;
        let session_id = Uuid::new_v4();
        let now = Utc::now();

        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| entry.expires_at > now);
        if sessions.len() < before {
            tracing::debug!("Pruned {} expired sessions", before - sessions.len());
        }

        while sessions.len() >= self.max_sessions {
            let oldest = sessions
                .iter()
                .min_by_key(|(_, entry)| entry.created_at)
                .map(|(id, _)| *id);
            match oldest {
                Some(id) => {
                    sessions.remove(&id);
                    tracing::warn!("Session limit {} reached, evicted {}", self.max_sessions, id);
                }
                None => break,
            }
        }

        sessions.insert(
            session_id,
            SessionEntry {
                store: Arc::new(Mutex::new(store)),
                created_at: now,
                expires_at: now + self.ttl,
            },
        );
        tracing::info!("Session {} opened ({} active)", session_id, sessions.len());

        Ok(session_id)
    }

    pub async fn get(&self, session_id: Uuid) -> Option<Arc<Mutex<ForumStore>>> {
        let sessions = self.sessions.read().await;
        sessions
            .get(&session_id)
            .filter(|entry| entry.expires_at > Utc::now())
            .map(|entry| Arc::clone(&entry.store))
    }

    /// Drops a session. Returns whether it existed.
    pub async fn remove(&self, session_id: Uuid) -> bool {
        let removed = self.sessions.write().await.remove(&session_id).is_some();
        if removed {
            tracing::info!("Session {} closed", session_id);
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
