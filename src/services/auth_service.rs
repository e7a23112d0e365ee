use chrono::Utc;
use uuid::Uuid;

use crate::{
    auth::CredentialVerifier,
    error::{AppError, Result},
    models::{DemoProfile, User},
    store::ForumStore,
};

/// Logs `username` in and makes it the store's current user.
///
/// A rejected attempt leaves whoever was logged in before untouched.
pub fn login(
    store: &mut ForumStore,
    verifier: &dyn CredentialVerifier,
    profile: &DemoProfile,
    username: &str,
    password: &str,
) -> Result<User> {
    check_credentials(verifier, username, password)?;

    Ok(sign_in(store, profile, username))
}

/// Asks the verifier about the pair without touching any store.
///
/// Verifiers may hash, so callers holding a session lock should run this first.
pub fn check_credentials(
    verifier: &dyn CredentialVerifier,
    username: &str,
    password: &str,
) -> Result<()> {
    if verifier.verify(username, password) {
        Ok(())
    } else {
        tracing::warn!("Rejected login for {}", username);
        Err(AppError::Authentication("Invalid credentials".to_string()))
    }
}

/// Makes an already verified `username` the current user.
pub fn sign_in(store: &mut ForumStore, profile: &DemoProfile, username: &str) -> User {
    // Counters pick up whatever this name already wrote in the session
    let thread_count = store
        .posts()
        .iter()
        .filter(|p| p.author == username)
        .count();
    let comment_count = store
        .posts()
        .iter()
        .flat_map(|p| p.comments.iter())
        .filter(|c| c.author == username)
        .count();

    let user = User {
        id: Uuid::new_v4(),
        username: username.to_string(),
        karma: profile.karma,
        level: profile.level,
        thread_count: u32::try_from(thread_count).unwrap_or(u32::MAX),
        comment_count: u32::try_from(comment_count).unwrap_or(u32::MAX),
        joined_at: Utc::now(),
    };

    store.set_current_user(Some(user.clone()));
    tracing::info!("User {} logged in", user.username);

    user
}

pub fn logout(store: &mut ForumStore) {
    if let Some(user) = store.current_user() {
        tracing::info!("User {} logged out", user.username);
    }
    store.set_current_user(None);
}
