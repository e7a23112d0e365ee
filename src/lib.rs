pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod seed;
pub mod services;
pub mod session;
pub mod store;

use axum::{
    Router,
    http::{
        HeaderValue, Method,
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    },
    routing::{get, post, put},
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    auth::{CredentialVerifier, verifier_from_config},
    config::Config,
    seed::Seed,
    session::SessionRegistry,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub sessions: Arc<SessionRegistry>,
    pub verifier: Arc<dyn CredentialVerifier>,
}

impl AppState {
    pub fn new(config: Config, seed: Seed) -> Self {
        let verifier = verifier_from_config(&config);
        let sessions = Arc::new(SessionRegistry::new(
            seed,
            config.session_ttl_hours,
            config.max_sessions,
        ));

        Self {
            config: Arc::new(config),
            sessions,
            verifier,
        }
    }
}

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(
            state
                .config
                .allowed_origins
                .iter()
                .filter_map(|origin| match origin.parse::<HeaderValue>() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        tracing::warn!("Ignoring invalid allowed origin {:?}", origin);
                        None
                    }
                })
                .collect::<Vec<_>>(),
        )
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([AUTHORIZATION, ACCEPT, CONTENT_TYPE]);

    // Session routes
    let session_routes = Router::new().route(
        "/api/sessions",
        post(handlers::sessions::open_session).delete(handlers::sessions::close_session),
    );

    // Session-scoped routes
    let forum_routes = Router::new()
        // Auth routes
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/auth/logout", post(handlers::auth::logout))
        .route("/api/auth/me", get(handlers::auth::get_current_user))
        // Category routes
        .route(
            "/api/categories",
            get(handlers::categories::get_categories),
        )
        .route(
            "/api/categories/selected",
            put(handlers::categories::select_category),
        )
        .route(
            "/api/categories/{category_id}/posts",
            get(handlers::categories::get_category_posts),
        )
        // Post routes
        .route(
            "/api/posts",
            get(handlers::posts::get_posts).post(handlers::posts::create_post),
        )
        .route("/api/posts/{post_id}", get(handlers::posts::get_post))
        .route(
            "/api/posts/{post_id}/vote",
            post(handlers::posts::vote_post),
        )
        // Comment routes
        .route(
            "/api/posts/{post_id}/comments",
            post(handlers::comments::create_comment),
        )
        .route(
            "/api/posts/{post_id}/comments/{comment_id}/replies",
            post(handlers::comments::create_reply),
        )
        .route(
            "/api/posts/{post_id}/comments/{comment_id}/vote",
            post(handlers::comments::vote_comment),
        )
        // Search routes
        .route("/api/tags/{tag}/posts", get(handlers::search::tag_posts))
        .route("/api/search", get(handlers::search::search))
        .route("/api/feed", get(handlers::search::feed));

    Router::new()
        .merge(session_routes)
        .merge(forum_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
