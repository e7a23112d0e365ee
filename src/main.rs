use forumhub::config::Config;
use forumhub::seed::Seed;
use forumhub::store::ForumStore;
use forumhub::{AppState, create_app};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "forumhub=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded successfully");

    // Load seed data
    let seed = match &config.seed_file {
        Some(path) => Seed::from_file(path)?,
        None => Seed::default(),
    };
    tracing::info!(
        "Seed ready: {} categories, {} demo posts",
        seed.categories.len(),
        seed.posts.len()
    );

    // Fail fast on a seed no session could be built from
    ForumStore::seeded(&seed)?;

    // Create application state
    let state = AppState::new(config.clone(), seed);

    // Create application
    let app = create_app(state);

    // Create listener
    let listener = TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;
    tracing::info!("Server listening on {}:{}", config.host, config.port);

    // Start server
    axum::serve(listener, app).await?;

    Ok(())
}
