//! Crowdfunding Web Server - Main Application Entry Point
//!
//! REST API backend of a crowdfunding platform: users register and log in,
//! publish campaigns with images, and back each other's campaigns.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Database**: PostgreSQL with sqlx (async queries)
//! - **Authentication**: HMAC-SHA256 signed bearer tokens, bcrypt passwords
//! - **Format**: JSON envelope `{meta, data}`; multipart for uploads
//!
//! # Layers
//!
//! handlers → services → repositories, with formatters shaping responses
//! and the auth middleware resolving the current user.
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Create database connection pool
//! 3. Run database migrations
//! 4. Wire repositories and services into the application state
//! 5. Build HTTP router and start server on configured port

mod config;
mod db;
mod error;
mod formatters;
mod handlers;
mod middleware;
mod models;
mod repositories;
mod response;
mod routes;
mod services;
mod state;
mod storage;
mod validation;

use axum::{Router, routing::get};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Reads RUST_LOG (defaults to "info")
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = config::Config::from_env()?;
    tracing::info!(upload_dir = %config.upload_dir, "Configuration loaded");

    let pool = db::create_pool(&config.database_url, config.db_max_connections).await?;
    tracing::info!("Database pool created");

    db::run_migrations(&pool).await?;
    tracing::info!("Database migrations complete");

    let state = state::AppState::new(pool.clone(), &config);

    let health = Router::new()
        .route("/health", get(handlers::health::health_check))
        .with_state(pool);

    let app = routes::router(state).merge(health);

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
