//! Health check endpoint for service monitoring.

use axum::extract::State;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{db::DbPool, error::AppError, response::ApiResponse};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
    pub timestamp: DateTime<Utc>,
}

/// Health check handler.
///
/// Runs `SELECT 1` against the pool; a database failure yields the
/// standard error envelope.
pub async fn health_check(
    State(pool): State<DbPool>,
) -> Result<ApiResponse<HealthResponse>, AppError> {
    sqlx::query("SELECT 1").execute(&pool).await?;

    Ok(ApiResponse::success(
        "Service is healthy",
        HealthResponse {
            status: "healthy".to_string(),
            database: "connected".to_string(),
            timestamp: Utc::now(),
        },
    ))
}
