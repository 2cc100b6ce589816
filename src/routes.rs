//! HTTP route table.
//!
//! Public routes and bearer-authenticated routes are built as two routers and
//! merged; a path may carry a public `GET` and an authenticated `POST`.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post, put},
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::{handlers, middleware::auth::auth_middleware, state::AppState, storage::PUBLIC_PREFIX};

/// Build the API router over `state`.
///
/// Uploaded files are served from the upload directory under `/images`.
pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/api/v1/users", post(handlers::users::register_user))
        .route("/api/v1/sessions", post(handlers::users::login))
        .route(
            "/api/v1/email_checkers",
            post(handlers::users::check_email_availability),
        )
        .route("/api/v1/campaigns", get(handlers::campaigns::list_campaigns))
        .route(
            "/api/v1/campaigns/{id}",
            get(handlers::campaigns::get_campaign),
        );

    let authenticated_routes = Router::new()
        .route(
            "/api/v1/users/avatars",
            post(handlers::users::upload_avatar),
        )
        .route("/api/v1/users/fetch", get(handlers::users::fetch_user))
        .route(
            "/api/v1/campaigns",
            post(handlers::campaigns::create_campaign),
        )
        .route(
            "/api/v1/campaigns/{id}",
            put(handlers::campaigns::update_campaign),
        )
        .route(
            "/api/v1/campaign-images",
            post(handlers::campaigns::upload_campaign_image),
        )
        .route(
            "/api/v1/campaigns/{id}/transactions",
            get(handlers::transactions::get_campaign_transactions),
        )
        .route(
            "/api/v1/transactions",
            get(handlers::transactions::get_user_transactions)
                .post(handlers::transactions::create_transaction),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(public_routes)
        .merge(authenticated_routes)
        .nest_service(
            &format!("/{PUBLIC_PREFIX}"),
            ServeDir::new(state.uploads.base_dir()),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
