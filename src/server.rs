use std::{net::SocketAddr, str::FromStr};

use axum::{Extension, Router, routing::get};
use tower_http::cors::CorsLayer;

use crate::{
    api::{self, AppState},
    error::AppError,
    info,
    management::UnfollowStore,
};

/// All routes with shared state and permissive CORS applied.
pub fn router<S: UnfollowStore>(state: AppState<S>) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/auth/spotify/login", get(api::login::<S>))
        .route("/auth/spotify/callback", get(api::callback::<S>))
        .route("/user/data", get(api::user_data::<S>))
        .route("/user/history", get(api::history::<S>))
        .layer(Extension(state))
        .layer(CorsLayer::permissive())
}

/// Binds the configured address and serves until the process is stopped.
pub async fn start_api_server<S: UnfollowStore>(state: AppState<S>) -> Result<(), AppError> {
    let addr = SocketAddr::from_str(&state.settings.server_addr).map_err(|e| {
        AppError::Config(format!(
            "invalid server address {}: {}",
            state.settings.server_addr, e
        ))
    })?;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Config(format!("cannot bind {}: {}", addr, e)))?;

    info!("Server running on {}", addr);
    axum::serve(listener, router(state))
        .await
        .map_err(|e| AppError::Config(format!("server stopped: {}", e)))
}
