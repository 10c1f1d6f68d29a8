//! HTTP API server

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::{self, TokenService};
use crate::config::Config;
use crate::error::Result;
use crate::store::UserStore;

use super::routes;

/// Application state shared across handlers
pub struct AppState {
    pub config: Config,
    pub users: UserStore,
    pub tokens: TokenService,
}

pub type SharedState = Arc<RwLock<AppState>>;

/// Run the HTTP API server
pub async fn run_server(config: Config, host: &str, port: u16) -> Result<()> {
    let state = build_state(config)?;
    let app = create_router(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Resolve startup state.
///
/// Signing-key resolution happens here, so a production deployment without
/// a secret fails before the listener binds.
pub fn build_state(config: Config) -> Result<SharedState> {
    let tokens = TokenService::from_config(&config.auth, config.server.production)?;

    Ok(Arc::new(RwLock::new(AppState {
        config,
        users: UserStore::new(),
        tokens,
    })))
}

/// Create the router with all routes
fn create_router(state: SharedState) -> Router {
    Router::new()
        // Public routes
        .route("/api/health", get(routes::health))
        .route("/api/auth/register", post(routes::register))
        .route("/api/auth/login", post(routes::login))
        // Protected routes
        .route(
            "/api/auth/me",
            get(routes::current_user).layer(middleware::from_fn_with_state(
                state.clone(),
                auth::require_auth,
            )),
        )
        // Unmatched routes produce a JSON 404, not a bare 500
        .fallback(routes::not_found)
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
