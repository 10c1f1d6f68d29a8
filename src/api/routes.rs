//! API route handlers

use axum::{extract::State, http::Uri, response::IntoResponse, Extension, Json};

use super::server::SharedState;
use super::validate;
use crate::auth::models::{AuthResponse, LoginRequest, RegisterRequest, UserInfo};
use crate::auth::AuthUser;
use crate::error::{Error, Result};
use crate::store::NewUser;

// Health check

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok", "message": "Server is running" }))
}

// Auth routes

/// POST /api/auth/register
pub async fn register(
    State(state): State<SharedState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>> {
    validate::validate_register(&req)?;

    let state = state.read().await;
    let user = state
        .users
        .register(NewUser {
            email: req.email,
            password: req.password,
            first_name: req.first_name,
            last_name: req.last_name,
        })
        .await?;

    let token = state.tokens.issue(&user)?;
    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<SharedState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    validate::validate_login(&req)?;

    let state = state.read().await;
    let user = state.users.authenticate(&req.email, &req.password).await?;

    let token = state.tokens.issue(&user)?;
    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}

/// GET /api/auth/me
///
/// Behind [`crate::auth::require_auth`]; the identity was decoded from the
/// bearer token and is refreshed from the store.
pub async fn current_user(
    State(state): State<SharedState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<UserInfo>> {
    let state = state.read().await;
    let user = state.users.find_by_id(&auth.id).await.ok_or_else(|| {
        Error::Unauthenticated("Not authorized, account no longer exists".to_string())
    })?;

    Ok(Json(UserInfo::from(&user)))
}

/// Fallback for unmatched routes
pub async fn not_found(uri: Uri) -> Error {
    Error::NotFound(format!("Not Found - {}", uri.path()))
}
