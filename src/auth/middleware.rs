//! Request authentication gate and the ownership check

use crate::api::SharedState;
use crate::auth::Claims;
use crate::error::{Error, Result};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

/// Verified identity for the current request, inserted into request
/// extensions by [`require_auth`].
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email,
        }
    }
}

/// Extract the bearer token from the Authorization header
pub fn bearer_token(req: &Request) -> Result<&str> {
    let header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .ok_or_else(|| {
            Error::Unauthenticated("Not authorized, no token provided".to_string())
        })?;

    let value = header.to_str().map_err(|_| {
        Error::Unauthenticated("Not authorized, invalid authorization header".to_string())
    })?;

    value.strip_prefix("Bearer ").ok_or_else(|| {
        Error::Unauthenticated("Not authorized, no token provided or invalid format".to_string())
    })
}

/// Middleware for routes that require a verified identity.
///
/// Fails closed with 401 before the handler runs; on success the decoded
/// identity is available as an `Extension<AuthUser>` for the remainder of
/// the request.
pub async fn require_auth(
    State(state): State<SharedState>,
    mut req: Request,
    next: Next,
) -> std::result::Result<Response, Error> {
    let token = bearer_token(&req)?.to_string();

    let claims = {
        let state = state.read().await;
        state.tokens.verify(&token)?
    };

    req.extensions_mut().insert(AuthUser::from(claims));
    Ok(next.run(req).await)
}

/// A resource with a designated owner field
pub trait Owned {
    fn owner_id(&self) -> &str;
}

/// Ownership gate for routes acting on a loaded resource.
///
/// A missing resource is 404 before any comparison; a foreign owner is 403.
pub fn require_owner<T: Owned>(resource: Option<&T>, user: &AuthUser) -> Result<()> {
    let resource =
        resource.ok_or_else(|| Error::NotFound("Resource not found".to_string()))?;

    if resource.owner_id() != user.id {
        return Err(Error::Forbidden(
            "Not authorized, you are not the owner of this resource".to_string(),
        ));
    }

    Ok(())
}
