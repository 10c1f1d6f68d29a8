//! HTTP transport for the session store
//!
//! The credential is an explicit parameter on every authenticated call;
//! nothing is held in process-global default headers.

use crate::auth::models::{AuthResponse, LoginRequest, RegisterRequest, UserInfo};
use crate::error::{Error, Result};
use serde::Deserialize;

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

/// Failure envelope produced by the server
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    error: Option<String>,
}

/// A call that never resolves would otherwise leave the session store stuck
/// in whatever transient state triggered it.
const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(15);

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub async fn register(&self, req: &RegisterRequest) -> Result<AuthResponse> {
        let resp = self
            .http
            .post(self.url("/api/auth/register"))
            .json(req)
            .send()
            .await?;
        Self::parse(resp).await
    }

    pub async fn login(&self, req: &LoginRequest) -> Result<AuthResponse> {
        let resp = self
            .http
            .post(self.url("/api/auth/login"))
            .json(req)
            .send()
            .await?;
        Self::parse(resp).await
    }

    pub async fn me(&self, token: &str) -> Result<UserInfo> {
        let resp = self
            .http
            .get(self.url("/api/auth/me"))
            .bearer_auth(token)
            .send()
            .await?;
        Self::parse(resp).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Map non-success responses back into the error taxonomy, carrying the
    /// server's user-displayable message.
    async fn parse<T: serde::de::DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp.json::<T>().await?);
        }

        let message = resp
            .json::<ErrorEnvelope>()
            .await
            .ok()
            .and_then(|e| e.error)
            .unwrap_or_else(|| format!("Request failed with status {}", status));

        Err(match status.as_u16() {
            400 => Error::Validation(message),
            401 => Error::Unauthenticated(message),
            403 => Error::Forbidden(message),
            404 => Error::NotFound(message),
            409 => Error::Conflict(message),
            _ => Error::Other(message),
        })
    }
}
