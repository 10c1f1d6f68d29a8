//! Client-resident auth state machine

use crate::auth::models::{LoginRequest, RegisterRequest, UserInfo};
use crate::config::ClientConfig;
use crate::error::Error;
use crate::session::cache::TokenCache;
use crate::session::client::ApiClient;

/// Current authentication state.
///
/// `Authenticated` carries both identity and credential by construction;
/// `Anonymous` carries neither. `TransientError` is a failed login/register
/// attempt, otherwise anonymous.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// Initial state while the persisted credential is being checked
    CheckingAuth,
    Authenticated { user: UserInfo, token: String },
    Anonymous,
    TransientError { message: String },
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated { .. })
    }

    pub fn user(&self) -> Option<&UserInfo> {
        match self {
            SessionState::Authenticated { user, .. } => Some(user),
            _ => None,
        }
    }

    pub fn token(&self) -> Option<&str> {
        match self {
            SessionState::Authenticated { token, .. } => Some(token),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            SessionState::TransientError { message } => Some(message),
            _ => None,
        }
    }
}

/// Single-writer session store.
///
/// Operations take `&mut self`, so overlapping auth operations cannot be
/// issued against one store; transitions apply in call order. Failures
/// become state, never panics or escaped errors.
pub struct SessionStore {
    api: ApiClient,
    cache: TokenCache,
    state: SessionState,
}

impl SessionStore {
    pub fn new(api: ApiClient, cache: TokenCache) -> Self {
        Self {
            api,
            cache,
            state: SessionState::CheckingAuth,
        }
    }

    pub fn from_config(client: &ClientConfig) -> Self {
        Self::new(
            ApiClient::new(client.api_url.clone()),
            TokenCache::new(client.token_file.clone()),
        )
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Exchange credentials for a bearer token.
    ///
    /// On failure the previously persisted credential is left untouched.
    pub async fn login(&mut self, email: &str, password: &str) -> &SessionState {
        let req = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        match self.api.login(&req).await {
            Ok(resp) => self.enter_authenticated(resp.user, resp.token),
            Err(e) => {
                self.state = SessionState::TransientError {
                    message: failure_message(e, "Failed to login"),
                }
            }
        }

        &self.state
    }

    /// Create an account and sign in with the issued token.
    ///
    /// Uniqueness is the server's concern; its error message is surfaced
    /// as-is.
    pub async fn register(&mut self, profile: RegisterRequest) -> &SessionState {
        match self.api.register(&profile).await {
            Ok(resp) => self.enter_authenticated(resp.user, resp.token),
            Err(e) => {
                self.state = SessionState::TransientError {
                    message: failure_message(e, "Failed to register"),
                }
            }
        }

        &self.state
    }

    /// Discard the credential and return to anonymous. Cannot fail.
    pub fn logout(&mut self) -> &SessionState {
        if let Err(e) = self.cache.clear() {
            tracing::warn!(error = %e, "failed to remove persisted credential");
        }
        self.state = SessionState::Anonymous;
        &self.state
    }

    /// Verify the persisted credential, once, at process start.
    ///
    /// Without a persisted credential this resolves to anonymous with no
    /// network call. A rejected credential is discarded, so a second call
    /// resolves the same way without further mutation.
    pub async fn check_status(&mut self) -> &SessionState {
        self.state = SessionState::CheckingAuth;

        let Some(token) = self.cache.load() else {
            self.state = SessionState::Anonymous;
            return &self.state;
        };

        match self.api.me(&token).await {
            Ok(user) => self.state = SessionState::Authenticated { user, token },
            Err(e) => {
                tracing::debug!(error = %e, "persisted credential rejected");
                if let Err(e) = self.cache.clear() {
                    tracing::warn!(error = %e, "failed to remove persisted credential");
                }
                self.state = SessionState::Anonymous;
            }
        }

        &self.state
    }

    /// Acknowledge a transient login/register failure
    pub fn reset_error(&mut self) -> &SessionState {
        if matches!(self.state, SessionState::TransientError { .. }) {
            self.state = SessionState::Anonymous;
        }
        &self.state
    }

    fn enter_authenticated(&mut self, user: UserInfo, token: String) {
        if let Err(e) = self.cache.save(&token) {
            tracing::warn!(error = %e, "failed to persist credential");
        }
        self.state = SessionState::Authenticated { user, token };
    }
}

/// The server's message when it sent one, a generic fallback for transport
/// failures.
fn failure_message(e: Error, fallback: &str) -> String {
    match e {
        Error::Validation(m)
        | Error::Unauthenticated(m)
        | Error::Forbidden(m)
        | Error::NotFound(m)
        | Error::Conflict(m) => m,
        _ => fallback.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anonymous_store() -> SessionStore {
        let dir = tempfile::tempdir().unwrap();
        // Nothing listens on port 9; any attempted call errors out
        let mut store = SessionStore::new(
            ApiClient::new("http://127.0.0.1:9"),
            TokenCache::new(dir.path().join("token")),
        );
        store.state = SessionState::Anonymous;
        store
    }

    #[test]
    fn test_initial_state_is_checking_auth() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(
            ApiClient::new("http://127.0.0.1:9"),
            TokenCache::new(dir.path().join("token")),
        );
        assert_eq!(*store.state(), SessionState::CheckingAuth);
    }

    #[test]
    fn test_logout_is_unconditional() {
        let mut store = anonymous_store();
        store.state = SessionState::TransientError {
            message: "boom".to_string(),
        };
        assert_eq!(*store.logout(), SessionState::Anonymous);

        // And from anonymous it stays anonymous
        assert_eq!(*store.logout(), SessionState::Anonymous);
    }

    #[test]
    fn test_reset_error_only_clears_transient_errors() {
        let mut store = anonymous_store();
        store.state = SessionState::TransientError {
            message: "boom".to_string(),
        };
        assert_eq!(*store.reset_error(), SessionState::Anonymous);

        store.state = SessionState::CheckingAuth;
        assert_eq!(*store.reset_error(), SessionState::CheckingAuth);
    }

    #[tokio::test]
    async fn test_check_status_without_credential_skips_network() {
        // The API client points at a dead port; reaching the network would
        // surface as a slow failure, but no credential means no call at all.
        let mut store = anonymous_store();
        assert_eq!(*store.check_status().await, SessionState::Anonymous);
    }

    #[tokio::test]
    async fn test_login_network_failure_is_transient_error() {
        let mut store = anonymous_store();
        let state = store.login("alto@example.com", "secret1").await;
        assert!(state.error_message().is_some());
        assert!(!state.is_authenticated());
    }

    #[test]
    fn test_state_accessors() {
        let user = UserInfo {
            id: "u1".to_string(),
            email: "alto@example.com".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Alto".to_string(),
            role: "member".to_string(),
        };
        let state = SessionState::Authenticated {
            user: user.clone(),
            token: "tok".to_string(),
        };
        assert!(state.is_authenticated());
        assert_eq!(state.user(), Some(&user));
        assert_eq!(state.token(), Some("tok"));
        assert!(state.error_message().is_none());

        assert!(SessionState::Anonymous.user().is_none());
        assert!(SessionState::Anonymous.token().is_none());
    }
}
