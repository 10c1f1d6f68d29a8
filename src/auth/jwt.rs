//! JWT token issuance and verification

use crate::auth::models::User;
use crate::config::AuthConfig;
use crate::error::{Error, Result};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Development fallback key, refused when server.production is set.
const DEV_SECRET: &[u8] = b"callboard-dev-secret-change-in-production";

/// JWT claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Account email
    pub email: String,
    /// Issued at
    pub iat: i64,
    /// Expiration time
    pub exp: i64,
}

impl Claims {
    /// Create claims for a user with the given lifetime
    pub fn for_user(user: &User, ttl_minutes: i64) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            sub: user.id.clone(),
            email: user.email.clone(),
            iat: now,
            exp: now + ttl_minutes * 60,
        }
    }

    /// Check if token is expired
    pub fn is_expired(&self) -> bool {
        chrono::Utc::now().timestamp() > self.exp
    }
}

/// Issues and verifies bearer credentials.
///
/// The signing key is resolved once at startup and read-only afterwards.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_minutes: i64,
}

impl TokenService {
    /// Resolve the signing key from configuration.
    ///
    /// A missing or empty secret is fatal in production and falls back to
    /// the built-in development key otherwise.
    pub fn from_config(auth: &AuthConfig, production: bool) -> Result<Self> {
        let secret: Vec<u8> = match auth.secret.as_deref() {
            Some(s) if !s.is_empty() => s.as_bytes().to_vec(),
            _ if production => {
                return Err(Error::Config(
                    "auth.secret is required when server.production is enabled".to_string(),
                ))
            }
            _ => {
                tracing::warn!(
                    "no auth.secret configured, using the built-in development signing key"
                );
                DEV_SECRET.to_vec()
            }
        };

        Ok(Self {
            encoding: EncodingKey::from_secret(&secret),
            decoding: DecodingKey::from_secret(&secret),
            ttl_minutes: auth.token_ttl_minutes,
        })
    }

    /// Sign a credential embedding the user's id and email
    pub fn issue(&self, user: &User) -> Result<String> {
        let claims = Claims::for_user(user, self.ttl_minutes);
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| Error::Config(format!("Failed to create token: {}", e)))
    }

    /// Validate signature and expiry, returning the decoded claims
    pub fn verify(&self, token: &str) -> Result<Claims> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| Error::Unauthenticated("Not authorized, token invalid".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_service(ttl_minutes: i64) -> TokenService {
        let auth = AuthConfig {
            secret: Some("unit-test-secret".to_string()),
            token_ttl_minutes: ttl_minutes,
        };
        TokenService::from_config(&auth, false).expect("Failed to build token service")
    }

    fn test_user() -> User {
        User::new(
            "tenor@example.com".to_string(),
            "Theo".to_string(),
            "Tenor".to_string(),
            "hash".to_string(),
        )
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let service = test_service(60);
        let user = test_user();
        let token = service.issue(&user).expect("Failed to create token");
        let claims = service.verify(&token).expect("Failed to validate token");

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.email, "tenor@example.com");
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_expired_token_rejected() {
        // Well past the default 60s validation leeway
        let service = test_service(-120);
        let token = service.issue(&test_user()).expect("Failed to create token");
        let result = service.verify(&token);
        assert!(matches!(result, Err(Error::Unauthenticated(_))));
    }

    #[test]
    fn test_invalid_token_rejected() {
        let service = test_service(60);
        assert!(service.verify("invalid.token.here").is_err());
        assert!(service.verify("not-a-jwt-token").is_err());
    }

    #[test]
    fn test_foreign_key_rejected() {
        let service = test_service(60);
        let other = TokenService::from_config(
            &AuthConfig {
                secret: Some("a-different-secret".to_string()),
                token_ttl_minutes: 60,
            },
            false,
        )
        .unwrap();

        let token = other.issue(&test_user()).expect("Failed to create token");
        assert!(matches!(
            service.verify(&token),
            Err(Error::Unauthenticated(_))
        ));
    }

    #[test]
    fn test_production_requires_secret() {
        let auth = AuthConfig {
            secret: None,
            token_ttl_minutes: 60,
        };
        assert!(matches!(
            TokenService::from_config(&auth, true),
            Err(Error::Config(_))
        ));

        // Empty interpolated secret counts as absent
        let auth = AuthConfig {
            secret: Some(String::new()),
            token_ttl_minutes: 60,
        };
        assert!(TokenService::from_config(&auth, true).is_err());
        assert!(TokenService::from_config(&auth, false).is_ok());
    }
}
