//! Token issuance, request authentication and identity models

pub mod jwt;
pub mod middleware;
pub mod models;

pub use jwt::{Claims, TokenService};
pub use middleware::{bearer_token, require_auth, require_owner, AuthUser, Owned};
pub use models::{AuthResponse, LoginRequest, RegisterRequest, User, UserInfo, UserRole};
