//! Identity models and wire types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Membership roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Administrator - can manage groups and promote members
    Admin,
    /// Member - regular participant
    Member,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::Admin => write!(f, "admin"),
            UserRole::Member => write!(f, "member"),
        }
    }
}

/// A registered principal
#[derive(Debug, Clone, Serialize)]
pub struct User {
    /// Unique user identifier
    pub id: String,
    /// Login email, stored lowercase
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    /// Accounts are deactivated, never deleted
    pub active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    /// Bcrypt hash, never serialized
    #[serde(skip_serializing)]
    pub password_hash: String,
}

impl User {
    /// Create a new member account
    pub fn new(email: String, first_name: String, last_name: String, password_hash: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            email: email.to_lowercase(),
            first_name,
            last_name,
            role: UserRole::Member,
            active: true,
            created_at: chrono::Utc::now(),
            password_hash,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin && self.active
    }

    /// Whether the account may sign in
    pub fn can_sign_in(&self) -> bool {
        self.active
    }
}

/// Registration payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Login payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login/register response with token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserInfo,
}

/// Identity as exposed on the wire and held by the session store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            role: user.role.to_string(),
        }
    }
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        UserInfo::from(&user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User::new(
            "Alto@Example.com".to_string(),
            "Alice".to_string(),
            "Alto".to_string(),
            "hash".to_string(),
        )
    }

    #[test]
    fn test_new_user_is_active_member() {
        let user = sample_user();
        assert_eq!(user.role, UserRole::Member);
        assert!(user.active);
        assert!(!user.is_admin());
        assert!(user.can_sign_in());
    }

    #[test]
    fn test_email_normalized_to_lowercase() {
        let user = sample_user();
        assert_eq!(user.email, "alto@example.com");
    }

    #[test]
    fn test_inactive_user_cannot_sign_in() {
        let mut user = sample_user();
        user.active = false;
        assert!(!user.can_sign_in());
        user.role = UserRole::Admin;
        assert!(!user.is_admin());
    }

    #[test]
    fn test_user_role_display() {
        assert_eq!(UserRole::Admin.to_string(), "admin");
        assert_eq!(UserRole::Member.to_string(), "member");
    }

    #[test]
    fn test_user_info_conversion() {
        let user = sample_user();
        let info = UserInfo::from(&user);
        assert_eq!(info.id, user.id);
        assert_eq!(info.email, "alto@example.com");
        assert_eq!(info.first_name, "Alice");
        assert_eq!(info.role, "member");
    }

    #[test]
    fn test_wire_field_names_are_camel_case() {
        let json = serde_json::to_value(UserInfo::from(&sample_user())).unwrap();
        assert!(json.get("firstName").is_some());
        assert!(json.get("lastName").is_some());
        assert!(json.get("first_name").is_none());
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let json = serde_json::to_value(sample_user()).unwrap();
        assert!(json.get("password_hash").is_none());
    }
}
