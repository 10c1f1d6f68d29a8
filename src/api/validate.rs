//! Request payload validation
//!
//! Malformed payloads are rejected here, before any store or token work.

use crate::auth::models::{LoginRequest, RegisterRequest};
use crate::error::{Error, Result};
use regex::Regex;
use std::sync::OnceLock;

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid regex pattern")
    })
}

/// Validate a registration payload
pub fn validate_register(req: &RegisterRequest) -> Result<()> {
    if !email_regex().is_match(req.email.trim()) {
        return Err(Error::Validation(
            "Please provide a valid email address".to_string(),
        ));
    }

    if req.password.len() < 6 {
        return Err(Error::Validation(
            "Password must be at least 6 characters long".to_string(),
        ));
    }

    if req.first_name.trim().is_empty() {
        return Err(Error::Validation("First name is required".to_string()));
    }

    if req.last_name.trim().is_empty() {
        return Err(Error::Validation("Last name is required".to_string()));
    }

    Ok(())
}

/// Validate a login payload
pub fn validate_login(req: &LoginRequest) -> Result<()> {
    if !email_regex().is_match(req.email.trim()) {
        return Err(Error::Validation(
            "Please provide a valid email address".to_string(),
        ));
    }

    if req.password.is_empty() {
        return Err(Error::Validation("Password is required".to_string()));
    }

    Ok(())
}
