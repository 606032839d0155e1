//! Form validation
//!
//! Per-form field checks that return the first validation error or nothing.
//! Validation never mutates state; on failure the handler re-renders the
//! originating form with the error message.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::services::user::{LoginInput, SignupInput};

/// Maximum length of a user's display name
pub const MAX_NAME_LENGTH: usize = 50;

/// Minimum length of a signup password
pub const MIN_PASSWORD_LENGTH: usize = 6;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex is valid")
});

/// A failed validation with a human-readable message
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Validate a signup form: name required and at most 50 characters, email
/// required and well-formed, password required and at least 6 characters.
///
/// Checks run in field order and the first failure wins.
pub fn validate_signup(input: &SignupInput) -> Result<(), ValidationError> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(ValidationError::new("Name is required"));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::new(format!(
            "Name must be at most {} characters",
            MAX_NAME_LENGTH
        )));
    }

    validate_email(&input.email)?;

    if input.password.is_empty() {
        return Err(ValidationError::new("Password is required"));
    }
    if input.password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::new(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }

    Ok(())
}

/// Validate a login form: email required and well-formed, password required.
pub fn validate_login(input: &LoginInput) -> Result<(), ValidationError> {
    validate_email(&input.email)?;

    if input.password.is_empty() {
        return Err(ValidationError::new("Password is required"));
    }

    Ok(())
}

fn validate_email(email: &str) -> Result<(), ValidationError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::new("Email is required"));
    }
    if !EMAIL_RE.is_match(email) {
        return Err(ValidationError::new("Email must be a valid email address"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup(name: &str, email: &str, password: &str) -> SignupInput {
        SignupInput {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    fn login(email: &str, password: &str) -> LoginInput {
        LoginInput {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_valid_signup() {
        assert!(validate_signup(&signup("Ada", "ada@example.com", "secret")).is_ok());
    }

    #[test]
    fn test_signup_name_required() {
        let err = validate_signup(&signup("", "ada@example.com", "secret")).unwrap_err();
        assert_eq!(err.0, "Name is required");
    }

    #[test]
    fn test_signup_name_too_long() {
        let long_name = "a".repeat(51);
        let err = validate_signup(&signup(&long_name, "ada@example.com", "secret")).unwrap_err();
        assert!(err.0.contains("at most 50"));

        let max_name = "a".repeat(50);
        assert!(validate_signup(&signup(&max_name, "ada@example.com", "secret")).is_ok());
    }

    #[test]
    fn test_signup_invalid_email() {
        for email in ["", "not-an-email", "missing@tld", "a b@example.com"] {
            let result = validate_signup(&signup("Ada", email, "secret"));
            assert!(result.is_err(), "email {:?} should be rejected", email);
        }
    }

    #[test]
    fn test_signup_password_too_short() {
        let err = validate_signup(&signup("Ada", "ada@example.com", "short")).unwrap_err();
        assert!(err.0.contains("at least 6"));
    }

    #[test]
    fn test_signup_first_error_wins() {
        // Both name and password are invalid; the name error is reported
        let err = validate_signup(&signup("", "ada@example.com", "")).unwrap_err();
        assert_eq!(err.0, "Name is required");
    }

    #[test]
    fn test_valid_login() {
        assert!(validate_login(&login("ada@example.com", "x")).is_ok());
    }

    #[test]
    fn test_login_password_required() {
        let err = validate_login(&login("ada@example.com", "")).unwrap_err();
        assert_eq!(err.0, "Password is required");
    }

    #[test]
    fn test_login_email_required() {
        let err = validate_login(&login("", "secret")).unwrap_err();
        assert_eq!(err.0, "Email is required");
    }
}
