//! User service
//!
//! Business logic for accounts and their sessions:
//! - Signup: validate, reject duplicate emails, hash the password, insert
//! - Login: validate, look up by email, verify the password
//! - Session lifecycle: issue on signup/login, resolve per request,
//!   destroy on logout, expire after the configured TTL

use crate::db::repositories::{SessionRepository, UserRepository};
use crate::models::{Session, User};
use crate::services::password::{hash_password, verify_password};
use crate::services::validation::{validate_login, validate_signup};
use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

/// Default session lifetime: one hour
const DEFAULT_SESSION_TTL_SECONDS: u64 = 3600;

/// Error types for user service operations
#[derive(Debug, thiserror::Error)]
pub enum UserServiceError {
    /// Validation error (invalid input)
    #[error("{0}")]
    Validation(String),

    /// An account with the submitted email already exists
    #[error("User with that email already exists!")]
    UserExists,

    /// No account matches the submitted email
    #[error("User not found")]
    UserNotFound,

    /// The password does not match the stored hash
    #[error("Incorrect password")]
    IncorrectPassword,

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<crate::services::validation::ValidationError> for UserServiceError {
    fn from(err: crate::services::validation::ValidationError) -> Self {
        Self::Validation(err.0)
    }
}

/// Signup form fields
#[derive(Debug, Clone, Deserialize)]
pub struct SignupInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Login form fields
#[derive(Debug, Clone, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// User service for accounts and authentication
pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
    session_repo: Arc<dyn SessionRepository>,
    session_ttl_seconds: u64,
}

impl UserService {
    /// Create a new user service with the given repositories
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        session_repo: Arc<dyn SessionRepository>,
    ) -> Self {
        Self {
            user_repo,
            session_repo,
            session_ttl_seconds: DEFAULT_SESSION_TTL_SECONDS,
        }
    }

    /// Create a new user service with a custom session lifetime
    pub fn with_session_ttl(
        user_repo: Arc<dyn UserRepository>,
        session_repo: Arc<dyn SessionRepository>,
        session_ttl_seconds: u64,
    ) -> Self {
        Self {
            user_repo,
            session_repo,
            session_ttl_seconds,
        }
    }

    /// Session lifetime in seconds, as configured
    pub fn session_ttl_seconds(&self) -> u64 {
        self.session_ttl_seconds
    }

    /// Create a new account and an authenticated session for it.
    ///
    /// # Errors
    ///
    /// - `Validation` if a form field fails its schema check
    /// - `UserExists` if the email is already registered
    /// - `Internal` for database or hashing errors
    pub async fn signup(&self, input: SignupInput) -> Result<Session, UserServiceError> {
        validate_signup(&input)?;

        if self
            .user_repo
            .get_by_email(&input.email)
            .await
            .context("Failed to check email")?
            .is_some()
        {
            return Err(UserServiceError::UserExists);
        }

        let password_hash = hash_password(&input.password).context("Failed to hash password")?;
        let user = User::new(input.name, input.email, password_hash);

        let created = self
            .user_repo
            .create(&user)
            .await
            .context("Failed to create user")?;

        tracing::info!(user_id = created.id, "New account created");

        let session = self.create_session(created.id).await?;
        Ok(session)
    }

    /// Authenticate with email and password, creating a session on success.
    ///
    /// # Errors
    ///
    /// - `Validation` if a form field fails its schema check
    /// - `UserNotFound` if no account matches the email
    /// - `IncorrectPassword` if the password does not verify
    /// - `Internal` for database errors
    pub async fn login(&self, input: LoginInput) -> Result<Session, UserServiceError> {
        validate_login(&input)?;

        let user = self
            .user_repo
            .get_by_email(&input.email)
            .await
            .context("Failed to get user by email")?
            .ok_or(UserServiceError::UserNotFound)?;

        let password_valid = verify_password(&input.password, &user.password_hash)
            .context("Failed to verify password")?;

        if !password_valid {
            tracing::debug!(user_id = user.id, "Login rejected: password mismatch");
            return Err(UserServiceError::IncorrectPassword);
        }

        let session = self.create_session(user.id).await?;
        Ok(session)
    }

    /// Logout (invalidate the session)
    pub async fn logout(&self, session_id: &str) -> Result<(), UserServiceError> {
        self.session_repo
            .delete(session_id)
            .await
            .context("Failed to delete session")?;

        Ok(())
    }

    /// Resolve a session id to its user.
    ///
    /// Returns `None` if the session doesn't exist or has expired. An
    /// expired session found here is deleted on the spot.
    pub async fn validate_session(&self, session_id: &str) -> Result<Option<User>, UserServiceError> {
        let session = match self
            .session_repo
            .get_by_id(session_id)
            .await
            .context("Failed to get session")?
        {
            Some(s) => s,
            None => return Ok(None),
        };

        if session.is_expired() {
            let _ = self.session_repo.delete(session_id).await;
            return Ok(None);
        }

        let user = self
            .user_repo
            .get_by_id(session.user_id)
            .await
            .context("Failed to get user")?;

        Ok(user)
    }

    /// Delete all expired sessions.
    ///
    /// Maintenance operation run periodically by a background task.
    ///
    /// # Returns
    ///
    /// The number of sessions deleted
    pub async fn cleanup_expired_sessions(&self) -> Result<i64, UserServiceError> {
        let count = self
            .session_repo
            .delete_expired()
            .await
            .context("Failed to delete expired sessions")?;

        Ok(count)
    }

    /// Create a session for a user with the configured absolute expiry
    async fn create_session(&self, user_id: i64) -> Result<Session, UserServiceError> {
        let now = Utc::now();
        let session = Session {
            id: Uuid::new_v4().to_string(),
            user_id,
            expires_at: now + Duration::seconds(self.session_ttl_seconds as i64),
            created_at: now,
        };

        let created = self
            .session_repo
            .create(&session)
            .await
            .context("Failed to create session")?;

        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::{SqlxSessionRepository, SqlxUserRepository};
    use crate::db::{create_test_pool, migrations};

    async fn setup_service() -> UserService {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        UserService::new(
            SqlxUserRepository::boxed(pool.clone()),
            SqlxSessionRepository::boxed(pool),
        )
    }

    fn signup_input(email: &str) -> SignupInput {
        SignupInput {
            name: "Ada".to_string(),
            email: email.to_string(),
            password: "secret".to_string(),
        }
    }

    #[tokio::test]
    async fn test_signup_creates_authenticated_session() {
        let service = setup_service().await;

        let session = service
            .signup(signup_input("ada@example.com"))
            .await
            .expect("Signup should succeed");

        assert!(!session.is_expired());

        let user = service
            .validate_session(&session.id)
            .await
            .expect("Validation should not error")
            .expect("Session should resolve to a user");
        assert_eq!(user.email, "ada@example.com");
        assert_eq!(user.name, "Ada");
    }

    #[tokio::test]
    async fn test_signup_rejects_duplicate_email() {
        let service = setup_service().await;

        service
            .signup(signup_input("dup@example.com"))
            .await
            .expect("First signup should succeed");

        let err = service
            .signup(signup_input("dup@example.com"))
            .await
            .expect_err("Second signup should fail");
        assert!(matches!(err, UserServiceError::UserExists));
    }

    #[tokio::test]
    async fn test_signup_rejects_invalid_input() {
        let service = setup_service().await;

        let err = service
            .signup(SignupInput {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                password: "short".to_string(),
            })
            .await
            .expect_err("Signup should fail validation");
        assert!(matches!(err, UserServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn test_login_with_correct_credentials() {
        let service = setup_service().await;
        service
            .signup(signup_input("login@example.com"))
            .await
            .expect("Signup should succeed");

        let session = service
            .login(LoginInput {
                email: "login@example.com".to_string(),
                password: "secret".to_string(),
            })
            .await
            .expect("Login should succeed");

        let user = service
            .validate_session(&session.id)
            .await
            .expect("Validation should not error")
            .expect("Session should resolve to a user");
        assert_eq!(user.email, "login@example.com");
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let service = setup_service().await;
        service
            .signup(signup_input("wrong@example.com"))
            .await
            .expect("Signup should succeed");

        let err = service
            .login(LoginInput {
                email: "wrong@example.com".to_string(),
                password: "not-the-password".to_string(),
            })
            .await
            .expect_err("Login should fail");
        assert!(matches!(err, UserServiceError::IncorrectPassword));
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let service = setup_service().await;

        let err = service
            .login(LoginInput {
                email: "nobody@example.com".to_string(),
                password: "secret".to_string(),
            })
            .await
            .expect_err("Login should fail");
        assert!(matches!(err, UserServiceError::UserNotFound));
    }

    #[tokio::test]
    async fn test_logout_invalidates_session() {
        let service = setup_service().await;

        let session = service
            .signup(signup_input("logout@example.com"))
            .await
            .expect("Signup should succeed");

        service.logout(&session.id).await.expect("Logout should succeed");

        let user = service
            .validate_session(&session.id)
            .await
            .expect("Validation should not error");
        assert!(user.is_none());
    }

    #[tokio::test]
    async fn test_expired_session_is_rejected_and_removed() {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        // Zero TTL makes every session already expired
        let service = UserService::with_session_ttl(
            SqlxUserRepository::boxed(pool.clone()),
            SqlxSessionRepository::boxed(pool.clone()),
            0,
        );

        let session = service
            .signup(signup_input("expired@example.com"))
            .await
            .expect("Signup should succeed");

        let user = service
            .validate_session(&session.id)
            .await
            .expect("Validation should not error");
        assert!(user.is_none());

        // The expired session was cleaned up on read
        let repo = SqlxSessionRepository::new(pool);
        assert!(repo.get_by_id(&session.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_cleanup_expired_sessions() {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let expired_service = UserService::with_session_ttl(
            SqlxUserRepository::boxed(pool.clone()),
            SqlxSessionRepository::boxed(pool.clone()),
            0,
        );
        expired_service
            .signup(signup_input("sweep@example.com"))
            .await
            .expect("Signup should succeed");

        let service = UserService::new(
            SqlxUserRepository::boxed(pool.clone()),
            SqlxSessionRepository::boxed(pool),
        );
        let deleted = service
            .cleanup_expired_sessions()
            .await
            .expect("Cleanup should succeed");
        assert_eq!(deleted, 1);
    }
}
