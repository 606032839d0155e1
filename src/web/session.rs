//! Session cookie handling
//!
//! The browser holds only the session id, in an `HttpOnly` cookie. These
//! helpers read the cookie from request headers, format the `Set-Cookie`
//! values, and resolve the cookie to a user for the route handlers.

use axum::http::{header, HeaderMap};

use crate::models::User;
use crate::services::user::UserServiceError;
use crate::web::AppState;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "session";

/// Extract the session id from the request's Cookie header
pub fn extract_session_id(headers: &HeaderMap) -> Option<String> {
    let cookie_str = headers.get(header::COOKIE)?.to_str().ok()?;

    for cookie in cookie_str.split(';') {
        let cookie = cookie.trim();
        if let Some(id) = cookie
            .strip_prefix(SESSION_COOKIE)
            .and_then(|rest| rest.strip_prefix('='))
        {
            if !id.is_empty() {
                return Some(id.to_string());
            }
        }
    }

    None
}

/// Format the Set-Cookie value establishing a session
pub fn session_cookie(session_id: &str, max_age_seconds: u64) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE, session_id, max_age_seconds
    )
}

/// Format the Set-Cookie value clearing the session cookie
pub fn clear_session_cookie() -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", SESSION_COOKIE)
}

/// Resolve the request's session cookie to a user.
///
/// Returns `None` for requests without a cookie, with an unknown session
/// id, or with an expired session.
pub async fn current_user(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<Option<User>, UserServiceError> {
    match extract_session_id(headers) {
        Some(id) => state.user_service.validate_session(&id).await,
        None => Ok(None),
    }
}
