//! Page handlers
//!
//! One handler per route: home, signup, login, members, logout, and the
//! catch-all 404. Validation and lookup failures re-render the originating
//! form with a message; infrastructure failures surface as a 500 page.

use axum::{
    extract::{Form, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
};
use rand::seq::SliceRandom;
use tera::Context;

use crate::models::Session;
use crate::services::user::{LoginInput, SignupInput, UserServiceError};
use crate::web::{session, AppState};

/// Fixed image set shown on the members page
const MEMBER_IMAGES: [&str; 3] = ["/public/img1.svg", "/public/img2.svg", "/public/img3.svg"];

/// An infrastructure failure surfaced as a 500 page.
///
/// Database or template errors end up here; there is no retry, the request
/// simply fails.
pub struct PageError(anyhow::Error);

impl<E> From<E> for PageError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        tracing::error!("Request failed: {:#}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html("<h1>500 - Something went wrong</h1>".to_string()),
        )
            .into_response()
    }
}

/// GET / - landing page, reflecting session authentication state
pub async fn home(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Html<String>, PageError> {
    let user = session::current_user(&state, &headers).await?;

    let mut context = Context::new();
    context.insert("authenticated", &user.is_some());
    context.insert("username", &user.map(|u| u.name).unwrap_or_default());

    Ok(Html(state.views.render("index.html", &context)?))
}

/// GET /signup - render the signup form
pub async fn signup_form(State(state): State<AppState>) -> Result<Html<String>, PageError> {
    render_form(&state, "signup.html", None)
}

/// POST /signup - create an account and establish a session
pub async fn signup(
    State(state): State<AppState>,
    Form(input): Form<SignupInput>,
) -> Result<Response, PageError> {
    match state.user_service.signup(input).await {
        Ok(new_session) => Ok(authenticated_redirect(&state, &new_session)),
        Err(err @ (UserServiceError::Validation(_) | UserServiceError::UserExists)) => {
            Ok(render_form(&state, "signup.html", Some(&err.to_string()))?.into_response())
        }
        Err(err) => Err(err.into()),
    }
}

/// GET /login - render the login form
pub async fn login_form(State(state): State<AppState>) -> Result<Html<String>, PageError> {
    render_form(&state, "login.html", None)
}

/// POST /login - authenticate and establish a session
pub async fn login(
    State(state): State<AppState>,
    Form(input): Form<LoginInput>,
) -> Result<Response, PageError> {
    match state.user_service.login(input).await {
        Ok(new_session) => Ok(authenticated_redirect(&state, &new_session)),
        Err(
            err @ (UserServiceError::Validation(_)
            | UserServiceError::UserNotFound
            | UserServiceError::IncorrectPassword),
        ) => Ok(render_form(&state, "login.html", Some(&err.to_string()))?.into_response()),
        Err(err) => Err(err.into()),
    }
}

/// GET /members - gated page with a random image from the fixed set
pub async fn members(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, PageError> {
    let Some(user) = session::current_user(&state, &headers).await? else {
        return Ok(Redirect::to("/").into_response());
    };

    let image = MEMBER_IMAGES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(MEMBER_IMAGES[0]);

    let mut context = Context::new();
    context.insert("username", &user.name);
    context.insert("image", image);

    Ok(Html(state.views.render("members.html", &context)?).into_response())
}

/// GET /logout - destroy the session and redirect home
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, PageError> {
    if let Some(session_id) = session::extract_session_id(&headers) {
        state.user_service.logout(&session_id).await?;
    }

    Ok((
        [(header::SET_COOKIE, session::clear_session_cookie())],
        Redirect::to("/"),
    )
        .into_response())
}

/// Fallback handler - 404 page, independent of session state
pub async fn not_found(State(state): State<AppState>) -> Result<Response, PageError> {
    let html = state.views.render("404.html", &Context::new())?;
    Ok((StatusCode::NOT_FOUND, Html(html)).into_response())
}

/// Render a form template with an optional inline error message
fn render_form(
    state: &AppState,
    template: &str,
    error: Option<&str>,
) -> Result<Html<String>, PageError> {
    let mut context = Context::new();
    context.insert("error", &error);
    Ok(Html(state.views.render(template, &context)?))
}

/// Redirect to the members page with the session cookie set
fn authenticated_redirect(state: &AppState, new_session: &Session) -> Response {
    let cookie = session::session_cookie(
        &new_session.id,
        state.user_service.session_ttl_seconds(),
    );

    ([(header::SET_COOKIE, cookie)], Redirect::to("/members")).into_response()
}
