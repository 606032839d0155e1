//! Web layer - routing and page handlers
//!
//! Server-rendered pages for the signup/login/members flow. Each handler
//! resolves the session cookie to an optional user, consults the services,
//! and either renders a template or redirects.

pub mod pages;
pub mod session;


use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::services::UserService;
use crate::views::ViewEngine;

/// Application state containing shared services
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub views: Arc<ViewEngine>,
}

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::home))
        .route("/signup", get(pages::signup_form).post(pages::signup))
        .route("/login", get(pages::login_form).post(pages::login))
        .route("/members", get(pages::members))
        .route("/logout", get(pages::logout))
        .nest_service("/public", ServeDir::new("public"))
        .fallback(pages::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
