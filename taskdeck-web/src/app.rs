/// Application state and router builder
///
/// This module defines the shared application state, the Axum router, and
/// the session middleware protecting the task routes.
///
/// # Routes
///
/// ```text
/// /
/// ├── GET  /health             # Health check (public)
/// ├── GET|POST /register       # Create an account (public)
/// ├── GET|POST /login          # Establish a session (public)
/// ├── GET  /logout             # Clear the session (public)
/// ├── GET  /                   # Task list (session required)
/// ├── POST /add_task           # Create a task (session required)
/// ├── POST /update_task/:id    # Edit a task (session required)
/// └── POST /delete_task/:id    # Remove a task (session required)
/// ```
///
/// Protected routes go through `session_auth_layer`, which validates the
/// session cookie and injects `CurrentUser` into request extensions; an
/// unauthenticated request is redirected to the login page instead of
/// receiving an HTTP error.

use crate::config::Config;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use axum_extra::extract::cookie::CookieJar;
use sqlx::PgPool;
use std::sync::Arc;
use taskdeck_shared::auth::session::{self, CurrentUser};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Shared application state
///
/// Cloned into each request handler via Axum's `State` extractor. Uses Arc
/// internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Gets the secret used to sign session tokens
    pub fn session_secret(&self) -> &str {
        &self.config.session.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Public routes: no session required
    let public_routes = Router::new()
        .route("/health", get(routes::health::health_check))
        .route(
            "/register",
            get(routes::auth::register_page).post(routes::auth::register),
        )
        .route(
            "/login",
            get(routes::auth::login_page).post(routes::auth::login),
        )
        .route("/logout", get(routes::auth::logout));

    // Task routes: session required
    let task_routes = Router::new()
        .route("/", get(routes::tasks::index))
        .route("/add_task", post(routes::tasks::add_task))
        .route("/update_task/:id", post(routes::tasks::update_task))
        .route("/delete_task/:id", post(routes::tasks::delete_task))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            session_auth_layer,
        ));

    Router::new()
        .merge(public_routes)
        .merge(task_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

/// Session authentication middleware
///
/// Reads the session cookie, validates the token, and injects `CurrentUser`
/// into request extensions. A missing or invalid session redirects to the
/// login page.
async fn session_auth_layer(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    let Some(cookie) = jar.get(session::SESSION_COOKIE) else {
        return Redirect::to("/login").into_response();
    };

    match session::validate_session(cookie.value(), state.session_secret()) {
        Ok(claims) => {
            req.extensions_mut().insert(CurrentUser(claims.sub));
            next.run(req).await
        }
        Err(e) => {
            tracing::debug!("rejected session cookie: {}", e);
            Redirect::to("/login").into_response()
        }
    }
}
