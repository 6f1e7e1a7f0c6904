/// Authentication endpoints
///
/// # Endpoints
///
/// - `GET /register` - Registration form
/// - `POST /register` - Create an account, redirect to login
/// - `GET /login` - Login form
/// - `POST /login` - Verify credentials, set the session cookie
/// - `GET /logout` - Clear the session cookie
///
/// Failures never render an error page: a duplicate username/email bounces
/// back to the register form with a message, and a bad login bounces back to
/// the login form with the same "invalid credentials" message whether the
/// username was unknown or the password wrong.

use crate::{
    app::AppState,
    error::{validation_error, WebError, WebResult},
    routes::{message_banner, PageQuery},
};
use axum::{
    extract::{Query, State},
    response::{Html, Redirect},
    Form,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use taskdeck_shared::{
    auth::{password, session},
    models::user::{CreateUser, User},
};
use serde::Deserialize;
use validator::Validate;

/// Register form fields
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterForm {
    /// Desired username (unique)
    #[validate(length(min = 1, max = 50, message = "Username must be 1-50 characters"))]
    pub username: String,

    /// Email address (unique)
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password (stored only as a salted hash)
    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,
}

/// Login form fields
#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    /// Username
    #[validate(length(min = 1, message = "Username must not be empty"))]
    pub username: String,

    /// Password
    pub password: String,
}

/// Renders the registration form
pub async fn register_page(Query(query): Query<PageQuery>) -> Html<String> {
    Html(format!(
        r#"<!doctype html><html><head><title>Taskdeck - Register</title></head><body>
<h1>Register</h1>{banner}
<form action="/register" method="POST">
  <input name="username" placeholder="Username" required>
  <input name="email" type="email" placeholder="Email" required>
  <input name="password" type="password" placeholder="Password" required>
  <button type="submit">Register</button>
</form>
<p><a href="/login">Already have an account? Log in</a></p>
</body></html>"#,
        banner = message_banner(query.message.as_deref()),
    ))
}

/// Creates a new account
///
/// Uniqueness of username and email is enforced by the database; a rejected
/// insert leaves no row behind and is surfaced as a duplicate-identity
/// redirect. The password is hashed before the store is touched and is never
/// logged.
pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> WebResult<Redirect> {
    form.validate().map_err(|e| validation_error(&e))?;

    let password_hash = password::hash_password(&form.password)?;

    let user = User::create(
        &state.db,
        CreateUser {
            username: form.username,
            email: form.email,
            password_hash,
        },
    )
    .await
    .map_err(|e| {
        if e.violates("username") {
            WebError::DuplicateIdentity("username")
        } else if e.violates("email") {
            WebError::DuplicateIdentity("email")
        } else {
            WebError::from(e)
        }
    })?;

    tracing::info!(user_id = %user.id, username = %user.username, "registered new user");

    Ok(Redirect::to("/login?message=Account+created%2C+please+log+in"))
}

/// Renders the login form
pub async fn login_page(Query(query): Query<PageQuery>) -> Html<String> {
    Html(format!(
        r#"<!doctype html><html><head><title>Taskdeck - Login</title></head><body>
<h1>Login</h1>{banner}
<form action="/login" method="POST">
  <input name="username" placeholder="Username" required>
  <input name="password" type="password" placeholder="Password" required>
  <button type="submit">Log in</button>
</form>
<p><a href="/register">Need an account? Register</a></p>
</body></html>"#,
        banner = message_banner(query.message.as_deref()),
    ))
}

/// Verifies credentials and establishes a session
///
/// On success the session cookie is set and the user lands on the task
/// list. An unknown username and a wrong password are indistinguishable to
/// the client.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> WebResult<(CookieJar, Redirect)> {
    form.validate().map_err(|e| validation_error(&e))?;

    let user = User::find_by_username(&state.db, &form.username)
        .await?
        .ok_or(WebError::InvalidCredentials)?;

    if !password::verify_password(&form.password, &user.password_hash)? {
        return Err(WebError::InvalidCredentials);
    }

    let token = session::issue_session(user.id, state.session_secret())?;

    let cookie = Cookie::build((session::SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);

    tracing::info!(user_id = %user.id, "session established");

    Ok((jar.add(cookie), Redirect::to("/")))
}

/// Clears the session and returns to the login page
pub async fn logout(jar: CookieJar) -> (CookieJar, Redirect) {
    let cookie = Cookie::build((session::SESSION_COOKIE, "")).path("/");

    (jar.remove(cookie), Redirect::to("/login"))
}
