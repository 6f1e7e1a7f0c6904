/// Common test utilities for integration tests
///
/// Shared infrastructure for driving the router end to end:
/// - Test database setup (migrations run on every context creation)
/// - A registered user with a valid session cookie
/// - Form-post helpers
///
/// Tests require `DATABASE_URL` and `SESSION_SECRET` in the environment
/// (a `.env` file works).

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use sqlx::PgPool;
use taskdeck_shared::auth::{password, session};
use taskdeck_shared::models::task::Task;
use taskdeck_shared::models::user::{CreateUser, User};
use taskdeck_web::app::{build_router, AppState};
use taskdeck_web::config::Config;
use tower::Service as _;
use uuid::Uuid;

/// Password used for every test account
pub const TEST_PASSWORD: &str = "correct-horse";

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: PgPool,
    pub app: Router,
    pub config: Config,
    pub user: User,
    pub session_cookie: String,
}

impl TestContext {
    /// Creates a new test context with a migrated database and a signed-in
    /// user
    pub async fn new() -> anyhow::Result<Self> {
        let config = Config::from_env()?;

        let db = PgPool::connect(&config.database.url).await?;

        // Path relative to Cargo.toml, not this file
        sqlx::migrate!("../taskdeck-shared/migrations").run(&db).await?;

        let (user, session_cookie) = signed_in_user(&db, &config).await?;

        let state = AppState::new(db.clone(), config.clone());
        let app = build_router(state);

        Ok(TestContext {
            db,
            app,
            config,
            user,
            session_cookie,
        })
    }

    /// Removes the rows created through this context
    ///
    /// Deleting the user cascades to their tasks.
    pub async fn cleanup(self) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(self.user.id)
            .execute(&self.db)
            .await?;
        Ok(())
    }
}

/// Creates a user directly in the store and issues a session for them
pub async fn signed_in_user(db: &PgPool, config: &Config) -> anyhow::Result<(User, String)> {
    let suffix = Uuid::new_v4().simple().to_string();

    let user = User::create(
        db,
        CreateUser {
            username: format!("user-{}", suffix),
            email: format!("user-{}@example.com", suffix),
            password_hash: password::hash_password(TEST_PASSWORD)?,
        },
    )
    .await?;

    let token = session::issue_session(user.id, &config.session.secret)?;
    let cookie = format!("{}={}", session::SESSION_COOKIE, token);

    Ok((user, cookie))
}

/// Sends a GET request, optionally with a session cookie
pub async fn get(app: &Router, uri: &str, cookie: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }

    let request = builder.body(Body::empty()).unwrap();
    app.clone().call(request).await.unwrap()
}

/// Sends a form-encoded POST request, optionally with a session cookie
pub async fn post_form(app: &Router, uri: &str, cookie: Option<&str>, body: &str) -> Response<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }

    let request = builder.body(Body::from(body.to_string())).unwrap();
    app.clone().call(request).await.unwrap()
}

/// Asserts a redirect response and returns its Location target
pub fn redirect_target(response: &Response<Body>) -> String {
    assert_eq!(
        response.status(),
        StatusCode::SEE_OTHER,
        "expected a redirect"
    );
    response
        .headers()
        .get(header::LOCATION)
        .expect("redirect must carry a Location header")
        .to_str()
        .unwrap()
        .to_string()
}

/// Adds a task through the form endpoint and returns the stored row
pub async fn add_task(
    ctx: &TestContext,
    title: &str,
    description: &str,
    importance: Option<&str>,
) -> anyhow::Result<Task> {
    let mut body = format!("title={}&description={}", title, description);
    if let Some(importance) = importance {
        body.push_str(&format!("&importance={}", importance));
    }

    let response = post_form(&ctx.app, "/add_task", Some(&ctx.session_cookie), &body).await;
    assert_eq!(redirect_target(&response), "/");

    let tasks = Task::list_by_owner(&ctx.db, ctx.user.id).await?;
    Ok(tasks.into_iter().last().expect("task was just created"))
}
