//! # Taskdeck Web Server
//!
//! A small form-driven task tracker: register, log in, and manage a private
//! list of tasks with a title, description, and an importance rank of 1-4.
//!
//! ## Usage
//!
//! ```bash
//! DATABASE_URL=postgresql://localhost/taskdeck \
//! SESSION_SECRET=$(openssl rand -hex 32) \
//! cargo run -p taskdeck-web
//! ```

use taskdeck_shared::db::{migrations, pool};
use taskdeck_web::{
    app::{build_router, AppState},
    config::Config,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskdeck_web=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Taskdeck v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;

    // Schema provisioning is idempotent: create the database if it is
    // missing, then apply whatever migrations haven't run yet.
    migrations::ensure_database_exists(&config.database.url).await?;

    let db = pool::create_pool(pool::PoolConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;

    migrations::run_migrations(&db).await?;

    let bind_address = config.bind_address();
    let state = AppState::new(db, config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Listening on http://{}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
