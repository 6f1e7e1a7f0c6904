/// Database layer for Taskdeck
///
/// This module provides connection pooling, schema provisioning, and the
/// store-level error type returned by all model operations.
///
/// # Modules
///
/// - `pool`: PostgreSQL connection pool management with a health check
/// - `migrations`: Idempotent schema provisioning via sqlx migrations
/// - `error`: `StoreError`, the explicit outcome type for store commits

pub mod error;
pub mod migrations;
pub mod pool;

pub use error::StoreError;
