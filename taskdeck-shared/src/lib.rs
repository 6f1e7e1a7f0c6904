//! # Taskdeck Shared Library
//!
//! Data layer and authentication primitives shared by the Taskdeck web
//! server (and any future tooling around the same database).
//!
//! ## Module Organization
//!
//! - `models`: Database models and their CRUD operations
//! - `auth`: Password hashing and session tokens
//! - `db`: Connection pool, migrations, and the store error type

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the Taskdeck shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
