/// Database models for Taskdeck
///
/// This module contains all database models and their CRUD operations.
///
/// # Models
///
/// - `user`: Registered accounts (username, email, password hash)
/// - `task`: User-owned tasks with title, description, and importance
///
/// Every operation returns `Result<_, StoreError>` so handlers can
/// distinguish a missing row from a rejected write from an unreachable
/// store.

pub mod task;
pub mod user;
