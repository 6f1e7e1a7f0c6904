//! # Taskdeck Web Server
//!
//! This library provides the HTTP surface of Taskdeck: a small
//! form-driven task tracker with session-based authentication.
//!
//! ## Modules
//!
//! - `app`: Application state, router builder, and session middleware
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `routes`: Route handlers (tasks, auth, health)

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
