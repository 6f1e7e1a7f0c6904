/// Route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Registration, login, and logout
/// - `tasks`: Task list and the create/update/delete form endpoints
///
/// Pages are rendered as minimal inline HTML; there is no template engine.
/// Redirect targets carry a `message` query parameter which the GET pages
/// display as a banner.

use serde::Deserialize;

pub mod auth;
pub mod health;
pub mod tasks;

/// Query parameters shared by the GET pages
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    /// One-shot message carried over from a redirect
    pub message: Option<String>,
}

/// Escapes text for embedding into HTML
pub(crate) fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Renders the message banner, or nothing when there is no message
pub(crate) fn message_banner(message: Option<&str>) -> String {
    match message {
        Some(msg) => format!("<p class=\"message\">{}</p>", escape_html(msg)),
        None => String::new(),
    }
}
