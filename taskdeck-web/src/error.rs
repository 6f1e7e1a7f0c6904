/// Error handling for the web server
///
/// This module provides a unified error type that maps to HTTP responses.
/// Handlers return `Result<T, WebError>`, and the conversion decides whether
/// the user sees a status code or a redirect.
///
/// The response shapes are deliberate:
/// - an unknown task id is a hard 404,
/// - an ownership mismatch is a soft redirect back to the list with a
///   warning (an existing-but-foreign task must not look different from a
///   permission problem),
/// - a registration conflict or bad login bounces back to the form with a
///   message,
/// - every store failure collapses into one generic message, with the real
///   cause logged server-side only.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use std::fmt;
use taskdeck_shared::{auth::password::PasswordError, auth::session::SessionError, db::StoreError};

/// Handler result type alias
pub type WebResult<T> = Result<T, WebError>;

/// Unified error type for route handlers
#[derive(Debug)]
pub enum WebError {
    /// Task id does not exist (404)
    NotFound,

    /// No valid session on a protected route (redirect to login)
    Unauthenticated,

    /// The task exists but belongs to another user (redirect with warning)
    NotOwner,

    /// Form validation failed (422)
    Validation(Vec<FieldError>),

    /// Username or email already registered (redirect to register form)
    DuplicateIdentity(&'static str),

    /// Unknown username or wrong password (redirect to login form)
    InvalidCredentials,

    /// Any store failure; collapsed to one generic message (500)
    Store(StoreError),

    /// Internal failure in the auth machinery (500)
    Internal(String),
}

/// One failed form field
#[derive(Debug, Clone)]
pub struct FieldError {
    /// Field that failed validation
    pub field: String,

    /// Error message
    pub message: String,
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WebError::NotFound => write!(f, "Not found"),
            WebError::Unauthenticated => write!(f, "Not logged in"),
            WebError::NotOwner => write!(f, "Task belongs to another user"),
            WebError::Validation(errors) => {
                write!(f, "Validation failed: {} errors", errors.len())
            }
            WebError::DuplicateIdentity(field) => write!(f, "Duplicate {}", field),
            WebError::InvalidCredentials => write!(f, "Invalid credentials"),
            WebError::Store(e) => write!(f, "Store failure: {}", e),
            WebError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for WebError {}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        match self {
            WebError::NotFound => {
                (StatusCode::NOT_FOUND, "Task not found").into_response()
            }
            WebError::Unauthenticated => Redirect::to("/login").into_response(),
            WebError::NotOwner => {
                Redirect::to("/?message=You+can+only+modify+your+own+tasks").into_response()
            }
            WebError::Validation(errors) => {
                let body = errors
                    .iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect::<Vec<_>>()
                    .join("\n");
                (StatusCode::UNPROCESSABLE_ENTITY, body).into_response()
            }
            WebError::DuplicateIdentity(field) => {
                let target = match field {
                    "email" => "/register?message=That+email+is+already+registered",
                    _ => "/register?message=That+username+is+already+taken",
                };
                Redirect::to(target).into_response()
            }
            WebError::InvalidCredentials => {
                Redirect::to("/login?message=Invalid+username+or+password").into_response()
            }
            WebError::Store(e) => {
                // The cause stays in the logs; the user gets one message
                // regardless of whether it was a constraint, connectivity,
                // or anything else.
                tracing::error!("store failure: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "There was a problem saving your changes",
                )
                    .into_response()
            }
            WebError::Internal(msg) => {
                tracing::error!("internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "There was a problem saving your changes",
                )
                    .into_response()
            }
        }
    }
}

/// Convert store errors to web errors
///
/// `NotFound` keeps its meaning; everything else is a store failure.
impl From<StoreError> for WebError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => WebError::NotFound,
            other => WebError::Store(other),
        }
    }
}

/// Convert password hashing errors to web errors
impl From<PasswordError> for WebError {
    fn from(err: PasswordError) -> Self {
        WebError::Internal(format!("password operation failed: {}", err))
    }
}

/// Convert session token errors to web errors
impl From<SessionError> for WebError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::CreateError(msg) => {
                WebError::Internal(format!("session token creation failed: {}", msg))
            }
            SessionError::Expired | SessionError::Invalid(_) => WebError::Unauthenticated,
        }
    }
}

/// Flattens validator errors into a `WebError::Validation`
pub fn validation_error(errors: &validator::ValidationErrors) -> WebError {
    let details: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: field.to_string(),
                message: error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "Validation failed".to_string()),
            })
        })
        .collect();

    WebError::Validation(details)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(WebError::NotFound.to_string(), "Not found");
        assert_eq!(
            WebError::DuplicateIdentity("username").to_string(),
            "Duplicate username"
        );
    }

    #[test]
    fn test_store_not_found_becomes_not_found() {
        let err = WebError::from(StoreError::NotFound);
        assert!(matches!(err, WebError::NotFound));
    }

    #[test]
    fn test_store_unavailable_stays_generic() {
        let err = WebError::from(StoreError::Unavailable("connection reset".to_string()));
        assert!(matches!(err, WebError::Store(_)));
    }

    #[test]
    fn test_not_found_response_is_404() {
        let response = WebError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_not_owner_response_redirects() {
        let response = WebError::NotOwner.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }

    #[test]
    fn test_validation_response_is_422() {
        let response = WebError::Validation(vec![FieldError {
            field: "title".to_string(),
            message: "must not be empty".to_string(),
        }])
        .into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
