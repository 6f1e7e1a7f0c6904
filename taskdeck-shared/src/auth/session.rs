/// Session token generation and validation
///
/// A session is a signed HS256 token carried in an HttpOnly cookie. It is
/// established at login, cleared at logout, and expires after seven days.
/// The token holds only the user id; every request re-derives the identity
/// from it, so there is no server-side session store.
///
/// # Example
///
/// ```
/// use taskdeck_shared::auth::session::{issue_session, validate_session};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let secret = "session-secret-key-at-least-32-bytes";
/// let user_id = Uuid::new_v4();
///
/// let token = issue_session(user_id, secret)?;
/// let claims = validate_session(&token, secret)?;
/// assert_eq!(claims.sub, user_id);
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Name of the cookie carrying the session token
pub const SESSION_COOKIE: &str = "taskdeck_session";

/// Token issuer claim
const ISSUER: &str = "taskdeck";

/// How long a session stays valid after login
pub fn session_lifetime() -> Duration {
    Duration::days(7)
}

/// Error type for session token operations
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Failed to create token
    #[error("Failed to create session token: {0}")]
    CreateError(String),

    /// Token is expired
    #[error("Session has expired")]
    Expired,

    /// Token failed validation (bad signature, issuer, or format)
    #[error("Invalid session token: {0}")]
    Invalid(String),
}

/// Claims carried by a session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject - user ID
    pub sub: Uuid,

    /// Issuer - always "taskdeck"
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl SessionClaims {
    /// Creates claims for a fresh session
    pub fn new(user_id: Uuid) -> Self {
        let now = Utc::now();

        Self {
            sub: user_id,
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: (now + session_lifetime()).timestamp(),
        }
    }
}

/// The authenticated identity attached to a request
///
/// Inserted into request extensions by the session middleware after the
/// cookie validates; handlers extract it instead of reading any ambient
/// state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser(pub Uuid);

/// Issues a signed session token for a user
///
/// # Errors
///
/// Returns `SessionError::CreateError` if encoding fails.
pub fn issue_session(user_id: Uuid, secret: &str) -> Result<String, SessionError> {
    let claims = SessionClaims::new(user_id);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&Header::new(Algorithm::HS256), &claims, &key)
        .map_err(|e| SessionError::CreateError(format!("Token encoding failed: {}", e)))
}

/// Validates a session token and extracts its claims
///
/// Verifies the signature, expiration, and issuer.
///
/// # Errors
///
/// Returns `SessionError::Expired` for an expired token, otherwise
/// `SessionError::Invalid`.
pub fn validate_session(token: &str, secret: &str) -> Result<SessionClaims, SessionError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.validate_exp = true;

    let token_data = decode::<SessionClaims>(token, &key, &validation).map_err(|e| {
        match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => SessionError::Expired,
            _ => SessionError::Invalid(format!("Token validation failed: {}", e)),
        }
    })?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-session-secret-at-least-32-bytes-long";

    #[test]
    fn test_issue_and_validate_session() {
        let user_id = Uuid::new_v4();

        let token = issue_session(user_id, SECRET).expect("Should issue token");
        let claims = validate_session(&token, SECRET).expect("Should validate token");

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.iss, "taskdeck");
    }

    #[test]
    fn test_validate_with_wrong_secret() {
        let token = issue_session(Uuid::new_v4(), SECRET).expect("Should issue token");

        let result = validate_session(&token, "some-other-secret-of-sufficient-len");
        assert!(matches!(result, Err(SessionError::Invalid(_))));
    }

    #[test]
    fn test_validate_garbage_token() {
        let result = validate_session("not-a-token", SECRET);
        assert!(matches!(result, Err(SessionError::Invalid(_))));
    }

    #[test]
    fn test_expired_session_rejected() {
        let claims = SessionClaims {
            sub: Uuid::new_v4(),
            iss: "taskdeck".to_string(),
            iat: Utc::now().timestamp() - 120,
            exp: Utc::now().timestamp() - 90,
        };

        let key = EncodingKey::from_secret(SECRET.as_bytes());
        let token = encode(&Header::new(Algorithm::HS256), &claims, &key).unwrap();

        let result = validate_session(&token, SECRET);
        assert!(matches!(result, Err(SessionError::Expired)));
    }

    #[test]
    fn test_session_lifetime_is_seven_days() {
        let claims = SessionClaims::new(Uuid::new_v4());
        let lifetime = claims.exp - claims.iat;
        assert_eq!(lifetime, 7 * 24 * 3600);
    }
}
