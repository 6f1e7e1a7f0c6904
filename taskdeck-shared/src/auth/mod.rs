/// Authentication primitives for Taskdeck
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`session`]: Signed session tokens and the request identity type
///
/// Passwords are hashed with Argon2id and only the hash is ever persisted.
/// Session identity is a signed HS256 token carried in an HttpOnly cookie;
/// the token holds the user id, nothing else is stored server-side.

pub mod password;
pub mod session;
