//! Login and session-token handling.
//!
//! Sessions are HS256-signed JWTs with a fixed 24-hour expiry. The payload
//! carries the employee's identity plus the permission set resolved at
//! login, so the navigation gate never needs a database round trip. An
//! expired or tampered token decodes to `None` and is treated exactly like
//! having no session at all.
//!
//! Passwords are compared as plaintext, carried over verbatim from the
//! system this replaces. Known security defect; flagged, not remediated.

use crate::{
    core::{employee, permissions},
    errors::{Error, Result},
};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// How long a session token stays valid.
pub const SESSION_TTL_HOURS: i64 = 24;

/// Non-sensitive employee data carried in the session token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// Employee id
    pub id: i64,
    /// Employee name
    pub name: String,
    /// Login email
    pub email: String,
    /// Job role
    pub role: String,
    /// Permission group, if any
    pub group_id: Option<i64>,
    /// Route prefixes resolved at login
    pub permissions: Vec<String>,
}

#[derive(Serialize, Deserialize)]
struct SessionClaims {
    user: SessionUser,
    iat: i64,
    exp: i64,
}

/// Authenticates an employee and issues a signed session token.
///
/// Looks the employee up by email, compares the password, resolves the
/// caller's permission set (Manager role or group list), and returns the
/// session user together with its encoded token. Every failure mode - bad
/// shape, unknown email, wrong password - collapses into the same generic
/// invalid-credentials error.
///
/// # Errors
/// Returns `InvalidCredentials` on any authentication failure, or a
/// database/token error if the lookup or signing fails.
pub async fn login(
    db: &DatabaseConnection,
    email: &str,
    password: &str,
    secret: &[u8],
) -> Result<(SessionUser, String)> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(Error::InvalidCredentials);
    }

    let Some(found) = employee::get_employee_by_email(db, email.trim()).await? else {
        warn!(email = email.trim(), "login attempt for unknown email");
        return Err(Error::InvalidCredentials);
    };

    // Plaintext comparison, carried over from the original system.
    if found.password != password {
        warn!(employee_id = found.id, "login attempt with wrong password");
        return Err(Error::InvalidCredentials);
    }

    let resolved = permissions::resolve_permissions(db, &found.role, found.group_id).await?;

    let user = SessionUser {
        id: found.id,
        name: found.name,
        email: found.email,
        role: found.role,
        group_id: found.group_id,
        permissions: resolved,
    };

    let token = encode_session(&user, secret)?;
    info!(employee_id = user.id, "login succeeded");
    Ok((user, token))
}

/// Signs a session token for the given user, expiring in
/// [`SESSION_TTL_HOURS`].
///
/// # Errors
/// Returns a token error if signing fails.
pub fn encode_session(user: &SessionUser, secret: &[u8]) -> Result<String> {
    let now = chrono::Utc::now();
    let claims = SessionClaims {
        user: user.clone(),
        iat: now.timestamp(),
        exp: (now + chrono::Duration::hours(SESSION_TTL_HOURS)).timestamp(),
    };
    encode_claims(&claims, secret)
}

fn encode_claims(claims: &SessionClaims, secret: &[u8]) -> Result<String> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(Into::into)
}

/// Decodes and verifies a session token.
///
/// Returns the session user on success. An expired, malformed, or tampered
/// token returns `None` - identical to having no session, never an error.
#[must_use]
pub fn decode_session(token: &str, secret: &[u8]) -> Option<SessionUser> {
    decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret),
        &Validation::new(Algorithm::HS256),
    )
    .ok()
    .map(|data| data.claims.user)
}
