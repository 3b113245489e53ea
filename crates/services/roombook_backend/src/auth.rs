// --- File: crates/services/roombook_backend/src/auth.rs ---
use http::{header::AUTHORIZATION, HeaderMap};
use roombook_common::RoombookError;
use roombook_slots::Role;
use roombook_store::Session;

/// Header carrying the role the store reported at login.
pub const ROLE_HEADER: &str = "x-roombook-role";

/// Rebuilds the caller's store session from request headers.
///
/// The token goes to the store verbatim. The role header only unlocks the
/// relaxed local checks for administrators; the store enforces its own.
pub fn session_from_headers(headers: &HeaderMap) -> Result<Session, RoombookError> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| RoombookError::Unauthorized("Not logged in".to_string()))?;

    Ok(Session::new(token, role_from_headers(headers)))
}

/// Role named by [`ROLE_HEADER`]. Anything but `admin` is an ordinary user.
pub fn role_from_headers(headers: &HeaderMap) -> Role {
    match headers.get(ROLE_HEADER).and_then(|value| value.to_str().ok()) {
        Some(role) if role.trim().eq_ignore_ascii_case("admin") => Role::Admin,
        _ => Role::User,
    }
}
