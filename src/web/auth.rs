// Auth middleware — stateless HMAC-SHA256 session tokens that carry a user id.
//
// Session token format: {user_id_hex}.{timestamp_secs}.{nonce_hex}.{hmac_hex}
//
// The HMAC covers "{user_id_hex}.{timestamp_secs}.{nonce_hex}" signed with
// PEERLINK_SESSION_SECRET. The user id is hex-encoded so ids containing dots
// can't confuse the parser. Tokens are valid for SESSION_TTL_SECS (24 hours).
//
// The token is accepted from the peerlink_session cookie or from an
// `Authorization: Bearer` header.

use axum::extract::{Request, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha256;

use super::{AppState, AuthUser};

type HmacSha256 = Hmac<Sha256>;

/// Session cookie name.
pub const COOKIE_NAME: &str = "peerlink_session";

/// Session lifetime: 24 hours.
pub const SESSION_TTL_SECS: i64 = 86_400;

/// Build a new session token for `user_id`, signed with `secret`.
pub fn create_token(secret: &str, user_id: &str) -> String {
    create_token_at(secret, user_id, chrono::Utc::now().timestamp())
}

fn create_token_at(secret: &str, user_id: &str, timestamp: i64) -> String {
    let mut nonce_bytes = [0u8; 16];
    rand::rng().fill_bytes(&mut nonce_bytes);
    let nonce = hex::encode(nonce_bytes);

    let payload = format!("{}.{timestamp}.{nonce}", hex::encode(user_id));
    let sig = hmac_sign(secret, &payload);

    format!("{payload}.{sig}")
}

/// Verify a session token and return the user id it was issued for.
///
/// `None` if the format is wrong, the HMAC doesn't match, or the token is
/// older than `SESSION_TTL_SECS`.
pub fn verify_token(secret: &str, token: &str) -> Option<String> {
    let parts: Vec<&str> = token.split('.').collect();
    let [user_hex, timestamp_str, nonce, provided_sig] = parts.as_slice() else {
        return None;
    };

    let payload = format!("{user_hex}.{timestamp_str}.{nonce}");
    let expected_sig = hmac_sign(secret, &payload);
    if !constant_time_eq(provided_sig, &expected_sig) {
        return None;
    }

    let timestamp = timestamp_str.parse::<i64>().ok()?;
    let age = chrono::Utc::now().timestamp().saturating_sub(timestamp);
    if !(0..SESSION_TTL_SECS).contains(&age) {
        return None;
    }

    let user_bytes = hex::decode(user_hex).ok()?;
    String::from_utf8(user_bytes).ok()
}

/// Axum middleware: resolve the session to a user id or reject with 401.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let user_id = session_token(request.headers())
        .and_then(|token| verify_token(&state.config.session_secret, token));

    let Some(user_id) = user_id else {
        return super::api_error(StatusCode::UNAUTHORIZED, "Authentication required");
    };

    request.extensions_mut().insert(AuthUser { user_id });
    next.run(request).await
}

/// Build the `Set-Cookie` header value for a new session.
pub fn set_cookie_header(token: &str, secure: bool) -> String {
    let secure_flag = if secure { "; Secure" } else { "" };
    format!(
        "{COOKIE_NAME}={token}; HttpOnly{secure_flag}; SameSite=Strict; Path=/; Max-Age={SESSION_TTL_SECS}"
    )
}

/// Build the `Set-Cookie` header value that clears the session cookie.
pub fn clear_cookie_header() -> String {
    format!("{COOKIE_NAME}=; HttpOnly; SameSite=Strict; Path=/; Max-Age=0")
}

/// Constant-time string comparison to prevent timing attacks.
pub(crate) fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.bytes()
        .zip(b.bytes())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}

// --- Private helpers ---

fn hmac_sign(secret: &str, payload: &str) -> String {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(secret.as_bytes())
        .unwrap_or_else(|_| unreachable!("HMAC accepts any key length"));
    mac.update(payload.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Pull the raw token from the Authorization header or the session cookie.
fn session_token(headers: &HeaderMap) -> Option<&str> {
    if let Some(bearer) = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
    {
        return Some(bearer.trim());
    }

    let cookie_header = headers.get(header::COOKIE)?.to_str().ok()?;
    cookie_header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name.trim() == COOKIE_NAME).then(|| value.trim())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_roundtrip() {
        let secret = "test_secret_32_bytes_long_enough!";
        let token = create_token(secret, "user-42");
        assert_eq!(verify_token(secret, &token).as_deref(), Some("user-42"));
    }

    #[test]
    fn test_user_id_with_dots() {
        let token = create_token("s", "first.last@example.edu");
        assert_eq!(
            verify_token("s", &token).as_deref(),
            Some("first.last@example.edu")
        );
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = create_token("correct_secret", "u1");
        assert!(verify_token("wrong_secret", &token).is_none());
    }

    #[test]
    fn test_swapped_user_rejected() {
        let token = create_token("secret", "u1");
        let forged = token.replacen(&hex::encode("u1"), &hex::encode("u2"), 1);
        assert!(verify_token("secret", &forged).is_none());
    }

    #[test]
    fn test_expired_token_rejected() {
        let old = chrono::Utc::now().timestamp() - SESSION_TTL_SECS - 10;
        let token = create_token_at("secret", "u1", old);
        assert!(verify_token("secret", &token).is_none());
    }

    #[test]
    fn test_malformed_token_rejected() {
        assert!(verify_token("secret", "not.a.valid.token.format").is_none());
        assert!(verify_token("secret", "").is_none());
        assert!(verify_token("secret", "onlytwoparts.here").is_none());
    }

    #[test]
    fn test_token_from_bearer_or_cookie() {
        let mut headers = HeaderMap::new();
        assert!(session_token(&headers).is_none());

        headers.insert(
            header::COOKIE,
            "theme=dark; peerlink_session=abc.def".parse().unwrap(),
        );
        assert_eq!(session_token(&headers), Some("abc.def"));

        headers.insert(header::AUTHORIZATION, "Bearer xyz".parse().unwrap());
        assert_eq!(session_token(&headers), Some("xyz"));
    }
}
