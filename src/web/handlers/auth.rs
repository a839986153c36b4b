// Auth handlers — POST /api/login and POST /api/logout.
//
// Login: checks PEERLINK_WEB_PASSWORD (constant-time) and that the user row
// exists, then sets a signed session cookie for that user. Identity providers
// live upstream; this is the shared-password entry point for staging and
// local runs.
//
// Logout: clears the session cookie.

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::web::auth::{clear_cookie_header, constant_time_eq, create_token, set_cookie_header};
use crate::web::{api_error, AppState};

#[derive(Deserialize)]
pub struct LoginRequest {
    user_id: String,
    password: String,
}

/// POST /api/login — authenticate as `user_id` with the shared password.
///
/// On success: 200 with a session cookie and the token in the body.
/// On failure: 401. Unknown users get the same 401 as a wrong password.
pub async fn login(State(state): State<AppState>, Json(body): Json<LoginRequest>) -> Response {
    let expected = &state.config.web_password;
    if expected.is_empty() || !constant_time_eq(expected, &body.password) {
        return api_error(StatusCode::UNAUTHORIZED, "Invalid credentials");
    }

    match state.db.get_user(&body.user_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return api_error(StatusCode::UNAUTHORIZED, "Invalid credentials"),
        Err(e) => {
            tracing::error!(error = %e, user_id = %body.user_id, "DB error during login");
            return api_error(StatusCode::INTERNAL_SERVER_ERROR, "Database error");
        }
    }

    let token = create_token(&state.config.session_secret, &body.user_id);
    // TLS terminates at the proxy, so the server can't tell; leave Secure off.
    let cookie = set_cookie_header(&token, false);

    (
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(serde_json::json!({ "message": "Authenticated", "token": token })),
    )
        .into_response()
}

/// POST /api/logout — clear the session cookie.
pub async fn logout() -> Response {
    let cookie = clear_cookie_header();
    (
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(serde_json::json!({ "message": "Logged out" })),
    )
        .into_response()
}
