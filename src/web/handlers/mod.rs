// HTTP handlers, one module per resource.

pub mod auth;
pub mod profile;
pub mod recommendations;

use axum::http::StatusCode;
use axum::response::Response;

use crate::db::models::UserRecord;
use crate::web::{api_error, AppState};

/// Load the authenticated requester's profile row.
///
/// Maps a missing row to 404 and a storage failure to 500 (logged), so
/// handlers can `match` straight into a response.
pub(crate) async fn load_requester(
    state: &AppState,
    user_id: &str,
    failure_message: &str,
) -> Result<UserRecord, Response> {
    match state.db.get_user(user_id).await {
        Ok(Some(user)) => Ok(user),
        Ok(None) => Err(api_error(StatusCode::NOT_FOUND, "User profile not found")),
        Err(e) => {
            tracing::error!(error = %e, user_id = %user_id, "DB error loading profile");
            Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, failure_message))
        }
    }
}
